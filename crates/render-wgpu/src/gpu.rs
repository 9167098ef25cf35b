use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use infinigrid_assets::ImageData;
use infinigrid_render::{FrameView, Plane};
use wgpu::util::DeviceExt;

/// Subdivisions per side of the plane mesh, enough for a smooth bend.
pub const PLANE_SEGMENTS: u32 = 100;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// GPU layout of one plane's uniforms. Mirrors `Plane` in the WGSL source.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct PlaneUniformsRaw {
    model: [[f32; 4]; 4],
    offset: [f32; 2],
    plane_sizes: [f32; 2],
    image_sizes: [f32; 2],
    parallax: [f32; 2],
    strength: [f32; 2],
    viewport_sizes: [f32; 2],
    alpha: f32,
    zoom: f32,
    gray: f32,
    velo: f32,
    hover: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
}

impl PlaneUniformsRaw {
    fn from_plane(plane: &Plane) -> Self {
        let u = plane.uniforms();
        Self {
            model: plane.model_matrix().to_cols_array_2d(),
            offset: u.offset.to_array(),
            plane_sizes: u.plane_sizes.to_array(),
            image_sizes: u.image_sizes.to_array(),
            parallax: u.parallax.to_array(),
            strength: u.strength.to_array(),
            viewport_sizes: u.viewport_sizes.to_array(),
            alpha: u.alpha,
            zoom: u.zoom,
            gray: u.gray,
            velo: u.velo,
            hover: u.hover,
            _pad0: 0.0,
            _pad1: 0.0,
            _pad2: 0.0,
        }
    }
}

/// Generate a unit quad in the XY plane split into `segments` x `segments`
/// cells. UV `(0, 0)` is the top-left corner.
fn plane_mesh(segments: u32) -> (Vec<Vertex>, Vec<u32>) {
    let segments = segments.max(1);
    let row = segments + 1;
    let mut vertices = Vec::with_capacity((row * row) as usize);
    for j in 0..=segments {
        let v = j as f32 / segments as f32;
        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            vertices.push(Vertex {
                position: [u - 0.5, 0.5 - v, 0.0],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for j in 0..segments {
        for i in 0..segments {
            let a = j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    (vertices, indices)
}

/// Per-plane GPU resources.
struct PlaneGpu {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// wgpu-based gallery renderer.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    planes: Vec<PlaneGpu>,
}

impl WgpuRenderer {
    /// Build the pipeline and upload one texture per image, in gallery order.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        images: &[ImageData],
    ) -> Self {
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera_buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms {
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let plane_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("plane_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("plane_pipeline_layout"),
            bind_group_layouts: &[&camera_layout, &plane_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("plane_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::PLANE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("plane_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Both faces are drawn.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (vertices, indices) = plane_mesh(PLANE_SEGMENTS);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("plane_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let max_dimension = device.limits().max_texture_dimension_2d;
        let planes = images
            .iter()
            .enumerate()
            .map(|(index, image)| {
                let texture_view = upload_texture(device, queue, index, image, max_dimension);
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("plane_uniform_buffer"),
                    size: std::mem::size_of::<PlaneUniformsRaw>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("plane_bind_group"),
                    layout: &plane_layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::TextureView(&texture_view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 2,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                });
                PlaneGpu {
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect::<Vec<_>>();

        tracing::info!(
            planes = planes.len(),
            format = ?surface_format,
            "wgpu renderer ready"
        );

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            planes,
        }
    }

    /// Render one frame: clear to transparent, then one draw per plane.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        frame: &FrameView<'_>,
    ) {
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms {
                view_proj: frame.camera.view_projection().to_cols_array_2d(),
            }),
        );
        for (gpu, plane) in self.planes.iter().zip(frame.planes) {
            queue.write_buffer(
                &gpu.uniform_buffer,
                0,
                bytemuck::bytes_of(&PlaneUniformsRaw::from_plane(plane)),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gallery_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.camera_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for gpu in self.planes.iter().take(frame.planes.len()) {
                pass.set_bind_group(1, &gpu.bind_group, &[]);
                pass.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

/// Upload one image, downscaled to fit `max_dimension` if the device needs it.
fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    index: usize,
    image: &ImageData,
    max_dimension: u32,
) -> wgpu::TextureView {
    let texels = image.texels(max_dimension);
    let size = wgpu::Extent3d {
        width: texels.width,
        height: texels.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("plane_texture"),
        size,
        // No mipmaps, images are shown near native size.
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &texels.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * size.width),
            rows_per_image: Some(size.height),
        },
        size,
    );
    tracing::debug!(
        plane = index,
        width = size.width,
        height = size.height,
        downscaled = size.width != image.width.max(1) || size.height != image.height.max(1),
        placeholder = image.placeholder,
        "texture uploaded"
    );
    texture.create_view(&Default::default())
}
