use anyhow::{Context as _, Result};
use clap::{ArgGroup, Parser};
use egui::Context as EguiContext;
use glam::Vec2;
use infinigrid_assets::{GalleryManifest, ImageData, load_images};
use infinigrid_common::Viewport;
use infinigrid_input::{InputEvent, InputRouter, WheelDelta};
use infinigrid_render_wgpu::WgpuRenderer;
use infinigrid_scene::{FrameLoop, FrameStats, FrameTimer, Gallery, GalleryInspector};
use infinigrid_scroll::ScrollState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{
    ElementState, KeyEvent, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "infinigrid-desktop", about = "Infinite draggable image grid")]
#[command(group(ArgGroup::new("source").required(true).args(["manifest", "images"])))]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Gallery manifest (YAML)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Directory of png/jpg images, used with default settings
    #[arg(long)]
    images: Option<PathBuf>,
}

impl Cli {
    fn load_manifest(&self) -> Result<GalleryManifest> {
        let manifest = match (&self.manifest, &self.images) {
            (Some(path), _) => GalleryManifest::load(path)
                .with_context(|| format!("loading manifest {}", path.display()))?,
            (None, Some(dir)) => GalleryManifest::from_dir(dir)
                .with_context(|| format!("scanning image directory {}", dir.display()))?,
            (None, None) => anyhow::bail!("pass --manifest or --images"),
        };
        Ok(manifest)
    }
}

/// Application state.
///
/// The gallery works in logical pixels, so gap and stagger keep their size
/// on high-density displays. Window events arrive in physical pixels and are
/// divided by `scale_factor` on the way in.
struct AppState {
    title: String,
    initial_size: LogicalSize<u32>,
    window_size: PhysicalSize<u32>,
    scale_factor: f64,
    scroll: ScrollState,
    router: InputRouter,
    gallery: Gallery,
    frame_loop: FrameLoop,
    timer: FrameTimer,
    last_stats: FrameStats,
    show_hud: bool,
    cursor: Option<Vec2>,
    /// Decoded images waiting for GPU upload; emptied once the window exists.
    pending_images: Vec<ImageData>,
}

impl AppState {
    fn new(manifest: GalleryManifest, images: Vec<ImageData>) -> Result<Self> {
        let viewport = Viewport::new(
            manifest.window.width as f32,
            manifest.window.height as f32,
        );
        let scroll = ScrollState::new(manifest.scroll);
        let sizes = images.iter().map(ImageData::size).collect::<Vec<_>>();
        let gallery = Gallery::new(manifest.layout, &sizes, viewport, &scroll)?;

        Ok(Self {
            title: manifest.title,
            initial_size: LogicalSize::new(manifest.window.width, manifest.window.height),
            window_size: PhysicalSize::new(manifest.window.width, manifest.window.height),
            scale_factor: 1.0,
            scroll,
            router: InputRouter::new(),
            gallery,
            frame_loop: FrameLoop::new(),
            timer: FrameTimer::new(120),
            last_stats: FrameStats::default(),
            show_hud: false,
            cursor: None,
            pending_images: images,
        })
    }

    fn input(&mut self, event: InputEvent) {
        if self.router.handle(event, &mut self.scroll) {
            tracing::trace!(?event, scroll_target = ?self.scroll.target(), "scroll target moved");
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let p = position.to_logical::<f32>(self.scale_factor);
        Vec2::new(p.x, p.y)
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let p = self.to_logical(position);
        self.cursor = Some(p);
        self.gallery.set_pointer(Some(p));
        self.input(InputEvent::PointerMove(p));
    }

    fn touch(&mut self, touch: Touch) {
        let p = self.to_logical(touch.location);
        match touch.phase {
            TouchPhase::Started => self.input(InputEvent::PointerDown(p)),
            TouchPhase::Moved => self.input(InputEvent::PointerMove(p)),
            TouchPhase::Ended | TouchPhase::Cancelled => self.input(InputEvent::PointerUp),
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        // winit reports content motion; the scroll model wants wheel travel.
        let delta = match delta {
            MouseScrollDelta::LineDelta(x, y) => WheelDelta::Lines(Vec2::new(-x, -y)),
            MouseScrollDelta::PixelDelta(p) => {
                let p = self.to_logical(p);
                WheelDelta::Pixels(-p)
            }
        };
        self.input(InputEvent::Wheel(delta));
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
        let logical = size.to_logical::<f32>(self.scale_factor);
        self.gallery
            .resize(Viewport::new(logical.width, logical.height));
    }

    fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
        self.resize(self.window_size);
    }

    /// Feed pointer, touch and wheel events to the router.
    ///
    /// Events the HUD consumed are dropped, except ones that end a gesture:
    /// a drag released over the HUD still has to end.
    fn pointer_input(&mut self, event: &WindowEvent, hud_consumed: bool) {
        if hud_consumed && !ends_gesture(event) {
            return;
        }
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.gallery.set_pointer(None);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                if let Some(p) = self.cursor {
                    self.input(InputEvent::PointerDown(p));
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Released,
                ..
            } => self.input(InputEvent::PointerUp),
            WindowEvent::Touch(touch) => self.touch(*touch),
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyCode, event_loop: &ActiveEventLoop) {
        match key {
            KeyCode::F1 => {
                self.show_hud = !self.show_hud;
            }
            KeyCode::Escape => {
                self.frame_loop.stop();
                event_loop.exit();
            }
            _ => {}
        }
    }

    /// Advance one frame. Returns `false` once the loop has stopped.
    fn update(&mut self) -> bool {
        let Some(tick) = self.frame_loop.tick(Instant::now()) else {
            return false;
        };
        self.timer.record(tick.dt);
        self.last_stats = self.gallery.frame(&mut self.scroll, tick.dt);
        true
    }

    fn draw_hud(&self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }

        let summary =
            GalleryInspector::summary(&self.gallery, &self.scroll, self.frame_loop.frames());

        egui::Window::new(self.title.as_str())
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.label(format!(
                    "FPS: {:.0}  ({:.1} ms avg, {:.1} ms max)",
                    self.timer.fps(),
                    self.timer.average().as_secs_f64() * 1000.0,
                    self.timer.max().as_secs_f64() * 1000.0
                ));
                ui.label(format!("Frame: {}", summary.frame));
                ui.separator();
                ui.label(format!(
                    "Scroll: ({:.1}, {:.1})",
                    summary.current[0], summary.current[1]
                ));
                ui.label(format!(
                    "Target: ({:.1}, {:.1})",
                    summary.target[0], summary.target[1]
                ));
                ui.label(format!(
                    "Speed: ({:.2}, {:.2})",
                    summary.speed[0], summary.speed[1]
                ));
                ui.label(if summary.settled { "Settled" } else { "Moving" });
                ui.separator();
                ui.label(format!(
                    "Planes: {}  Visible: {}  Scale: {:.2}",
                    summary.planes, summary.visible, self.scale_factor
                ));
                ui.label(format!(
                    "Column bound: {:.0}  Item bound: {:.0}  Wrap: {:.0}",
                    summary.col_bound, summary.item_bound, summary.wrap_size_x
                ));
                match self.last_stats.hovered {
                    Some(index) => ui.label(format!("Hovered: {index}")),
                    None => ui.label("Hovered: -"),
                };
                let hovered = self
                    .last_stats
                    .hovered
                    .and_then(|index| GalleryInspector::inspect_plane(&self.gallery, index));
                if let Some(info) = hovered {
                    ui.small(info.to_string());
                }
                ui.separator();
                ui.small("F1: Toggle HUD | Drag / Wheel: Scroll | Esc: Quit");
            });
    }
}

/// Left-button release, touch end or touch cancel.
fn ends_gesture(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput {
            button: MouseButton::Left,
            state: ElementState::Released,
            ..
        } | WindowEvent::Touch(Touch {
            phase: TouchPhase::Ended | TouchPhase::Cancelled,
            ..
        })
    )
}

/// Window plus every GPU object tied to it.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(
        event_loop: &ActiveEventLoop,
        state: &AppState,
        egui_ctx: &EguiContext,
    ) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(state.title.as_str())
            .with_inner_size(state.initial_size)
            .with_transparent(true);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("infinigrid_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        // Prefer a compositor mode that lets the transparent clear show through.
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|mode| surface_caps.alpha_modes.contains(mode))
        .or_else(|| surface_caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, surface_format, &state.pending_images);

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?alpha_mode,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    fn draw(&mut self, state: &AppState, egui_ctx: &EguiContext) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            &state.gallery.view(state.frame_loop.frames(), &state.scroll),
        );

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_hud(ctx);
        });

        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.state, &self.egui_ctx) {
            Ok(gpu) => {
                // Textures are on the GPU now.
                self.state.pending_images = Vec::new();
                self.state.window_size = gpu.window.inner_size();
                self.state.set_scale_factor(gpu.window.scale_factor());
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize GPU: {e:#}");
                self.state.frame_loop.stop();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);

        match event {
            WindowEvent::CloseRequested => {
                self.state.frame_loop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size);
                self.state.resize(new_size);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.state.set_scale_factor(scale_factor);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !response.consumed => {
                self.state.handle_key(key, event_loop);
            }
            WindowEvent::RedrawRequested => {
                if !self.state.update() {
                    return;
                }
                gpu.draw(&self.state, &self.egui_ctx);
                gpu.window.request_redraw();
            }
            event => self.state.pointer_input(&event, response.consumed),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.state.frame_loop.is_running() {
            return;
        }
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("infinigrid-desktop starting");

    let manifest = cli.load_manifest()?;
    let images = load_images(&manifest.images);
    let state = AppState::new(manifest, images)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
