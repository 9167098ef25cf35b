/// WGSL shader for gallery planes.
///
/// The vertex stage bows the quad toward the camera in proportion to the
/// scroll strength. The fragment stage cover-fits the image into the plane,
/// applies zoom and parallax, and fades from grayscale to colour on hover.
pub const PLANE_SHADER: &str = r#"
const PI: f32 = 3.141592653589793;

struct Camera {
    view_proj: mat4x4<f32>,
};

struct Plane {
    model: mat4x4<f32>,
    offset: vec2<f32>,
    plane_sizes: vec2<f32>,
    image_sizes: vec2<f32>,
    parallax: vec2<f32>,
    strength: vec2<f32>,
    viewport_sizes: vec2<f32>,
    alpha: f32,
    zoom: f32,
    gray: f32,
    velo: f32,
    hover: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> plane: Plane;
@group(1) @binding(1)
var t_image: texture_2d<f32>;
@group(1) @binding(2)
var s_image: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var world = plane.model * vec4<f32>(vertex.position, 1.0);

    // Planes further from the screen centre bend harder.
    let from_centre = world.xy / max(plane.viewport_sizes * 0.5, vec2<f32>(1.0));
    let bow_x = sin(vertex.uv.y * PI) * plane.strength.x * abs(from_centre.x);
    let bow_y = sin(vertex.uv.x * PI) * plane.strength.y * abs(from_centre.y);
    world.z = world.z + bow_x + bow_y;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world;
    out.uv = vertex.uv;
    return out;
}

fn cover_uv(uv: vec2<f32>) -> vec2<f32> {
    let plane_aspect = plane.plane_sizes.x / max(plane.plane_sizes.y, 1.0);
    let image_aspect = plane.image_sizes.x / max(plane.image_sizes.y, 1.0);
    let ratio = vec2<f32>(
        min(plane_aspect / image_aspect, 1.0),
        min(image_aspect / plane_aspect, 1.0),
    );
    return uv * ratio + (vec2<f32>(1.0) - ratio) * 0.5;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let zoom = mix(plane.zoom, 1.0, plane.hover);
    var uv = (cover_uv(in.uv) - vec2<f32>(0.5)) * zoom + vec2<f32>(0.5);
    uv = uv + plane.parallax;

    let color = textureSample(t_image, s_image, uv);
    let luma = dot(color.rgb, vec3<f32>(0.299, 0.587, 0.114));
    let rgb = mix(color.rgb, vec3<f32>(luma), plane.gray * (1.0 - plane.hover));
    return vec4<f32>(rgb, color.a * plane.alpha);
}
"#;
