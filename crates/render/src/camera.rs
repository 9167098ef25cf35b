use glam::{Mat4, Vec3};
use infinigrid_common::Viewport;

/// Distance from the camera to the plane where one unit equals one pixel.
pub const CAMERA_DISTANCE: f32 = 1000.0;

/// Perspective camera looking down `-Z` whose field of view is chosen so
/// that the `z = 0` plane maps 1:1 onto the viewport in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            fov: pixel_fov(viewport.height),
            aspect: viewport.aspect_ratio(),
            near: 1.0,
            far: CAMERA_DISTANCE,
        }
    }

    /// Recompute aspect and field of view for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect_ratio();
        self.fov = pixel_fov(viewport.height);
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov.to_degrees()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Field of view that makes the viewport height span exactly
/// `height` world units at [`CAMERA_DISTANCE`].
fn pixel_fov(height: f32) -> f32 {
    2.0 * ((height.max(1.0) / 2.0) / CAMERA_DISTANCE).atan()
}
