use std::time::Duration;

use glam::{DVec2, Mat4, Quat, Vec2, Vec3};
use infinigrid_common::{Rect, Viewport, map_range};
use infinigrid_scroll::ScrollState;

use crate::hover::HoverTween;

/// Depth every plane sits at, just in front of the focal plane.
pub const PLANE_Z: f32 = 1.0;
/// Input range of the parallax pivot.
pub const PARALLAX_IN: (f32, f32) = (-1.15, 1.15);
/// Output range of the parallax offset. Deliberately lopsided.
pub const PARALLAX_OUT: (f32, f32) = (-0.005, 0.01);

const PIVOT_SCROLL_DIVISOR: f64 = 100.0;
const PIVOT_FACTOR: f64 = 0.05;

/// Shader inputs for one plane. The texture is bound separately by the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneUniforms {
    pub offset: Vec2,
    pub alpha: f32,
    /// On-screen size of the plane in pixels.
    pub plane_sizes: Vec2,
    /// Native size of the image.
    pub image_sizes: Vec2,
    pub zoom: f32,
    pub parallax: Vec2,
    /// Scroll smear strength per axis.
    pub strength: Vec2,
    pub gray: f32,
    pub velo: f32,
    pub viewport_sizes: Vec2,
    /// Hover blend factor in `[0, 1]`.
    pub hover: f32,
}

impl PlaneUniforms {
    fn initial(viewport: Viewport) -> Self {
        Self {
            offset: Vec2::ZERO,
            alpha: 1.0,
            plane_sizes: Vec2::ZERO,
            image_sizes: Vec2::ZERO,
            zoom: 0.85,
            parallax: Vec2::ZERO,
            strength: Vec2::ZERO,
            gray: 1.0,
            velo: 0.0,
            viewport_sizes: viewport.size(),
            hover: 0.0,
        }
    }
}

/// Parallax offset for a plane at `position` given the eased scroll.
pub fn parallax_for(position: Vec2, scroll_current: DVec2) -> Vec2 {
    let pivot =
        ((position.as_dvec2() - scroll_current / PIVOT_SCROLL_DIVISOR) * PIVOT_FACTOR).as_vec2();
    let (in_min, in_max) = PARALLAX_IN;
    let (out_min, out_max) = PARALLAX_OUT;
    Vec2::new(
        map_range(pivot.x, in_min, in_max, out_min, out_max),
        map_range(pivot.y, in_min, in_max, out_min, out_max),
    )
}

/// A textured quad overlaying one gallery item.
///
/// World coordinates are pixels centred on the viewport with `+Y` up, so a
/// plane's position is its item's rect centre flipped into that space.
#[derive(Debug, Clone)]
pub struct Plane {
    index: usize,
    image_size: Vec2,
    rect: Rect,
    position: Vec3,
    scale: Vec3,
    uniforms: PlaneUniforms,
    hover: HoverTween,
    hovered: bool,
}

impl Plane {
    /// Create a plane for image `index` with native size `image_size`.
    pub fn new(index: usize, image_size: (u32, u32), rect: Rect, viewport: Viewport) -> Self {
        let mut plane = Self {
            index,
            image_size: Vec2::new(image_size.0 as f32, image_size.1 as f32),
            rect,
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            uniforms: PlaneUniforms::initial(viewport),
            hover: HoverTween::default(),
            hovered: false,
        };
        plane.apply_rect(rect, viewport);
        plane
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn uniforms(&self) -> &PlaneUniforms {
        &self.uniforms
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether a screen point falls on this plane's item.
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }

    fn apply_rect(&mut self, rect: Rect, viewport: Viewport) {
        self.rect = rect;
        let center = viewport.center();
        let offset = Vec2::new(
            rect.left - center.x + rect.width / 2.0,
            -rect.top + center.y - rect.height / 2.0,
        );
        self.position = Vec3::new(offset.x, offset.y, PLANE_Z);
        self.scale = Vec3::new(rect.width, rect.height, 1.0);
    }

    /// Sync to this frame's item rect and scroll state.
    pub fn update(&mut self, rect: Rect, viewport: Viewport, scroll: &ScrollState) {
        self.apply_rect(rect, viewport);

        let u = &mut self.uniforms;
        u.image_sizes = self.image_size;
        u.plane_sizes = Vec2::new(self.scale.x, self.scale.y);
        u.viewport_sizes = viewport.size();
        u.parallax = parallax_for(self.position.truncate(), scroll.current());
        u.strength = scroll.strength();
    }

    /// Report whether the pointer is over this plane. Returns `true` on a change.
    pub fn set_hovered(&mut self, hovered: bool) -> bool {
        if hovered == self.hovered {
            return false;
        }
        self.hovered = hovered;
        self.hover.animate_to(if hovered { 1.0 } else { 0.0 });
        tracing::debug!(plane = self.index, hovered, "hover changed");
        true
    }

    /// Advance the hover tween and publish its value.
    pub fn tick_hover(&mut self, dt: Duration) {
        self.hover.tick(dt);
        self.uniforms.hover = self.hover.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::HOVER_DURATION;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 800.0)
    }

    #[test]
    fn initial_uniforms() {
        let plane = Plane::new(3, (640, 480), Rect::new(0.0, 0.0, 100.0, 100.0), viewport());
        let u = plane.uniforms();
        assert_eq!(plane.index(), 3);
        assert_eq!(u.alpha, 1.0);
        assert_eq!(u.zoom, 0.85);
        assert_eq!(u.gray, 1.0);
        assert_eq!(u.velo, 0.0);
        assert_eq!(u.hover, 0.0);
        assert_eq!(u.offset, Vec2::ZERO);
        assert_eq!(u.viewport_sizes, Vec2::new(1000.0, 800.0));
    }

    #[test]
    fn mirrors_rect_in_centered_pixel_space() {
        let mut plane = Plane::new(0, (1, 1), Rect::default(), viewport());
        let scroll = ScrollState::default();
        plane.update(Rect::new(100.0, 50.0, 200.0, 300.0), viewport(), &scroll);

        // Centre of the rect is (200, 200); viewport centre is (500, 400).
        assert_eq!(plane.position(), Vec3::new(-300.0, 200.0, PLANE_Z));
        assert_eq!(plane.scale(), Vec3::new(200.0, 300.0, 1.0));
        assert_eq!(plane.uniforms().plane_sizes, Vec2::new(200.0, 300.0));
    }

    #[test]
    fn centered_rect_sits_on_axis() {
        let vp = viewport();
        let plane = Plane::new(0, (1, 1), Rect::new(400.0, 300.0, 200.0, 200.0), vp);
        assert_eq!(plane.position().truncate(), Vec2::ZERO);
    }

    #[test]
    fn image_sizes_are_native() {
        let mut plane = Plane::new(0, (1920, 1080), Rect::default(), viewport());
        plane.update(Rect::new(0.0, 0.0, 10.0, 10.0), viewport(), &ScrollState::default());
        assert_eq!(plane.uniforms().image_sizes, Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn parallax_midpoint_and_edges() {
        let mid = parallax_for(Vec2::ZERO, DVec2::ZERO);
        assert_close(mid.x, 0.0025);
        assert_close(mid.y, 0.0025);

        // pivot = position * 0.05, so +-23 px hits the range ends.
        let edges = parallax_for(Vec2::new(-23.0, 23.0), DVec2::ZERO);
        assert_close(edges.x, -0.005);
        assert_close(edges.y, 0.01);
    }

    #[test]
    fn parallax_accounts_for_scroll() {
        // Scrolling by 2300 shifts the pivot by -1.15.
        let p = parallax_for(Vec2::ZERO, DVec2::new(2300.0, 0.0));
        assert_close(p.x, -0.005);
    }

    #[test]
    fn strength_follows_scroll_gap() {
        let mut scroll = ScrollState::default();
        scroll.nudge(Vec2::new(100.0, -20.0));
        let mut plane = Plane::new(0, (1, 1), Rect::default(), viewport());
        plane.update(Rect::default(), viewport(), &scroll);
        let s = plane.uniforms().strength;
        assert_close(s.x, 45.0);
        assert_close(s.y, 9.0);
    }

    #[test]
    fn hover_animates_uniform() {
        let mut plane = Plane::new(0, (1, 1), Rect::new(0.0, 0.0, 50.0, 50.0), viewport());
        assert!(plane.contains(Vec2::new(10.0, 10.0)));
        assert!(plane.set_hovered(true));
        assert!(!plane.set_hovered(true));

        plane.tick_hover(Duration::from_millis(500));
        let partway = plane.uniforms().hover;
        assert!(partway > 0.0 && partway < 1.0);

        plane.tick_hover(HOVER_DURATION);
        assert_eq!(plane.uniforms().hover, 1.0);

        assert!(plane.set_hovered(false));
        plane.tick_hover(HOVER_DURATION);
        assert_eq!(plane.uniforms().hover, 0.0);
    }

    #[test]
    fn model_matrix_places_unit_quad_on_rect() {
        let vp = viewport();
        let plane = Plane::new(0, (1, 1), Rect::new(0.0, 0.0, 100.0, 80.0), vp);
        let corner = plane.model_matrix().transform_point3(Vec3::new(-0.5, 0.5, 0.0));
        // Top-left of the rect in centred space.
        assert_eq!(corner, Vec3::new(-500.0, 400.0, PLANE_Z));
    }
}
