use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height. A zero height is treated as one pixel.
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Axis-aligned screen rectangle, the equivalent of a bounding client rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Whether any part of the rect overlaps the viewport.
    pub fn intersects(&self, viewport: &Viewport) -> bool {
        self.right() > 0.0
            && self.left < viewport.width
            && self.bottom() > 0.0
            && self.top < viewport.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_aspect_ratio() {
        let vp = Viewport::new(1600.0, 800.0);
        assert_eq!(vp.aspect_ratio(), 2.0);
        assert_eq!(vp.center(), Vec2::new(800.0, 400.0));
    }

    #[test]
    fn zero_height_viewport_does_not_divide_by_zero() {
        let vp = Viewport::new(100.0, 0.0);
        assert!(vp.aspect_ratio().is_finite());
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(109.9, 69.9)));
        assert!(!r.contains(Vec2::new(110.0, 30.0)));
        assert!(!r.contains(Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn rect_intersects_viewport() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(Rect::new(-50.0, -50.0, 100.0, 100.0).intersects(&vp));
        assert!(!Rect::new(-150.0, 0.0, 100.0, 100.0).intersects(&vp));
        assert!(!Rect::new(0.0, 600.0, 100.0, 100.0).intersects(&vp));
    }
}
