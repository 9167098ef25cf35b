use glam::Vec2;

/// Pixels per wheel "line" step.
pub const LINE_HEIGHT: f32 = 40.0;
/// Pixels per wheel "page" step.
pub const PAGE_HEIGHT: f32 = 800.0;

/// A wheel delta as reported by the platform, in whatever unit it chose.
///
/// Sign convention: positive `y` scrolls down (content moves up), positive
/// `x` scrolls right. Embeddings with the opposite convention negate before
/// constructing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelDelta {
    Pixels(Vec2),
    Lines(Vec2),
    Pages(Vec2),
}

impl WheelDelta {
    /// Convert to a pixel delta so every device scrolls at a comparable rate.
    pub fn normalize(self) -> Vec2 {
        match self {
            WheelDelta::Pixels(d) => d,
            WheelDelta::Lines(d) => d * LINE_HEIGHT,
            WheelDelta::Pages(d) => d * PAGE_HEIGHT,
        }
    }
}
