use glam::Vec2;

use crate::wheel::WheelDelta;

/// A platform-neutral input event the router understands.
///
/// Mouse buttons and touches both become pointer events, so a drag with
/// either device follows the same path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel or trackpad scroll.
    Wheel(WheelDelta),
    /// Pointer pressed or touch started, at screen coordinates.
    PointerDown(Vec2),
    /// Pointer or touch moved, at screen coordinates.
    PointerMove(Vec2),
    /// Pointer released, touch ended or cancelled.
    PointerUp,
}
