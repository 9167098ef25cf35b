use glam::Vec2;
use infinigrid_scroll::ScrollState;

use crate::event::InputEvent;

/// Turns [`InputEvent`]s into scroll target changes.
///
/// Holds only gesture state (whether a drag is active and where it began);
/// the scroll record itself is passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    dragging: bool,
    start: Vec2,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one event. Returns `true` if the scroll target changed.
    pub fn handle(&mut self, event: InputEvent, scroll: &mut ScrollState) -> bool {
        match event {
            InputEvent::Wheel(delta) => {
                let pixels = delta.normalize();
                scroll.nudge(pixels);
                tracing::trace!(?pixels, scroll_target = ?scroll.target(), "wheel");
                pixels != Vec2::ZERO
            }
            InputEvent::PointerDown(at) => {
                self.dragging = true;
                self.start = at;
                scroll.grab();
                tracing::debug!(?at, "drag start");
                false
            }
            InputEvent::PointerMove(at) => {
                if !self.dragging {
                    return false;
                }
                let before = scroll.target();
                scroll.drag_to(at - self.start);
                scroll.target() != before
            }
            InputEvent::PointerUp => {
                if self.dragging {
                    tracing::debug!(scroll_target = ?scroll.target(), "drag end");
                }
                self.dragging = false;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::WheelDelta;
    use glam::DVec2;

    #[test]
    fn wheel_moves_target_against_delta() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        let changed = router.handle(
            InputEvent::Wheel(WheelDelta::Pixels(Vec2::new(100.0, 0.0))),
            &mut scroll,
        );
        assert!(changed);
        assert_eq!(scroll.target(), DVec2::new(-300.0, 0.0));
    }

    #[test]
    fn line_wheel_uses_normalized_pixels() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        router.handle(
            InputEvent::Wheel(WheelDelta::Lines(Vec2::new(0.0, 1.0))),
            &mut scroll,
        );
        assert_eq!(scroll.target(), DVec2::new(0.0, -120.0));
    }

    #[test]
    fn drag_scales_pointer_distance() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        let x0 = 200.0;
        let y0 = 300.0;

        router.handle(InputEvent::PointerDown(Vec2::new(x0, y0)), &mut scroll);
        assert!(router.is_dragging());
        let position = scroll.position();

        let changed = router.handle(InputEvent::PointerMove(Vec2::new(x0 + 50.0, y0)), &mut scroll);
        assert!(changed);
        assert_eq!(scroll.target().x, position.x + 150.0);
        assert_eq!(scroll.target().y, position.y);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        let changed = router.handle(InputEvent::PointerMove(Vec2::new(500.0, 10.0)), &mut scroll);
        assert!(!changed);
        assert_eq!(scroll.target(), DVec2::ZERO);
    }

    #[test]
    fn release_stops_tracking() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        router.handle(InputEvent::PointerDown(Vec2::ZERO), &mut scroll);
        router.handle(InputEvent::PointerMove(Vec2::new(10.0, 10.0)), &mut scroll);
        router.handle(InputEvent::PointerUp, &mut scroll);
        assert!(!router.is_dragging());

        let target = scroll.target();
        router.handle(InputEvent::PointerMove(Vec2::new(90.0, 90.0)), &mut scroll);
        assert_eq!(scroll.target(), target);
    }

    #[test]
    fn drag_starts_from_eased_position() {
        let mut scroll = ScrollState::default();
        let mut router = InputRouter::new();
        router.handle(
            InputEvent::Wheel(WheelDelta::Pixels(Vec2::new(0.0, 100.0))),
            &mut scroll,
        );
        scroll.step();
        let current = scroll.current();

        router.handle(InputEvent::PointerDown(Vec2::new(0.0, 0.0)), &mut scroll);
        router.handle(InputEvent::PointerMove(Vec2::new(0.0, 10.0)), &mut scroll);
        // The drag is anchored to where the grid visibly is, not the old target.
        assert_eq!(scroll.target(), current + DVec2::new(0.0, 30.0));
    }
}
