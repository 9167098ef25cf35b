use glam::{DVec2, Vec2};
use infinigrid_common::lerp;

use crate::config::ScrollConfig;

/// Multiplier turning the remaining scroll distance into shader smear strength.
pub const STRENGTH_FACTOR: f64 = 0.15;

/// Eased two-axis scroll record.
///
/// Input writes `target`; once per frame [`step`](Self::step) moves `current`
/// a fixed fraction of the way there and records the per-frame `speed`.
/// Given the same sequence of input calls and steps, the state is identical.
///
/// Offsets are held in `f64`. The target is never clamped, and in `f32` the
/// per-frame step falls under one ulp after a few hundred thousand pixels of
/// travel, which freezes `current` short of the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    current: DVec2,
    target: DVec2,
    last: DVec2,
    /// Snapshot of `current` taken when a drag begins.
    position: DVec2,
    speed: DVec2,
    config: ScrollConfig,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollState {
    /// Create a scroll state at rest at the origin.
    pub fn new(config: ScrollConfig) -> Self {
        tracing::debug!(ease = config.ease, scale = config.scale, "scroll state created");
        Self {
            current: DVec2::ZERO,
            target: DVec2::ZERO,
            last: DVec2::ZERO,
            position: DVec2::ZERO,
            speed: DVec2::ZERO,
            config,
        }
    }

    pub fn current(&self) -> DVec2 {
        self.current
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn last(&self) -> DVec2 {
        self.last
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn speed(&self) -> DVec2 {
        self.speed
    }

    pub fn ease(&self) -> f32 {
        self.config.ease
    }

    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    /// Advance one frame: ease `current` toward `target`, then derive `speed`.
    pub fn step(&mut self) {
        let ease = f64::from(self.config.ease);
        self.current = DVec2::new(
            lerp(self.current.x, self.target.x, ease),
            lerp(self.current.y, self.target.y, ease),
        );
        self.speed = self.current - self.last;
        self.last = self.current;
    }

    /// Push the target by a normalized wheel delta.
    pub fn nudge(&mut self, delta: Vec2) {
        self.target -= delta.as_dvec2() * f64::from(self.config.scale);
    }

    /// Snapshot `current` as the origin of a drag gesture.
    pub fn grab(&mut self) {
        self.position = self.current;
    }

    /// Set the target from the pointer distance travelled since [`grab`](Self::grab).
    pub fn drag_to(&mut self, offset: Vec2) {
        self.target = self.position + offset.as_dvec2() * f64::from(self.config.scale);
    }

    /// Distortion strength for the current frame, never negative.
    ///
    /// Narrowed to `f32` for the shader; the gap itself is taken in `f64`.
    pub fn strength(&self) -> Vec2 {
        ((self.target - self.current) * STRENGTH_FACTOR)
            .abs()
            .as_vec2()
    }

    /// Whether `current` is within `epsilon` of `target` on both axes.
    pub fn is_settled(&self, epsilon: f64) -> bool {
        let gap = (self.target - self.current).abs();
        gap.x < epsilon && gap.y < epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_at_rest() {
        let s = ScrollState::default();
        assert_eq!(s.current(), DVec2::ZERO);
        assert_eq!(s.target(), DVec2::ZERO);
        assert_eq!(s.ease(), 0.05);
        assert_eq!(s.scale(), 3.0);
        assert!(s.is_settled(1e-6));
    }

    #[test]
    fn wheel_then_one_frame() {
        let mut s = ScrollState::default();
        s.nudge(Vec2::new(100.0, 0.0));
        assert_eq!(s.target().x, -300.0);

        s.step();
        assert!((s.current().x + 15.0).abs() < 1e-4);
        assert_eq!(s.speed(), s.current());
        assert_eq!(s.last(), s.current());
    }

    #[test]
    fn drag_sets_target_relative_to_snapshot() {
        let mut s = ScrollState::default();
        s.nudge(Vec2::new(0.0, -20.0));
        for _ in 0..10 {
            s.step();
        }
        s.grab();
        let snapshot = s.position();
        assert_eq!(snapshot, s.current());

        s.drag_to(Vec2::new(50.0, 0.0));
        assert_eq!(s.target().x, snapshot.x + 150.0);
        assert_eq!(s.target().y, snapshot.y);
    }

    #[test]
    fn speed_reflects_last_frame_motion() {
        let mut s = ScrollState::default();
        s.nudge(Vec2::new(0.0, 100.0));
        s.step();
        let first = s.current();
        s.step();
        assert_eq!(s.speed(), s.current() - first);
    }

    #[test]
    fn strength_decreases_while_converging() {
        let mut s = ScrollState::default();
        s.nudge(Vec2::new(40.0, -25.0));
        let mut prev = s.strength();
        for _ in 0..50 {
            s.step();
            let next = s.strength();
            assert!(next.x < prev.x);
            assert!(next.y < prev.y);
            prev = next;
        }
    }

    #[test]
    fn settles_a_million_pixels_from_origin() {
        let mut s = ScrollState::default();
        // target.y ends up near 999_996.9
        s.nudge(Vec2::new(0.0, -333_332.3));
        for _ in 0..2000 {
            s.step();
        }
        // A wheel tick after the long scroll must still ease in fully.
        s.nudge(Vec2::new(0.0, 0.5));
        let gap = (s.target().y - s.current().y).abs();
        assert!(gap > 1.0);

        let mut prev = s.strength().y;
        for _ in 0..100 {
            s.step();
            let next = s.strength().y;
            assert!(next < prev);
            prev = next;
        }
        for _ in 0..1000 {
            s.step();
        }
        assert!(s.is_settled(0.01));
    }

    proptest! {
        #[test]
        fn easing_converges_without_overshoot(
            start in -5000.0f64..5000.0,
            goal in -5000.0f64..5000.0,
            ease in 0.01f32..0.99,
        ) {
            let mut s = ScrollState::new(ScrollConfig { ease, scale: 1.0 });
            s.target = DVec2::new(goal, goal);
            s.current = DVec2::new(start, start);
            let mut dist = (goal - start).abs();
            for _ in 0..200 {
                s.step();
                let x = s.current().x;
                // Never crosses the target (allowing float rounding at rest).
                prop_assert!((x - goal) * (start - goal).signum() >= -1e-6);
                let next = (goal - x).abs();
                prop_assert!(next <= dist + 1e-6);
                dist = next;
            }
        }

        #[test]
        fn strength_is_never_negative(dx in -1.0e4f32..1.0e4, dy in -1.0e4f32..1.0e4) {
            let mut s = ScrollState::default();
            s.nudge(Vec2::new(dx, dy));
            s.step();
            let strength = s.strength();
            prop_assert!(strength.x >= 0.0 && strength.y >= 0.0);
        }

        #[test]
        fn far_offsets_still_settle(start in -1.0e7f64..1.0e7, delta in -500.0f32..500.0) {
            prop_assume!(delta.abs() > 1.0);
            let mut s = ScrollState::default();
            s.current = DVec2::splat(start);
            s.last = s.current;
            s.target = s.current;
            s.nudge(Vec2::splat(delta));
            for _ in 0..1000 {
                s.step();
            }
            prop_assert!(s.is_settled(0.01));
        }
    }
}
