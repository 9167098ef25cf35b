use std::time::Duration;

/// How long a hover transition takes.
pub const HOVER_DURATION: Duration = Duration::from_secs(2);

/// Cubic ease-out: fast start, slow settle.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Where a [`HoverTween`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverPhase {
    /// Never hovered; value is 0.
    Idle,
    /// Easing from `from` to `to`.
    Animating {
        from: f32,
        to: f32,
        elapsed: Duration,
    },
    /// Resting at a value.
    Settled(f32),
}

/// Time-based tween of the hover blend factor, sampled once per frame.
///
/// Retargeting mid-flight starts the new transition from the current value,
/// so entering and leaving quickly never jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTween {
    phase: HoverPhase,
    duration: Duration,
}

impl Default for HoverTween {
    fn default() -> Self {
        Self::new(HOVER_DURATION)
    }
}

impl HoverTween {
    pub fn new(duration: Duration) -> Self {
        Self {
            phase: HoverPhase::Idle,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
        }
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// Current blend factor in `[0, 1]`.
    pub fn value(&self) -> f32 {
        match self.phase {
            HoverPhase::Idle => 0.0,
            HoverPhase::Animating { from, to, elapsed } => {
                let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
                from + (to - from) * ease_out_cubic(t)
            }
            HoverPhase::Settled(v) => v,
        }
    }

    /// The value this tween is heading to.
    pub fn target(&self) -> f32 {
        match self.phase {
            HoverPhase::Idle => 0.0,
            HoverPhase::Animating { to, .. } => to,
            HoverPhase::Settled(v) => v,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, HoverPhase::Animating { .. })
    }

    /// Start easing toward `to`. A no-op if already heading there.
    pub fn animate_to(&mut self, to: f32) {
        if self.target() == to {
            return;
        }
        self.phase = HoverPhase::Animating {
            from: self.value(),
            to,
            elapsed: Duration::ZERO,
        };
    }

    /// Advance by one frame's worth of time.
    pub fn tick(&mut self, dt: Duration) {
        if let HoverPhase::Animating { from, to, elapsed } = self.phase {
            let elapsed = elapsed.saturating_add(dt);
            self.phase = if elapsed >= self.duration {
                HoverPhase::Settled(to)
            } else {
                HoverPhase::Animating { from, to, elapsed }
            };
        }
    }
}
