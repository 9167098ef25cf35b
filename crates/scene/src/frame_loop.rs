use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Longest frame delta handed to animations; longer stalls are clipped.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// One scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// 0-based frame index.
    pub index: u64,
    /// Time since the previous frame, clipped to [`MAX_FRAME_DT`].
    pub dt: Duration,
}

/// Display-refresh-coupled frame scheduler with an explicit stop.
///
/// The embedding calls [`tick`](Self::tick) on every refresh signal; there is
/// no fixed timestep and no frame skipping. After [`stop`](Self::stop) every
/// tick returns `None` so teardown can proceed.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    frames: u64,
    last: Option<Instant>,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            frames: 0,
            last: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Schedule the next frame at `now`, or `None` once stopped.
    pub fn tick(&mut self, now: Instant) -> Option<FrameTick> {
        if self.state == LoopState::Stopped {
            return None;
        }
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last).min(MAX_FRAME_DT))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        let tick = FrameTick {
            index: self.frames,
            dt,
        };
        self.frames += 1;
        Some(tick)
    }

    /// Stop producing frames. Idempotent.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            tracing::info!(frames = self.frames, "frame loop stopped");
        }
        self.state = LoopState::Stopped;
    }
}

/// Rolling window of recent frame times for the HUD.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        self.samples.iter().sum::<Duration>() / self.samples.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Frames per second implied by the average frame time.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}
