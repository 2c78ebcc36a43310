#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Supplies the per-frame delta time to a frame loop.
///
/// [`tick`](Self::tick) measures wall-clock time; [`advance`](Self::advance)
/// steps by a fixed amount for deterministic playback.
pub struct FrameTimer {
    last_update: Instant,
    /// Time covered by the latest frame
    pub delta: Duration,
    /// Total time covered by all frames
    pub elapsed: Duration,
    /// Number of frames so far
    pub frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Starts a frame measured against the wall clock.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now - self.last_update;
        self.last_update = now;
        self.advance(delta)
    }

    /// Starts a frame of exactly `delta`.
    pub fn advance(&mut self, delta: Duration) -> f32 {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
        self.dt_seconds()
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_steps_accumulate() {
        let mut timer = FrameTimer::new();
        for _ in 0..4 {
            let dt = timer.advance(Duration::from_millis(250));
            assert!((dt - 0.25).abs() < 1e-6);
        }
        assert_eq!(timer.frame_count, 4);
        assert_eq!(timer.elapsed, Duration::from_secs(1));
    }
}
