//! Fixed-rate scheduling on top of display refresh callbacks

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};

/// Turns refresh timestamps into a whole number of fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    tick_dt: f32,
    accumulator: f32,
    /// Timestamp of the previous frame (ms), None before the first frame
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new(tick_dt: f32) -> Self {
        Self {
            tick_dt,
            accumulator: 0.0,
            last_time: None,
        }
    }

    /// Feed a frame timestamp in milliseconds; returns how many ticks to run.
    ///
    /// The first frame always runs exactly one tick. Long stalls are clamped
    /// so a hidden tab does not fast-forward the game.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => self.tick_dt,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.tick_dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than carry it into the next frame
            self.accumulator = self.accumulator.min(self.tick_dt);
        }
        substeps
    }

    /// Forget timing history (after a restart or a long pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
