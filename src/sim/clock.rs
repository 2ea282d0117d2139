//! Fixed-rate tick scheduling
//!
//! The host reports elapsed wall time; [`FixedStep`] turns it into a whole
//! number of simulation ticks. Owning a `FixedStep` *is* having a running
//! loop: the session keeps it in an `Option` and stopping is `take()`.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Accumulator for one running tick loop
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add elapsed seconds and return how many ticks are due now
    pub fn accumulate(&mut self, elapsed: f32) -> u32 {
        if !elapsed.is_finite() {
            return 0;
        }
        // Clamp long frames (tab switch, debugger) so we don't fast-forward
        self.accumulator += elapsed.clamp(0.0, 0.1);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            // Drop the backlog instead of spiraling
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }
}
