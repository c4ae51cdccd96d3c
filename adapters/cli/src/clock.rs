//! Fixed-step accumulator pacing the simulation against wall-clock time.

use std::time::Duration;

/// Converts elapsed wall-clock time into a whole number of simulation ticks.
#[derive(Debug)]
pub(crate) struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    /// Creates an accumulator releasing one tick per `step`.
    pub(crate) fn new(step: Duration) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    ///
    /// The remainder carries into the next call.
    pub(crate) fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.accumulator += elapsed;
        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }

    /// Wall-clock time left before the next tick is due.
    pub(crate) fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }
}
