/// Fixed-period tick scheduler.
///
/// The engine ticks every `period_ms` regardless of how much time actually
/// elapsed. Physics is never scaled by frame time; this only decides how many
/// whole ticks are due.
pub struct FixedTimestep {
    /// The fixed period per tick in milliseconds.
    period_ms: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Maximum ticks returned by one `accumulate` call.
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(period_ms: u32, max_steps: u32) -> Self {
        Self {
            period_ms: period_ms.max(1) as f32,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add elapsed wall time. Returns the number of ticks to run.
    pub fn accumulate(&mut self, elapsed_ms: f32) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulator += elapsed_ms;
        }
        // Cap to prevent spiral of death
        self.accumulator = self.accumulator.min(self.period_ms * self.max_steps as f32);
        let steps = (self.accumulator / self.period_ms) as u32;
        self.accumulator -= steps as f32 * self.period_ms;
        steps
    }

    /// Drop any partially accumulated time.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }
}
