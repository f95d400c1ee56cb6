use std::time::Duration;

/// Converts variable frame durations into a whole number of fixed ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickClock {
    step: Duration,
    max_steps: u32,
    accumulator: Duration,
}

impl TickClock {
    /// Creates a clock running at `ticks_per_second`, catching up at most
    /// `max_steps` ticks per frame.
    #[must_use]
    pub fn new(ticks_per_second: u32, max_steps: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / ticks_per_second.max(1),
            max_steps: max_steps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Duration of a single tick.
    #[must_use]
    pub const fn step(&self) -> Duration {
        self.step
    }

    /// Accumulates elapsed frame time and returns the ticks to simulate.
    ///
    /// Time beyond the catch-up limit is discarded.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == self.max_steps && self.accumulator >= self.step {
            self.accumulator = Duration::ZERO;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_partial_frames() {
        let mut clock = TickClock::new(60, 5);
        let half = clock.step() / 2;
        assert_eq!(clock.advance(half), 0);
        assert_eq!(clock.advance(half), 1);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut clock = TickClock::new(60, 5);
        assert_eq!(clock.advance(Duration::from_secs(1)), 5);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn multiple_steps_per_frame() {
        let mut clock = TickClock::new(60, 5);
        let step = clock.step();
        assert_eq!(clock.advance(step * 3), 3);
    }
}
