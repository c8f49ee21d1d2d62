//! Scheduling context for dispatching rule evaluation.

/// Runtime scheduling state passed to dispatching rules.
///
/// All times are in minutes relative to the opening of the booking
/// window (t=0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingContext {
    /// Current simulation clock.
    pub clock: i64,
}

impl SchedulingContext {
    /// Creates a context at the given time.
    pub fn at_time(clock: i64) -> Self {
        Self { clock }
    }

    /// Advances the clock.
    pub fn advance_to(&mut self, clock: i64) {
        self.clock = clock;
    }
}
