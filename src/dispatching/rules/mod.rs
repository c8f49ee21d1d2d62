//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for higher priority users.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::SimUser;

/// First In, First Out by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, user: &SimUser, _context: &SchedulingContext) -> RuleScore {
        user.arrival_time as f64
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

/// Fastest connection first.
///
/// Users with a higher `speed` are served first.
#[derive(Debug, Clone, Copy)]
pub struct HighestSpeed;

impl DispatchingRule for HighestSpeed {
    fn name(&self) -> &'static str {
        "SPEED"
    }

    fn evaluate(&self, user: &SimUser, _context: &SchedulingContext) -> RuleScore {
        -(user.speed as f64)
    }

    fn description(&self) -> &'static str {
        "Highest Connection Speed"
    }
}

/// Shortest booking time first.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBooking;

impl DispatchingRule for ShortestBooking {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, user: &SimUser, _context: &SchedulingContext) -> RuleScore {
        user.booking_time as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Booking Time First"
    }
}
