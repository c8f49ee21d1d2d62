//! Dispatching rules and rule engine for the booking queue.
//!
//! Provides the priority rules used by the non-preemptive disciplines
//! (arrival order, connection speed, shortest booking) and a composable
//! rule engine that picks the next user from a ready queue.
//!
//! # Usage
//!
//! ```
//! use eventrix_sim::dispatching::{rules, RuleEngine, SchedulingContext};
//! use eventrix_sim::models::SimUser;
//!
//! let engine = RuleEngine::new().with_rule(rules::HighestSpeed);
//! let ready = vec![
//!     SimUser::new(1, 0, 5).with_speed(10),
//!     SimUser::new(2, 0, 3).with_speed(90),
//! ];
//! let best = engine.select_best(&ready, &SchedulingContext::at_time(0));
//! assert_eq!(best, Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::SimUser;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates user priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for users that should be served first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "FIFO", "SJF").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a user given the current scheduling context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, user: &SimUser, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
