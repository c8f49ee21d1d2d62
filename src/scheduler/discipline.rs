//! Scheduling disciplines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dispatching::{rules, RuleEngine, TieBreaker};
use crate::error::{Error, SelectorKind};

/// Round-Robin time quantum in minutes.
pub const DEFAULT_QUANTUM: i64 = 2;

/// A booking-queue scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// First Come, First Served.
    Fcfs,
    /// Highest connection speed first (non-preemptive).
    Priority,
    /// Fixed-quantum time slicing.
    RoundRobin,
    /// Shortest booking time first (non-preemptive).
    ShortestJobFirst,
}

impl Discipline {
    pub const ALL: [Discipline; 4] = [
        Discipline::Fcfs,
        Discipline::Priority,
        Discipline::RoundRobin,
        Discipline::ShortestJobFirst,
    ];

    /// Selector string accepted by [`FromStr`].
    pub fn id(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "fcfs",
            Discipline::Priority => "priority",
            Discipline::RoundRobin => "roundrobin",
            Discipline::ShortestJobFirst => "shortest",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "First Come First Serve (FCFS)",
            Discipline::Priority => "Priority Scheduling",
            Discipline::RoundRobin => "Round Robin",
            Discipline::ShortestJobFirst => "Shortest Booking Time First",
        }
    }

    /// One-sentence summary of the ready-queue policy.
    pub fn description(&self) -> &'static str {
        match self {
            Discipline::Fcfs => "Processes users in the exact order they arrive.",
            Discipline::Priority => "Users with faster connections are scheduled first.",
            Discipline::RoundRobin => {
                "Each user gets a fixed time quantum; unfinished users rejoin the queue."
            }
            Discipline::ShortestJobFirst => "Users with the shortest booking time go first.",
        }
    }

    /// Whether a user can be interrupted before finishing.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Discipline::RoundRobin)
    }

    /// Ready-queue rules for the non-preemptive disciplines.
    ///
    /// Returns `None` for Round-Robin, which dispatches from a plain FIFO.
    pub fn rule_engine(&self) -> Option<RuleEngine> {
        match self {
            Discipline::Fcfs => Some(
                RuleEngine::new()
                    .with_rule(rules::ArrivalOrder)
                    .with_final_tie_breaker(TieBreaker::ById),
            ),
            Discipline::Priority => Some(RuleEngine::new().with_rule(rules::HighestSpeed)),
            Discipline::ShortestJobFirst => Some(RuleEngine::new().with_rule(rules::ShortestBooking)),
            Discipline::RoundRobin => None,
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Discipline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Discipline::Fcfs),
            "priority" => Ok(Discipline::Priority),
            "roundrobin" | "round-robin" | "round_robin" | "rr" => Ok(Discipline::RoundRobin),
            "shortest" | "sjf" | "shortest_job_first" => Ok(Discipline::ShortestJobFirst),
            _ => Err(Error::unknown(SelectorKind::Discipline, s)),
        }
    }
}
