//! Schedule performance metrics.
//!
//! Computes the classic CPU-scheduling indicators from a completed
//! schedule and its input users.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - booking time |
//! | Response | first dispatch - arrival |
//! | Total completion (makespan) | Latest finish time |
//! | Throughput | users / makespan |
//! | Utilization | busy time / makespan |
//!
//! For non-preemptive disciplines waiting and response coincide
//! (`start - arrival`). Round-Robin users can be dispatched early and then
//! wait between slices, so there the two diverge.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Schedule, SimUser};

/// Schedule performance indicators. Times are in minutes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Mean(completion - arrival).
    pub avg_turnaround_time: f64,
    /// Mean(turnaround - booking time).
    pub avg_waiting_time: f64,
    /// Mean(first dispatch - arrival).
    pub avg_response_time: f64,
    /// Makespan: latest finish time.
    pub total_completion_time: i64,
    /// Users completed per minute of makespan (0.0 for an empty schedule).
    pub throughput: f64,
    /// Fraction of the makespan during which the booking service was busy.
    pub utilization: f64,
}

impl PerformanceMetrics {
    /// Computes metrics from a schedule and its input users.
    ///
    /// Users without any entry in the schedule are ignored. Every zero
    /// denominator yields 0.0.
    pub fn calculate(schedule: &Schedule, users: &[SimUser]) -> Self {
        // user_id → (first start, completion)
        let mut spans: HashMap<u32, (i64, i64)> = HashMap::new();
        for entry in &schedule.entries {
            spans
                .entry(entry.user_id)
                .and_modify(|(first, last)| {
                    *first = (*first).min(entry.start_time);
                    *last = (*last).max(entry.finish_time);
                })
                .or_insert((entry.start_time, entry.finish_time));
        }

        let mut total_turnaround = 0.0;
        let mut total_waiting = 0.0;
        let mut total_response = 0.0;
        let mut counted = 0usize;

        for user in users {
            if let Some(&(first_start, completion)) = spans.get(&user.id) {
                let turnaround = completion - user.arrival_time;
                total_turnaround += turnaround as f64;
                total_waiting += (turnaround - user.booking_time) as f64;
                total_response += (first_start - user.arrival_time) as f64;
                counted += 1;
            }
        }

        let makespan = schedule.makespan();
        let busy: i64 = schedule.entries.iter().map(|e| e.duration()).sum();

        let mean = |total: f64| {
            if counted == 0 {
                0.0
            } else {
                total / counted as f64
            }
        };
        let per_makespan = |value: f64| {
            if makespan <= 0 {
                0.0
            } else {
                value / makespan as f64
            }
        };

        Self {
            avg_turnaround_time: mean(total_turnaround),
            avg_waiting_time: mean(total_waiting),
            avg_response_time: mean(total_response),
            total_completion_time: makespan,
            throughput: per_makespan(counted as f64),
            utilization: per_makespan(busy as f64),
        }
    }
}
