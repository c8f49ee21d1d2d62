//! Booking-queue scheduler simulator.
//!
//! # Algorithm
//!
//! Non-preemptive disciplines (FCFS, Priority, SJF) share one dispatch loop:
//!
//! 1. Admit every user whose arrival time is <= the clock into the ready queue.
//! 2. Pick the best ready user with the discipline's [`RuleEngine`].
//! 3. Run it to completion; the clock advances to its finish time.
//! 4. If nobody is ready, jump the clock to the next arrival.
//!
//! Round-Robin keeps an explicit FIFO. After each slice of at most one
//! quantum, users that arrived during the slice are admitted first and only
//! then is the unfinished user re-enqueued at the back.
//!
//! # Complexity
//! O(n²) for the ready-queue disciplines, O(n + S) for Round-Robin where S
//! is the number of slices.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Discipline, PerformanceMetrics, DEFAULT_QUANTUM};
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::error::{Error, Result};
use crate::models::{Schedule, ScheduleEntry, SimUser};
use crate::validation::{validate_quantum, validate_users};

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Discipline that produced the schedule.
    pub discipline: Discipline,
    /// Entries in execution order.
    pub schedule: Schedule,
    /// Metrics derived from the schedule.
    pub metrics: PerformanceMetrics,
}

impl ScheduleOutcome {
    /// Entries in execution order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.schedule.entries
    }
}

/// Deterministic booking-queue scheduler.
///
/// # Example
///
/// ```
/// use eventrix_sim::models::SimUser;
/// use eventrix_sim::scheduler::{Discipline, SchedulerSimulator};
///
/// let users = vec![SimUser::new(1, 0, 5), SimUser::new(2, 0, 3)];
/// let outcome = SchedulerSimulator::new()
///     .schedule(&users, Discipline::Fcfs)
///     .unwrap();
/// assert_eq!(outcome.metrics.total_completion_time, 8);
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerSimulator {
    quantum: i64,
}

impl SchedulerSimulator {
    /// Creates a simulator with the default Round-Robin quantum.
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the Round-Robin quantum (minutes).
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Round-Robin quantum (minutes).
    pub fn quantum(&self) -> i64 {
        self.quantum
    }

    /// Schedules `users` under `discipline`.
    ///
    /// # Errors
    /// [`Error::Validation`] for duplicate ids, non-positive booking times,
    /// negative arrivals, a queue whose completion would overflow the
    /// clock, or a non-positive quantum.
    pub fn schedule(&self, users: &[SimUser], discipline: Discipline) -> Result<ScheduleOutcome> {
        validate_users(users).map_err(Error::Validation)?;
        if discipline.is_preemptive() {
            validate_quantum(self.quantum).map_err(Error::Validation)?;
        }

        let schedule = match discipline.rule_engine() {
            Some(engine) => dispatch_to_completion(users, &engine),
            None => self.round_robin(users),
        };
        let metrics = PerformanceMetrics::calculate(&schedule, users);

        debug!(
            discipline = %discipline,
            users = users.len(),
            entries = schedule.len(),
            makespan = metrics.total_completion_time,
            "scheduling completed"
        );

        Ok(ScheduleOutcome {
            discipline,
            schedule,
            metrics,
        })
    }

    fn round_robin(&self, users: &[SimUser]) -> Schedule {
        let pending = arrival_order(users);
        let mut next = 0;
        let mut queue: VecDeque<(&SimUser, i64)> = VecDeque::new();
        let mut clock = 0;
        let mut schedule = Schedule::new();

        loop {
            admit(&pending, &mut next, clock, |u| queue.push_back((u, u.booking_time)));

            if let Some((user, remaining)) = queue.pop_front() {
                let slice = remaining.min(self.quantum);
                let start = clock;
                clock += slice;
                schedule.push(ScheduleEntry::new(user.id, start, clock));
                trace!(user = user.id, start, finish = clock, "round-robin slice");

                admit(&pending, &mut next, clock, |u| queue.push_back((u, u.booking_time)));

                if remaining > slice {
                    queue.push_back((user, remaining - slice));
                }
            } else if let Some(user) = pending.get(next) {
                clock = user.arrival_time;
            } else {
                break;
            }
        }

        schedule
    }
}

impl Default for SchedulerSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Schedules `users` under `discipline` with the default quantum.
pub fn schedule(users: &[SimUser], discipline: Discipline) -> Result<ScheduleOutcome> {
    SchedulerSimulator::new().schedule(users, discipline)
}

fn dispatch_to_completion(users: &[SimUser], engine: &RuleEngine) -> Schedule {
    let pending = arrival_order(users);
    let mut next = 0;
    let mut ready: Vec<&SimUser> = Vec::new();
    let mut context = SchedulingContext::at_time(0);
    let mut schedule = Schedule::new();

    while schedule.len() < users.len() {
        admit(&pending, &mut next, context.clock, |u| ready.push(u));

        match engine.select_best(&ready, &context) {
            Some(idx) => {
                let user = ready.remove(idx);
                let start = context.clock;
                let finish = start + user.booking_time;
                schedule.push(ScheduleEntry::new(user.id, start, finish));
                trace!(user = user.id, start, finish, "dispatched");
                context.advance_to(finish);
            }
            None => match pending.get(next) {
                Some(user) => context.advance_to(user.arrival_time),
                None => break,
            },
        }
    }

    schedule
}

/// Users sorted by arrival time; equal arrivals keep their input order.
fn arrival_order(users: &[SimUser]) -> Vec<&SimUser> {
    let mut sorted: Vec<&SimUser> = users.iter().collect();
    sorted.sort_by_key(|u| u.arrival_time);
    sorted
}

fn admit<'a>(
    pending: &[&'a SimUser],
    next: &mut usize,
    clock: i64,
    mut enqueue: impl FnMut(&'a SimUser),
) {
    while let Some(&user) = pending.get(*next) {
        if !user.has_arrived(clock) {
            break;
        }
        enqueue(user);
        *next += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn run(users: &[SimUser], discipline: Discipline) -> ScheduleOutcome {
        SchedulerSimulator::new().schedule(users, discipline).unwrap()
    }

    #[test]
    fn test_fcfs_tie_break_by_id() {
        let users = vec![SimUser::new(1, 0, 5), SimUser::new(2, 0, 3)];
        let outcome = run(&users, Discipline::Fcfs);

        assert_eq!(
            outcome.entries(),
            &[ScheduleEntry::new(1, 0, 5), ScheduleEntry::new(2, 5, 8)]
        );
        assert!((outcome.metrics.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_fcfs_ties_ignore_input_order() {
        let users = vec![SimUser::new(2, 0, 3), SimUser::new(1, 0, 5)];
        let outcome = run(&users, Discipline::Fcfs);
        assert_eq!(outcome.entries()[0].user_id, 1);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let users = vec![SimUser::new(1, 0, 2), SimUser::new(2, 10, 3)];
        let outcome = run(&users, Discipline::Fcfs);
        assert_eq!(
            outcome.entries(),
            &[ScheduleEntry::new(1, 0, 2), ScheduleEntry::new(2, 10, 13)]
        );
    }

    #[test]
    fn test_priority_fastest_first() {
        let users = vec![
            SimUser::new(1, 0, 5).with_speed(10),
            SimUser::new(2, 0, 3).with_speed(90),
        ];
        let outcome = run(&users, Discipline::Priority);

        assert_eq!(
            outcome.entries(),
            &[ScheduleEntry::new(2, 0, 3), ScheduleEntry::new(1, 3, 8)]
        );
    }

    #[test]
    fn test_priority_only_considers_arrived_users() {
        let users = vec![
            SimUser::new(1, 0, 4).with_speed(10),
            SimUser::new(2, 1, 2).with_speed(99),
            SimUser::new(3, 2, 2).with_speed(50),
        ];
        let outcome = run(&users, Discipline::Priority);
        let order: Vec<u32> = outcome.entries().iter().map(|e| e.user_id).collect();
        // User 1 is alone at t=0; at t=4 both others are ready.
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_priority_ties_keep_insertion_order() {
        let users = vec![
            SimUser::new(5, 0, 1).with_speed(40),
            SimUser::new(3, 0, 1).with_speed(40),
        ];
        let outcome = run(&users, Discipline::Priority);
        assert_eq!(outcome.entries()[0].user_id, 5);
    }

    #[test]
    fn test_sjf_shortest_first() {
        let users = vec![
            SimUser::new(1, 0, 6),
            SimUser::new(2, 0, 2),
            SimUser::new(3, 0, 4),
        ];
        let outcome = run(&users, Discipline::ShortestJobFirst);
        assert_eq!(
            outcome.entries(),
            &[
                ScheduleEntry::new(2, 0, 2),
                ScheduleEntry::new(3, 2, 6),
                ScheduleEntry::new(1, 6, 12),
            ]
        );
    }

    #[test]
    fn test_sjf_is_non_preemptive() {
        let users = vec![SimUser::new(1, 0, 8), SimUser::new(2, 1, 1)];
        let outcome = run(&users, Discipline::ShortestJobFirst);
        assert_eq!(
            outcome.entries(),
            &[ScheduleEntry::new(1, 0, 8), ScheduleEntry::new(2, 8, 9)]
        );
    }

    #[test]
    fn test_round_robin_slices() {
        let users = vec![SimUser::new(1, 0, 5), SimUser::new(2, 0, 3)];
        let outcome = run(&users, Discipline::RoundRobin);
        assert_eq!(
            outcome.entries(),
            &[
                ScheduleEntry::new(1, 0, 2),
                ScheduleEntry::new(2, 2, 4),
                ScheduleEntry::new(1, 4, 6),
                ScheduleEntry::new(2, 6, 7),
                ScheduleEntry::new(1, 7, 8),
            ]
        );
        assert_eq!(outcome.schedule.service_received(1), 5);
        assert_eq!(outcome.schedule.service_received(2), 3);
    }

    #[test]
    fn test_round_robin_new_arrival_before_requeue() {
        // User 2 arrives exactly when user 1's first slice ends and must
        // be queued ahead of user 1's remainder.
        let users = vec![SimUser::new(1, 0, 4), SimUser::new(2, 2, 2)];
        let outcome = run(&users, Discipline::RoundRobin);
        assert_eq!(
            outcome.entries(),
            &[
                ScheduleEntry::new(1, 0, 2),
                ScheduleEntry::new(2, 2, 4),
                ScheduleEntry::new(1, 4, 6),
            ]
        );
    }

    #[test]
    fn test_round_robin_late_arrival_not_dropped() {
        let users = vec![SimUser::new(1, 0, 1), SimUser::new(2, 20, 1)];
        let outcome = run(&users, Discipline::RoundRobin);
        assert_eq!(
            outcome.entries(),
            &[ScheduleEntry::new(1, 0, 1), ScheduleEntry::new(2, 20, 21)]
        );
    }

    #[test]
    fn test_round_robin_response_differs_from_waiting() {
        let users = vec![SimUser::new(1, 0, 5), SimUser::new(2, 0, 3)];
        let outcome = run(&users, Discipline::RoundRobin);
        // Response: u1 = 0, u2 = 2 → 1.0
        assert!((outcome.metrics.avg_response_time - 1.0).abs() < 1e-10);
        // Waiting: u1 = 8 - 5 = 3, u2 = 7 - 3 = 4 → 3.5
        assert!((outcome.metrics.avg_waiting_time - 3.5).abs() < 1e-10);
        // Throughput counts users, not slices.
        assert!((outcome.metrics.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_custom_quantum() {
        let users = vec![SimUser::new(1, 0, 5), SimUser::new(2, 0, 3)];
        let outcome = SchedulerSimulator::new()
            .with_quantum(10)
            .schedule(&users, Discipline::RoundRobin)
            .unwrap();
        assert_eq!(outcome.entries().len(), 2);
    }

    #[test]
    fn test_invalid_quantum() {
        let users = vec![SimUser::new(1, 0, 5)];
        let err = SchedulerSimulator::new()
            .with_quantum(0)
            .schedule(&users, Discipline::RoundRobin)
            .unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_users_rejected() {
        let users = vec![SimUser::new(1, 0, 0)];
        assert!(matches!(
            schedule(&users, Discipline::Fcfs),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_clock_overflow_rejected() {
        let users = vec![SimUser::new(1, i64::MAX - 1, 5)];
        for discipline in Discipline::ALL {
            match schedule(&users, discipline) {
                Err(Error::Validation(errors)) => {
                    assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow)
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }
    }

    #[test]
    fn test_schedule_ending_at_clock_limit() {
        let users = vec![SimUser::new(1, i64::MAX - 4, 2), SimUser::new(2, i64::MAX - 4, 2)];
        for discipline in Discipline::ALL {
            let outcome = run(&users, discipline);
            assert_eq!(outcome.metrics.total_completion_time, i64::MAX);
        }
    }

    #[test]
    fn test_empty_input() {
        for discipline in Discipline::ALL {
            let outcome = run(&[], discipline);
            assert!(outcome.entries().is_empty());
            assert_eq!(outcome.metrics.throughput, 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let users = vec![
            SimUser::new(1, 3, 4).with_speed(20),
            SimUser::new(2, 0, 7).with_speed(60),
            SimUser::new(3, 1, 2).with_speed(60),
            SimUser::new(4, 9, 5).with_speed(5),
        ];
        for discipline in Discipline::ALL {
            assert_eq!(run(&users, discipline), run(&users, discipline));
        }
    }
}
