//! Booking-queue scheduler and performance metrics.
//!
//! Orders simulated users under one of four classic disciplines and
//! derives aggregate metrics from the resulting schedule.
//!
//! # Disciplines
//!
//! | Discipline | Ready-queue order | Preemptive |
//! |------------|-------------------|------------|
//! | FCFS | arrival time, then user id | no |
//! | Priority | highest speed, then insertion | no |
//! | Round-Robin | FIFO, quantum 2 | yes |
//! | SJF | shortest booking time, then insertion | no |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1.2

mod discipline;
mod metrics;
mod simulator;

pub use discipline::{Discipline, DEFAULT_QUANTUM};
pub use metrics::PerformanceMetrics;
pub use simulator::{schedule, ScheduleOutcome, SchedulerSimulator};
