//! Ticketing simulators for the Eventrix event platform.
//!
//! Models the two algorithmic pieces behind ticket sales: the order in
//! which visitors in the booking queue are served, and how seat prices
//! move as an event sells out.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SimUser`, `ScheduleEntry`, `Schedule`,
//!   `TicketClass`, `TicketTier`
//! - **`dispatching`**: Ready-queue rules and the rule engine
//! - **`scheduler`**: FCFS, Priority, Round-Robin and SJF disciplines plus
//!   performance metrics
//! - **`pricing`**: Linear/tiered/surge pricing, booking, strategy selection
//!   and the demand-rush simulation
//! - **`analytics`**: Gantt chart and dashboard data
//! - **`config`**: TOML event configuration
//! - **`generator`**: Random booking-queue generation
//! - **`session`**: Scheduling and pricing for one event, end to end
//! - **`validation`**: Input integrity checks
//!
//! All computation is synchronous and deterministic given its inputs; the
//! only randomness comes from the RNG handed to `generator` and
//! `pricing::simulate_demand`.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Talluri & van Ryzin (2004), "The Theory and Practice of Revenue Management"

pub mod analytics;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod generator;
pub mod models;
pub mod pricing;
pub mod scheduler;
pub mod session;
pub mod validation;

pub use error::{Error, Result};
