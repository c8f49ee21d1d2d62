//! Simulation domain models.
//!
//! Provides the data types shared by the scheduler and pricing simulators.
//!
//! # Domain Mappings
//!
//! | eventrix-sim | Ticketing page | CPU scheduling |
//! |--------------|----------------|----------------|
//! | SimUser | Booking visitor | Process |
//! | ScheduleEntry | Booking slot | CPU burst |
//! | TicketClass | Seat tier | - |

mod schedule;
mod ticket;
mod user;

pub use schedule::{Schedule, ScheduleEntry};
pub use ticket::{TicketClass, TicketTier};
pub use user::SimUser;
