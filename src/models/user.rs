//! Simulated booking user.
//!
//! A user arrives at the booking queue, needs the booking service for a
//! number of minutes, and carries a connection-speed signal that the
//! priority discipline uses to order the ready queue.

use serde::{Deserialize, Serialize};

/// A synthetic participant in the booking queue.
///
/// # Time Representation
/// All times are whole minutes relative to the opening of the booking
/// window (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimUser {
    /// Unique user identifier.
    pub id: u32,
    /// Minute at which the user joins the queue.
    pub arrival_time: i64,
    /// Minutes of booking service the user needs.
    pub booking_time: i64,
    /// Connection speed in Mbps (higher = served first under Priority).
    pub speed: u32,
    /// Explicit priority rank (1-5), informational.
    pub priority: Option<u8>,
}

impl SimUser {
    /// Creates a user with the given arrival and booking times.
    pub fn new(id: u32, arrival_time: i64, booking_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            booking_time,
            speed: 0,
            priority: None,
        }
    }

    /// Sets the connection speed.
    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the explicit priority rank.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether the user has joined the queue by `clock`.
    #[inline]
    pub fn has_arrived(&self, clock: i64) -> bool {
        self.arrival_time <= clock
    }
}
