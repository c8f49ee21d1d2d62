//! Ticket tiers and per-tier booking state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, SelectorKind};

/// The four fixed ticket tiers, most expensive first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketTier {
    Platinum,
    Gold,
    Silver,
    Bronze,
}

impl TicketTier {
    /// All tiers in display order.
    pub const ALL: [TicketTier; 4] = [
        TicketTier::Platinum,
        TicketTier::Gold,
        TicketTier::Silver,
        TicketTier::Bronze,
    ];

    /// Price multiplier over the event base price.
    pub fn multiplier(&self) -> f64 {
        match self {
            TicketTier::Platinum => 2.0,
            TicketTier::Gold => 1.5,
            TicketTier::Silver => 1.2,
            TicketTier::Bronze => 1.0,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TicketTier::Platinum => "Platinum",
            TicketTier::Gold => "Gold",
            TicketTier::Silver => "Silver",
            TicketTier::Bronze => "Bronze",
        }
    }
}

impl fmt::Display for TicketTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TicketTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketTier::ALL
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unknown(SelectorKind::TicketClass, s))
    }
}

/// Booking state of one ticket tier.
///
/// Capacity is a hard ceiling: `booked() <= capacity()` always holds, and
/// the price and revenue histories grow by exactly one element per
/// successful booking. Histories are only reachable as slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketClass {
    tier: TicketTier,
    capacity: u32,
    base_price: f64,
    current_price: f64,
    multiplier: f64,
    users: Vec<u32>,
    price_history: Vec<f64>,
    revenue_history: Vec<f64>,
}

impl TicketClass {
    /// Creates an empty class for `tier`.
    pub fn new(tier: TicketTier, capacity: u32, base_price: f64) -> Self {
        Self {
            tier,
            capacity,
            base_price,
            current_price: base_price,
            multiplier: tier.multiplier(),
            users: Vec::new(),
            price_history: Vec::new(),
            revenue_history: Vec::new(),
        }
    }

    pub fn tier(&self) -> TicketTier {
        self.tier
    }

    /// Display name of the tier.
    pub fn name(&self) -> &'static str {
        self.tier.name()
    }

    /// Hard seat ceiling.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Starting price: event base price times the tier multiplier.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Price charged for the most recent booking (base price before any).
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Number of seats sold.
    pub fn booked(&self) -> u32 {
        self.users.len() as u32
    }

    /// Booked user ids in booking order.
    pub fn users(&self) -> &[u32] {
        &self.users
    }

    /// Price charged at each booking.
    pub fn price_history(&self) -> &[f64] {
        &self.price_history
    }

    /// Cumulative tier revenue after each booking.
    pub fn revenue_history(&self) -> &[f64] {
        &self.revenue_history
    }

    /// Seats still available.
    pub fn remaining(&self) -> u32 {
        self.capacity - self.booked()
    }

    pub fn is_full(&self) -> bool {
        self.booked() >= self.capacity
    }

    /// booked / capacity, or 0.0 for a zero-capacity tier.
    pub fn demand_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.booked() as f64 / self.capacity as f64
        }
    }

    /// Total revenue earned by this tier.
    pub fn revenue(&self) -> f64 {
        self.revenue_history.last().copied().unwrap_or(0.0)
    }

    /// Mean charged price, or the base price when nothing has sold.
    pub fn average_price(&self) -> f64 {
        if self.price_history.is_empty() {
            self.base_price
        } else {
            self.price_history.iter().sum::<f64>() / self.price_history.len() as f64
        }
    }

    /// Records a sale. Returns `false` without touching anything when full.
    pub(crate) fn record_booking(&mut self, user_id: u32, price: f64) -> bool {
        if self.is_full() {
            return false;
        }
        let cumulative = self.revenue() + price;
        self.users.push(user_id);
        self.current_price = price;
        self.price_history.push(price);
        self.revenue_history.push(cumulative);
        true
    }

    /// Drops all sales and restores the base price.
    pub(crate) fn reset(&mut self) {
        self.users.clear();
        self.price_history.clear();
        self.revenue_history.clear();
        self.current_price = self.base_price;
    }
}
