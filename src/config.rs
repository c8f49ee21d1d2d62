//! Event configuration.
//!
//! Loaded from TOML; any key left out takes the default of the ticketing
//! page (100 tickets split 15/20/30/35, prices 100..300, quantum 2,
//! 20 simulated users).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{TicketClass, TicketTier};
use crate::scheduler::DEFAULT_QUANTUM;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    pub name: String,
    /// Intended total across the four tiers.
    pub total_tickets: u32,
    /// Bronze price; the other tiers scale it by their multiplier.
    pub base_price: f64,
    /// Global price ceiling.
    pub max_price: f64,
    pub platinum_capacity: u32,
    pub gold_capacity: u32,
    pub silver_capacity: u32,
    pub bronze_capacity: u32,
    /// Round-Robin quantum (minutes).
    pub quantum: i64,
    /// Users generated for a scheduling run.
    pub user_count: u32,
    /// RNG seed; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            name: "Tech Conference 2024".to_string(),
            total_tickets: 100,
            base_price: 100.0,
            max_price: 300.0,
            platinum_capacity: 15,
            gold_capacity: 20,
            silver_capacity: 30,
            bronze_capacity: 35,
            quantum: DEFAULT_QUANTUM,
            user_count: 20,
            seed: None,
        }
    }
}

impl EventConfig {
    /// Reads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a TOML document; missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: EventConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks prices, quantum and tier capacities.
    ///
    /// Prices must be finite, `base_price` positive and `max_price` at
    /// least `base_price`; the four capacities must sum within `u32`.
    pub fn validate(&self) -> Result<()> {
        if !self.base_price.is_finite() || self.base_price <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "base_price must be positive and finite, got {}",
                self.base_price
            )));
        }
        if !self.max_price.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "max_price must be finite, got {}",
                self.max_price
            )));
        }
        if self.max_price < self.base_price {
            return Err(Error::InvalidConfig(format!(
                "max_price {} is below base_price {}",
                self.max_price, self.base_price
            )));
        }
        if self.quantum <= 0 {
            return Err(Error::InvalidConfig(format!(
                "quantum must be positive, got {}",
                self.quantum
            )));
        }
        let allocated: u64 = TicketTier::ALL
            .iter()
            .map(|&t| u64::from(self.capacity(t)))
            .sum();
        if allocated > u64::from(u32::MAX) {
            return Err(Error::InvalidConfig(format!(
                "tier capacities sum to {allocated}, above the {} seat limit",
                u32::MAX
            )));
        }
        Ok(())
    }

    /// Seats configured for `tier`.
    pub fn capacity(&self, tier: TicketTier) -> u32 {
        match tier {
            TicketTier::Platinum => self.platinum_capacity,
            TicketTier::Gold => self.gold_capacity,
            TicketTier::Silver => self.silver_capacity,
            TicketTier::Bronze => self.bronze_capacity,
        }
    }

    fn set_capacity(&mut self, tier: TicketTier, capacity: u32) {
        match tier {
            TicketTier::Platinum => self.platinum_capacity = capacity,
            TicketTier::Gold => self.gold_capacity = capacity,
            TicketTier::Silver => self.silver_capacity = capacity,
            TicketTier::Bronze => self.bronze_capacity = capacity,
        }
    }

    /// Sum of the four tier capacities, saturating at `u32::MAX`.
    pub fn allocated_capacity(&self) -> u32 {
        TicketTier::ALL
            .iter()
            .fold(0u32, |acc, &t| acc.saturating_add(self.capacity(t)))
    }

    /// Scales tier capacities so they sum to `total_tickets`.
    ///
    /// Each tier is scaled by `total / allocated` and floored; the
    /// rounding remainder goes to Bronze. Returns an unchanged copy when
    /// the totals already agree or nothing is allocated.
    pub fn rebalanced(&self) -> Self {
        let allocated = self.allocated_capacity();
        if allocated == self.total_tickets || allocated == 0 {
            return self.clone();
        }

        warn!(
            allocated,
            total = self.total_tickets,
            "tier capacities do not match total tickets, rebalancing"
        );

        let ratio = self.total_tickets as f64 / allocated as f64;
        let mut adjusted = self.clone();
        for tier in TicketTier::ALL {
            adjusted.set_capacity(tier, (self.capacity(tier) as f64 * ratio).floor() as u32);
        }
        let remainder = self.total_tickets.saturating_sub(adjusted.allocated_capacity());
        adjusted.bronze_capacity += remainder;
        adjusted
    }

    /// Splits `total_tickets` evenly; leftovers go to Platinum, Gold, Silver.
    pub fn equal_split(&self) -> Self {
        let share = self.total_tickets / 4;
        let leftover = self.total_tickets % 4;
        let mut split = self.clone();
        split.platinum_capacity = share + u32::from(leftover > 0);
        split.gold_capacity = share + u32::from(leftover > 1);
        split.silver_capacity = share + u32::from(leftover > 2);
        split.bronze_capacity = share;
        split
    }

    /// Fresh ticket classes for a pricing run.
    pub fn ticket_classes(&self) -> Vec<TicketClass> {
        TicketTier::ALL
            .into_iter()
            .map(|tier| {
                TicketClass::new(tier, self.capacity(tier), self.base_price * tier.multiplier())
            })
            .collect()
    }
}
