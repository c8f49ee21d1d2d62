//! Dynamic pricing state machine.
//!
//! Holds the ticket tiers, the active strategy, total revenue and the
//! waitlist counter. Every booking request, successful or not, is followed
//! by a fresh strategy selection from the current sell-through ratio and
//! waitlist size.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::strategy::{select_strategy, PricingStrategy};
use crate::config::EventConfig;
use crate::error::{Error, Result, SelectorKind};
use crate::models::{TicketClass, TicketTier};

/// Result of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BookingOutcome {
    /// A seat was sold at `price`.
    Booked {
        user_id: u32,
        tier: TicketTier,
        price: f64,
    },
    /// The tier was full; the request joined the waitlist at `position`.
    Waitlisted {
        user_id: u32,
        tier: TicketTier,
        position: u32,
    },
}

impl BookingOutcome {
    pub fn is_booked(&self) -> bool {
        matches!(self, BookingOutcome::Booked { .. })
    }

    pub fn tier(&self) -> TicketTier {
        match self {
            BookingOutcome::Booked { tier, .. } | BookingOutcome::Waitlisted { tier, .. } => *tier,
        }
    }
}

/// A recorded strategy switch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyChange {
    /// 1-based index of the request after which the switch happened.
    pub request: usize,
    pub from: PricingStrategy,
    pub to: PricingStrategy,
    pub sell_through: f64,
    pub waitlist: u32,
}

/// Pricing state for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSystem {
    classes: Vec<TicketClass>,
    strategy: PricingStrategy,
    total_revenue: f64,
    waitlist: u32,
    max_price: f64,
    requests: usize,
    strategy_changes: Vec<StrategyChange>,
}

impl PricingSystem {
    /// Creates a system over `classes`, starting with linear pricing.
    ///
    /// Tiers are looked up by [`TicketTier`]; if a tier appears twice only
    /// the first class is reachable.
    pub fn new(classes: Vec<TicketClass>, max_price: f64) -> Self {
        Self {
            classes,
            strategy: PricingStrategy::Linear,
            total_revenue: 0.0,
            waitlist: 0,
            max_price,
            requests: 0,
            strategy_changes: Vec::new(),
        }
    }

    /// Builds the four standard tiers from an event configuration.
    pub fn from_config(config: &EventConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.ticket_classes(), config.max_price))
    }

    /// Ticket classes in configuration order.
    pub fn classes(&self) -> &[TicketClass] {
        &self.classes
    }

    /// The class for `tier`, if configured.
    pub fn class(&self, tier: TicketTier) -> Option<&TicketClass> {
        self.classes.iter().find(|c| c.tier() == tier)
    }

    /// Active strategy.
    pub fn strategy(&self) -> PricingStrategy {
        self.strategy
    }

    /// Sum of every charged price.
    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    /// Requests rejected because their tier was full.
    pub fn waitlist(&self) -> u32 {
        self.waitlist
    }

    /// Global price ceiling.
    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    /// Strategy switches in the order they happened.
    pub fn strategy_changes(&self) -> &[StrategyChange] {
        &self.strategy_changes
    }

    /// Seats sold across all classes, saturating at `u32::MAX`.
    pub fn total_booked(&self) -> u32 {
        self.classes
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.booked()))
    }

    /// Seats offered across all classes, saturating at `u32::MAX`.
    pub fn total_capacity(&self) -> u32 {
        self.classes
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.capacity()))
    }

    /// total booked / total capacity, or 0.0 with no capacity.
    pub fn sell_through(&self) -> f64 {
        let capacity = self.total_capacity();
        if capacity == 0 {
            0.0
        } else {
            self.total_booked() as f64 / capacity as f64
        }
    }

    /// Books a seat in the class named `class_name`.
    ///
    /// # Errors
    /// [`Error::UnknownSelector`] if no configured class has that name.
    pub fn book(&mut self, user_id: u32, class_name: &str) -> Result<BookingOutcome> {
        let tier: TicketTier = class_name.parse()?;
        self.book_tier(user_id, tier)
    }

    /// Books a seat in `tier`.
    pub fn book_tier(&mut self, user_id: u32, tier: TicketTier) -> Result<BookingOutcome> {
        let idx = self.class_index(tier)?;
        let strategy = self.strategy;
        let max_price = self.max_price;
        let class = &mut self.classes[idx];

        let outcome = if class.is_full() {
            self.waitlist += 1;
            warn!(user = user_id, %tier, position = self.waitlist, "tier full, waitlisted");
            BookingOutcome::Waitlisted {
                user_id,
                tier,
                position: self.waitlist,
            }
        } else {
            let price = strategy.price(class, max_price);
            class.record_booking(user_id, price);
            self.total_revenue += price;
            debug!(user = user_id, %tier, price, %strategy, "booked");
            BookingOutcome::Booked {
                user_id,
                tier,
                price,
            }
        };

        self.requests += 1;
        self.reevaluate_strategy();
        Ok(outcome)
    }

    /// Price the next booking into `class_name` would be charged.
    pub fn current_price(&self, class_name: &str) -> Result<f64> {
        let tier: TicketTier = class_name.parse()?;
        let class = &self.classes[self.class_index(tier)?];
        Ok(self.strategy.price(class, self.max_price))
    }

    /// Strategy the current state calls for.
    pub fn select_strategy(&self) -> PricingStrategy {
        select_strategy(self.sell_through(), self.waitlist)
    }

    /// Applies [`Self::select_strategy`], recording a change if it switches.
    pub fn reevaluate_strategy(&mut self) -> Option<StrategyChange> {
        let next = self.select_strategy();
        if next == self.strategy {
            return None;
        }

        let change = StrategyChange {
            request: self.requests,
            from: self.strategy,
            to: next,
            sell_through: self.sell_through(),
            waitlist: self.waitlist,
        };
        info!(from = %change.from, to = %change.to, reason = next.reason(), "pricing strategy changed");
        self.strategy = next;
        self.strategy_changes.push(change);
        Some(change)
    }

    /// Returns every class and counter to its initial state.
    pub fn reset(&mut self) {
        for class in &mut self.classes {
            class.reset();
        }
        self.strategy = PricingStrategy::Linear;
        self.total_revenue = 0.0;
        self.waitlist = 0;
        self.requests = 0;
        self.strategy_changes.clear();
    }

    fn class_index(&self, tier: TicketTier) -> Result<usize> {
        self.classes
            .iter()
            .position(|c| c.tier() == tier)
            .ok_or_else(|| Error::unknown(SelectorKind::TicketClass, tier.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_tier(capacity: u32) -> PricingSystem {
        PricingSystem::new(vec![TicketClass::new(TicketTier::Bronze, capacity, 100.0)], 200.0)
    }

    #[test]
    fn test_book_records_histories() {
        let mut system = single_tier(10);
        let first = system.book(1, "Bronze").unwrap();
        let second = system.book(2, "Bronze").unwrap();

        assert!(matches!(first, BookingOutcome::Booked { price, .. } if (price - 100.0).abs() < 1e-10));
        // Linear at demand 0.1: 100 + 100 * 0.1
        assert!(matches!(second, BookingOutcome::Booked { price, .. } if (price - 110.0).abs() < 1e-10));

        let class = system.class(TicketTier::Bronze).unwrap();
        assert_eq!(class.users(), &[1, 2]);
        assert_eq!(class.price_history().len(), 2);
        assert_eq!(class.revenue_history().len(), 2);
        assert!((class.revenue_history()[1] - 210.0).abs() < 1e-10);
        assert!((system.total_revenue() - 210.0).abs() < 1e-10);
    }

    #[test]
    fn test_from_config_rejects_nan_ceiling() {
        let config = EventConfig {
            max_price: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            PricingSystem::from_config(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_capacities_saturate_totals() {
        let mut system = PricingSystem::new(
            vec![
                TicketClass::new(TicketTier::Gold, u32::MAX, 150.0),
                TicketClass::new(TicketTier::Bronze, u32::MAX, 100.0),
            ],
            300.0,
        );
        assert_eq!(system.total_capacity(), u32::MAX);
        assert!(system.book(1, "Gold").unwrap().is_booked());
        assert_eq!(system.total_booked(), 1);
        assert_eq!(system.strategy(), PricingStrategy::Linear);
    }

    #[test]
    fn test_full_tier_waitlists_without_mutation() {
        let mut system = single_tier(1);
        system.book(1, "Bronze").unwrap();
        let before = system.class(TicketTier::Bronze).unwrap().clone();
        let revenue = system.total_revenue();

        let outcome = system.book(2, "Bronze").unwrap();
        assert_eq!(
            outcome,
            BookingOutcome::Waitlisted {
                user_id: 2,
                tier: TicketTier::Bronze,
                position: 1,
            }
        );
        assert_eq!(system.class(TicketTier::Bronze).unwrap(), &before);
        assert_eq!(system.waitlist(), 1);
        assert!((system.total_revenue() - revenue).abs() < 1e-10);

        let outcome = system.book(3, "Bronze").unwrap();
        assert!(matches!(outcome, BookingOutcome::Waitlisted { position: 2, .. }));
    }

    #[test]
    fn test_unknown_class_is_error() {
        let mut system = single_tier(5);
        assert!(matches!(
            system.book(1, "Diamond"),
            Err(Error::UnknownSelector {
                kind: SelectorKind::TicketClass,
                ..
            })
        ));
        // Valid tier name, but not configured in this system.
        assert!(system.book(1, "Gold").is_err());
        assert!(system.current_price("Gold").is_err());
        assert_eq!(system.total_booked(), 0);
    }

    #[test]
    fn test_strategy_follows_sell_through() {
        let mut system = single_tier(10);
        for id in 1..=4 {
            system.book(id, "Bronze").unwrap();
        }
        assert_eq!(system.strategy(), PricingStrategy::Linear);

        system.book(5, "Bronze").unwrap(); // R = 0.5
        assert_eq!(system.strategy(), PricingStrategy::Tiered);

        for id in 6..=8 {
            system.book(id, "Bronze").unwrap(); // R = 0.8
        }
        assert_eq!(system.strategy(), PricingStrategy::Surge);

        let changes = system.strategy_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].request, 5);
        assert_eq!(changes[0].to, PricingStrategy::Tiered);
        assert_eq!(changes[1].request, 8);
    }

    #[test]
    fn test_waitlist_forces_tiered() {
        let mut system = PricingSystem::new(
            vec![
                TicketClass::new(TicketTier::Gold, 1, 150.0),
                TicketClass::new(TicketTier::Bronze, 9, 100.0),
            ],
            300.0,
        );
        system.book(1, "Gold").unwrap();
        assert_eq!(system.strategy(), PricingStrategy::Linear);

        system.book(2, "Gold").unwrap(); // waitlisted, R = 0.1
        assert_eq!(system.waitlist(), 1);
        assert_eq!(system.strategy(), PricingStrategy::Tiered);
    }

    #[test]
    fn test_current_price_quotes_next_booking() {
        let mut system = single_tier(10);
        for id in 1..=4 {
            system.book(id, "Bronze").unwrap();
        }
        // Linear at demand 0.4
        assert!((system.current_price("Bronze").unwrap() - 140.0).abs() < 1e-10);
        let outcome = system.book(5, "Bronze").unwrap();
        assert!(matches!(outcome, BookingOutcome::Booked { price, .. } if (price - 140.0).abs() < 1e-10));
    }

    #[test]
    fn test_select_strategy_has_no_hidden_state() {
        let mut system = single_tier(10);
        for id in 1..=6 {
            system.book(id, "Bronze").unwrap();
        }
        let first = system.select_strategy();
        assert_eq!(system.select_strategy(), first);
        assert!(system.reevaluate_strategy().is_none());
    }

    #[test]
    fn test_zero_capacity_sell_through() {
        let mut system = single_tier(0);
        assert_eq!(system.sell_through(), 0.0);
        let outcome = system.book(1, "Bronze").unwrap();
        assert!(!outcome.is_booked());
        assert_eq!(outcome.tier(), TicketTier::Bronze);
    }

    #[test]
    fn test_reset() {
        let mut system = single_tier(1);
        system.book(1, "Bronze").unwrap();
        system.book(2, "Bronze").unwrap();
        system.reset();

        assert_eq!(system, single_tier(1));
    }
}
