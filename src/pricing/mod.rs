//! Dynamic ticket pricing.
//!
//! Prices four ticket tiers under a demand-driven curve and switches the
//! curve as the event sells out.
//!
//! # Strategies
//!
//! | Strategy | Selected when | Price at demand d |
//! |----------|---------------|-------------------|
//! | Linear | R < 0.5, no waitlist | base + (max - base) · d |
//! | Tiered | R < 0.8, and R >= 0.5 or a waitlist exists | base / midpoint / max |
//! | Surge | R >= 0.8 | linear to max at d = 0.8, then min(max · 1.1, global max) |
//!
//! `R` is the sell-through ratio across all tiers.

mod simulation;
mod strategy;
mod system;

pub use simulation::{simulate_demand, DemandPhase, DemandReport, PhaseSummary, DEMAND_ORDER};
pub use strategy::{select_strategy, tier_ceiling, PricingStrategy};
pub use system::{BookingOutcome, PricingSystem, StrategyChange};
