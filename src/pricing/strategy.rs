//! Pricing curves and demand-driven strategy selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, SelectorKind};
use crate::models::TicketClass;

/// Demand ratio at which tiered pricing steps to its midpoint price.
pub const TIER_STEP_RATIO: f64 = 0.5;
/// Demand ratio at which tiered and surge pricing reach their ceiling.
pub const SURGE_RATIO: f64 = 0.8;
/// Surge premium over the tier ceiling, before the global clamp.
pub const SURGE_PREMIUM: f64 = 1.1;

/// A pricing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStrategy {
    /// Price rises proportionally with demand.
    #[default]
    Linear,
    /// Base price, midpoint price, then ceiling.
    Tiered,
    /// Steeper linear rise to the ceiling at 80% demand, then a premium.
    Surge,
}

impl PricingStrategy {
    pub const ALL: [PricingStrategy; 3] = [
        PricingStrategy::Linear,
        PricingStrategy::Tiered,
        PricingStrategy::Surge,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            PricingStrategy::Linear => "linear",
            PricingStrategy::Tiered => "tiered",
            PricingStrategy::Surge => "surge",
        }
    }

    /// Why the selector picks this strategy.
    pub fn reason(&self) -> &'static str {
        match self {
            PricingStrategy::Linear => {
                "Steady demand, no waitlist: gradual increase balances accessibility and revenue."
            }
            PricingStrategy::Tiered => {
                "Demand increasing or waitlist forming: clear price jumps capture urgency."
            }
            PricingStrategy::Surge => {
                "Nearly sold out: maximize revenue while demand exceeds supply."
            }
        }
    }

    /// Price of the next seat in `class` under this curve.
    pub fn price(&self, class: &TicketClass, global_max_price: f64) -> f64 {
        self.price_at(
            class.base_price(),
            class.multiplier(),
            class.demand_ratio(),
            global_max_price,
        )
    }

    /// Price for explicit inputs.
    ///
    /// The tier ceiling is `min(global_max_price * multiplier, global_max_price)`.
    pub fn price_at(
        &self,
        base_price: f64,
        multiplier: f64,
        demand_ratio: f64,
        global_max_price: f64,
    ) -> f64 {
        let max_price = tier_ceiling(multiplier, global_max_price);
        let spread = max_price - base_price;

        match self {
            PricingStrategy::Linear => base_price + spread * demand_ratio,
            PricingStrategy::Tiered => {
                if demand_ratio < TIER_STEP_RATIO {
                    base_price
                } else if demand_ratio < SURGE_RATIO {
                    base_price + spread * TIER_STEP_RATIO
                } else {
                    max_price
                }
            }
            PricingStrategy::Surge => {
                if demand_ratio < SURGE_RATIO {
                    base_price + spread * (demand_ratio / SURGE_RATIO)
                } else {
                    (max_price * SURGE_PREMIUM).min(global_max_price)
                }
            }
        }
    }
}

/// Highest price a tier may reach.
pub fn tier_ceiling(multiplier: f64, global_max_price: f64) -> f64 {
    (global_max_price * multiplier).min(global_max_price)
}

/// Picks a strategy from sell-through ratio `R` and waitlist size `W`.
///
/// - `R < 0.5` and `W == 0` → linear
/// - `R < 0.8` and (`R >= 0.5` or `W > 0`) → tiered
/// - otherwise → surge
///
/// Pure: the same `(R, W)` always yields the same strategy.
pub fn select_strategy(sell_through: f64, waitlist: u32) -> PricingStrategy {
    if sell_through < TIER_STEP_RATIO && waitlist == 0 {
        PricingStrategy::Linear
    } else if sell_through < SURGE_RATIO {
        PricingStrategy::Tiered
    } else {
        PricingStrategy::Surge
    }
}

impl fmt::Display for PricingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PricingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricingStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::unknown(SelectorKind::PricingStrategy, s))
    }
}
