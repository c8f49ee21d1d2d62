//! Presentation data for the Gantt chart and pricing dashboard.
//!
//! Pure derivations of simulator output; nothing here feeds back into
//! scheduling or pricing.

use serde::{Deserialize, Serialize};

use crate::models::TicketTier;
use crate::pricing::{PricingStrategy, PricingSystem};
use crate::scheduler::ScheduleOutcome;

/// Minutes between time-axis ticks.
pub const TICK_INTERVAL: i64 = 5;

/// One bar of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttBar {
    pub user_id: u32,
    pub start_time: i64,
    pub finish_time: i64,
    /// Left offset as a percentage of the chart width.
    pub start_percent: f64,
    /// Width as a percentage of the chart width.
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttChart {
    pub max_time: i64,
    /// Tick labels `0, 5, 10, ..`; `ceil(max_time / 5)` of them.
    pub ticks: Vec<i64>,
    pub bars: Vec<GanttBar>,
}

impl GanttChart {
    pub fn from_outcome(outcome: &ScheduleOutcome) -> Self {
        let max_time = outcome.schedule.makespan();
        let tick_count = (max_time + TICK_INTERVAL - 1) / TICK_INTERVAL;
        let ticks = (0..tick_count).map(|i| i * TICK_INTERVAL).collect();

        let percent = |value: i64| {
            if max_time == 0 {
                0.0
            } else {
                value as f64 / max_time as f64 * 100.0
            }
        };

        let bars = outcome
            .entries()
            .iter()
            .map(|e| GanttBar {
                user_id: e.user_id,
                start_time: e.start_time,
                finish_time: e.finish_time,
                start_percent: percent(e.start_time),
                width_percent: percent(e.duration()),
            })
            .collect();

        Self {
            max_time,
            ticks,
            bars,
        }
    }
}

/// Dashboard row for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierAnalytics {
    pub tier: TicketTier,
    pub booked: u32,
    pub capacity: u32,
    pub utilization_percent: f64,
    pub current_price: f64,
    pub average_price: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingAnalytics {
    pub strategy: PricingStrategy,
    pub tiers: Vec<TierAnalytics>,
    pub total_booked: u32,
    pub total_capacity: u32,
    pub total_revenue: f64,
    pub waitlist: u32,
}

impl PricingAnalytics {
    pub fn from_system(system: &PricingSystem) -> Self {
        let tiers = system
            .classes()
            .iter()
            .map(|class| TierAnalytics {
                tier: class.tier(),
                booked: class.booked(),
                capacity: class.capacity(),
                utilization_percent: class.demand_ratio() * 100.0,
                current_price: class.current_price(),
                average_price: class.average_price(),
                revenue: class.revenue(),
            })
            .collect();

        Self {
            strategy: system.strategy(),
            tiers,
            total_booked: system.total_booked(),
            total_capacity: system.total_capacity(),
            total_revenue: system.total_revenue(),
            waitlist: system.waitlist(),
        }
    }
}
