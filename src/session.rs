//! End-to-end ticketing simulation.
//!
//! Generates a booking queue, schedules it, replays the demand rush
//! against the pricing system and bundles everything for display.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::{GanttChart, PricingAnalytics};
use crate::config::EventConfig;
use crate::error::Result;
use crate::generator::generate_users;
use crate::models::SimUser;
use crate::pricing::{simulate_demand, DemandReport, PricingSystem};
use crate::scheduler::{Discipline, ScheduleOutcome, SchedulerSimulator};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub event: String,
    pub config: EventConfig,
    pub users: Vec<SimUser>,
    pub scheduling: ScheduleOutcome,
    pub gantt: GanttChart,
    pub pricing: DemandReport,
    pub pricing_analytics: PricingAnalytics,
}

/// Runs scheduling and pricing for one event.
///
/// Tier capacities are rebalanced to `total_tickets` before pricing.
pub fn run_session<R: Rng>(
    config: &EventConfig,
    discipline: Discipline,
    rng: &mut R,
) -> Result<SessionReport> {
    config.validate()?;
    let config = config.rebalanced();
    info!(event = %config.name, %discipline, users = config.user_count, "session started");

    let users = generate_users(config.user_count, rng);
    let scheduling = SchedulerSimulator::new()
        .with_quantum(config.quantum)
        .schedule(&users, discipline)?;
    let gantt = GanttChart::from_outcome(&scheduling);

    let mut system = PricingSystem::from_config(&config)?;
    let pricing = simulate_demand(&mut system, rng)?;
    let pricing_analytics = PricingAnalytics::from_system(&system);

    Ok(SessionReport {
        event: config.name.clone(),
        config,
        users,
        scheduling,
        gantt,
        pricing,
        pricing_analytics,
    })
}
