//! Four-phase demand simulation.
//!
//! Replays the booking rush of the ticketing page against a
//! [`PricingSystem`]:
//!
//! | Phase | Requests | Tier choice |
//! |-------|----------|-------------|
//! | Mixed demand | 40 | uniform |
//! | Premium surge | 30 | first 15 alternate Platinum/Gold, then cycle by index |
//! | Fill | min(remaining seats, 20) | uniform |
//! | Overflow | 15 | uniform |
//!
//! User ids are assigned sequentially from 1 across all phases.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::strategy::PricingStrategy;
use super::system::{BookingOutcome, PricingSystem, StrategyChange};
use crate::error::Result;
use crate::models::TicketTier;

/// Tier order used for random and cyclic demand.
pub const DEMAND_ORDER: [TicketTier; 4] = [
    TicketTier::Bronze,
    TicketTier::Silver,
    TicketTier::Gold,
    TicketTier::Platinum,
];

const MIXED_REQUESTS: usize = 40;
const SURGE_REQUESTS: usize = 30;
const SURGE_BIASED: usize = 15;
const FILL_LIMIT: usize = 20;
const OVERFLOW_REQUESTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandPhase {
    Mixed,
    PremiumSurge,
    Fill,
    Overflow,
}

/// Per-phase request tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub phase: DemandPhase,
    pub requests: usize,
    pub booked: usize,
    pub waitlisted: usize,
    pub revenue: f64,
}

/// Everything a demand simulation produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandReport {
    pub outcomes: Vec<BookingOutcome>,
    pub phases: Vec<PhaseSummary>,
    pub strategy_changes: Vec<StrategyChange>,
    pub final_strategy: PricingStrategy,
    pub total_revenue: f64,
    pub total_booked: u32,
    pub waitlist: u32,
}

/// Resets `system` and runs the four demand phases against it.
pub fn simulate_demand<R: Rng>(system: &mut PricingSystem, rng: &mut R) -> Result<DemandReport> {
    system.reset();

    let mut next_user = 1u32;
    let mut outcomes = Vec::new();
    let mut phases = Vec::new();

    let mixed = (0..MIXED_REQUESTS).map(|_| random_tier(rng)).collect::<Vec<_>>();
    phases.push(run_phase(system, DemandPhase::Mixed, &mixed, &mut next_user, &mut outcomes)?);

    let surge = (0..SURGE_REQUESTS).map(surge_tier).collect::<Vec<_>>();
    phases.push(run_phase(system, DemandPhase::PremiumSurge, &surge, &mut next_user, &mut outcomes)?);

    let remaining = (system.total_capacity() - system.total_booked()) as usize;
    let fill = (0..remaining.min(FILL_LIMIT)).map(|_| random_tier(rng)).collect::<Vec<_>>();
    phases.push(run_phase(system, DemandPhase::Fill, &fill, &mut next_user, &mut outcomes)?);

    let overflow = (0..OVERFLOW_REQUESTS).map(|_| random_tier(rng)).collect::<Vec<_>>();
    phases.push(run_phase(system, DemandPhase::Overflow, &overflow, &mut next_user, &mut outcomes)?);

    info!(
        booked = system.total_booked(),
        waitlist = system.waitlist(),
        revenue = system.total_revenue(),
        strategy = %system.strategy(),
        "demand simulation completed"
    );

    Ok(DemandReport {
        outcomes,
        phases,
        strategy_changes: system.strategy_changes().to_vec(),
        final_strategy: system.strategy(),
        total_revenue: system.total_revenue(),
        total_booked: system.total_booked(),
        waitlist: system.waitlist(),
    })
}

fn run_phase(
    system: &mut PricingSystem,
    phase: DemandPhase,
    tiers: &[TicketTier],
    next_user: &mut u32,
    outcomes: &mut Vec<BookingOutcome>,
) -> Result<PhaseSummary> {
    debug!(?phase, requests = tiers.len(), "demand phase started");
    let mut summary = PhaseSummary {
        phase,
        requests: tiers.len(),
        booked: 0,
        waitlisted: 0,
        revenue: 0.0,
    };

    for &tier in tiers {
        let outcome = system.book_tier(*next_user, tier)?;
        match outcome {
            BookingOutcome::Booked { price, .. } => {
                summary.booked += 1;
                summary.revenue += price;
            }
            BookingOutcome::Waitlisted { .. } => summary.waitlisted += 1,
        }
        outcomes.push(outcome);
        *next_user += 1;
    }

    Ok(summary)
}

fn random_tier<R: Rng>(rng: &mut R) -> TicketTier {
    DEMAND_ORDER[rng.random_range(0..DEMAND_ORDER.len())]
}

fn surge_tier(i: usize) -> TicketTier {
    if i < SURGE_BIASED {
        if i % 2 == 0 {
            TicketTier::Platinum
        } else {
            TicketTier::Gold
        }
    } else {
        DEMAND_ORDER[i % DEMAND_ORDER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::EventConfig;

    fn default_system() -> PricingSystem {
        PricingSystem::from_config(&EventConfig::default()).unwrap()
    }

    #[test]
    fn test_surge_tier_pattern() {
        assert_eq!(surge_tier(0), TicketTier::Platinum);
        assert_eq!(surge_tier(1), TicketTier::Gold);
        assert_eq!(surge_tier(14), TicketTier::Platinum);
        assert_eq!(surge_tier(15), TicketTier::Platinum); // 15 % 4 = 3
        assert_eq!(surge_tier(16), TicketTier::Bronze);
        assert_eq!(surge_tier(29), TicketTier::Silver);
    }

    #[test]
    fn test_phase_sizes() {
        let mut system = default_system();
        let report = simulate_demand(&mut system, &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(report.phases.len(), 4);
        assert_eq!(report.phases[0].requests, 40);
        assert_eq!(report.phases[1].requests, 30);
        assert!(report.phases[2].requests <= 20);
        assert_eq!(report.phases[3].requests, 15);

        let total: usize = report.phases.iter().map(|p| p.requests).sum();
        assert_eq!(report.outcomes.len(), total);
    }

    #[test]
    fn test_report_consistent_with_system() {
        let mut system = default_system();
        let report = simulate_demand(&mut system, &mut StdRng::seed_from_u64(11)).unwrap();

        let booked = report.outcomes.iter().filter(|o| o.is_booked()).count() as u32;
        assert_eq!(booked, report.total_booked);
        assert_eq!(
            report.outcomes.len() as u32 - booked,
            report.waitlist
        );
        let revenue: f64 = report.phases.iter().map(|p| p.revenue).sum();
        assert!((revenue - report.total_revenue).abs() < 1e-6);
        assert_eq!(report.final_strategy, system.strategy());

        for class in system.classes() {
            assert!(class.booked() <= class.capacity());
            assert_eq!(class.price_history().len(), class.booked() as usize);
            assert_eq!(class.revenue_history().len(), class.booked() as usize);
        }
    }

    #[test]
    fn test_user_ids_sequential() {
        let mut system = default_system();
        let report = simulate_demand(&mut system, &mut StdRng::seed_from_u64(5)).unwrap();
        for (i, outcome) in report.outcomes.iter().enumerate() {
            let user_id = match outcome {
                BookingOutcome::Booked { user_id, .. } | BookingOutcome::Waitlisted { user_id, .. } => {
                    *user_id
                }
            };
            assert_eq!(user_id, i as u32 + 1);
        }
    }

    #[test]
    fn test_rerun_resets_state() {
        let mut system = default_system();
        let first = simulate_demand(&mut system, &mut StdRng::seed_from_u64(8)).unwrap();
        let second = simulate_demand(&mut system, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_small_venue_builds_waitlist() {
        let config = EventConfig {
            platinum_capacity: 2,
            gold_capacity: 2,
            silver_capacity: 2,
            bronze_capacity: 2,
            ..Default::default()
        };
        let mut system = PricingSystem::from_config(&config).unwrap();
        let report = simulate_demand(&mut system, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(report.total_booked, 8);
        assert_eq!(report.phases[2].requests, 0);
        assert_eq!(report.final_strategy, PricingStrategy::Surge);
        assert!(report.waitlist > 0);
    }
}
