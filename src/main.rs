mod cli;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::ExitCode;

use cli::{Cli, Command};
use eventrix_sim::analytics::{GanttChart, PricingAnalytics};
use eventrix_sim::config::EventConfig;
use eventrix_sim::error::exit_code;
use eventrix_sim::generator::generate_users;
use eventrix_sim::pricing::{simulate_demand, DemandReport, PricingSystem};
use eventrix_sim::scheduler::{ScheduleOutcome, SchedulerSimulator};
use eventrix_sim::session::run_session;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::from(exit_code::SUCCESS as u8),
        Err(e) => {
            eprintln!("Error: {e:#}");
            if let Some(err) = e.downcast_ref::<eventrix_sim::Error>() {
                ExitCode::from(err.exit_code() as u8)
            } else {
                ExitCode::from(exit_code::GENERAL_ERROR as u8)
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EventConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EventConfig::default(),
    };
    config.validate()?;

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match cli.command {
        Command::Schedule {
            discipline,
            users,
            quantum,
        } => {
            let users = generate_users(users.unwrap_or(config.user_count), &mut rng);
            let outcome = SchedulerSimulator::new()
                .with_quantum(quantum.unwrap_or(config.quantum))
                .schedule(&users, discipline)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_schedule(&outcome);
            }
        }
        Command::Price => {
            let config = config.rebalanced();
            let mut system = PricingSystem::from_config(&config)?;
            let report = simulate_demand(&mut system, &mut rng)?;
            let analytics = PricingAnalytics::from_system(&system);
            if cli.json {
                let value = serde_json::json!({ "report": report, "analytics": analytics });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print_pricing(&report, &analytics);
            }
        }
        Command::Run { discipline } => {
            let report = run_session(&config, discipline, &mut rng)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.event);
                println!("{}", "=".repeat(report.event.len()));
                println!();
                print_schedule(&report.scheduling);
                println!();
                print_pricing(&report.pricing, &report.pricing_analytics);
            }
        }
    }

    Ok(())
}

fn print_schedule(outcome: &ScheduleOutcome) {
    println!(
        "{} ({})",
        outcome.discipline.name(),
        outcome.discipline.description()
    );
    println!();
    println!("{:>6} {:>8} {:>8} {:>8}", "User", "Start", "Finish", "Length");
    for entry in outcome.entries() {
        println!(
            "{:>6} {:>8} {:>8} {:>8}",
            entry.user_id,
            entry.start_time,
            entry.finish_time,
            entry.duration()
        );
    }

    let chart = GanttChart::from_outcome(outcome);
    println!();
    for bar in &chart.bars {
        let offset = (bar.start_percent / 2.0).round() as usize;
        let width = ((bar.width_percent / 2.0).round() as usize).max(1);
        println!("{:>6} |{}{}", bar.user_id, " ".repeat(offset), "#".repeat(width));
    }

    let m = &outcome.metrics;
    println!();
    println!("Avg turnaround:   {:.2} min", m.avg_turnaround_time);
    println!("Avg waiting:      {:.2} min", m.avg_waiting_time);
    println!("Avg response:     {:.2} min", m.avg_response_time);
    println!("Completion time:  {} min", m.total_completion_time);
    println!("Throughput:       {:.3} users/min", m.throughput);
    println!("Utilization:      {:.1}%", m.utilization * 100.0);
}

fn print_pricing(report: &DemandReport, analytics: &PricingAnalytics) {
    println!("{:<14} {:>9} {:>7} {:>9}", "Phase", "Requests", "Booked", "Revenue");
    for phase in &report.phases {
        println!(
            "{:<14} {:>9} {:>7} {:>9.2}",
            format!("{:?}", phase.phase),
            phase.requests,
            phase.booked,
            phase.revenue
        );
    }

    println!();
    println!(
        "{:<10} {:>10} {:>7} {:>9} {:>9} {:>10}",
        "Tier", "Booked", "Util", "Price", "Avg", "Revenue"
    );
    for tier in &analytics.tiers {
        println!(
            "{:<10} {:>10} {:>6.1}% {:>9.2} {:>9.2} {:>10.2}",
            tier.tier.name(),
            format!("{}/{}", tier.booked, tier.capacity),
            tier.utilization_percent,
            tier.current_price,
            tier.average_price,
            tier.revenue
        );
    }

    println!();
    for change in &report.strategy_changes {
        println!(
            "Request {:>3}: {} -> {} ({})",
            change.request,
            change.from,
            change.to,
            change.to.reason()
        );
    }
    println!(
        "Strategy: {}  Sold: {}/{}  Waitlist: {}  Revenue: {:.2}",
        analytics.strategy,
        analytics.total_booked,
        analytics.total_capacity,
        analytics.waitlist,
        analytics.total_revenue
    );
}
