use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use eventrix_sim::scheduler::Discipline;

#[derive(Parser, Debug)]
#[command(name = "eventrix-sim")]
#[command(about = "Booking-queue scheduling and dynamic ticket pricing simulator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Event configuration (TOML)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// RNG seed (overrides the config file)
    #[arg(long, short = 's', global = true)]
    pub seed: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Schedule a random booking queue
    Schedule {
        /// fcfs, priority, roundrobin or shortest
        #[arg(long, short = 'd', default_value = "fcfs")]
        discipline: Discipline,

        /// Number of simulated users
        #[arg(long, short = 'n')]
        users: Option<u32>,

        /// Round-Robin quantum in minutes
        #[arg(long, short = 'q')]
        quantum: Option<i64>,
    },

    /// Replay the four-phase demand rush against the pricing system
    Price,

    /// Run scheduling and pricing together
    Run {
        /// fcfs, priority, roundrobin or shortest
        #[arg(long, short = 'd', default_value = "fcfs")]
        discipline: Discipline,
    },
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
