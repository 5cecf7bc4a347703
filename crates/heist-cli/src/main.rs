//! heist - headless match runner.
//!
//! - `heist run` - simulate a match and print the outcome
//! - `heist tuning` - print the effective tuning as YAML

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use heist_ai::Tuning;
use heist_sim::{load_tuning, standard_raid, Match, MatchOutcome, MatchRecorder};

#[derive(Parser)]
#[command(name = "heist")]
#[command(about = "Boss-versus-raiders contest simulator", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Tuning overrides (YAML)
    #[arg(short, long, global = true)]
    tuning: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless match
    Run {
        /// Tick budget
        #[arg(long, default_value = "18000")]
        ticks: u64,

        /// Simulation seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Append match events to this JSONL file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Print the effective tuning
    Tuning,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let tuning = match &cli.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };

    match cli.command {
        Commands::Run {
            ticks,
            seed,
            record,
        } => run_match(tuning, ticks, seed, record),
        Commands::Tuning => {
            print!("{}", serde_yaml::to_string(&tuning)?);
            Ok(())
        }
    }
}

fn run_match(tuning: Tuning, ticks: u64, seed: u64, record: Option<PathBuf>) -> Result<()> {
    let mut m = Match::new(standard_raid(tuning), seed);
    let outcome = m.run(ticks);

    let verdict = match outcome {
        MatchOutcome::ObjectiveSecured => "raiders secured the objective",
        MatchOutcome::RaidersEliminated => "the boss wiped the raid",
        MatchOutcome::BossSlain => "the raiders slew the boss",
        MatchOutcome::TimeExpired => "stalemate: tick budget expired",
    };
    info!(tick = m.world.tick, seed = seed, "{verdict}");

    for id in m.world.raider_ids() {
        if let Some(agent) = m.world.agent(id) {
            info!(
                raider = id,
                health = agent.health,
                alive = agent.alive,
                "raider status"
            );
        }
    }

    if let Some(path) = record {
        let recorder = MatchRecorder::new(&path);
        recorder.emit_trace(&m.world.trace)?;
        info!(events = m.world.trace.events.len(), path = %path.display(), "match recorded");
    }

    Ok(())
}
