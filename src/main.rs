//! Hero Tactics - command line driver
//!
//! Runs the opponent engine against decision snapshots.

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use hero_tactics::{
    ai::{Difficulty, Personality},
    game::{DecisionEngine, DecisionSnapshot, EngineConfig, VerbosityLevel},
    tournament::{print_report, run_tourney},
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tactics")]
#[command(about = "Hero Tactics - heuristic opponent engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one action for a snapshot and print it as JSON
    Decide {
        /// Decision snapshot (.json)
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,

        /// Difficulty: easy, medium, hard (overrides snapshot and config)
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Personality: balanced, aggressive, calculated
        #[arg(long)]
        personality: Option<Personality>,

        /// Seed for the selection RNG
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level: silent/0, minimal/1, normal/2, verbose/3
        #[arg(long, short = 'v')]
        verbosity: Option<VerbosityLevel>,

        /// Engine configuration file (.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Replay many seeded decisions per snapshot and difficulty in parallel
    Tourney {
        /// Decision snapshots (.json)
        #[arg(value_name = "SNAPSHOT", required = true)]
        snapshots: Vec<PathBuf>,

        /// Seeds per snapshot and difficulty
        #[arg(long, default_value = "100")]
        games: usize,

        /// Master seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Force one personality for every snapshot
        #[arg(long)]
        personality: Option<Personality>,

        /// Engine configuration file (.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decide {
            snapshot,
            difficulty,
            personality,
            seed,
            verbosity,
            config,
        } => run_decide(snapshot, difficulty, personality, seed, verbosity, config).await?,
        Commands::Tourney {
            snapshots,
            games,
            seed,
            personality,
            config,
        } => run_tourney_cmd(snapshots, games, seed, personality, config).await?,
    }

    Ok(())
}

async fn run_decide(
    snapshot_path: PathBuf,
    difficulty: Option<Difficulty>,
    personality: Option<Personality>,
    seed: Option<u64>,
    verbosity: Option<VerbosityLevel>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path.as_deref())?;
    let snapshot = DecisionSnapshot::load_async(&snapshot_path)
        .await
        .with_context(|| format!("loading snapshot {}", snapshot_path.display()))?;

    config.difficulty = difficulty.unwrap_or(snapshot.difficulty);
    config.personality = personality.unwrap_or(snapshot.personality);
    if let Some(verbosity) = verbosity {
        config.verbosity = verbosity;
    }

    let seed = seed
        .or(snapshot.seed)
        .or(config.seed)
        .unwrap_or_else(rand::random);
    if config.verbosity >= VerbosityLevel::Normal {
        println!(
            "Deciding for {} ({}, {}) with seed {seed}",
            snapshot_path.display(),
            config.difficulty,
            config.personality
        );
    }

    let engine = DecisionEngine::new(config);
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let action = engine.decide(&snapshot.game_state, &mut rng)?;

    println!("{}", serde_json::to_string(&action)?);
    Ok(())
}

async fn run_tourney_cmd(
    paths: Vec<PathBuf>,
    games: usize,
    seed: u64,
    personality: Option<Personality>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    println!("=== Hero Tactics - Calibration Tournament ===\n");
    let config = load_config(config_path.as_deref())?;

    let mut snapshots = Vec::with_capacity(paths.len());
    for path in &paths {
        let snapshot = DecisionSnapshot::load_async(path)
            .await
            .with_context(|| format!("loading snapshot {}", path.display()))?;
        println!("  {}: {} cards in hand", path.display(), snapshot.game_state.ai_hand.len());
        snapshots.push(snapshot);
    }
    println!("Using tournament seed: {seed}\n");

    // Rayon work is CPU-bound; keep it off the async worker threads
    let report = tokio::task::spawn_blocking(move || {
        run_tourney(&snapshots, games, seed, &config, personality)
    })
    .await??;

    print_report(&report);
    Ok(())
}
