//! Calibration tournament: run many seeded decisions in parallel
//!
//! Every snapshot is ranked once per difficulty, then the seeded selection is
//! replayed for `games` different seeds using rayon. The report shows how
//! often each difficulty strayed from the top-ranked candidate and which
//! kinds of actions it ended up playing.

use crate::ai::personality::{Difficulty, Personality};
use crate::ai::planner::{Planner, Ranking};
use crate::ai::rules::RuleRegistry;
use crate::game::actions::ActionKind;
use crate::game::config::EngineConfig;
use crate::game::snapshot::DecisionSnapshot;
use crate::{Result, TacticsError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::time::Instant;

/// Statistics for one difficulty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DifficultyStats {
    pub decisions: usize,
    /// Decisions that did not play the top-ranked candidate
    pub deviations: usize,
    pub kinds: FxHashMap<ActionKind, usize>,
}

impl DifficultyStats {
    fn merge(mut self, other: DifficultyStats) -> Self {
        self.decisions += other.decisions;
        self.deviations += other.deviations;
        for (kind, count) in other.kinds {
            *self.kinds.entry(kind).or_insert(0) += count;
        }
        self
    }

    pub fn deviation_rate(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.deviations as f64 / self.decisions as f64
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TourneyReport {
    pub by_difficulty: FxHashMap<Difficulty, DifficultyStats>,
    pub games: usize,
    pub snapshots: usize,
    pub elapsed_secs: f64,
}

impl TourneyReport {
    pub fn stats(&self, difficulty: Difficulty) -> Option<&DifficultyStats> {
        self.by_difficulty.get(&difficulty)
    }
}

/// Seed for game `game_idx` of a tournament with master seed `seed`
pub fn game_seed(seed: u64, game_idx: usize) -> u64 {
    seed.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Run every snapshot under every difficulty for `games` seeds
pub fn run_tourney(
    snapshots: &[DecisionSnapshot],
    games: usize,
    seed: u64,
    config: &EngineConfig,
    personality: Option<Personality>,
) -> Result<TourneyReport> {
    if snapshots.is_empty() {
        return Err(TacticsError::Config(
            "tournament needs at least one snapshot".to_string(),
        ));
    }
    if games == 0 {
        return Err(TacticsError::Config("--games must be at least 1".to_string()));
    }

    let start = Instant::now();
    let registry = RuleRegistry::builtin();
    let settings = config.planner_settings();

    // Rankings are deterministic, so compute each (snapshot, difficulty) once
    let jobs: Vec<(usize, Difficulty)> = (0..snapshots.len())
        .flat_map(|i| Difficulty::ALL.into_iter().map(move |d| (i, d)))
        .collect();
    let rankings: Vec<(usize, Difficulty, Ranking)> = jobs
        .par_iter()
        .map(|&(i, difficulty)| {
            let snapshot = &snapshots[i];
            let planner = Planner::new(
                &registry,
                personality.unwrap_or(snapshot.personality),
                settings,
            );
            planner
                .rank(&snapshot.game_state, difficulty)
                .map(|ranking| (i, difficulty, ranking))
        })
        .collect::<Result<Vec<_>>>()?;

    let by_difficulty = rankings
        .par_iter()
        .flat_map(|(i, difficulty, ranking)| {
            (0..games).into_par_iter().map(move |game_idx| (*i, *difficulty, ranking, game_idx))
        })
        .map(|(i, difficulty, ranking, game_idx)| {
            let snapshot = &snapshots[i];
            let planner = Planner::new(
                &registry,
                personality.unwrap_or(snapshot.personality),
                settings,
            );
            let mut rng = ChaCha12Rng::seed_from_u64(game_seed(seed, game_idx));
            let action = planner.choose(ranking, difficulty, &mut rng);

            let mut stats = DifficultyStats {
                decisions: 1,
                ..DifficultyStats::default()
            };
            if ranking.best().map(|b| b.action != action).unwrap_or(false) {
                stats.deviations = 1;
            }
            stats.kinds.insert(action.kind(), 1);

            let mut map = FxHashMap::default();
            map.insert(difficulty, stats);
            map
        })
        .reduce(FxHashMap::default, |mut acc, next| {
            for (difficulty, stats) in next {
                let merged = acc.remove(&difficulty).unwrap_or_default().merge(stats);
                acc.insert(difficulty, merged);
            }
            acc
        });

    Ok(TourneyReport {
        by_difficulty,
        games,
        snapshots: snapshots.len(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}

/// Print a report the way the CLI shows it
pub fn print_report(report: &TourneyReport) {
    println!("=== Calibration Complete ===");
    println!(
        "{} snapshots x {} seeds x {} difficulties in {:.2}s\n",
        report.snapshots,
        report.games,
        Difficulty::ALL.len(),
        report.elapsed_secs
    );

    for difficulty in Difficulty::ALL {
        let Some(stats) = report.stats(difficulty) else {
            continue;
        };
        println!(
            "{difficulty}: {} decisions, {:.1}% off the top candidate",
            stats.decisions,
            100.0 * stats.deviation_rate()
        );
        let mut kinds: Vec<_> = stats.kinds.iter().collect();
        kinds.sort_by_key(|(kind, _)| **kind);
        for (kind, count) in kinds {
            println!(
                "    {:?}: {} ({:.1}%)",
                kind,
                count,
                100.0 * *count as f64 / stats.decisions as f64
            );
        }
    }
}
