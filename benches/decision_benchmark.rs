//! Decision latency benchmarks
//!
//! Measures one full engine call per fixture in `test_states/` at every
//! difficulty, plus the board evaluator on its own. Hard pays for the
//! opponent replies, so it is the number to watch.
//!
//! Build without `verbose-logging` to keep candidate formatting out of the
//! measurement.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hero_tactics::{
    ai::{evaluate, Difficulty},
    game::{DecisionEngine, DecisionSnapshot, EngineConfig, VerbosityLevel},
    Result,
};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;
use std::time::Duration;

/// Fixtures loaded once, reused across iterations
struct BenchmarkSetup {
    snapshots: Vec<(String, DecisionSnapshot)>,
}

impl BenchmarkSetup {
    fn load() -> Result<Self> {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_states");
        let mut snapshots = Vec::new();
        for name in ["opening", "row_wipe", "healer_pressure", "full_board"] {
            let snapshot = DecisionSnapshot::load_from_file(dir.join(format!("{name}.json")))?;
            snapshots.push((name.to_string(), snapshot));
        }
        Ok(BenchmarkSetup { snapshots })
    }
}

fn engine(difficulty: Difficulty, snapshot: &DecisionSnapshot) -> DecisionEngine {
    DecisionEngine::new(EngineConfig {
        difficulty,
        personality: snapshot.personality,
        verbosity: VerbosityLevel::Silent,
        ..EngineConfig::default()
    })
}

/// Benchmark: one decision per fixture and difficulty
fn bench_decide(c: &mut Criterion) {
    let setup = match BenchmarkSetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load fixtures: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("decide");
    group.measurement_time(Duration::from_secs(5));

    for (name, snapshot) in &setup.snapshots {
        for difficulty in Difficulty::ALL {
            let engine = engine(difficulty, snapshot);
            let id = BenchmarkId::new(format!("{name}/{difficulty}"), snapshot.game_state.ai_hand.len());
            group.bench_with_input(id, snapshot, |b, snapshot| {
                let mut rng = ChaCha12Rng::seed_from_u64(42);
                b.iter(|| {
                    engine
                        .decide(black_box(&snapshot.game_state), &mut rng)
                        .expect("fixture should decide")
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: the evaluator alone
fn bench_evaluate(c: &mut Criterion) {
    let setup = match BenchmarkSetup::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skipping benchmark - failed to load fixtures: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("evaluate");
    for (name, snapshot) in &setup.snapshots {
        let state = &snapshot.game_state;
        group.bench_function(name.as_str(), |b| {
            b.iter(|| evaluate(black_box(&state.ai_board), black_box(&state.enemy_board)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decide, bench_evaluate);
criterion_main!(benches);
