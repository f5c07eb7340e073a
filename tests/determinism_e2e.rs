//! End-to-end determinism tests
//!
//! Every snapshot in `test_states/` is ranked and decided twice with the same
//! seed; both runs must agree exactly. Tests are generated per `.json` file by
//! the `dir-test` macro, so adding a fixture is enough to cover it.

use dir_test::{dir_test, Fixture};
use hero_tactics::ai::Difficulty;
use hero_tactics::game::{DecisionEngine, DecisionSnapshot, EngineConfig, VerbosityLevel};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use similar_asserts::assert_eq;

fn engine_for(snapshot: &DecisionSnapshot, difficulty: Difficulty) -> DecisionEngine {
    DecisionEngine::new(EngineConfig {
        difficulty,
        personality: snapshot.personality,
        verbosity: VerbosityLevel::Silent,
        ..EngineConfig::default()
    })
}

/// Rankings rendered as JSON so a mismatch shows a readable diff
fn ranking_json(snapshot: &DecisionSnapshot, difficulty: Difficulty) -> String {
    let ranking = engine_for(snapshot, difficulty)
        .rank(&snapshot.game_state, difficulty)
        .expect("fixture should rank");
    serde_json::to_string_pretty(&ranking).expect("ranking serializes")
}

fn decisions(snapshot: &DecisionSnapshot, difficulty: Difficulty, seed: u64) -> Vec<String> {
    let engine = engine_for(snapshot, difficulty);
    let mut rng = ChaCha12Rng::seed_from_u64(snapshot.seed.unwrap_or(seed));
    (0..20)
        .map(|_| {
            let action = engine
                .decide(&snapshot.game_state, &mut rng)
                .expect("fixture should decide");
            action.to_string()
        })
        .collect()
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_states",
    glob: "**/*.json",
)]
fn test_snapshot_determinism(fixture: Fixture<&str>) {
    let snapshot = DecisionSnapshot::from_json(fixture.content())
        .unwrap_or_else(|e| panic!("{}: {e}", fixture.path()));

    for difficulty in Difficulty::ALL {
        let first = ranking_json(&snapshot, difficulty);
        let second = ranking_json(&snapshot, difficulty);
        assert_eq!(first, second, "{} ranking differs at {difficulty}", fixture.path());

        let run1 = decisions(&snapshot, difficulty, 42);
        let run2 = decisions(&snapshot, difficulty, 42);
        assert!(!run1.is_empty());
        assert_eq!(run1, run2, "{} decisions differ at {difficulty}", fixture.path());
    }
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_states",
    glob: "**/*.json",
)]
fn test_snapshot_survives_save_and_load(fixture: Fixture<&str>) {
    let snapshot = DecisionSnapshot::from_json(fixture.content()).unwrap();
    let reloaded = DecisionSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(snapshot, reloaded);
}

#[dir_test(
    dir: "$CARGO_MANIFEST_DIR/test_states",
    glob: "**/*.json",
)]
fn test_snapshot_choices_are_legal(fixture: Fixture<&str>) {
    use hero_tactics::game::Action;

    let snapshot = DecisionSnapshot::from_json(fixture.content()).unwrap();
    let state = &snapshot.game_state;
    for difficulty in Difficulty::ALL {
        let engine = engine_for(&snapshot, difficulty);
        for seed in 0..25 {
            let action = engine
                .decide(state, &mut ChaCha12Rng::seed_from_u64(seed))
                .unwrap();
            match action {
                Action::Deploy { card, row } => {
                    assert!(state.ai_hand.get(card).is_some(), "{action}");
                    assert!(state.ai_board.can_deploy(row), "{action}");
                }
                Action::Ultimate { card, .. } => {
                    let (_, _, caster) = state.ai_board.find(card).expect("caster on board");
                    assert!(caster.has_ultimate_available(), "{action}");
                }
                Action::Pass => {}
            }
        }
    }
}
