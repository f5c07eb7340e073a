//! Decision snapshots
//!
//! A snapshot is everything needed to replay one engine call: the game state,
//! the engine settings and the seed. Snapshots are pretty-printed JSON so
//! they can be written by hand for test fixtures.

use crate::ai::personality::{Difficulty, Personality};
use crate::core::GameState;
use crate::game::actions::Action;
use crate::{Result, TacticsError};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSnapshot {
    pub game_state: GameState,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub personality: Personality,

    /// Seed for the selection RNG; the caller picks one when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Actions the AI already took this turn, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intra_turn_actions: Vec<Action>,
}

impl DecisionSnapshot {
    pub fn new(game_state: GameState, difficulty: Difficulty, personality: Personality) -> Self {
        DecisionSnapshot {
            game_state,
            difficulty,
            personality,
            seed: None,
            intra_turn_actions: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Record an action taken this turn and advance the per-turn counter
    pub fn record(&mut self, action: Action) {
        self.game_state.actions_this_turn += 1;
        self.intra_turn_actions.push(action);
    }

    /// Selection RNG for this snapshot, seeded with `seed` or `fallback`
    pub fn rng(&self, fallback: u64) -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(self.seed.unwrap_or(fallback))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: DecisionSnapshot = serde_json::from_str(json)?;
        snapshot.game_state.validate()?;
        Ok(snapshot)
    }

    /// Save this snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Load and validate a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json).map_err(|e| annotate(path.as_ref(), e))
    }

    /// Async variant of [`DecisionSnapshot::load_from_file`] for the binary
    pub async fn load_async<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&json).map_err(|e| annotate(path.as_ref(), e))
    }
}

fn annotate(path: &Path, err: TacticsError) -> TacticsError {
    match err {
        TacticsError::InvalidState(msg) => {
            TacticsError::InvalidState(format!("{}: {msg}", path.display()))
        }
        other => other,
    }
}
