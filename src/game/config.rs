//! Engine configuration
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! defaults below.

use crate::ai::candidates::clamp_limit;
use crate::ai::personality::{Difficulty, Personality};
use crate::ai::planner::PlannerSettings;
use crate::game::logger::VerbosityLevel;
use crate::{Result, TacticsError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub personality: Personality,
    pub verbosity: VerbosityLevel,
    /// Candidates simulated per decision, clamped into 6..=12
    pub candidate_limit: usize,
    /// Weight of the opponent reply model on hard difficulty
    pub lookahead_weight: f64,
    /// Pass when the best candidate scores below this
    pub pass_floor: f64,
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let planner = PlannerSettings::default();
        EngineConfig {
            difficulty: Difficulty::default(),
            personality: Personality::default(),
            verbosity: VerbosityLevel::default(),
            candidate_limit: planner.candidate_limit,
            lookahead_weight: planner.lookahead_weight,
            pass_floor: planner.pass_floor,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lookahead_weight.is_finite() || self.lookahead_weight < 0.0 {
            return Err(TacticsError::Config(format!(
                "lookahead_weight must be a non-negative number, got {}",
                self.lookahead_weight
            )));
        }
        if !self.pass_floor.is_finite() {
            return Err(TacticsError::Config(format!(
                "pass_floor must be finite, got {}",
                self.pass_floor
            )));
        }
        Ok(())
    }

    /// Planner tunables, with the candidate limit clamped
    pub fn planner_settings(&self) -> PlannerSettings {
        PlannerSettings {
            candidate_limit: clamp_limit(self.candidate_limit),
            lookahead_weight: self.lookahead_weight,
            pass_floor: self.pass_floor,
        }
    }
}
