//! Difficulty and personality settings
//!
//! A personality never changes the shape of the algorithm. It selects one of
//! the named multiplier tables below, which scale evaluator terms, placement
//! terms and candidate biases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" | "0" => Ok(Difficulty::Easy),
            "medium" | "normal" | "1" => Ok(Difficulty::Medium),
            "hard" | "2" => Ok(Difficulty::Hard),
            _ => Err(format!(
                "invalid difficulty '{s}' (expected: easy, medium, hard)"
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Balanced,
    Aggressive,
    Calculated,
}

impl Personality {
    pub fn weights(self) -> &'static PersonalityWeights {
        match self {
            Personality::Balanced => &BALANCED,
            Personality::Aggressive => &AGGRESSIVE,
            Personality::Calculated => &CALCULATED,
        }
    }
}

impl FromStr for Personality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(Personality::Balanced),
            "aggressive" | "aggro" => Ok(Personality::Aggressive),
            "calculated" | "control" => Ok(Personality::Calculated),
            _ => Err(format!(
                "invalid personality '{s}' (expected: balanced, aggressive, calculated)"
            )),
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Personality::Balanced => write!(f, "balanced"),
            Personality::Aggressive => write!(f, "aggressive"),
            Personality::Calculated => write!(f, "calculated"),
        }
    }
}

/// Named multiplier table for one personality
///
/// `material` must stay at least `tempo * 0.5` so that extra ally health can
/// never lower the board score (overkill is priced at 0.5 per point).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonalityWeights {
    // Board evaluator terms
    pub material: f64,
    pub pressure: f64,
    pub tempo: f64,
    pub synergy: f64,
    pub markers: f64,

    // Positioning
    /// Scales the power/synergy fit part of a row score
    pub placement_power: f64,
    /// Scales occupancy, density, hazard and anti-feed penalties
    pub placement_safety: f64,

    // Candidate priorities
    pub deploy_bias: f64,
    pub ultimate_bias: f64,
    pub pass_bias: f64,
}

pub const BALANCED: PersonalityWeights = PersonalityWeights {
    material: 1.0,
    pressure: 1.0,
    tempo: 1.0,
    synergy: 1.0,
    markers: 1.0,
    placement_power: 1.0,
    placement_safety: 1.0,
    deploy_bias: 1.0,
    ultimate_bias: 1.0,
    pass_bias: 1.0,
};

pub const AGGRESSIVE: PersonalityWeights = PersonalityWeights {
    material: 0.9,
    pressure: 1.3,
    tempo: 1.3,
    synergy: 1.0,
    markers: 0.9,
    placement_power: 1.2,
    placement_safety: 0.8,
    deploy_bias: 1.1,
    ultimate_bias: 1.25,
    pass_bias: 0.6,
};

pub const CALCULATED: PersonalityWeights = PersonalityWeights {
    material: 1.15,
    pressure: 0.9,
    tempo: 1.0,
    synergy: 1.15,
    markers: 1.1,
    placement_power: 0.95,
    placement_safety: 1.25,
    deploy_bias: 0.95,
    ultimate_bias: 0.9,
    pass_bias: 1.3,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("normal".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!("aggro".parse::<Personality>().unwrap(), Personality::Aggressive);
    }

    #[test]
    fn test_material_dominates_overkill_in_every_table() {
        for p in [Personality::Balanced, Personality::Aggressive, Personality::Calculated] {
            let w = p.weights();
            assert!(w.material >= w.tempo * 0.5, "{p} breaks health monotonicity");
        }
    }
}
