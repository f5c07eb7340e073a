//! Decision engine: the entry point the turn driver calls
//!
//! Owns the rule registry, the planner settings and the logger. One call to
//! [`DecisionEngine::decide`] returns one action.

use crate::ai::personality::{Difficulty, Personality};
use crate::ai::planner::{Planner, Ranking};
use crate::ai::rules::RuleRegistry;
use crate::core::GameState;
use crate::game::actions::Action;
use crate::game::adapter::{snapshot_from_reader, BoardReader};
use crate::game::config::EngineConfig;
use crate::game::logger::DecisionLogger;
use crate::Result;
use rand::RngCore;

#[derive(Debug)]
pub struct DecisionEngine {
    registry: RuleRegistry,
    config: EngineConfig,
    logger: DecisionLogger,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Self {
        DecisionEngine {
            registry: RuleRegistry::builtin(),
            logger: DecisionLogger::with_verbosity(config.verbosity),
            config,
        }
    }

    /// Replace the built-in hero rules
    pub fn with_registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn logger(&self) -> &DecisionLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut DecisionLogger {
        &mut self.logger
    }

    fn planner(&self, personality: Personality) -> Planner<'_> {
        Planner::new(&self.registry, personality, self.config.planner_settings())
    }

    /// Rank `state` with the configured personality
    pub fn rank(&self, state: &GameState, difficulty: Difficulty) -> Result<Ranking> {
        self.planner(self.config.personality).rank(state, difficulty)
    }

    /// Decide with the configured difficulty and personality
    pub fn decide(&self, state: &GameState, rng: &mut dyn RngCore) -> Result<Action> {
        self.decide_with(state, self.config.difficulty, self.config.personality, rng)
    }

    pub fn decide_with(
        &self,
        state: &GameState,
        difficulty: Difficulty,
        personality: Personality,
        rng: &mut dyn RngCore,
    ) -> Result<Action> {
        let planner = self.planner(personality);
        let ranking = planner.rank(state, difficulty)?;
        self.logger.plan(&ranking);
        self.logger.candidates(&ranking);

        let action = planner.choose(&ranking, difficulty, rng);
        self.logger.choice(&action);
        Ok(action)
    }

    /// Read the host board through `reader`, then decide
    pub fn decide_from_reader(&self, reader: &dyn BoardReader, rng: &mut dyn RngCore) -> Result<Action> {
        let state = snapshot_from_reader(reader, &self.logger);
        self.decide(&state, rng)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        DecisionEngine::new(EngineConfig::default())
    }
}

/// One decision with the built-in rules and default settings
pub fn decide(
    state: &GameState,
    difficulty: Difficulty,
    personality: Personality,
    rng: &mut dyn RngCore,
) -> Result<Action> {
    let config = EngineConfig {
        difficulty,
        personality,
        verbosity: crate::game::logger::VerbosityLevel::Silent,
        ..EngineConfig::default()
    };
    DecisionEngine::new(config).decide(state, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Card, EntityId, Hand, Role};
    use crate::game::adapter::SnapshotReader;
    use crate::game::logger::VerbosityLevel;
    use rand::rngs::mock::StepRng;

    fn state() -> GameState {
        GameState::new(
            Board::new(),
            Board::new(),
            Hand::new(vec![Card::new(EntityId::new(1), "winston", Role::Tank, 5).with_power(3, 2, 1)]),
        )
    }

    #[test]
    fn test_decide_logs_plan_and_choice() {
        let mut engine = DecisionEngine::new(EngineConfig {
            verbosity: VerbosityLevel::Verbose,
            ..EngineConfig::default()
        });
        engine.logger_mut().enable_capture();

        let action = engine.decide(&state(), &mut StepRng::new(0, 0)).unwrap();
        assert!(matches!(action, Action::Deploy { .. }));

        let logs = engine.logger().logs();
        assert!(logs.iter().any(|e| e.category == Some("plan")));
        assert_eq!(logs.last().map(|e| e.category), Some(Some("choice")));
    }

    #[test]
    fn test_reader_path_matches_direct_path() {
        let engine = DecisionEngine::new(EngineConfig {
            verbosity: VerbosityLevel::Silent,
            ..EngineConfig::default()
        });
        let s = state();
        let direct = engine.decide(&s, &mut StepRng::new(0, 0)).unwrap();
        let via_reader = engine
            .decide_from_reader(&SnapshotReader::new(&s), &mut StepRng::new(0, 0))
            .unwrap();
        assert_eq!(direct, via_reader);
    }

    #[test]
    fn test_free_decide() {
        let action = decide(
            &GameState::default(),
            Difficulty::Easy,
            Personality::Aggressive,
            &mut StepRng::new(0, 0),
        )
        .unwrap();
        assert_eq!(action, Action::Pass);
    }
}
