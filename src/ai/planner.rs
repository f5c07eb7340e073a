//! Tactical planner: simulate, score and pick one action
//!
//! The pipeline per decision is classify, generate, simulate, score, then a
//! difficulty-dependent seeded choice. Everything except the final choice is
//! deterministic, and the only randomness comes from the caller's RNG.

use crate::ai::candidates::{CandidateGenerator, MAX_CANDIDATES};
use crate::ai::evaluator::BoardEvaluator;
use crate::ai::personality::{Difficulty, Personality};
use crate::ai::positioning::PositioningAdvisor;
use crate::ai::rules::RuleRegistry;
use crate::ai::simulation::{opponent_replies, simulate};
use crate::ai::win_condition::{classify, play_budget, Classification, GamePlan};
use crate::core::GameState;
use crate::game::actions::Action;
use crate::Result;
use rand::{Rng, RngCore};
use serde::Serialize;

const PRIORITY_WEIGHT: f64 = 0.25;
const KILL_BONUS: f64 = 1.5;
const RESERVE_BONUS: f64 = 0.3;

/// Tunables the planner reads from the engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlannerSettings {
    pub candidate_limit: usize,
    /// Weight of the opponent's average reply gain (hard only)
    pub lookahead_weight: f64,
    /// Below this best score the planner passes
    pub pass_floor: f64,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            candidate_limit: MAX_CANDIDATES,
            lookahead_weight: 0.4,
            pass_floor: -5.0,
        }
    }
}

/// One simulated and scored candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAction {
    pub action: Action,
    pub score: f64,
    /// Generator priority before simulation
    pub priority: f64,
    pub rationale: String,
    pub expected_kills: usize,
}

/// Full result of ranking a state, best candidate first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub classification: Classification,
    pub plan: GamePlan,
    pub budget: u32,
    /// Evaluation of the unchanged boards
    pub baseline: f64,
    pub candidates: Vec<RankedAction>,
}

impl Ranking {
    pub fn best(&self) -> Option<&RankedAction> {
        self.candidates.first()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    registry: &'a RuleRegistry,
    personality: Personality,
    settings: PlannerSettings,
}

impl<'a> Planner<'a> {
    pub fn new(registry: &'a RuleRegistry, personality: Personality, settings: PlannerSettings) -> Self {
        Planner {
            registry,
            personality,
            settings,
        }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Classify, generate and score every candidate for `state`
    pub fn rank(&self, state: &GameState, difficulty: Difficulty) -> Result<Ranking> {
        state.validate()?;

        let weights = self.personality.weights();
        let evaluator = BoardEvaluator::new(weights);
        let advisor = PositioningAdvisor::new(self.registry, weights);

        let classification = classify(&state.ai_hand, &state.ai_board, &state.enemy_board);
        let plan = classification.plan();
        let budget = play_budget(classification.condition, state);

        let generator = CandidateGenerator::new(self.registry, weights, self.settings.candidate_limit);
        let candidates = generator.generate(state, plan, budget);

        let baseline = evaluator.evaluate(&state.ai_board, &state.enemy_board);
        let mut ranked: Vec<RankedAction> = candidates
            .into_iter()
            .map(|candidate| {
                let outcome = simulate(state, &candidate.action, &advisor);
                let after = evaluator.evaluate(&outcome.ai, &outcome.enemy);
                let mut score = after - baseline + PRIORITY_WEIGHT * candidate.priority;

                if difficulty == Difficulty::Hard {
                    let replies = opponent_replies(&outcome.ai, &outcome.enemy, state.enemy_hand_size);
                    let total_gain: f64 = replies
                        .iter()
                        .map(|r| after - evaluator.evaluate(&r.ai, &r.enemy))
                        .sum();
                    score -= self.settings.lookahead_weight * total_gain / replies.len() as f64;
                }

                score += KILL_BONUS * outcome.enemy_kills as f64;
                score += RESERVE_BONUS * outcome.ai.ready_ultimates().count() as f64;

                RankedAction {
                    action: candidate.action,
                    score,
                    priority: candidate.priority,
                    rationale: candidate.rationale,
                    expected_kills: outcome.enemy_kills,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(Ranking {
            classification,
            plan,
            budget,
            baseline,
            candidates: ranked,
        })
    }

    /// Pick one action for `state`
    pub fn select_action(
        &self,
        state: &GameState,
        difficulty: Difficulty,
        rng: &mut dyn RngCore,
    ) -> Result<Action> {
        let ranking = self.rank(state, difficulty)?;
        Ok(self.choose(&ranking, difficulty, rng))
    }

    /// The seeded choice over an existing ranking
    pub fn choose(&self, ranking: &Ranking, difficulty: Difficulty, rng: &mut dyn RngCore) -> Action {
        let candidates = &ranking.candidates;
        let Some(best) = candidates.first() else {
            return Action::Pass;
        };
        if best.score < self.settings.pass_floor {
            return Action::Pass;
        }

        let index = choice_index(candidates.len(), difficulty, rng);
        candidates[index].action
    }
}

/// Index into a best-first list of `len` candidates
///
/// Hard plays the top candidate 90% of the time, medium 70% (otherwise a
/// uniform top-3 pick), easy 45% (otherwise uniform over everything).
pub fn choice_index(len: usize, difficulty: Difficulty, rng: &mut dyn RngCore) -> usize {
    if len <= 1 {
        return 0;
    }
    let roll: f64 = rng.gen();
    match difficulty {
        Difficulty::Hard => {
            if roll < 0.9 {
                0
            } else if roll < 0.97 {
                1
            } else {
                2.min(len - 1)
            }
        }
        Difficulty::Medium => {
            if roll < 0.7 {
                0
            } else {
                rng.gen_range(0..len.min(3))
            }
        }
        Difficulty::Easy => {
            if roll < 0.45 {
                0
            } else {
                rng.gen_range(0..len)
            }
        }
    }
}

/// Rank with the built-in rules and default settings
pub fn rank(state: &GameState, difficulty: Difficulty) -> Result<Ranking> {
    let registry = RuleRegistry::builtin();
    Planner::new(&registry, Personality::default(), PlannerSettings::default()).rank(state, difficulty)
}

/// Select with the built-in rules and default settings
pub fn select_action(state: &GameState, difficulty: Difficulty, rng: &mut dyn RngCore) -> Result<Action> {
    let registry = RuleRegistry::builtin();
    Planner::new(&registry, Personality::default(), PlannerSettings::default())
        .select_action(state, difficulty, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Card, EntityId, Hand, Role};
    use crate::TacticsError;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn unit(id: u32, hero: &str, role: Role, health: u32) -> Card {
        Card::new(EntityId::new(id), hero, role, health).with_power(2, 2, 2)
    }

    #[test]
    fn test_empty_state_passes() {
        let mut rng = StepRng::new(0, 0);
        let action = select_action(&GameState::default(), Difficulty::Hard, &mut rng).unwrap();
        assert_eq!(action, Action::Pass);
    }

    #[test]
    fn test_invalid_state_fails_fast() {
        let mut state = GameState::default();
        state.ai_hand = Hand::new(vec![unit(1, "test", Role::Damage, 3).with_health(4)]);
        let mut rng = StepRng::new(0, 0);
        let err = select_action(&state, Difficulty::Easy, &mut rng).unwrap_err();
        assert!(matches!(err, TacticsError::InvalidState(_)));
    }

    #[test]
    fn test_zero_roll_takes_top_candidate() {
        let state = GameState::new(
            Board::new(),
            Board::new(),
            Hand::new(vec![unit(1, "winston", Role::Tank, 5), unit(2, "mercy", Role::Support, 3)]),
        );
        for difficulty in Difficulty::ALL {
            let top = rank(&state, difficulty).unwrap().best().unwrap().action;
            let mut rng = StepRng::new(0, 0);
            assert_eq!(select_action(&state, difficulty, &mut rng).unwrap(), top);
        }
    }

    #[test]
    fn test_ranking_sorted_and_bounded() {
        let cards = (0..6).map(|i| unit(i, "test", Role::Damage, 3)).collect();
        let state = GameState::new(Board::new(), Board::new(), Hand::new(cards));
        let ranking = rank(&state, Difficulty::Medium).unwrap();
        assert!((1..=MAX_CANDIDATES).contains(&ranking.candidates.len()));
        for pair in ranking.candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert!(ranking.candidates.iter().any(|c| c.action.is_pass()));
    }

    #[test]
    fn test_pass_floor() {
        let state = GameState::new(
            Board::new(),
            Board::new(),
            Hand::new(vec![unit(1, "test", Role::Damage, 3)]),
        );
        let registry = RuleRegistry::builtin();
        let settings = PlannerSettings {
            pass_floor: 1.0e9,
            ..PlannerSettings::default()
        };
        let planner = Planner::new(&registry, Personality::Balanced, settings);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(planner.select_action(&state, Difficulty::Hard, &mut rng).unwrap(), Action::Pass);
    }

    #[test]
    fn test_choice_index_in_range() {
        let mut rng = ChaCha12Rng::seed_from_u64(7);
        for difficulty in Difficulty::ALL {
            for len in 1..=MAX_CANDIDATES {
                for _ in 0..50 {
                    assert!(choice_index(len, difficulty, &mut rng) < len);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_action() {
        let mut enemy = Board::new();
        enemy.middle.place(0, unit(20, "ana", Role::Support, 3));
        let state = GameState::new(
            Board::new(),
            enemy,
            Hand::new(vec![
                unit(1, "tracer", Role::Damage, 3),
                unit(2, "reinhardt", Role::Tank, 6),
                unit(3, "lucio", Role::Support, 3),
            ]),
        );
        for difficulty in Difficulty::ALL {
            let a = select_action(&state, difficulty, &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
            let b = select_action(&state, difficulty, &mut ChaCha12Rng::seed_from_u64(42)).unwrap();
            assert_eq!(a, b);
        }
    }
}
