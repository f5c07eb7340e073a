//! Candidate action generation
//!
//! Produces a short, prioritised list of actions for the planner to
//! simulate: deployments from hand, ready ultimates on the board, and a pass.

use crate::ai::personality::{PersonalityWeights, BALANCED};
use crate::ai::positioning::{pick_row, PositioningAdvisor};
use crate::ai::rules::RuleRegistry;
use crate::ai::win_condition::GamePlan;
use crate::core::hero::{self, Archetype};
use crate::core::{Card, GameState, Role, RowName};
use crate::game::actions::Action;
use serde::Serialize;

pub const MIN_CANDIDATES: usize = 6;
pub const MAX_CANDIDATES: usize = 12;

/// Row scores below this are not offered, unless it is the card's best row
pub const DEPLOY_FLOOR: f64 = 10.0;

const PASS_PRIORITY: f64 = 0.5;
const PASS_PRIORITY_BUDGET_SPENT: f64 = 5.0;
const HELD_TURN_BONUS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAction {
    pub action: Action,
    pub priority: f64,
    pub rationale: String,
}

impl ScoredAction {
    fn new(action: Action, priority: f64, rationale: impl Into<String>) -> Self {
        ScoredAction {
            action,
            priority,
            rationale: rationale.into(),
        }
    }
}

/// Clamp a configured candidate limit into the supported range
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_CANDIDATES, MAX_CANDIDATES)
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateGenerator<'a> {
    registry: &'a RuleRegistry,
    weights: &'static PersonalityWeights,
    limit: usize,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(registry: &'a RuleRegistry, weights: &'static PersonalityWeights, limit: usize) -> Self {
        CandidateGenerator {
            registry,
            weights,
            limit: clamp_limit(limit),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Candidates sorted by priority, highest first. Always contains `Pass`.
    pub fn generate(&self, state: &GameState, plan: GamePlan, budget: u32) -> Vec<ScoredAction> {
        let mut candidates = Vec::new();
        self.deploy_candidates(state, plan, &mut candidates);
        self.ultimate_candidates(state, &mut candidates);

        let pass_priority = if state.actions_this_turn >= budget {
            PASS_PRIORITY_BUDGET_SPENT
        } else {
            PASS_PRIORITY * self.weights.pass_bias
        };
        candidates.push(ScoredAction::new(Action::Pass, pass_priority, "pass"));

        candidates.sort_by(|a, b| b.priority.total_cmp(&a.priority));
        candidates.truncate(self.limit);
        if !candidates.iter().any(|c| c.action.is_pass()) {
            candidates.pop();
            candidates.push(ScoredAction::new(Action::Pass, pass_priority, "pass"));
        }
        candidates
    }

    fn deploy_candidates(&self, state: &GameState, plan: GamePlan, out: &mut Vec<ScoredAction>) {
        let advisor = PositioningAdvisor::new(self.registry, self.weights);
        let ai = &state.ai_board;

        for card in state.ai_hand.iter() {
            let scores = advisor.row_scores(card, ai, &state.enemy_board, plan);
            let best = pick_row(&scores, ai);

            for row in RowName::ALL {
                let Some(score) = scores[row] else {
                    continue;
                };
                if Some(row) != best && score < DEPLOY_FLOOR {
                    continue;
                }

                let priority = (score / 10.0
                    + plan_priority_bonus(&advisor, state, card, row, plan)
                    + HELD_TURN_BONUS * card.turns_held as f64)
                    * self.weights.deploy_bias;
                let rationale = if Some(row) == best {
                    format!("{} to best row {row}", card.hero)
                } else {
                    format!("{} to {row}", card.hero)
                };
                out.push(ScoredAction::new(
                    Action::Deploy { card: card.id, row },
                    priority,
                    rationale,
                ));
            }
        }
    }

    fn ultimate_candidates(&self, state: &GameState, out: &mut Vec<ScoredAction>) {
        let ai = &state.ai_board;
        for (row, slot, card) in ai.ready_ultimates() {
            let plan = self
                .registry
                .plan_ultimate(card, row, slot, ai, &state.enemy_board);
            out.push(ScoredAction::new(
                Action::Ultimate {
                    card: card.id,
                    target: plan.target,
                },
                plan.priority * self.weights.ultimate_bias,
                format!("{} ultimate: {}", card.hero, plan.rationale),
            ));
        }
    }
}

fn plan_priority_bonus(
    advisor: &PositioningAdvisor<'_>,
    state: &GameState,
    card: &Card,
    row: RowName,
    plan: GamePlan,
) -> f64 {
    let ai = &state.ai_board;
    match plan {
        // This deployment completes a three-unit row
        GamePlan::RowCrush if ai.row(row).live_count() == 2 => 3.0,
        GamePlan::ColumnControl => {
            let Some(slot) = advisor.best_column(card, row, ai) else {
                return 0.0;
            };
            let covering = row
                .ahead()
                .iter()
                .filter_map(|r| ai.row(*r).card_at(slot))
                .find(|c| c.role == Role::Tank);
            match covering {
                Some(tank) if hero::has_archetype(&tank.hero, Archetype::Protector) => 3.0,
                Some(_) => 2.0,
                None => 0.0,
            }
        }
        GamePlan::ProtectScale => {
            let sniper_back =
                row == RowName::Back && hero::has_archetype(&card.hero, Archetype::Sniper);
            match (card.role, row) {
                (Role::Tank, RowName::Front) | (Role::Support, RowName::Back) => 2.0,
                _ if sniper_back => 2.0,
                _ => 0.0,
            }
        }
        _ => 0.0,
    }
}

/// Generate with the built-in rules, balanced weights and the widest limit
pub fn generate(state: &GameState, plan: GamePlan) -> Vec<ScoredAction> {
    let registry = RuleRegistry::builtin();
    CandidateGenerator::new(&registry, &BALANCED, MAX_CANDIDATES).generate(state, plan, u32::MAX)
}
