//! Strategic classification: which win condition to pursue this turn
//!
//! All five conditions are scored additively from hand composition and board
//! state; the best one becomes the turn's game plan.

use crate::ai::threat::assess_threats;
use crate::core::hero::{self, AbilityKind, Archetype};
use crate::core::{Board, GameState, Hand, Role, RowName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro strategy. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    PowerDominance,
    SynergyBurst,
    TempoControl,
    Attrition,
    ComboSetup,
}

impl WinCondition {
    pub const ALL: [WinCondition; 5] = [
        WinCondition::PowerDominance,
        WinCondition::SynergyBurst,
        WinCondition::TempoControl,
        WinCondition::Attrition,
        WinCondition::ComboSetup,
    ];

    /// Placement plan that serves this condition
    pub fn plan(self) -> GamePlan {
        match self {
            WinCondition::PowerDominance | WinCondition::SynergyBurst => GamePlan::RowCrush,
            WinCondition::TempoControl => GamePlan::Tempo,
            WinCondition::Attrition => GamePlan::ProtectScale,
            WinCondition::ComboSetup => GamePlan::ColumnControl,
        }
    }
}

impl fmt::Display for WinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WinCondition::PowerDominance => "power_dominance",
            WinCondition::SynergyBurst => "synergy_burst",
            WinCondition::TempoControl => "tempo_control",
            WinCondition::Attrition => "attrition",
            WinCondition::ComboSetup => "combo_setup",
        };
        f.write_str(name)
    }
}

/// Placement plan consumed by positioning and candidate scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePlan {
    /// Fill rows to three units for big row totals
    RowCrush,
    /// Stack columns behind a protector
    ColumnControl,
    /// Keep archetypes in safe rows and grow slowly
    ProtectScale,
    /// Spend resources on removal now
    Tempo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub condition: WinCondition,
    pub score: f64,
    /// Score of every condition, in declaration order
    pub scores: [(WinCondition, f64); 5],
}

impl Classification {
    pub fn plan(&self) -> GamePlan {
        self.condition.plan()
    }
}

/// Hand composition counts used by the scorers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HandProfile {
    avg_power: f64,
    avg_synergy: f64,
    tanks: f64,
    healers: f64,
    shield_providers: f64,
    removal: f64,
    damage_abilities: f64,
    burst: f64,
    synergy_dependent: f64,
}

fn profile_hand(hand: &Hand) -> HandProfile {
    let mut p = HandProfile::default();
    if hand.is_empty() {
        return p;
    }

    for card in hand.iter() {
        p.avg_power += card.power.max() as f64;
        p.avg_synergy += card.synergy_gain.total() as f64;
        if card.role == Role::Tank {
            p.tanks += 1.0;
        }
        let Some(profile) = hero::lookup(&card.hero) else {
            continue;
        };
        if profile.has(Archetype::Healer) {
            p.healers += 1.0;
        }
        if profile.has(Archetype::ShieldProvider) {
            p.shield_providers += 1.0;
        }
        if profile.has(Archetype::SynergyDependent) {
            p.synergy_dependent += 1.0;
        }
        if profile.ultimate.can_remove() {
            p.removal += 1.0;
        }
        if profile.ultimate.kind == AbilityKind::Damage {
            p.damage_abilities += 1.0;
        }
        if profile.ultimate.is_burst() {
            p.burst += 1.0;
        }
    }

    let n = hand.len() as f64;
    p.avg_power /= n;
    p.avg_synergy /= n;
    p
}

/// Classify the hand and boards into a win condition
pub fn classify(hand: &Hand, ai: &Board, enemy: &Board) -> Classification {
    let h = profile_hand(hand);

    let deficit = enemy.total_power() as f64 - ai.total_power() as f64;
    let frontline: f64 = ai
        .row(RowName::Front)
        .live()
        .filter(|(_, c)| c.role == Role::Tank)
        .map(|(_, c)| c.health as f64)
        .sum();
    let enemy_threat: f64 = assess_threats(enemy)
        .iter()
        .take(3)
        .map(|t| t.score)
        .sum::<f64>()
        / 100.0;
    let combos = hero::count_combos(
        hand.iter()
            .map(|c| &c.hero)
            .chain(ai.live().map(|(_, _, c)| &c.hero)),
    ) as f64;

    let score_of = |condition: WinCondition| -> f64 {
        match condition {
            WinCondition::PowerDominance => {
                2.0 * h.avg_power
                    + h.tanks
                    + (-deficit).max(0.0) * 0.5
                    + 0.3 * ai.live_count() as f64
            }
            WinCondition::SynergyBurst => {
                2.5 * h.avg_synergy + 2.0 * h.burst + 0.5 * ai.total_synergy() as f64
            }
            WinCondition::TempoControl => {
                2.0 * h.removal
                    + h.damage_abilities
                    + 1.5 * enemy_threat
                    + deficit.max(0.0) * 0.4
            }
            WinCondition::Attrition => {
                2.5 * h.healers
                    + 2.0 * h.shield_providers
                    + 0.3 * frontline
                    + if deficit > 0.0 { 1.0 } else { 0.0 }
            }
            WinCondition::ComboSetup => 4.0 * combos + 1.5 * h.synergy_dependent,
        }
    };

    let scores = WinCondition::ALL.map(|c| (c, score_of(c)));
    let (condition, score) = scores
        .iter()
        .copied()
        .fold((WinCondition::PowerDominance, f64::NEG_INFINITY), |best, next| {
            if next.1 > best.1 {
                next
            } else {
                best
            }
        });

    Classification {
        condition,
        score,
        scores,
    }
}

/// How many actions the AI should take this turn under a condition
///
/// Thin policy: the candidate generator raises the pass priority once the
/// budget is spent.
pub fn play_budget(condition: WinCondition, state: &GameState) -> u32 {
    let base = match condition {
        WinCondition::PowerDominance => 3,
        WinCondition::SynergyBurst | WinCondition::TempoControl | WinCondition::ComboSetup => 2,
        WinCondition::Attrition => 1,
    };
    let behind = state.enemy_board.live_count() > state.ai_board.live_count();
    base + u32::from(behind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, EntityId};

    fn card(id: u32, hero: &str, role: Role) -> Card {
        Card::new(EntityId::new(id), hero, role, 3).with_power(2, 2, 2)
    }

    #[test]
    fn test_empty_everything_ties_to_first() {
        let c = classify(&Hand::default(), &Board::new(), &Board::new());
        assert_eq!(c.condition, WinCondition::PowerDominance);
        assert_eq!(c.score, 0.0);
    }

    #[test]
    fn test_healer_hand_prefers_attrition() {
        let hand = Hand::new(vec![
            card(1, "mercy", Role::Support).with_power(0, 0, 1),
            card(2, "zenyatta", Role::Support).with_power(0, 0, 1),
            card(3, "lucio", Role::Support).with_power(0, 0, 1),
        ]);
        let c = classify(&hand, &Board::new(), &Board::new());
        assert_eq!(c.condition, WinCondition::Attrition);
        assert_eq!(c.plan(), GamePlan::ProtectScale);
    }

    #[test]
    fn test_combo_pair_prefers_combo_setup() {
        let hand = Hand::new(vec![
            card(1, "zarya", Role::Tank).with_power(0, 1, 0),
            card(2, "hanzo", Role::Damage).with_power(0, 0, 1),
        ]);
        let c = classify(&hand, &Board::new(), &Board::new());
        assert_eq!(c.condition, WinCondition::ComboSetup);
    }

    #[test]
    fn test_scores_listed_in_declaration_order() {
        let c = classify(&Hand::default(), &Board::new(), &Board::new());
        let order: Vec<WinCondition> = c.scores.iter().map(|(w, _)| *w).collect();
        assert_eq!(order, WinCondition::ALL.to_vec());
    }

    #[test]
    fn test_play_budget_catches_up_when_behind() {
        let mut state = GameState::default();
        assert_eq!(play_budget(WinCondition::Attrition, &state), 1);
        state.enemy_board.front.place(0, card(9, "soldier", Role::Damage));
        assert_eq!(play_budget(WinCondition::Attrition, &state), 2);
    }
}
