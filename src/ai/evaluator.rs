//! Board evaluation for the heuristic planner
//!
//! Scores a pair of boards from the AI's perspective. Positive values favour
//! the AI, negative values favour the opponent.
//!
//! The score is the sum of five independent terms. Every term is written as
//! `side(own, opp) - side(opp, own)`, so swapping the two boards negates the
//! score exactly.
//!
//! Only live cards are scored. A dead card left in its slot scores exactly
//! like an empty slot, so raising a live ally's health always helps, while
//! bringing a dead card back to 1 HP is scored as deploying a fresh unit
//! there (it can lower the score by exposing a new kill target).

use crate::ai::personality::{PersonalityWeights, BALANCED};
use crate::core::hero::{self, ImpactClass, TargetShape};
use crate::core::{Board, Card, EffectKind, RowName, ROW_CAPACITY};

const HEALTH_WEIGHT: f64 = 1.0;
const SHIELD_WEIGHT: f64 = 0.6;
const UNIT_WEIGHT: f64 = 0.5;

const ROW_PRESENCE_WEIGHT: f64 = 0.3;
const COLUMN_THREAT_BONUS: f64 = 0.75;
const EXPOSED_TARGET_BONUS: f64 = 0.4;

const KILLABLE_NOW_BONUS: f64 = 2.0;
const KILLABLE_NEXT_BONUS: f64 = 1.0;
const OVERKILL_PENALTY: f64 = 0.5;

const SYNERGY_WEIGHT: f64 = 0.2;
const SYNERGY_WEIGHT_WITH_BURST: f64 = 0.3;
const STACKING_PENALTY: f64 = 0.15;
const STACKING_SAFE_UNITS: usize = 3;

/// Score breakdown, one field per term (already weighted)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Evaluation {
    pub material: f64,
    pub pressure: f64,
    pub tempo: f64,
    pub synergy: f64,
    pub markers: f64,
}

impl Evaluation {
    pub fn total(&self) -> f64 {
        self.material + self.pressure + self.tempo + self.synergy + self.markers
    }
}

/// Board evaluator with a personality's term weights
#[derive(Debug, Clone, Copy)]
pub struct BoardEvaluator {
    weights: &'static PersonalityWeights,
}

impl BoardEvaluator {
    pub fn new(weights: &'static PersonalityWeights) -> Self {
        BoardEvaluator { weights }
    }

    /// Evaluate the boards from the AI's perspective
    pub fn evaluate(&self, ai: &Board, enemy: &Board) -> f64 {
        self.breakdown(ai, enemy).total()
    }

    pub fn breakdown(&self, ai: &Board, enemy: &Board) -> Evaluation {
        let w = self.weights;
        Evaluation {
            material: w.material * material(ai, enemy),
            pressure: w.pressure * pressure(ai, enemy),
            tempo: w.tempo * tempo(ai, enemy),
            synergy: w.synergy * synergy_economy(ai, enemy),
            markers: w.markers * marker_value(ai, enemy),
        }
    }
}

impl Default for BoardEvaluator {
    fn default() -> Self {
        BoardEvaluator::new(&BALANCED)
    }
}

/// Evaluate with the balanced weight table
pub fn evaluate(ai: &Board, enemy: &Board) -> f64 {
    BoardEvaluator::default().evaluate(ai, enemy)
}

/// Health, shields and unit count
pub fn material(own: &Board, opp: &Board) -> f64 {
    material_side(own) - material_side(opp)
}

fn material_side(board: &Board) -> f64 {
    board
        .live()
        .map(|(_, _, c)| {
            HEALTH_WEIGHT * c.health as f64 + SHIELD_WEIGHT * c.shield as f64 + UNIT_WEIGHT
        })
        .sum()
}

/// Row presence, column threat and exposed targets
pub fn pressure(own: &Board, opp: &Board) -> f64 {
    pressure_side(own, opp) - pressure_side(opp, own)
}

fn pressure_side(own: &Board, opp: &Board) -> f64 {
    let presence: f64 = own
        .rows()
        .map(|(_, row)| ROW_PRESENCE_WEIGHT * row.live_count() as f64)
        .sum();

    let column_multiplier = if holds_ready_shape(own, TargetShape::EnemyColumn) {
        2.0
    } else {
        1.0
    };
    let column_threat: f64 = (0..ROW_CAPACITY)
        .filter(|&slot| own.column_count(slot) > 0 && opp.column_count(slot) >= 2)
        .map(|_| COLUMN_THREAT_BONUS * column_multiplier)
        .sum();

    let exposed = opp
        .live()
        .filter(|(row, slot, _)| *row == RowName::Front || !opp.is_covered(*row, *slot))
        .count() as f64
        * EXPOSED_TARGET_BONUS;

    presence + column_threat + exposed
}

/// Damage one side can expect to deliver to a single target this turn
///
/// The largest ready damage ultimate, or 1 point of chip damage when the side
/// has anything on the board.
pub fn burst_estimate(board: &Board) -> u32 {
    let chip = if board.is_empty() { 0 } else { 1 };
    board
        .ready_ultimates()
        .filter_map(|(_, _, c)| hero::lookup(&c.hero))
        .filter(|p| p.ultimate.kind == hero::AbilityKind::Damage)
        .map(|p| p.ultimate.magnitude)
        .max()
        .unwrap_or(0)
        .max(chip)
}

/// Kill threats, overkill waste and unspent ultimates
pub fn tempo(own: &Board, opp: &Board) -> f64 {
    tempo_side(own, opp) - tempo_side(opp, own)
}

fn tempo_side(own: &Board, opp: &Board) -> f64 {
    let burst = burst_estimate(own);
    let mut value = 0.0;

    if burst > 0 {
        for (_, _, target) in opp.live() {
            let needed = target.effective_health();
            if needed <= burst {
                value += KILLABLE_NOW_BONUS;
                value -= OVERKILL_PENALTY * (burst - needed) as f64;
            } else if needed <= burst.saturating_mul(2) {
                value += KILLABLE_NEXT_BONUS;
            }
        }
    }

    value + ultimate_equity(own)
}

/// Value of ready, unspent ultimates by impact class
pub fn ultimate_equity(board: &Board) -> f64 {
    board
        .ready_ultimates()
        .map(|(_, _, c)| match hero::lookup(&c.hero).map(|p| p.ultimate.impact()) {
            Some(ImpactClass::Aoe) => 1.5,
            Some(ImpactClass::SingleTarget) => 1.0,
            Some(ImpactClass::Utility) | None => 0.6,
        })
        .sum()
}

/// Accumulated synergy and AOE stacking risk
pub fn synergy_economy(own: &Board, opp: &Board) -> f64 {
    synergy_side(own) - synergy_side(opp)
}

fn synergy_side(board: &Board) -> f64 {
    let holds_burst = board.live().any(|(_, _, c)| {
        hero::lookup(&c.hero)
            .map(|p| p.ultimate.is_burst())
            .unwrap_or(false)
    });
    let weight = if holds_burst {
        SYNERGY_WEIGHT_WITH_BURST
    } else {
        SYNERGY_WEIGHT
    };

    board
        .rows()
        .map(|(_, row)| {
            let stacked = row.live_count().saturating_sub(STACKING_SAFE_UNITS) as f64;
            weight * row.synergy as f64 - STACKING_PENALTY * stacked
        })
        .sum()
}

/// Value of one marker on the side that carries it
pub fn marker_kind_value(kind: EffectKind) -> f64 {
    match kind {
        EffectKind::Barrier => 1.0,
        EffectKind::Shield => 0.8,
        EffectKind::DamageReduction => 0.8,
        EffectKind::Nano => 1.2,
        EffectKind::Immortality => 1.0,
        EffectKind::HealOverTime => 0.5,
        EffectKind::Wound => -0.8,
        EffectKind::Discord => -1.0,
        EffectKind::Hack => -0.7,
        EffectKind::Sleep => -1.2,
        EffectKind::Burn => -0.6,
        EffectKind::Frozen => -1.0,
        EffectKind::Unknown => 0.0,
    }
}

/// Beneficial markers on our side and detrimental markers on theirs
pub fn marker_value(own: &Board, opp: &Board) -> f64 {
    marker_side(own) - marker_side(opp)
}

fn marker_side(board: &Board) -> f64 {
    let on_cards: f64 = board
        .live()
        .flat_map(|(_, _, c)| c.effects.iter())
        .map(|e| marker_kind_value(e.kind))
        .sum();
    let on_rows: f64 = board
        .rows()
        .flat_map(|(_, row)| row.effects.iter())
        .map(|e| marker_kind_value(e.kind))
        .sum();
    on_cards + on_rows
}

fn holds_ready_shape(board: &Board, shape: TargetShape) -> bool {
    board.ready_ultimates().any(|(_, _, c)| ult_shape(c) == Some(shape))
}

fn ult_shape(card: &Card) -> Option<TargetShape> {
    hero::lookup(&card.hero).map(|p| p.ultimate.shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Effect, EntityId, Role};

    fn unit(id: u32, hero: &str, role: Role, health: u32) -> Card {
        Card::new(EntityId::new(id), hero, role, health).with_power(2, 2, 2)
    }

    #[test]
    fn test_empty_boards_score_zero() {
        assert_eq!(evaluate(&Board::new(), &Board::new()), 0.0);
    }

    #[test]
    fn test_material_counts_health_shield_and_units() {
        let mut own = Board::new();
        own.front.place(0, unit(1, "test", Role::Tank, 4).with_shield(1));
        // 4 * 1.0 + 1 * 0.6 + 0.5
        assert!((material(&own, &Board::new()) - 5.1).abs() < 1e-9);
    }

    #[test]
    fn test_killable_targets_and_overkill() {
        let mut own = Board::new();
        // Widowmaker: 4 damage single target
        own.back
            .place(0, unit(1, "widowmaker", Role::Damage, 3).with_ultimate_ready());
        assert_eq!(burst_estimate(&own), 4);

        let mut opp = Board::new();
        opp.front.place(0, unit(2, "test", Role::Damage, 2));
        // Killable now (+2.0), 2 points of overkill (-1.0)
        let side = tempo_side(&own, &opp);
        let equity = ultimate_equity(&own);
        assert!((side - equity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_column_threat_needs_two_enemies() {
        let mut own = Board::new();
        own.front.place(1, unit(1, "test", Role::Tank, 3));
        let mut opp = Board::new();
        opp.front.place(1, unit(2, "test", Role::Tank, 3));
        let single = pressure_side(&own, &opp);
        opp.back.place(1, unit(3, "test", Role::Damage, 3));
        let double = pressure_side(&own, &opp);
        // One more exposed-or-covered unit, plus the column bonus
        assert!(double - single >= COLUMN_THREAT_BONUS);
    }

    #[test]
    fn test_stacking_penalty() {
        let mut board = Board::new();
        for slot in 0..4 {
            board.middle.place(slot, unit(slot as u32, "test", Role::Damage, 2));
        }
        assert!((synergy_side(&board) + STACKING_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn test_marker_polarity() {
        let mut own = Board::new();
        own.front.place(
            0,
            unit(1, "test", Role::Tank, 3).with_effect(Effect::new(EntityId::new(50), EffectKind::Barrier)),
        );
        let mut opp = Board::new();
        opp.front.place(
            0,
            unit(2, "test", Role::Tank, 3).with_effect(Effect::new(EntityId::new(51), EffectKind::Wound)),
        );
        assert!((marker_value(&own, &opp) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_swapping_boards_negates() {
        let mut a = Board::new();
        a.front.place(0, unit(1, "reinhardt", Role::Tank, 5).with_ultimate_ready());
        a.back.place(0, unit(2, "mercy", Role::Support, 3));
        a.back.synergy = 3;
        let mut b = Board::new();
        b.middle.place(2, unit(3, "hanzo", Role::Damage, 2).with_ultimate_ready());

        let forward = evaluate(&a, &b);
        let backward = evaluate(&b, &a);
        assert_eq!(forward, -backward);
    }
}
