//! Row and column selection for deployments
//!
//! Every legal row gets a generic score (fit, occupancy, archetype, enemy
//! density, row markers, anti-feed), the hero's registered placement rule
//! layers on top, and the plan nudges the result. Full rows score `None`.

use crate::ai::personality::{PersonalityWeights, BALANCED};
use crate::ai::rules::{PlacementContext, PositioningRule, RowScores, RuleRegistry};
use crate::ai::ultimates::{casualty_value, net_casualties};
use crate::ai::win_condition::GamePlan;
use crate::core::hero::{self, Archetype};
use crate::core::{Board, Card, EffectKind, PerRow, Role, RowName, ROW_CAPACITY};

const EMPTY_ROW_BONUS: f64 = 15.0;
const PAIR_PENALTY: f64 = 10.0;
const CROWD_PENALTY: f64 = 30.0;
const DENSE_ENEMY_POWER: u32 = 10;
const DENSE_ENEMY_PENALTY: f64 = 15.0;
const FEED_SYNERGY: u32 = 3;
const FEED_PENALTY: f64 = 35.0;
const FEED_STACKED_PENALTY: f64 = 40.0;

/// Score for deploying into a row carrying this marker
pub fn row_marker_value(kind: EffectKind) -> f64 {
    match kind {
        EffectKind::Immortality => 25.0,
        EffectKind::Barrier => 20.0,
        EffectKind::Shield | EffectKind::DamageReduction | EffectKind::HealOverTime => 15.0,
        EffectKind::Nano => 15.0,
        EffectKind::Sleep => -25.0,
        EffectKind::Burn | EffectKind::Discord => -20.0,
        EffectKind::Frozen | EffectKind::Hack | EffectKind::Wound => -15.0,
        EffectKind::Unknown => 0.0,
    }
}

/// The opponent holds a ready area-damage ultimate
fn enemy_holds_burst(enemy: &Board) -> bool {
    enemy.ready_ultimates().any(|(_, _, c)| {
        hero::lookup(&c.hero)
            .map(|p| p.ultimate.is_burst())
            .unwrap_or(false)
    })
}

#[derive(Debug, Clone, Copy)]
pub struct PositioningAdvisor<'a> {
    registry: &'a RuleRegistry,
    weights: &'static PersonalityWeights,
}

impl<'a> PositioningAdvisor<'a> {
    pub fn new(registry: &'a RuleRegistry, weights: &'static PersonalityWeights) -> Self {
        PositioningAdvisor { registry, weights }
    }

    pub fn with_defaults(registry: &'a RuleRegistry) -> Self {
        PositioningAdvisor::new(registry, &BALANCED)
    }

    /// Score every row for `card`; `None` for rows it cannot enter
    pub fn row_scores(&self, card: &Card, ai: &Board, enemy: &Board, plan: GamePlan) -> RowScores {
        let ctx = PlacementContext {
            card,
            profile: hero::lookup(&card.hero),
            ai,
            enemy,
            plan,
        };

        let mut scores: RowScores = PerRow::default();
        for row in RowName::ALL {
            if ai.can_deploy(row) {
                scores[row] = Some(self.generic_score(&ctx, row) + plan_bonus(&ctx, row));
            }
        }

        if let Some(rule) = self.registry.positioning_rule(&card.hero) {
            rule.adjust(&ctx, &mut scores);
        }
        scores
    }

    fn generic_score(&self, ctx: &PlacementContext<'_>, row: RowName) -> f64 {
        let w = self.weights;
        let card = ctx.card;
        let own = ctx.ai.row(row);
        let mirrored = ctx.enemy.row(row);

        let fit = 10.0 * card.power_in(row) as f64
            + 8.0 * card.synergy_gain[row] as f64
            + 2.0 * card.health as f64;
        let mut score = w.placement_power * fit;

        let mut penalty = 0.0;
        match own.live_count() {
            0 => score += EMPTY_ROW_BONUS,
            1 => {}
            2 => penalty += PAIR_PENALTY,
            _ => penalty += CROWD_PENALTY,
        }

        if card.role == Role::Tank && row == RowName::Front {
            let tank_front = own.live().any(|(_, c)| c.role == Role::Tank);
            score += if tank_front { 15.0 } else { 20.0 };
        }
        if let Some(profile) = ctx.profile {
            if profile.has(Archetype::Sniper) && row == RowName::Back {
                score += 25.0;
            }
            if profile.has(Archetype::Flanker) && row == RowName::Middle {
                score += 15.0;
            }
        }

        if mirrored.power(row) > DENSE_ENEMY_POWER {
            penalty += DENSE_ENEMY_PENALTY;
        }

        for effect in own.effects.iter() {
            let value = row_marker_value(effect.kind);
            if value >= 0.0 {
                score += value;
            } else {
                penalty -= value;
            }
        }

        if enemy_holds_burst(ctx.enemy) && mirrored.synergy >= FEED_SYNERGY {
            penalty += if own.live_count() >= 2 {
                FEED_STACKED_PENALTY
            } else {
                FEED_PENALTY
            };
        }

        score - w.placement_safety * penalty
    }

    /// Best row for `card`, or `None` when the side cannot take a deployment
    pub fn best_row(&self, card: &Card, ai: &Board, enemy: &Board, plan: GamePlan) -> Option<RowName> {
        let scores = self.row_scores(card, ai, enemy, plan);
        pick_row(&scores, ai)
    }

    /// Best free slot in `row` for `card`
    ///
    /// Prefers columns with a tank in front, lets tanks cover allies behind
    /// them, and avoids columns that already hold two units.
    pub fn best_column(&self, card: &Card, row: RowName, ai: &Board) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for slot in ai.row(row).free_slots() {
            let mut score = 0.0;
            if ai.is_covered(row, slot) {
                score += 10.0;
            }
            if card.role == Role::Tank && row == RowName::Front {
                score += 8.0 * ai.column_count(slot) as f64;
            } else if ai.column_count(slot) >= 2 {
                score -= 6.0;
            }
            if best.map(|b| score > b.1).unwrap_or(true) {
                best = Some((slot, score));
            }
        }
        best.map(|(slot, _)| slot)
    }
}

/// Highest score wins; ties go to the least occupied row, then front to back
pub fn pick_row(scores: &RowScores, ai: &Board) -> Option<RowName> {
    let mut best: Option<(RowName, f64, usize)> = None;
    for row in RowName::ALL {
        let Some(score) = scores[row] else {
            continue;
        };
        let occupancy = ai.row(row).live_count();
        let better = match best {
            None => true,
            Some((_, s, o)) => score > s || (score == s && occupancy < o),
        };
        if better {
            best = Some((row, score, occupancy));
        }
    }
    best.map(|(row, _, _)| row)
}

fn plan_bonus(ctx: &PlacementContext<'_>, row: RowName) -> f64 {
    let own = ctx.ai.row(row);
    match ctx.plan {
        GamePlan::RowCrush if own.live_count() == 2 => 10.0,
        GamePlan::ColumnControl => {
            let behind_tank = (0..ROW_CAPACITY)
                .filter(|&slot| own.card_at(slot).is_none())
                .any(|slot| ctx.ai.is_covered(row, slot));
            if behind_tank {
                8.0
            } else {
                0.0
            }
        }
        GamePlan::ProtectScale => match (ctx.card.role, row) {
            (Role::Tank, RowName::Front) | (Role::Support, RowName::Back) => 10.0,
            _ => 0.0,
        },
        _ => 0.0,
    }
}

/// Enemy pressure facing one of our rows
fn threat_level(enemy: &Board, row: RowName) -> f64 {
    let bursts = enemy
        .ready_ultimates()
        .filter(|(_, _, c)| {
            hero::lookup(&c.hero)
                .map(|p| p.ultimate.is_burst())
                .unwrap_or(false)
        })
        .count();
    enemy.row(row).power(row) as f64 + 5.0 * bursts as f64
}

/// Protectors go where they shield the most allies from the most pressure
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtectorPlacement;

impl PositioningRule for ProtectorPlacement {
    fn name(&self) -> &'static str {
        "protector"
    }

    fn adjust(&self, ctx: &PlacementContext<'_>, scores: &mut RowScores) {
        for row in RowName::ALL {
            let Some(score) = scores[row].as_mut() else {
                continue;
            };
            let shielded = ctx.ai.row(row).live_count()
                + row
                    .behind()
                    .iter()
                    .map(|r| ctx.ai.row(*r).live_count())
                    .sum::<usize>();
            let safety = 2.0 * threat_level(ctx.enemy, row) * shielded as f64;
            let synergy =
                8.0 * ctx.card.synergy_gain[row] as f64 + 2.0 * ctx.ai.row(row).synergy as f64;
            *score += 0.6 * safety + 0.4 * synergy;
        }
    }
}

/// Net-kill heroes go where their blast would trade best
#[derive(Debug, Clone, Copy, Default)]
pub struct NetKillPlacement;

impl PositioningRule for NetKillPlacement {
    fn name(&self) -> &'static str {
        "net_kill"
    }

    fn adjust(&self, ctx: &PlacementContext<'_>, scores: &mut RowScores) {
        let magnitude = ctx.profile.map(|p| p.ultimate.magnitude).unwrap_or(0);
        for row in RowName::ALL {
            if let Some(score) = scores[row].as_mut() {
                let net = net_casualties(ctx.ai, ctx.enemy, row, magnitude);
                *score += 5.0 * net;
                // The caster itself survives only if its health clears the blast
                if ctx.card.effective_health() <= magnitude {
                    *score -= 5.0 * casualty_value(ctx.card.role);
                }
            }
        }
    }
}

/// Synergy-dependent heroes go where their threshold is reached soonest
#[derive(Debug, Clone, Copy, Default)]
pub struct SynergyThresholdPlacement;

impl PositioningRule for SynergyThresholdPlacement {
    fn name(&self) -> &'static str {
        "synergy_threshold"
    }

    fn adjust(&self, ctx: &PlacementContext<'_>, scores: &mut RowScores) {
        let threshold = ctx.profile.map(|p| p.ultimate.synergy_cost).unwrap_or(0);
        for row in RowName::ALL {
            if let Some(score) = scores[row].as_mut() {
                let gain = ctx.card.synergy_gain[row];
                let projected = ctx.ai.row(row).synergy.saturating_add(gain);
                if projected >= threshold {
                    *score += 30.0;
                } else {
                    let deficit = threshold - projected;
                    let turns = deficit.div_ceil(gain.max(1));
                    *score += 30.0 - 12.0 * turns as f64;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Effect, EntityId};

    fn card(id: u32, hero: &str, role: Role) -> Card {
        Card::new(EntityId::new(id), hero, role, 4).with_power(3, 3, 3)
    }

    #[test]
    fn test_tank_goes_front_on_empty_boards() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let tank = card(1, "winston", Role::Tank).with_power(3, 2, 1);
        let row = advisor.best_row(&tank, &Board::new(), &Board::new(), GamePlan::Tempo);
        assert_eq!(row, Some(RowName::Front));
    }

    #[test]
    fn test_uniform_card_breaks_ties_front_first() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let dps = card(1, "test", Role::Damage);
        let scores = advisor.row_scores(&dps, &Board::new(), &Board::new(), GamePlan::Tempo);
        assert_eq!(scores.front, scores.back);
        assert_eq!(
            advisor.best_row(&dps, &Board::new(), &Board::new(), GamePlan::Tempo),
            Some(RowName::Front)
        );
    }

    #[test]
    fn test_tie_prefers_least_occupied() {
        let mut scores: RowScores = PerRow::default();
        scores.front = Some(5.0);
        scores.back = Some(5.0);
        let mut ai = Board::new();
        ai.front.place(0, card(9, "test", Role::Damage));
        assert_eq!(pick_row(&scores, &ai), Some(RowName::Back));
    }

    #[test]
    fn test_full_rows_are_illegal() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut ai = Board::new();
        for slot in 0..ROW_CAPACITY {
            ai.back.place(slot, card(10 + slot as u32, "test", Role::Damage));
        }
        let sniper = card(1, "widowmaker", Role::Damage);
        let scores = advisor.row_scores(&sniper, &ai, &Board::new(), GamePlan::Tempo);
        assert!(scores.back.is_none());
        assert_ne!(
            advisor.best_row(&sniper, &ai, &Board::new(), GamePlan::Tempo),
            Some(RowName::Back)
        );
    }

    #[test]
    fn test_no_room_means_no_row() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut ai = Board::new();
        for slot in 0..3 {
            ai.front.place(slot, card(10 + slot as u32, "test", Role::Tank));
            ai.back.place(slot, card(20 + slot as u32, "test", Role::Support));
        }
        let dps = card(1, "test", Role::Damage);
        assert_eq!(advisor.best_row(&dps, &ai, &Board::new(), GamePlan::Tempo), None);
    }

    #[test]
    fn test_hazard_marker_pushes_away() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut ai = Board::new();
        ai.front.effects.push(Effect::new(EntityId::new(99), EffectKind::Burn));
        let dps = card(1, "test", Role::Damage);
        let scores = advisor.row_scores(&dps, &ai, &Board::new(), GamePlan::Tempo);
        assert_eq!(scores.middle.unwrap() - scores.front.unwrap(), 20.0);
    }

    #[test]
    fn test_anti_feed_penalty() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut enemy = Board::new();
        enemy
            .back
            .place(0, card(50, "junkrat", Role::Damage).with_ultimate_ready());
        enemy.middle.synergy = 3;
        let dps = card(1, "test", Role::Damage);
        let scores = advisor.row_scores(&dps, &Board::new(), &enemy, GamePlan::Tempo);
        assert_eq!(scores.front.unwrap() - scores.middle.unwrap(), FEED_PENALTY);
    }

    #[test]
    fn test_best_column_slides_behind_tank() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut ai = Board::new();
        ai.front.place(2, card(5, "orisa", Role::Tank));
        let support = card(1, "mercy", Role::Support);
        assert_eq!(advisor.best_column(&support, RowName::Back, &ai), Some(2));
        assert_eq!(advisor.best_column(&support, RowName::Front, &ai), Some(0));
    }

    #[test]
    fn test_synergy_threshold_rule_prefers_charged_row() {
        let registry = RuleRegistry::builtin();
        let advisor = PositioningAdvisor::with_defaults(&registry);
        let mut ai = Board::new();
        ai.middle.synergy = 4;
        let genji = card(1, "genji", Role::Damage).with_power(2, 2, 2);
        assert_eq!(
            advisor.best_row(&genji, &ai, &Board::new(), GamePlan::Tempo),
            Some(RowName::Middle)
        );
    }
}
