//! One-ply simulation on cloned boards
//!
//! The engine's own coarse effect model: damage hits shields first, heals cap
//! at max health, buffs grant shield, debuffs drain row synergy. It does not
//! try to reproduce every hero's exact ability text.

use crate::ai::positioning::PositioningAdvisor;
use crate::ai::threat::assess_threats;
use crate::core::hero::{self, AbilityKind, TargetShape, UltimateProfile};
use crate::core::{Board, Card, EntityId, GameState, Hand, Role, RowName, Side};
use crate::game::actions::{Action, Target};

/// Id used for the opponent's hypothetical deployment
pub const PHANTOM_CARD_ID: u32 = u32::MAX;

/// Boards after an action was applied
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub ai: Board,
    pub enemy: Board,
    pub hand: Hand,
    /// Enemy units the action removed
    pub enemy_kills: usize,
}

impl Outcome {
    fn unchanged(state: &GameState) -> Self {
        Outcome {
            ai: state.ai_board.clone(),
            enemy: state.enemy_board.clone(),
            hand: state.ai_hand.clone(),
            enemy_kills: 0,
        }
    }
}

/// Apply an AI action to clones of the state's boards
pub fn simulate(state: &GameState, action: &Action, advisor: &PositioningAdvisor<'_>) -> Outcome {
    let mut outcome = Outcome::unchanged(state);

    match *action {
        Action::Pass => {}
        Action::Deploy { card, row } => {
            let Some(card) = outcome.hand.take(card) else {
                return outcome;
            };
            if let Some(slot) = advisor.best_column(&card, row, &outcome.ai) {
                let gain = card.synergy_gain[row];
                let target_row = outcome.ai.row_mut(row);
                if target_row.place(slot, card) {
                    target_row.synergy = target_row.synergy.saturating_add(gain);
                }
            }
        }
        Action::Ultimate { card, target } => {
            let before = outcome.enemy.live_count();
            fire_ultimate(card, target, Side::Ai, &mut outcome.ai, &mut outcome.enemy);
            outcome.enemy_kills = before.saturating_sub(outcome.enemy.live_count());
        }
    }

    outcome
}

/// Fire `caster`'s ultimate from `own` at `target`
///
/// `side` is the caster's side; `target.side` is resolved against it so the
/// same routine serves both players. Unknown heroes and unavailable
/// ultimates leave the boards untouched.
pub fn fire_ultimate(caster: EntityId, target: Target, side: Side, own: &mut Board, opp: &mut Board) {
    let Some((row, slot, profile)) = own
        .find(caster)
        .filter(|(_, _, c)| c.has_ultimate_available())
        .and_then(|(row, slot, c)| hero::lookup(&c.hero).map(|p| (row, slot, p)))
    else {
        return;
    };
    let ult = profile.ultimate;

    if let Some(card) = own.find_mut(caster) {
        card.ultimate_used = true;
        card.ultimate_ready = false;
    }
    let caster_row = own.row_mut(row);
    caster_row.synergy = caster_row.synergy.saturating_sub(ult.synergy_cost);

    apply_effect(&ult, (row, slot), target, side, own, opp);
}

fn apply_effect(
    ult: &UltimateProfile,
    caster: (RowName, usize),
    target: Target,
    side: Side,
    own: &mut Board,
    opp: &mut Board,
) {
    let magnitude = ult.magnitude;
    match ult.kind {
        AbilityKind::Damage => match (ult.shape, target) {
            (TargetShape::SelfArea, _) => {
                let (row, slot) = caster;
                damage_row(opp, row, magnitude, None);
                damage_row(own, row, magnitude, Some(slot));
            }
            (TargetShape::EnemyColumn, Target::Card { side: t, slot, .. }) => {
                let board = resolve(t, side, own, opp);
                for row in RowName::ALL {
                    if let Some(card) = board.row_mut(row).card_at_mut(slot) {
                        card.take_damage(magnitude);
                    }
                }
            }
            (_, Target::Row { side: t, row }) => {
                damage_row(resolve(t, side, own, opp), row, magnitude, None);
            }
            (_, Target::Card { side: t, row, slot }) => {
                if let Some(card) = resolve(t, side, own, opp).row_mut(row).card_at_mut(slot) {
                    card.take_damage(magnitude);
                }
            }
            (_, Target::None) => {}
        },
        AbilityKind::Heal => for_targets(target, side, own, opp, |c| {
            c.heal(magnitude);
        }),
        AbilityKind::Buff | AbilityKind::Utility => {
            let amount = magnitude.max(1);
            for_targets(target, side, own, opp, |c| c.shield = c.shield.saturating_add(amount))
        }
        AbilityKind::Debuff => {
            if let Target::Row { side: t, row } = target {
                let board = resolve(t, side, own, opp);
                let drained = board.row_mut(row);
                drained.synergy = drained.synergy.saturating_sub(2 + magnitude);
                damage_row(board, row, magnitude, None);
            }
        }
    }
}

fn resolve<'b>(target_side: Side, caster_side: Side, own: &'b mut Board, opp: &'b mut Board) -> &'b mut Board {
    if target_side == caster_side {
        own
    } else {
        opp
    }
}

fn damage_row(board: &mut Board, row: RowName, amount: u32, spare: Option<usize>) {
    for (slot, entry) in board.row_mut(row).slots.iter_mut().enumerate() {
        if Some(slot) == spare {
            continue;
        }
        if let Some(card) = entry.as_mut().filter(|c| c.is_alive()) {
            card.take_damage(amount);
        }
    }
}

/// Run `f` on every live card a friendly effect touches; `Target::None`
/// means the caster's whole side
fn for_targets(
    target: Target,
    side: Side,
    own: &mut Board,
    opp: &mut Board,
    mut f: impl FnMut(&mut Card),
) {
    match target {
        Target::Row { side: t, row } => {
            resolve(t, side, own, opp).row_mut(row).live_mut().for_each(&mut f)
        }
        Target::Card { side: t, row, slot } => {
            if let Some(card) = resolve(t, side, own, opp).row_mut(row).card_at_mut(slot) {
                f(card);
            }
        }
        Target::None => {
            for row in RowName::ALL {
                own.row_mut(row).live_mut().for_each(&mut f);
            }
        }
    }
}

/// Boards after one of the opponent's coarse replies
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub ai: Board,
    pub enemy: Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    GenericDeploy,
    Ultimate,
    Pass,
}

/// The opponent's three coarse replies to `ai`/`enemy`
///
/// A generic deployment (only with cards in hand and room on the board), the
/// readiest enemy ultimate aimed by threat assessment, and a pass. The pass
/// is always present.
pub fn opponent_replies(ai: &Board, enemy: &Board, enemy_hand_size: u32) -> Vec<Reply> {
    let mut replies = Vec::with_capacity(3);

    if enemy_hand_size > 0 && enemy.has_room() {
        let mut deployed = enemy.clone();
        let row = RowName::ALL
            .into_iter()
            .filter(|r| deployed.can_deploy(*r))
            .min_by_key(|r| deployed.row(*r).live_count());
        if let Some(row) = row {
            let phantom = Card::new(EntityId::new(PHANTOM_CARD_ID), "unknown", Role::Damage, 3)
                .with_power(2, 2, 2);
            let target_row = deployed.row_mut(row);
            let free = target_row.free_slots().next();
            if let Some(slot) = free {
                target_row.place(slot, phantom);
                replies.push(Reply {
                    kind: ReplyKind::GenericDeploy,
                    ai: ai.clone(),
                    enemy: deployed,
                });
            }
        }
    }

    if let Some((caster, target)) = readiest_enemy_ultimate(ai, enemy) {
        let mut ai_after = ai.clone();
        let mut enemy_after = enemy.clone();
        fire_ultimate(caster, target, Side::Enemy, &mut enemy_after, &mut ai_after);
        replies.push(Reply {
            kind: ReplyKind::Ultimate,
            ai: ai_after,
            enemy: enemy_after,
        });
    }

    replies.push(Reply {
        kind: ReplyKind::Pass,
        ai: ai.clone(),
        enemy: enemy.clone(),
    });
    replies
}

/// Highest-impact ready enemy ultimate, aimed at the AI's top threat
fn readiest_enemy_ultimate(ai: &Board, enemy: &Board) -> Option<(EntityId, Target)> {
    let (row, _, caster, ult) = enemy
        .ready_ultimates()
        .filter_map(|(row, slot, c)| hero::lookup(&c.hero).map(|p| (row, slot, c, p.ultimate)))
        .fold(None, |best: Option<(RowName, usize, &Card, UltimateProfile)>, next| {
            let better = match &best {
                None => true,
                Some(b) => (next.3.impact(), next.3.magnitude) > (b.3.impact(), b.3.magnitude),
            };
            if better {
                Some(next)
            } else {
                best
            }
        })?;

    let top = assess_threats(ai).into_iter().next();
    let target = match (ult.shape, top) {
        (TargetShape::SelfArea, _) => Target::Row {
            side: Side::Ai,
            row,
        },
        (TargetShape::EnemyRow, Some(t)) => Target::Row {
            side: Side::Ai,
            row: t.row,
        },
        (TargetShape::SingleEnemy | TargetShape::EnemyColumn, Some(t)) => Target::Card {
            side: Side::Ai,
            row: t.row,
            slot: t.slot,
        },
        (TargetShape::AllyRow, _) => Target::Row {
            side: Side::Enemy,
            row,
        },
        (TargetShape::SingleAlly, _) => Target::Card {
            side: Side::Enemy,
            row,
            slot: enemy.find(caster.id).map(|(_, s, _)| s).unwrap_or(0),
        },
        _ => Target::None,
    };
    Some((caster.id, target))
}
