//! Ultimate timing rules
//!
//! [`ShapeUltimateRule`] handles every hero from its capability profile
//! alone. The two bespoke rules cover heroes whose ultimate is only good
//! under conditions the shape cannot express.

use crate::ai::rules::{UltimateContext, UltimatePlan, UltimateTimingRule};
use crate::ai::threat::{
    assess_ally_protection, assess_threats, kill_priority, recommend_defensive_action,
    DefensivePriority,
};
use crate::core::hero::{AbilityKind, TargetShape, UltimateProfile};
use crate::core::{Board, Role, Row, RowName, Side, ROW_CAPACITY};
use crate::game::actions::Target;

/// Value of losing a unit of this role, used by net-kill arithmetic
pub fn casualty_value(role: Role) -> f64 {
    match role {
        Role::Support => 3.0,
        Role::Damage => 2.0,
        Role::Tank => 1.5,
        Role::Other => 1.0,
    }
}

/// (units hit, units killed) for `damage` applied to every live unit of a row
fn row_hits(row: &Row, damage: u32) -> (usize, usize) {
    let count = row.live_count();
    let kills = row
        .live()
        .filter(|(_, c)| c.effective_health() <= damage)
        .count();
    (count, kills)
}

/// Summed casualty value of the units `damage` would kill in a row
pub fn row_casualties(row: &Row, damage: u32) -> f64 {
    row.live()
        .filter(|(_, c)| c.effective_health() <= damage)
        .map(|(_, c)| casualty_value(c.role))
        .sum()
}

/// Net casualty value of a self-area blast centred on `row`
pub fn net_casualties(ai: &Board, enemy: &Board, row: RowName, damage: u32) -> f64 {
    row_casualties(enemy.row(row), damage) - row_casualties(ai.row(row), damage)
}

fn plan(target: Target, priority: f64, rationale: &'static str) -> UltimatePlan {
    UltimatePlan {
        target,
        priority,
        rationale,
    }
}

fn hold(rationale: &'static str) -> UltimatePlan {
    plan(Target::None, 0.0, rationale)
}

/// Generic rule driven by the ultimate's kind and target shape
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeUltimateRule;

impl UltimateTimingRule for ShapeUltimateRule {
    fn name(&self) -> &'static str {
        "by_shape"
    }

    fn plan(&self, ctx: &UltimateContext<'_>) -> UltimatePlan {
        let Some(profile) = ctx.profile else {
            return plan(Target::None, 0.5, "unknown ultimate");
        };
        let ult = &profile.ultimate;

        match (ult.kind, ult.shape) {
            (AbilityKind::Damage, TargetShape::EnemyRow) => row_wipe(ult, ctx.enemy),
            (AbilityKind::Damage, TargetShape::EnemyColumn) => column_strike(ult, ctx.enemy),
            (AbilityKind::Damage, TargetShape::SingleEnemy) => single_kill(ult, ctx.enemy),
            (AbilityKind::Damage, TargetShape::SelfArea) => self_area(ult, ctx),
            (AbilityKind::Heal, _) => heal(ult.shape, ctx.ai),
            (AbilityKind::Buff, _) => buff(ult.shape, ctx.ai),
            (AbilityKind::Debuff, _) => debuff(ctx.enemy),
            (AbilityKind::Utility, _) => plan(
                Target::None,
                0.5 * ctx.ai.live_count() as f64,
                "utility",
            ),
            _ => plan(Target::None, 0.5, "unmodelled shape"),
        }
    }
}

fn row_wipe(ult: &UltimateProfile, enemy: &Board) -> UltimatePlan {
    let mut best: Option<(RowName, usize, usize, f64)> = None;
    for (name, row) in enemy.rows() {
        let (count, kills) = row_hits(row, ult.magnitude);
        let value = 2.0 * count as f64 + 3.0 * kills as f64;
        if best.map(|b| value > b.3).unwrap_or(true) {
            best = Some((name, count, kills, value));
        }
    }

    match best {
        Some((row, count, kills, value)) if count > 0 => {
            let target = Target::Row {
                side: Side::Enemy,
                row,
            };
            if count >= 2 || kills > 0 {
                plan(target, value + 4.0, "row wipe")
            } else {
                plan(target, 0.5, "lone target")
            }
        }
        _ => hold("no enemies"),
    }
}

fn column_strike(ult: &UltimateProfile, enemy: &Board) -> UltimatePlan {
    let mut best: Option<(usize, f64)> = None;
    for slot in 0..ROW_CAPACITY {
        let hits: Vec<_> = enemy.column(slot).collect();
        if hits.is_empty() {
            continue;
        }
        let kills = hits
            .iter()
            .filter(|(_, c)| c.effective_health() <= ult.magnitude)
            .count();
        let value = 2.5 * hits.len() as f64 + 3.0 * kills as f64;
        if best.map(|b| value > b.1).unwrap_or(true) {
            best = Some((slot, value));
        }
    }

    match best {
        Some((slot, value)) => {
            let row = enemy
                .column(slot)
                .map(|(row, _)| row)
                .next()
                .unwrap_or(RowName::Front);
            plan(
                Target::Card {
                    side: Side::Enemy,
                    row,
                    slot,
                },
                value,
                "column strike",
            )
        }
        None => hold("no enemies"),
    }
}

fn single_kill(ult: &UltimateProfile, enemy: &Board) -> UltimatePlan {
    let Some(kill) = kill_priority(&assess_threats(enemy)) else {
        return hold("no enemies");
    };
    let lethal = enemy
        .find(kill.threat.card)
        .map(|(_, _, c)| c.effective_health() <= ult.magnitude)
        .unwrap_or(false);

    let mut priority = 3.0 + kill.threat.score / 100.0;
    if lethal {
        priority += 4.0;
    }
    plan(
        Target::Card {
            side: Side::Enemy,
            row: kill.threat.row,
            slot: kill.threat.slot,
        },
        priority,
        kill.reason.as_str(),
    )
}

fn self_area(ult: &UltimateProfile, ctx: &UltimateContext<'_>) -> UltimatePlan {
    let (count, kills) = row_hits(ctx.enemy.row(ctx.row), ult.magnitude);
    if count == 0 {
        return hold("mirrored row empty");
    }
    let own_kills = ctx
        .ai
        .row(ctx.row)
        .live()
        .filter(|(slot, c)| *slot != ctx.slot && c.effective_health() <= ult.magnitude)
        .count();
    plan(
        Target::Row {
            side: Side::Enemy,
            row: ctx.row,
        },
        2.0 * count as f64 + 3.0 * kills as f64 - 3.0 * own_kills as f64,
        "area blast",
    )
}

fn heal(shape: TargetShape, ai: &Board) -> UltimatePlan {
    let needs = assess_ally_protection(ai);
    let Some(rec) = recommend_defensive_action(&needs) else {
        return hold("nobody wounded");
    };
    let urgent = if rec.priority == DefensivePriority::Urgent {
        3.0
    } else {
        0.0
    };

    match shape {
        TargetShape::SingleAlly => {
            let Some((row, slot, _)) = ai.find(rec.target) else {
                return hold("heal target missing");
            };
            plan(
                Target::Card {
                    side: Side::Ai,
                    row,
                    slot,
                },
                2.5 + urgent,
                "spot heal",
            )
        }
        TargetShape::AllAllies => {
            let wounded = needs.iter().filter(|n| n.is_wounded()).count();
            plan(Target::None, 2.5 * wounded as f64 + urgent, "team heal")
        }
        _ => {
            let mut best: Option<(RowName, usize)> = None;
            for (name, row) in ai.rows() {
                let wounded = row.live().filter(|(_, c)| c.is_wounded()).count();
                if best.map(|b| wounded > b.1).unwrap_or(true) {
                    best = Some((name, wounded));
                }
            }
            let (row, wounded) = best.unwrap_or((RowName::Front, 0));
            plan(
                Target::Row { side: Side::Ai, row },
                2.5 * wounded as f64 + urgent,
                "row heal",
            )
        }
    }
}

fn buff(shape: TargetShape, ai: &Board) -> UltimatePlan {
    match shape {
        TargetShape::SingleAlly => {
            let best = ai.live().fold(None, |best: Option<(RowName, usize, u32)>, (row, slot, c)| {
                let power = c.total_power();
                if best.map(|b| power > b.2).unwrap_or(true) {
                    Some((row, slot, power))
                } else {
                    best
                }
            });
            match best {
                Some((row, slot, _)) => plan(
                    Target::Card {
                        side: Side::Ai,
                        row,
                        slot,
                    },
                    1.0,
                    "buff carry",
                ),
                None => hold("no allies"),
            }
        }
        TargetShape::AllAllies | TargetShape::NoTarget => {
            plan(Target::None, ai.live_count() as f64, "team buff")
        }
        _ => {
            let (row, count) = most_populated(ai);
            plan(Target::Row { side: Side::Ai, row }, count as f64, "row buff")
        }
    }
}

fn debuff(enemy: &Board) -> UltimatePlan {
    let (row, count) = most_populated(enemy);
    if count == 0 {
        return hold("no enemies");
    }
    let synergy = enemy.row(row).synergy as f64;
    plan(
        Target::Row {
            side: Side::Enemy,
            row,
        },
        1.5 * count as f64 + 0.5 * synergy,
        "row debuff",
    )
}

/// Row with the most live units; ties go to the front
fn most_populated(board: &Board) -> (RowName, usize) {
    let mut best = (RowName::Front, board.front.live_count());
    for (name, row) in board.rows().skip(1) {
        let count = row.live_count();
        if count > best.1 {
            best = (name, count);
        }
    }
    best
}

/// Fire only when the blast kills more value than it costs us
#[derive(Debug, Clone, Copy, Default)]
pub struct NetKillUltimate;

impl UltimateTimingRule for NetKillUltimate {
    fn name(&self) -> &'static str {
        "net_kill"
    }

    fn plan(&self, ctx: &UltimateContext<'_>) -> UltimatePlan {
        let magnitude = ctx.profile.map(|p| p.ultimate.magnitude).unwrap_or(0);
        let net = net_casualties(ctx.ai, ctx.enemy, ctx.row, magnitude);
        plan(
            Target::Row {
                side: Side::Enemy,
                row: ctx.row,
            },
            net,
            if net > 0.0 { "net kill" } else { "blast too costly" },
        )
    }
}

/// Fire only once the caster's row holds enough synergy
#[derive(Debug, Clone, Copy, Default)]
pub struct SynergyThresholdUltimate;

impl UltimateTimingRule for SynergyThresholdUltimate {
    fn name(&self) -> &'static str {
        "synergy_threshold"
    }

    fn plan(&self, ctx: &UltimateContext<'_>) -> UltimatePlan {
        let base = ShapeUltimateRule.plan(ctx);
        let threshold = ctx.profile.map(|p| p.ultimate.synergy_cost).unwrap_or(0);
        let row = ctx.ai.row(ctx.row);

        if row.synergy >= threshold {
            let allies = row.live().filter(|(slot, _)| *slot != ctx.slot).count();
            plan(base.target, 6.0 + allies as f64, "synergy threshold met")
        } else {
            plan(base.target, 0.5, "charging synergy")
        }
    }
}
