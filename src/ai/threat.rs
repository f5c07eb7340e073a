//! Threat and protection assessment
//!
//! Ranks the units on a board by how urgently they should be removed
//! ("threats") or protected ("needs"). Both rankings are pure functions of a
//! single board, so the planner can run them against either side.

use crate::core::hero::{self, Archetype};
use crate::core::{Board, Card, CardId, HeroId, Role, RowName};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

const SNOWBALL_PER_SYNERGY: f64 = 12.5;
const SNOWBALL_CAP: f64 = 50.0;
const DENIAL_BONUS: f64 = 30.0;
const DENIAL_COMBO_BONUS: f64 = 50.0;
const CRITICAL_THREAT_SCORE: f64 = 180.0;

/// One enemy unit and how dangerous it is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threat {
    pub card: CardId,
    pub hero: HeroId,
    pub role: Role,
    pub row: RowName,
    pub slot: usize,
    pub health: u32,
    pub score: f64,
}

/// Why a unit was picked as the kill target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KillReason {
    PriorityHealer,
    EasyKill,
    CriticalThreat,
    HighestThreat,
}

impl KillReason {
    pub fn as_str(self) -> &'static str {
        match self {
            KillReason::PriorityHealer => "priority_healer",
            KillReason::EasyKill => "easy_kill",
            KillReason::CriticalThreat => "critical_threat",
            KillReason::HighestThreat => "highest_threat",
        }
    }
}

impl fmt::Display for KillReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KillTarget {
    pub threat: Threat,
    pub reason: KillReason,
}

/// Rank every live unit on `board` by threat score, highest first
pub fn assess_threats(board: &Board) -> Vec<Threat> {
    let mut threats: Vec<Threat> = board
        .live()
        .map(|(row, slot, card)| Threat {
            card: card.id,
            hero: card.hero.clone(),
            role: card.role,
            row,
            slot,
            health: card.health,
            score: threat_score(board, row, slot, card),
        })
        .collect();
    threats.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    threats
}

/// Score a single unit in its board context
pub fn threat_score(board: &Board, row: RowName, slot: usize, card: &Card) -> f64 {
    let profile = hero::lookup(&card.hero);
    let mut score = role_base(card.role);

    score += 8.0 * card.total_power() as f64;

    // Synergy snowball: units sitting on a charged row get worse every turn
    let synergy = board.row(row).synergy;
    if synergy >= 2 {
        score += (SNOWBALL_PER_SYNERGY * synergy as f64).min(SNOWBALL_CAP);
    }

    // Deny the combo before it fires
    if profile.map(|p| p.has(Archetype::SynergyEngine)).unwrap_or(false) {
        let paired = board
            .row(row)
            .live()
            .any(|(s, other)| s != slot && other.role == Role::Damage);
        score += if paired { DENIAL_COMBO_BONUS } else { DENIAL_BONUS };
    }

    score += match card.health {
        1 => 40.0,
        2 => 20.0,
        h if h >= 5 => -15.0,
        _ => 0.0,
    };

    score += profile.map(|p| p.threat_bonus).unwrap_or(0.0);

    if row == RowName::Front {
        score += 15.0;
    } else if row == RowName::Back
        && matches!(card.role, Role::Support | Role::Damage)
        && board.is_covered(row, slot)
    {
        score += 20.0;
    }

    score
}

fn role_base(role: Role) -> f64 {
    match role {
        Role::Support => 100.0,
        Role::Damage => 70.0,
        Role::Tank => 40.0,
        Role::Other => 50.0,
    }
}

/// Pick the kill target from a threat ranking
///
/// Dead units never appear in a ranking produced by [`assess_threats`], but
/// the filter keeps hand-built lists honest too.
pub fn kill_priority(threats: &[Threat]) -> Option<KillTarget> {
    let mut best: Option<&Threat> = None;
    for threat in threats.iter().filter(|t| t.health > 0) {
        if best.map(|b| threat.score > b.score).unwrap_or(true) {
            best = Some(threat);
        }
    }
    let top = best?;

    let reason = if hero::has_archetype(&top.hero, Archetype::Healer) {
        KillReason::PriorityHealer
    } else if top.health <= 2 {
        KillReason::EasyKill
    } else if top.score >= CRITICAL_THREAT_SCORE {
        KillReason::CriticalThreat
    } else {
        KillReason::HighestThreat
    };

    Some(KillTarget {
        threat: top.clone(),
        reason,
    })
}

/// How much one of our own units needs protecting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtectionNeed {
    pub card: CardId,
    pub hero: HeroId,
    pub role: Role,
    pub row: RowName,
    pub slot: usize,
    pub health: u32,
    pub max_health: u32,
    pub score: f64,
}

impl ProtectionNeed {
    pub fn is_wounded(&self) -> bool {
        self.health < self.max_health
    }
}

/// Rank our own live units by protection need, highest first
pub fn assess_ally_protection(board: &Board) -> Vec<ProtectionNeed> {
    let mut needs: Vec<ProtectionNeed> = board
        .live()
        .map(|(row, slot, card)| {
            let value = match card.role {
                Role::Support => 90.0,
                Role::Damage => 60.0,
                Role::Tank => 45.0,
                Role::Other => 40.0,
            };
            let urgency = (1.0 - card.health_fraction()) * 100.0;
            let synergy_value = 5.0 * board.row(row).synergy as f64;
            let exposure = if row == RowName::Front {
                20.0
            } else if board.is_covered(row, slot) {
                -10.0
            } else {
                0.0
            };
            ProtectionNeed {
                card: card.id,
                hero: card.hero.clone(),
                role: card.role,
                row,
                slot,
                health: card.health,
                max_health: card.max_health,
                score: 0.5 * value + urgency + synergy_value + exposure,
            }
        })
        .collect();
    needs.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    needs
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefensiveKind {
    Heal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefensivePriority {
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefensiveAction {
    pub action: DefensiveKind,
    pub target: CardId,
    pub priority: DefensivePriority,
}

/// Recommend a heal, if anybody needs one
///
/// Only wounded units (below their own max health) qualify. A unit at full
/// health is skipped even when that max is 1 or 2, since a heal would
/// restore nothing.
pub fn recommend_defensive_action(needs: &[ProtectionNeed]) -> Option<DefensiveAction> {
    let wounded: Vec<&ProtectionNeed> = needs.iter().filter(|n| n.is_wounded()).collect();
    let top = wounded.first()?;

    if top.health <= 2 {
        return Some(DefensiveAction {
            action: DefensiveKind::Heal,
            target: top.card,
            priority: DefensivePriority::Urgent,
        });
    }

    if let Some(support) = wounded
        .iter()
        .find(|n| n.role == Role::Support && n.health < 4)
    {
        return Some(DefensiveAction {
            action: DefensiveKind::Heal,
            target: support.card,
            priority: DefensivePriority::High,
        });
    }

    Some(DefensiveAction {
        action: DefensiveKind::Heal,
        target: top.card,
        priority: DefensivePriority::Normal,
    })
}
