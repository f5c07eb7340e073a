//! Hero capability table
//!
//! Structured description of what each known hero's ultimate does and which
//! archetypes the hero belongs to. Heuristics read this table instead of
//! guessing intent from ability text. Heroes missing from the roster get
//! `None` from [`lookup`] and are scored with neutral defaults.

use crate::core::{HeroId, Role};
use serde::Serialize;

/// What an ability does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    Damage,
    Heal,
    Buff,
    Debuff,
    Utility,
}

/// Which units an ability touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    SingleEnemy,
    SingleAlly,
    EnemyRow,
    AllyRow,
    EnemyColumn,
    /// The caster's own row and the mirrored enemy row
    SelfArea,
    AllAllies,
    NoTarget,
}

/// Impact class used to value an unspent ultimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ImpactClass {
    Utility,
    SingleTarget,
    Aoe,
}

/// Heuristic archetype tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Healer,
    ShieldProvider,
    /// Generates synergy for its row; denying it stalls enemy ultimates
    SynergyEngine,
    Sniper,
    Flanker,
    /// Frontline unit whose value is shielding the units behind it
    Protector,
    /// Ultimate damages its own row as well as the enemy's
    NetKill,
    /// Ultimate is only worth firing once its row crosses a synergy threshold
    SynergyDependent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UltimateProfile {
    pub kind: AbilityKind,
    pub shape: TargetShape,
    /// Damage dealt, health restored or shield granted per unit touched
    pub magnitude: u32,
    /// Row synergy spent when fired; also the threshold for synergy-dependent heroes
    pub synergy_cost: u32,
}

impl UltimateProfile {
    pub fn impact(&self) -> ImpactClass {
        match self.shape {
            TargetShape::EnemyRow
            | TargetShape::AllyRow
            | TargetShape::EnemyColumn
            | TargetShape::SelfArea
            | TargetShape::AllAllies => ImpactClass::Aoe,
            TargetShape::SingleEnemy | TargetShape::SingleAlly => ImpactClass::SingleTarget,
            TargetShape::NoTarget => ImpactClass::Utility,
        }
    }

    /// High-value burst: area damage that can wipe a row or column
    pub fn is_burst(&self) -> bool {
        self.kind == AbilityKind::Damage
            && matches!(
                self.shape,
                TargetShape::EnemyRow | TargetShape::EnemyColumn | TargetShape::SelfArea
            )
    }

    pub fn can_remove(&self) -> bool {
        self.kind == AbilityKind::Damage && self.magnitude >= 2
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeroProfile {
    pub id: &'static str,
    pub role: Role,
    pub archetypes: &'static [Archetype],
    pub ultimate: UltimateProfile,
    /// Flat kill-priority bonus for named high-value heroes
    pub threat_bonus: f64,
}

impl HeroProfile {
    pub fn has(&self, archetype: Archetype) -> bool {
        self.archetypes.contains(&archetype)
    }
}

const fn ult(kind: AbilityKind, shape: TargetShape, magnitude: u32, synergy_cost: u32) -> UltimateProfile {
    UltimateProfile {
        kind,
        shape,
        magnitude,
        synergy_cost,
    }
}

use AbilityKind::*;
use Archetype::*;
use TargetShape::*;

pub static ROSTER: &[HeroProfile] = &[
    HeroProfile {
        id: "reinhardt",
        role: Role::Tank,
        archetypes: &[Protector, ShieldProvider],
        ultimate: ult(Damage, EnemyRow, 2, 3),
        threat_bonus: 10.0,
    },
    HeroProfile {
        id: "orisa",
        role: Role::Tank,
        archetypes: &[Protector],
        ultimate: ult(Buff, AllyRow, 2, 2),
        threat_bonus: 0.0,
    },
    HeroProfile {
        id: "winston",
        role: Role::Tank,
        archetypes: &[Flanker],
        ultimate: ult(Damage, EnemyRow, 1, 2),
        threat_bonus: 0.0,
    },
    HeroProfile {
        id: "dva",
        role: Role::Tank,
        archetypes: &[NetKill],
        ultimate: ult(Damage, SelfArea, 4, 3),
        threat_bonus: 15.0,
    },
    HeroProfile {
        id: "zarya",
        role: Role::Tank,
        archetypes: &[SynergyDependent, ShieldProvider],
        ultimate: ult(Debuff, EnemyRow, 1, 4),
        threat_bonus: 15.0,
    },
    HeroProfile {
        id: "hanzo",
        role: Role::Damage,
        archetypes: &[Sniper],
        ultimate: ult(Damage, EnemyColumn, 3, 3),
        threat_bonus: 25.0,
    },
    HeroProfile {
        id: "bastion",
        role: Role::Damage,
        archetypes: &[],
        ultimate: ult(Damage, EnemyColumn, 2, 2),
        threat_bonus: 20.0,
    },
    HeroProfile {
        id: "junkrat",
        role: Role::Damage,
        archetypes: &[],
        ultimate: ult(Damage, EnemyRow, 2, 2),
        threat_bonus: 5.0,
    },
    HeroProfile {
        id: "pharah",
        role: Role::Damage,
        archetypes: &[],
        ultimate: ult(Damage, EnemyRow, 3, 4),
        threat_bonus: 10.0,
    },
    HeroProfile {
        id: "widowmaker",
        role: Role::Damage,
        archetypes: &[Sniper],
        ultimate: ult(Damage, SingleEnemy, 4, 2),
        threat_bonus: 10.0,
    },
    HeroProfile {
        id: "tracer",
        role: Role::Damage,
        archetypes: &[Flanker],
        ultimate: ult(Damage, SingleEnemy, 3, 2),
        threat_bonus: 0.0,
    },
    HeroProfile {
        id: "genji",
        role: Role::Damage,
        archetypes: &[Flanker, SynergyDependent],
        ultimate: ult(Damage, EnemyRow, 3, 4),
        threat_bonus: 10.0,
    },
    HeroProfile {
        id: "sombra",
        role: Role::Damage,
        archetypes: &[Flanker],
        ultimate: ult(Debuff, EnemyRow, 0, 3),
        threat_bonus: 5.0,
    },
    HeroProfile {
        id: "mercy",
        role: Role::Support,
        archetypes: &[Healer],
        ultimate: ult(Heal, AllyRow, 3, 3),
        threat_bonus: 35.0,
    },
    HeroProfile {
        id: "ana",
        role: Role::Support,
        archetypes: &[Healer, SynergyEngine],
        ultimate: ult(Buff, SingleAlly, 2, 2),
        threat_bonus: 30.0,
    },
    HeroProfile {
        id: "lucio",
        role: Role::Support,
        archetypes: &[Healer, SynergyEngine],
        ultimate: ult(Buff, AllyRow, 2, 3),
        threat_bonus: 25.0,
    },
    HeroProfile {
        id: "zenyatta",
        role: Role::Support,
        archetypes: &[Healer],
        ultimate: ult(Heal, AllAllies, 2, 4),
        threat_bonus: 25.0,
    },
    HeroProfile {
        id: "symmetra",
        role: Role::Support,
        archetypes: &[ShieldProvider],
        ultimate: ult(Utility, NoTarget, 0, 3),
        threat_bonus: 20.0,
    },
];

/// Known two-hero combinations that reward holding both
pub static COMBOS: &[(&str, &str)] = &[
    ("zarya", "hanzo"),
    ("zarya", "pharah"),
    ("zarya", "dva"),
    ("ana", "genji"),
    ("mercy", "pharah"),
    ("lucio", "reinhardt"),
];

/// Look up a hero's capability profile
pub fn lookup(hero: &HeroId) -> Option<&'static HeroProfile> {
    ROSTER.iter().find(|p| p.id == hero.as_str())
}

pub fn has_archetype(hero: &HeroId, archetype: Archetype) -> bool {
    lookup(hero).map(|p| p.has(archetype)).unwrap_or(false)
}

/// Count the distinct known combos fully present in a set of heroes
pub fn count_combos<'a, I>(heroes: I) -> usize
where
    I: IntoIterator<Item = &'a HeroId>,
{
    let ids: Vec<&str> = heroes.into_iter().map(|h| h.as_str()).collect();
    COMBOS
        .iter()
        .filter(|(a, b)| ids.contains(a) && ids.contains(b))
        .count()
}
