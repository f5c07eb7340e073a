//! Hero cards

use crate::core::{CardId, Effect, EffectKind, GameEntity, HeroId, PerRow, RowName};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Battlefield role of a hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Damage,
    Support,
    Other,
}

/// A hero card, either in hand or deployed on a board
///
/// Invariant: `health <= max_health`. A card with `health == 0` is dead and
/// every board query skips it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub hero: HeroId,
    pub health: u32,
    pub max_health: u32,
    /// Temporary hit points absorbed before health
    #[serde(default)]
    pub shield: u32,
    pub power: PerRow<u32>,
    #[serde(default)]
    pub synergy_gain: PerRow<u32>,
    pub role: Role,
    #[serde(default)]
    pub ultimate_ready: bool,
    #[serde(default)]
    pub ultimate_used: bool,
    #[serde(default)]
    pub effects: SmallVec<[Effect; 2]>,
    /// Turns this card has been held in hand (persisted by the turn driver)
    #[serde(default)]
    pub turns_held: u32,
}

impl Card {
    pub fn new(id: CardId, hero: impl Into<HeroId>, role: Role, max_health: u32) -> Self {
        Card {
            id,
            hero: hero.into(),
            health: max_health,
            max_health,
            shield: 0,
            power: PerRow::default(),
            synergy_gain: PerRow::default(),
            role,
            ultimate_ready: false,
            ultimate_used: false,
            effects: SmallVec::new(),
            turns_held: 0,
        }
    }

    pub fn with_power(mut self, front: u32, middle: u32, back: u32) -> Self {
        self.power = PerRow::new(front, middle, back);
        self
    }

    pub fn with_synergy(mut self, front: u32, middle: u32, back: u32) -> Self {
        self.synergy_gain = PerRow::new(front, middle, back);
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_shield(mut self, shield: u32) -> Self {
        self.shield = shield;
        self
    }

    pub fn with_ultimate_ready(mut self) -> Self {
        self.ultimate_ready = true;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_wounded(&self) -> bool {
        self.is_alive() && self.health < self.max_health
    }

    /// Health plus shield: damage needed to remove this card
    pub fn effective_health(&self) -> u32 {
        self.health.saturating_add(self.shield)
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f64 / self.max_health as f64
        }
    }

    pub fn power_in(&self, row: RowName) -> u32 {
        self.power[row]
    }

    pub fn total_power(&self) -> u32 {
        self.power.total()
    }

    /// Ultimate can be fired right now
    pub fn has_ultimate_available(&self) -> bool {
        self.is_alive() && self.ultimate_ready && !self.ultimate_used
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Apply damage, shield first. Returns the damage that found no health
    /// to remove (overkill).
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let remaining = amount - absorbed;
        let dealt = remaining.min(self.health);
        self.health -= dealt;
        remaining - dealt
    }

    /// Heal up to max health. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let restored = amount.min(self.max_health - self.health.min(self.max_health));
        self.health += restored;
        restored
    }
}

impl GameEntity for Card {
    fn id(&self) -> CardId {
        self.id
    }

    fn name(&self) -> &str {
        self.hero.as_str()
    }
}
