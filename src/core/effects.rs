//! Effect markers attached to cards and rows
//!
//! Markers are opaque to the engine: the real ability scripts decide what a
//! "barrier" or a "wound" does. Heuristics only look at the marker kind.

use crate::core::{CardId, EntityId};
use serde::{Deserialize, Serialize};

/// Marker kinds the heuristics know how to value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    // Beneficial to the side that carries them
    Barrier,
    Shield,
    DamageReduction,
    Nano,
    Immortality,
    HealOverTime,

    // Detrimental to the side that carries them
    Wound,
    Discord,
    Hack,
    Sleep,
    Burn,
    Frozen,

    /// Any marker name the engine does not recognise
    #[serde(other)]
    Unknown,
}

impl EffectKind {
    pub fn is_beneficial(self) -> bool {
        matches!(
            self,
            EffectKind::Barrier
                | EffectKind::Shield
                | EffectKind::DamageReduction
                | EffectKind::Nano
                | EffectKind::Immortality
                | EffectKind::HealOverTime
        )
    }

    pub fn is_detrimental(self) -> bool {
        matches!(
            self,
            EffectKind::Wound
                | EffectKind::Discord
                | EffectKind::Hack
                | EffectKind::Sleep
                | EffectKind::Burn
                | EffectKind::Frozen
        )
    }
}

/// An opaque marker on a card or a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: EntityId,
    pub kind: EffectKind,
    /// Card whose ability created the marker, if known
    #[serde(default)]
    pub source_card: Option<CardId>,
    #[serde(default)]
    pub tooltip: String,
}

impl Effect {
    pub fn new(id: EntityId, kind: EffectKind) -> Self {
        Effect {
            id,
            kind,
            source_card: None,
            tooltip: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_deserializes() {
        let effect: Effect =
            serde_json::from_str(r#"{"id":3,"kind":"mystery_buff","tooltip":"??"}"#).unwrap();
        assert_eq!(effect.kind, EffectKind::Unknown);
        assert!(!effect.kind.is_beneficial());
        assert!(!effect.kind.is_detrimental());
    }

    #[test]
    fn test_polarity() {
        assert!(EffectKind::Barrier.is_beneficial());
        assert!(EffectKind::Wound.is_detrimental());
        assert!(!EffectKind::Wound.is_beneficial());
    }
}
