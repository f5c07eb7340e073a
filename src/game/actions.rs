//! Actions returned to the turn driver

use crate::core::{CardId, RowName, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What an ultimate is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    Row { side: Side, row: RowName },
    Card { side: Side, row: RowName, slot: usize },
    None,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Row { side, row } => write!(f, "{side} {row} row"),
            Target::Card { side, row, slot } => write!(f, "{side} {row} slot {slot}"),
            Target::None => write!(f, "no target"),
        }
    }
}

/// One decision of the AI side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Move a card from hand into a row
    Deploy { card: CardId, row: RowName },
    /// Fire a deployed card's ultimate
    Ultimate { card: CardId, target: Target },
    /// End the AI's actions for this turn
    Pass,
}

impl Action {
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Deploy { .. } => ActionKind::Deploy,
            Action::Ultimate { .. } => ActionKind::Ultimate,
            Action::Pass => ActionKind::Pass,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Deploy { card, row } => write!(f, "deploy card {card} to {row} row"),
            Action::Ultimate { card, target } => write!(f, "ultimate of card {card} at {target}"),
            Action::Pass => write!(f, "pass"),
        }
    }
}

/// Action discriminant, for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Deploy,
    Ultimate,
    Pass,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    #[test]
    fn test_action_json_shape() {
        let action = Action::Ultimate {
            card: EntityId::new(4),
            target: Target::Row {
                side: Side::Enemy,
                row: RowName::Middle,
            },
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(
            json,
            r#"{"type":"ultimate","card":4,"target":{"type":"row","side":"enemy","row":"middle"}}"#
        );
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_display() {
        let deploy = Action::Deploy {
            card: EntityId::new(2),
            row: RowName::Back,
        };
        assert_eq!(deploy.to_string(), "deploy card 2 to back row");
        assert_eq!(Action::Pass.to_string(), "pass");
        assert_eq!(deploy.kind(), ActionKind::Deploy);
    }
}
