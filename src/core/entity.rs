//! Entity identifiers for cards and markers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for game entities
///
/// IDs are assigned by the external game-state holder and are stable for the
/// lifetime of a match. The engine only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    pub fn new(id: u32) -> Self {
        EntityId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Base trait for all game entities
pub trait GameEntity {
    fn id(&self) -> EntityId;
    fn name(&self) -> &str;
}
