//! Core game types and entities

pub mod board;
pub mod card;
pub mod effects;
pub mod entity;
pub mod hero;
pub mod state;
pub mod types;

pub use board::{Board, Hand, Row, HERO_CAP, ROW_CAPACITY, STAT_CAP};
pub use card::{Card, Role};
pub use effects::{Effect, EffectKind};
pub use entity::{EntityId, GameEntity};
pub use hero::{AbilityKind, Archetype, HeroProfile, ImpactClass, TargetShape, UltimateProfile};
pub use state::GameState;
pub use types::{HeroId, PerRow, RowName, Side};

/// Card instance identifier
pub type CardId = EntityId;
