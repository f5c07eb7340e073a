//! Error types for the hero tactics engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TacticsError {
    /// A board, hand or card violates the data model invariants.
    /// Fatal: the turn driver must fix its input.
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// The read adapter could not answer a query.
    #[error("Board adapter unavailable: {0}")]
    AdapterUnavailable(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
