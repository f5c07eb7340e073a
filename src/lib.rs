//! Hero Tactics - heuristic opponent engine for a row-based hero card game
//!
//! Given a snapshot of both boards and the AI's hand, the engine picks one
//! action (deploy, fire an ultimate, or pass) with a one-ply planner over a
//! hand-tuned board evaluator.

pub mod ai;
pub mod core;
pub mod error;
pub mod game;
pub mod tournament;

pub use ai::{Difficulty, Personality};
pub use error::{Result, TacticsError};
pub use game::{decide, Action, DecisionEngine, EngineConfig, Target};
