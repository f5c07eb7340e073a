//! Engine surface: actions, the host adapter, configuration, logging and
//! snapshots

pub mod actions;
pub mod adapter;
pub mod config;
pub mod engine;
pub mod logger;
pub mod snapshot;

pub use actions::{Action, ActionKind, Target};
pub use adapter::{snapshot_from_reader, BoardReader, RowView, SnapshotReader, TurnCounters};
pub use config::EngineConfig;
pub use engine::{decide, DecisionEngine};
pub use logger::{DecisionLogger, LogEntry, OutputMode, VerbosityLevel};
pub use snapshot::DecisionSnapshot;
