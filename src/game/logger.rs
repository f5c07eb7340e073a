//! Decision logger with bump-allocated line formatting
//!
//! The pure AI components never log. The decision engine reports the plan,
//! the candidate table and the final choice through this logger, which
//! either prints or captures into memory.

use crate::ai::planner::Ranking;
use crate::game::actions::Action;
use crate::TacticsError;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
#[cfg(feature = "verbose-logging")]
use std::fmt::Write as FmtWrite;
use std::ops::Deref;

/// Verbosity level for decision output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VerbosityLevel {
    /// Silent - no output
    Silent = 0,
    /// Minimal - only the chosen action
    Minimal = 1,
    /// Normal - plan and choice (default)
    #[default]
    Normal = 2,
    /// Verbose - full candidate table
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
}

/// A captured log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "plan", "candidate", "choice")
    pub category: Option<&'static str>,
}

/// Read-only access to captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Logger for engine decisions
///
/// Candidate lines are formatted into a bump arena that is reset after each
/// table, so a verbose decision does not churn the global allocator.
pub struct DecisionLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    format_bump: RefCell<Bump>,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl DecisionLogger {
    /// Logger with default verbosity (Normal)
    pub fn new() -> Self {
        DecisionLogger::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        DecisionLogger {
            verbosity,
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Capture into memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        self.output_mode == OutputMode::Memory
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    /// Captured entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    #[inline]
    fn log_to_stdout(level: VerbosityLevel, message: &str) {
        if level == VerbosityLevel::Minimal {
            println!("{}", message);
        } else {
            println!("  {}", message);
        }
    }

    /// Route one message by level and output mode
    fn log(&self, level: VerbosityLevel, category: Option<&'static str>, message: &str) {
        if level == VerbosityLevel::Silent {
            return;
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(LogEntry {
                level,
                message: message.to_string(),
                category,
            });
        } else if level <= self.verbosity {
            Self::log_to_stdout(level, message);
        }
    }

    /// Log the classification and plan of a ranking
    pub fn plan(&self, ranking: &Ranking) {
        let c = &ranking.classification;
        self.log(
            VerbosityLevel::Normal,
            Some("plan"),
            &format!(
                "win condition {} ({:.2}), plan {:?}, budget {}, baseline {:.2}",
                c.condition, c.score, ranking.plan, ranking.budget, ranking.baseline
            ),
        );
    }

    /// Log the scored candidate table, one line per candidate
    #[cfg(feature = "verbose-logging")]
    pub fn candidates(&self, ranking: &Ranking) {
        if VerbosityLevel::Verbose > self.verbosity && !self.is_capturing() {
            return;
        }
        {
            let bump = self.format_bump.borrow();
            for (i, candidate) in ranking.candidates.iter().enumerate() {
                let mut line = bumpalo::collections::String::new_in(&bump);
                let _ = write!(
                    line,
                    "#{i} {:>7.2} (prio {:>5.2}, kills {}) {} [{}]",
                    candidate.score,
                    candidate.priority,
                    candidate.expected_kills,
                    candidate.action,
                    candidate.rationale
                );
                self.log(VerbosityLevel::Verbose, Some("candidate"), line.as_str());
            }
        }
        self.format_bump.borrow_mut().reset();
    }

    #[cfg(not(feature = "verbose-logging"))]
    pub fn candidates(&self, _ranking: &Ranking) {}

    /// Log the final choice
    pub fn choice(&self, action: &Action) {
        self.log(VerbosityLevel::Minimal, Some("choice"), &format!("chose {action}"));
    }

    /// Log a read-adapter query that failed and was treated as empty
    pub fn adapter_failure(&self, query: &str, err: &TacticsError) {
        self.log(
            VerbosityLevel::Normal,
            Some("adapter"),
            &format!("{query}: {err} (treated as empty)"),
        );
    }
}

impl Default for DecisionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DecisionLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

impl Clone for DecisionLogger {
    fn clone(&self) -> Self {
        DecisionLogger {
            verbosity: self.verbosity,
            output_mode: self.output_mode,
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}
