//! Heuristic opponent
//!
//! Pure components (evaluator, threat assessor, positioning, win-condition
//! analysis, candidate generation, simulation) feed the [`planner`], which
//! picks one action per call.

pub mod candidates;
pub mod evaluator;
pub mod personality;
pub mod planner;
pub mod positioning;
pub mod rules;
pub mod simulation;
pub mod threat;
pub mod ultimates;
pub mod win_condition;

pub use candidates::{CandidateGenerator, ScoredAction};
pub use evaluator::{evaluate, BoardEvaluator, Evaluation};
pub use personality::{Difficulty, Personality, PersonalityWeights};
pub use planner::{Planner, PlannerSettings, RankedAction, Ranking};
pub use positioning::PositioningAdvisor;
pub use rules::{PositioningRule, RuleRegistry, UltimatePlan, UltimateTimingRule};
pub use threat::{assess_ally_protection, assess_threats, kill_priority, recommend_defensive_action};
pub use win_condition::{classify, Classification, GamePlan, WinCondition};
