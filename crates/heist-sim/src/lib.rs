//! Reference arena world and headless match runner.
//!
//! Implements the collaborators the decision core consumes through narrow
//! interfaces (straight-line goal seeking, circle-obstacle line of sight,
//! facing, objective reparenting, damage plumbing), plus scenario
//! builders, a match loop, and a JSONL match recorder.

#![forbid(unsafe_code)]

pub mod recorder;
pub mod runner;
pub mod scenario;
pub mod world;

pub use recorder::{MatchEvent, MatchRecorder};
pub use runner::{Match, MatchOutcome};
pub use scenario::{load_tuning, standard_raid, ScenarioBuilder, ScenarioError};
pub use world::{AgentKind, Obstacle, SimAgent, SimWorld};
