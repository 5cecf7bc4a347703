//! Boss and raider decision core for the heist contest.
//!
//! One guarding boss and a squad of raiders compete over a single
//! objective. Raiders run precondition/postcondition-gated plans issued by
//! a small hierarchical selector; the boss runs a three-state reactive
//! controller. Both sides execute their steps through the same action
//! catalog. Everything is evaluated synchronously, once per tick, against
//! an [`world::ArenaWorldMut`] implementation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arbiter;
pub mod boss;
pub mod catalog;
pub mod clocks;
pub mod engine;
pub mod plan;
pub mod planner;
pub mod tuning;
pub mod world;

pub use arbiter::RoleArbiter;
pub use boss::{BossController, BossState};
pub use catalog::{ActionDef, ActionKind, StepOutcome};
pub use clocks::CooldownClocks;
pub use engine::PlanEngine;
pub use plan::Plan;
pub use planner::{objective_secured, PlanSelector};
pub use tuning::Tuning;
pub use world::{ArenaWorldMut, ArenaWorldView, CombatStyle, Goal, Objective};
