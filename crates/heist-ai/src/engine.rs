//! The plan-execution engine.
//!
//! Drives the head of each raider's plan once per tick. Precondition
//! failure discards the whole remaining plan (a hard policy: a stale head
//! never survives to the next eligible tick); a satisfied postcondition
//! advances it. Both transitions, and replanning itself, share one
//! replan-throttle window, so a plan changes state at most once per
//! window while effects keep executing at tick rate in between.

use std::collections::BTreeMap;

use heist_core::{AgentId, Blackboard, TickContext, TraceEvent};

use crate::catalog::{self, StepOutcome};
use crate::planner::{objective_secured, PlanSelector};
use crate::world::{ArenaWorldMut, Goal};

pub struct PlanEngine {
    selector: PlanSelector,
    /// Per-agent step scratch (dwell timers, chosen cover), keyed by
    /// stable id. Dropped with the plan: an abandoned timer never
    /// resumes.
    scratch: BTreeMap<u64, Blackboard>,
}

impl Default for PlanEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanEngine {
    pub fn new() -> Self {
        Self {
            selector: PlanSelector::new(),
            scratch: BTreeMap::new(),
        }
    }

    pub fn selector(&self) -> &PlanSelector {
        &self.selector
    }

    pub fn tick_raider<W>(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W)
    where
        W: ArenaWorldMut + 'static,
    {
        if !world.is_alive(agent) {
            return;
        }

        let now = ctx.tick;
        let key = agent.stable_id();

        if world.clocks(agent).is_interrupted(now) {
            self.scratch.entry(key).or_default().clear();
            world.set_goal(agent, Goal::Hold);
            return;
        }

        if world.plan(agent).is_empty() {
            if objective_secured(world) {
                return;
            }
            if !world.clocks(agent).transition_ready(now) {
                return;
            }
            let plan = self.selector.select(ctx, agent, world);
            world.record(
                TraceEvent::new(now, "plan.issued")
                    .with_a(key)
                    .with_b(plan.len() as u64),
            );
            let window = world.tuning().replan_throttle_ticks;
            *world.plan_mut(agent) = plan;
            world.clocks_mut(agent).arm_replan_throttle(now, window);
            self.scratch.entry(key).or_default().clear();
        }

        let Some(head) = world.plan(agent).head() else {
            return;
        };
        let def = catalog::def::<W>(head);
        let bb = self.scratch.entry(key).or_default();

        match catalog::run_step(&def, ctx, agent, world, bb) {
            StepOutcome::Skipped => {
                if world.clocks(agent).transition_ready(now) {
                    world.plan_mut(agent).clear();
                    bb.clear();
                    let window = world.tuning().replan_throttle_ticks;
                    world.clocks_mut(agent).arm_replan_throttle(now, window);
                    world.record(TraceEvent::new(now, "plan.dropped").with_a(key));
                }
            }
            StepOutcome::Running => {}
            StepOutcome::Complete => {
                if world.clocks(agent).transition_ready(now) {
                    world.plan_mut(agent).advance();
                    bb.clear();
                    let window = world.tuning().replan_throttle_ticks;
                    world.clocks_mut(agent).arm_replan_throttle(now, window);
                    world.record(TraceEvent::new(now, "plan.step_done").with_a(key));
                }
            }
        }
    }
}
