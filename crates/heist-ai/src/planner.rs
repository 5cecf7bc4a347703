//! The plan selector.
//!
//! Re-derives a raider's action list from a snapshot of world state. Runs
//! only when the raider's plan is empty, the objective is not already
//! secured, and the replan throttle admits a state change.

use heist_core::DeterministicRng;
use heist_core::TickContext;

use crate::catalog::ActionKind;
use crate::world::{ArenaWorldView, CombatStyle};
use crate::Plan;

/// The global win condition: the objective sits grounded at a base point.
/// While true, no raider replans; the contest stays frozen until
/// something moves the objective off the base.
pub fn objective_secured<W: ArenaWorldView>(world: &W) -> bool {
    let objective = world.objective();
    objective.grounded()
        && world
            .base_points()
            .iter()
            .any(|b| b.planar_distance(objective.position) < world.tuning().base_radius)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanSelector;

impl PlanSelector {
    pub fn new() -> Self {
        Self
    }

    /// Derive a fresh plan for `agent`.
    pub fn select<W: ArenaWorldView>(&self, ctx: &TickContext, agent: W::Agent, world: &W) -> Plan {
        // A carrier finishes the job: whatever interrupted its original
        // plan, the objective must not be dragged into a fight.
        if world.objective().holder == Some(agent) {
            return Plan::from_steps([ActionKind::ReturnToBase, ActionKind::DropObjective]);
        }

        // A ranged raider inside its minimum firing distance flees no
        // matter what role it could otherwise claim.
        if world.combat_style(agent) == CombatStyle::Ranged
            && boss_distance(agent, world)
                .is_some_and(|d| d < world.tuning().min_projectile_range)
        {
            return Plan::from_steps([ActionKind::FleeToCover]);
        }

        let role_taken = world.seeker().is_some_and(|h| h != agent);
        let recently_hit = !world.clocks(agent).pickup_ready(ctx.tick);
        let designated = self.designated_seeker(ctx, world) == Some(agent);

        if role_taken || recently_hit || !designated {
            self.combat_plan(ctx, agent, world)
        } else {
            Plan::from_steps([
                ActionKind::PursueObjective,
                ActionKind::AcquireObjective,
                ActionKind::ReturnToBase,
                ActionKind::DropObjective,
            ])
        }
    }

    /// Randomized-quorum seeker designation.
    ///
    /// Among living, non-carrying raiders, each candidate joins the pool
    /// with probability 0.5 per evaluation; the pool member closest to
    /// the objective (planar) is designated. The draw is a deterministic
    /// stream of `(seed, candidate, tick)`, so every raider replanning on
    /// the same tick sees the same quorum. Consecutive evaluations may
    /// still designate different raiders with no world-state change at
    /// all; that instability is intentional and kept.
    pub fn designated_seeker<W: ArenaWorldView>(
        &self,
        ctx: &TickContext,
        world: &W,
    ) -> Option<W::Agent> {
        let objective = world.objective().position;
        let mut best: Option<(W::Agent, f32)> = None;
        for raider in world.raiders() {
            if !world.is_alive(raider) {
                continue;
            }
            if world.objective().holder == Some(raider) {
                continue;
            }
            let mut rng = ctx.rng_for_agent(raider, ctx.tick);
            if !rng.next_bool() {
                continue;
            }
            let Some(pos) = world.position(raider) else {
                continue;
            };
            let d = pos.planar_distance(objective);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((raider, d));
            }
        }
        best.map(|(raider, _)| raider)
    }

    fn combat_plan<W: ArenaWorldView>(
        &self,
        ctx: &TickContext,
        agent: W::Agent,
        world: &W,
    ) -> Plan {
        let cooling = !world.clocks(agent).attack_ready(ctx.tick);
        match world.combat_style(agent) {
            CombatStyle::Ranged => {
                let too_close = boss_distance(agent, world)
                    .is_some_and(|d| d < world.tuning().min_projectile_range);
                if too_close || cooling {
                    Plan::from_steps([ActionKind::FleeToCover])
                } else {
                    Plan::from_steps([
                        ActionKind::SeekLineOfSight,
                        ActionKind::RangedAttack,
                        ActionKind::FleeToCover,
                    ])
                }
            }
            CombatStyle::Melee => {
                if cooling {
                    Plan::from_steps([ActionKind::PursueThreat])
                } else {
                    Plan::from_steps([ActionKind::PursueThreat, ActionKind::MeleeAttack])
                }
            }
        }
    }
}

fn boss_distance<W: ArenaWorldView>(agent: W::Agent, world: &W) -> Option<f32> {
    let boss = world.boss()?;
    let boss_pos = world.position(boss)?;
    let pos = world.position(agent)?;
    Some(pos.planar_distance(boss_pos))
}
