//! The fixed action catalog.
//!
//! Every behaviour either side performs is a named
//! (precondition, effect, postcondition) triple over the arena world.
//! Definitions are plain function pointers dispatched by tag; per-step
//! scratch (dwell timers, chosen cover, the boss's circuit waypoint)
//! lives in the caller-owned [`Blackboard`].
//!
//! The postcondition is the authoritative "this step is done" test. It is
//! deliberately allowed to differ from the effect's own success: for
//! *acquire-objective* it is "currently carrying", which may become true
//! only after several ticks of the same step re-executing.

use heist_core::{AgentId, BbKey, Blackboard, TickContext, Vec3};

use crate::world::{ArenaWorldMut, Goal};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tick the dwell timer for *acquire-objective* started on.
pub const DWELL_START: BbKey<u64> = BbKey::new(1);
/// Cover point chosen by *flee-to-cover*.
pub const COVER_TARGET: BbKey<Vec3> = BbKey::new(2);
/// Circle waypoint index for the boss's *hold-circuit*.
pub const CIRCUIT_WAYPOINT: BbKey<u32> = BbKey::new(3);
/// Tick the boss's attack animation started on.
pub const ATTACK_STARTED: BbKey<u64> = BbKey::new(4);
/// Set once the strike of the current attack has landed.
pub const STRUCK: BbKey<bool> = BbKey::new(5);
/// Stable id of the boss's pursuit target.
pub const RUN_TARGET: BbKey<u64> = BbKey::new(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ActionKind {
    // Raider
    PursueObjective,
    AcquireObjective,
    ReturnToBase,
    DropObjective,
    PursueThreat,
    MeleeAttack,
    RangedAttack,
    FleeToCover,
    SeekLineOfSight,
    // Boss
    HoldCircuit,
    RunDown,
    AreaStrike,
}

impl ActionKind {
    pub fn name(self) -> &'static str {
        match self {
            ActionKind::PursueObjective => "pursue_objective",
            ActionKind::AcquireObjective => "acquire_objective",
            ActionKind::ReturnToBase => "return_to_base",
            ActionKind::DropObjective => "drop_objective",
            ActionKind::PursueThreat => "pursue_threat",
            ActionKind::MeleeAttack => "melee_attack",
            ActionKind::RangedAttack => "ranged_attack",
            ActionKind::FleeToCover => "flee_to_cover",
            ActionKind::SeekLineOfSight => "seek_line_of_sight",
            ActionKind::HoldCircuit => "hold_circuit",
            ActionKind::RunDown => "run_down",
            ActionKind::AreaStrike => "area_strike",
        }
    }
}

/// A catalog entry: the function triple for one action tag.
pub struct ActionDef<W>
where
    W: ArenaWorldMut + 'static,
{
    pub name: &'static str,
    pub precondition: fn(&TickContext, W::Agent, &W, &Blackboard) -> bool,
    pub effect: fn(&TickContext, W::Agent, &mut W, &mut Blackboard),
    pub postcondition: fn(&TickContext, W::Agent, &W, &Blackboard) -> bool,
}

/// Outcome of one gated step evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Precondition not met; the effect did not run.
    Skipped,
    /// Effect ran; postcondition not yet satisfied.
    Running,
    /// Effect ran and the postcondition holds.
    Complete,
}

/// Evaluate one step: gate on the precondition, run the effect, report
/// the postcondition. Shared by the raider engine and the boss
/// controller.
pub fn run_step<W>(
    def: &ActionDef<W>,
    ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) -> StepOutcome
where
    W: ArenaWorldMut + 'static,
{
    if !(def.precondition)(ctx, agent, world, bb) {
        return StepOutcome::Skipped;
    }
    (def.effect)(ctx, agent, world, bb);
    if (def.postcondition)(ctx, agent, world, bb) {
        StepOutcome::Complete
    } else {
        StepOutcome::Running
    }
}

/// Look up the definition for a tag.
pub fn def<W>(kind: ActionKind) -> ActionDef<W>
where
    W: ArenaWorldMut + 'static,
{
    match kind {
        ActionKind::PursueObjective => ActionDef {
            name: kind.name(),
            precondition: pursue_objective_pre::<W>,
            effect: pursue_objective_effect::<W>,
            postcondition: pursue_objective_post::<W>,
        },
        ActionKind::AcquireObjective => ActionDef {
            name: kind.name(),
            precondition: acquire_objective_pre::<W>,
            effect: acquire_objective_effect::<W>,
            postcondition: acquire_objective_post::<W>,
        },
        ActionKind::ReturnToBase => ActionDef {
            name: kind.name(),
            precondition: always::<W>,
            effect: return_to_base_effect::<W>,
            postcondition: return_to_base_post::<W>,
        },
        ActionKind::DropObjective => ActionDef {
            name: kind.name(),
            precondition: carrying::<W>,
            effect: drop_objective_effect::<W>,
            postcondition: always::<W>,
        },
        ActionKind::PursueThreat => ActionDef {
            name: kind.name(),
            precondition: boss_alive::<W>,
            effect: pursue_threat_effect::<W>,
            postcondition: pursue_threat_post::<W>,
        },
        ActionKind::MeleeAttack => ActionDef {
            name: kind.name(),
            precondition: melee_attack_pre::<W>,
            effect: melee_attack_effect::<W>,
            postcondition: always::<W>,
        },
        ActionKind::RangedAttack => ActionDef {
            name: kind.name(),
            precondition: ranged_attack_pre::<W>,
            effect: ranged_attack_effect::<W>,
            postcondition: always::<W>,
        },
        ActionKind::FleeToCover => ActionDef {
            name: kind.name(),
            precondition: always::<W>,
            effect: flee_to_cover_effect::<W>,
            postcondition: flee_to_cover_post::<W>,
        },
        ActionKind::SeekLineOfSight => ActionDef {
            name: kind.name(),
            precondition: boss_alive::<W>,
            effect: seek_line_of_sight_effect::<W>,
            postcondition: seek_line_of_sight_post::<W>,
        },
        ActionKind::HoldCircuit => ActionDef {
            name: kind.name(),
            precondition: always::<W>,
            effect: hold_circuit_effect::<W>,
            postcondition: never::<W>,
        },
        ActionKind::RunDown => ActionDef {
            name: kind.name(),
            precondition: always::<W>,
            effect: run_down_effect::<W>,
            postcondition: never::<W>,
        },
        ActionKind::AreaStrike => ActionDef {
            name: kind.name(),
            precondition: always::<W>,
            effect: area_strike_effect::<W>,
            postcondition: area_strike_post::<W>,
        },
    }
}

// ---------------------------------------------------------------------------
// Shared predicates

fn always<W: ArenaWorldMut>(_: &TickContext, _: W::Agent, _: &W, _: &Blackboard) -> bool {
    true
}

fn never<W: ArenaWorldMut>(_: &TickContext, _: W::Agent, _: &W, _: &Blackboard) -> bool {
    false
}

fn carrying<W: ArenaWorldMut>(_: &TickContext, agent: W::Agent, world: &W, _: &Blackboard) -> bool {
    world.objective().holder == Some(agent)
}

fn boss_alive<W: ArenaWorldMut>(_: &TickContext, _: W::Agent, world: &W, _: &Blackboard) -> bool {
    world.boss().is_some_and(|b| world.is_alive(b))
}

fn boss_distance<W: ArenaWorldMut>(agent: W::Agent, world: &W) -> Option<f32> {
    let boss = world.boss()?;
    let boss_pos = world.position(boss)?;
    let pos = world.position(agent)?;
    Some(pos.planar_distance(boss_pos))
}

// ---------------------------------------------------------------------------
// pursue-objective

fn pursue_objective_pre<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    // The role must be free or already ours; a contested claim means the
    // planner picked a stale seeker and the plan should be rebuilt.
    world.seeker().map_or(true, |h| h == agent)
}

fn pursue_objective_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    world.try_claim_seeker(agent);
    world.set_goal(agent, Goal::Objective);
}

fn pursue_objective_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    let Some(pos) = world.position(agent) else {
        return false;
    };
    pos.planar_distance(world.objective().position) < world.tuning().objective_radius
}

// ---------------------------------------------------------------------------
// acquire-objective

fn acquire_objective_pre<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    if world.objective().holder == Some(agent) {
        return true;
    }
    let Some(pos) = world.position(agent) else {
        return false;
    };
    pos.planar_distance(world.objective().position) < world.tuning().pickup_radius
        && world.clocks(agent).pickup_ready(ctx.tick)
}

fn acquire_objective_effect<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) {
    if world.objective().holder == Some(agent) {
        return;
    }
    // Idle next to the objective until the dwell runs out, then claim it.
    world.set_goal(agent, Goal::Hold);
    let started = match bb.get(DWELL_START).copied() {
        Some(s) => s,
        None => {
            bb.set(DWELL_START, ctx.tick);
            ctx.tick
        }
    };
    if ctx.tick.saturating_sub(started) >= world.tuning().pickup_dwell_ticks {
        world.pick_up_objective(agent);
    }
}

fn acquire_objective_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    world.objective().holder == Some(agent)
}

// ---------------------------------------------------------------------------
// return-to-base / drop-objective

fn return_to_base_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    let base = world.base_point(agent);
    world.set_goal(agent, Goal::Point(base));
}

fn return_to_base_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    let Some(pos) = world.position(agent) else {
        return false;
    };
    pos.planar_distance(world.base_point(agent)) < world.tuning().base_radius
}

fn drop_objective_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    world.drop_objective(agent);
    world.set_goal(agent, Goal::Hold);
}

// ---------------------------------------------------------------------------
// pursue-threat / melee-attack

fn pursue_threat_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    if let Some(boss) = world.boss() {
        world.set_goal(agent, Goal::Agent(boss));
    }
}

fn pursue_threat_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    boss_distance(agent, world).is_some_and(|d| d < world.tuning().melee_range)
}

fn melee_attack_pre<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    world.boss().is_some_and(|b| world.is_alive(b))
        && world.clocks(agent).attack_ready(ctx.tick)
        && boss_distance(agent, world).is_some_and(|d| d < world.tuning().melee_range)
}

fn melee_attack_effect<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    let Some(boss) = world.boss() else {
        return;
    };
    world.apply_damage(boss, 1, agent);
    let window = world.tuning().raider_attack_cooldown_ticks;
    world.clocks_mut(agent).note_attack(ctx.tick, window);
}

// ---------------------------------------------------------------------------
// ranged-attack

fn ranged_attack_pre<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    let Some(boss) = world.boss().filter(|b| world.is_alive(*b)) else {
        return false;
    };
    let (Some(pos), Some(boss_pos)) = (world.position(agent), world.position(boss)) else {
        return false;
    };
    let t = world.tuning();
    let dist = pos.planar_distance(boss_pos);
    world.clocks(agent).attack_ready(ctx.tick)
        && dist >= t.min_projectile_range
        && dist <= t.projectile_range
        && world.has_line_of_sight(pos, boss_pos)
        && world.is_facing(agent, boss_pos, t.facing_tolerance_degrees)
}

fn ranged_attack_effect<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    let Some(boss) = world.boss() else {
        return;
    };
    world.apply_damage(boss, 1, agent);
    let window = world.tuning().raider_attack_cooldown_ticks;
    world.clocks_mut(agent).note_attack(ctx.tick, window);
}

// ---------------------------------------------------------------------------
// flee-to-cover

fn flee_to_cover_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) {
    if let Some(chosen) = bb.get(COVER_TARGET).copied() {
        world.set_goal(agent, Goal::Point(chosen));
        return;
    }

    let Some(pos) = world.position(agent) else {
        return;
    };
    let covers = world.cover_points();
    if covers.is_empty() {
        // No cover configured: degrade to standing ground.
        world.set_goal(agent, Goal::Hold);
        return;
    }

    let threat = world.boss().and_then(|b| world.position(b));
    let safe = world.tuning().cover_safe_distance;

    // Closest-to-self among points outside the threat's safe distance.
    let mut chosen: Option<(Vec3, f32)> = None;
    for &point in covers {
        if threat.is_some_and(|tp| point.planar_distance(tp) < safe) {
            continue;
        }
        let d = pos.planar_distance(point);
        if chosen.map_or(true, |(_, best)| d < best) {
            chosen = Some((point, d));
        }
    }
    // Nothing qualifies: fall back to an arbitrary cover point.
    let target = chosen.map(|(p, _)| p).unwrap_or(covers[0]);

    bb.set(COVER_TARGET, target);
    world.set_goal(agent, Goal::Point(target));
}

fn flee_to_cover_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    bb: &Blackboard,
) -> bool {
    if world.cover_points().is_empty() {
        return true;
    }
    let Some(target) = bb.get(COVER_TARGET).copied() else {
        return false;
    };
    let Some(pos) = world.position(agent) else {
        return false;
    };
    pos.planar_distance(target) < world.tuning().cover_radius
}

// ---------------------------------------------------------------------------
// seek-line-of-sight

fn seek_line_of_sight_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    _bb: &mut Blackboard,
) {
    if let Some(boss) = world.boss() {
        world.set_goal(agent, Goal::Agent(boss));
    }
}

fn seek_line_of_sight_post<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &W,
    _bb: &Blackboard,
) -> bool {
    let Some(boss) = world.boss() else {
        return false;
    };
    let (Some(pos), Some(boss_pos)) = (world.position(agent), world.position(boss)) else {
        return false;
    };
    world.has_line_of_sight(pos, boss_pos)
        && world.is_facing(agent, boss_pos, world.tuning().facing_tolerance_degrees)
}

// ---------------------------------------------------------------------------
// hold-circuit (boss)

fn hold_circuit_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) {
    let Some(pos) = world.position(agent) else {
        return;
    };
    let t = world.tuning();
    let radius = world.agent_radius(agent);
    let center = world.objective().position;

    // Waypoint count proportional to the circle's circumference and the
    // walker's size, as the original patrol did.
    let resolution =
        (((2.0 * core::f32::consts::PI * t.guard_radius) / radius).floor() as u32).max(1);
    let index = bb.get(CIRCUIT_WAYPOINT).copied().unwrap_or(0) % resolution;

    let angle = 2.0 * core::f32::consts::PI * (index as f32) / (resolution as f32);
    let waypoint = center + Vec3::new(angle.cos(), 0.0, angle.sin()) * t.guard_radius;

    if pos.planar_distance(waypoint) < radius * t.waypoint_tolerance_factor {
        bb.set(CIRCUIT_WAYPOINT, (index + 1) % resolution);
    }
    world.set_goal(agent, Goal::Point(waypoint));
}

// ---------------------------------------------------------------------------
// run-down (boss)

fn run_down_effect<W: ArenaWorldMut>(
    _ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) {
    let Some(target_id) = bb.get(RUN_TARGET).copied() else {
        return;
    };
    let Some(target) = world
        .raiders()
        .into_iter()
        .find(|r| r.stable_id() == target_id)
    else {
        return;
    };
    world.set_goal(agent, Goal::Agent(target));
}

// ---------------------------------------------------------------------------
// area-strike (boss)

fn area_strike_effect<W: ArenaWorldMut>(
    ctx: &TickContext,
    agent: W::Agent,
    world: &mut W,
    bb: &mut Blackboard,
) {
    // Frozen for the whole animation.
    world.set_goal(agent, Goal::Hold);

    let Some(started) = bb.get(ATTACK_STARTED).copied() else {
        return;
    };
    let t = world.tuning();
    let duration = t.attack_duration_ticks;
    let charge_end = ((duration as f32) * t.charge_fraction) as u64;
    let elapsed = ctx.tick.saturating_sub(started);

    if elapsed >= charge_end && elapsed < duration && !bb.contains(STRUCK) {
        bb.set(STRUCK, true);
        let Some(pos) = world.position(agent) else {
            return;
        };
        let radius = t.attack_radius;
        let victims: Vec<W::Agent> = world
            .raiders()
            .into_iter()
            .filter(|r| world.is_alive(*r))
            .filter(|r| {
                world
                    .position(*r)
                    .is_some_and(|rp| pos.distance(rp) < radius)
            })
            .collect();
        for victim in victims {
            world.apply_damage(victim, 1, agent);
        }
    }
}

fn area_strike_post<W: ArenaWorldMut>(
    ctx: &TickContext,
    _agent: W::Agent,
    world: &W,
    bb: &Blackboard,
) -> bool {
    bb.get(ATTACK_STARTED).copied().map_or(true, |started| {
        ctx.tick.saturating_sub(started) >= world.tuning().attack_duration_ticks
    })
}
