//! The boss behavior controller.
//!
//! A three-state reactive controller re-derived every tick in fixed
//! priority order, executing its current state as a one-step plan through
//! the shared action catalog.

use heist_core::{AgentId, Blackboard, TickContext, TraceEvent, Vec3};

use crate::catalog::{self, ActionKind};
use crate::world::{ArenaWorldMut, ArenaWorldView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Guard,
    Pursue,
    Attack,
}

impl BossState {
    fn step(self) -> ActionKind {
        match self {
            BossState::Guard => ActionKind::HoldCircuit,
            BossState::Pursue => ActionKind::RunDown,
            BossState::Attack => ActionKind::AreaStrike,
        }
    }

    fn tag(self) -> u64 {
        match self {
            BossState::Guard => 0,
            BossState::Pursue => 1,
            BossState::Attack => 2,
        }
    }
}

pub struct BossController<A> {
    state: BossState,
    target: Option<A>,
    scratch: Blackboard,
}

impl<A: AgentId> Default for BossController<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AgentId> BossController<A> {
    pub fn new() -> Self {
        Self {
            state: BossState::Guard,
            target: None,
            scratch: Blackboard::new(),
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn target(&self) -> Option<A> {
        self.target
    }

    pub fn tick<W>(&mut self, ctx: &TickContext, agent: A, world: &mut W)
    where
        W: ArenaWorldMut<Agent = A> + 'static,
    {
        if !world.is_alive(agent) {
            return;
        }

        self.finish_attack_if_done(ctx, agent, world);

        let previous = self.state;
        self.transition(ctx, agent, world);
        if self.state != previous {
            world.record(
                TraceEvent::new(ctx.tick, "boss.state")
                    .with_a(agent.stable_id())
                    .with_b(self.state.tag()),
            );
        }

        let def = catalog::def::<W>(self.state.step());
        let _ = catalog::run_step(&def, ctx, agent, world, &mut self.scratch);
    }

    /// Arm the cooldown and drop the animation scratch once the attack
    /// animation has run its course.
    fn finish_attack_if_done<W>(&mut self, ctx: &TickContext, agent: A, world: &mut W)
    where
        W: ArenaWorldMut<Agent = A>,
    {
        if self.state != BossState::Attack {
            return;
        }
        let Some(started) = self.scratch.get(catalog::ATTACK_STARTED).copied() else {
            return;
        };
        if ctx.tick.saturating_sub(started) < world.tuning().attack_duration_ticks {
            return;
        }
        let window = world.tuning().attack_cooldown_ticks;
        world.clocks_mut(agent).note_attack(ctx.tick, window);
        self.scratch.remove(catalog::ATTACK_STARTED);
        self.scratch.remove(catalog::STRUCK);
    }

    /// Priority-ordered state derivation.
    fn transition<W>(&mut self, ctx: &TickContext, agent: A, world: &W)
    where
        W: ArenaWorldView<Agent = A>,
    {
        let now = ctx.tick;
        let tuning = world.tuning();

        // 1. Mid-animation attack is not interruptible.
        if self.state == BossState::Attack && self.scratch.contains(catalog::ATTACK_STARTED) {
            return;
        }

        let Some(pos) = world.position(agent) else {
            return;
        };

        // 2. Strike when someone is in reach and the cooldown allows.
        if world.clocks(agent).attack_ready(now) {
            if let Some((_, distance)) = nearest_living_raider(world, pos) {
                if distance < tuning.attack_radius {
                    self.state = BossState::Attack;
                    self.target = None;
                    self.scratch.set(catalog::ATTACK_STARTED, now);
                    self.scratch.remove(catalog::STRUCK);
                    return;
                }
            }
        }

        // 3. Pursue an intruder; 4. otherwise guard.
        match self.pursuit_target(world, pos) {
            Some(raider) => {
                self.state = BossState::Pursue;
                self.target = Some(raider);
                self.scratch.set(catalog::RUN_TARGET, raider.stable_id());
            }
            None => {
                self.state = BossState::Guard;
                self.target = None;
            }
        }
    }

    /// The nearest living raider close to the boss, else the nearest one
    /// close to the guarded objective, else nobody.
    fn pursuit_target<W>(&self, world: &W, pos: Vec3) -> Option<A>
    where
        W: ArenaWorldView<Agent = A>,
    {
        let tuning = world.tuning();
        if let Some((raider, distance)) = nearest_living_raider(world, pos) {
            if distance < tuning.pursue_radius {
                return Some(raider);
            }
        }
        if let Some((raider, distance)) =
            nearest_living_raider(world, world.objective().position)
        {
            if distance < tuning.treasure_min_pursue_radius {
                return Some(raider);
            }
        }
        None
    }
}

/// Straight-line nearest living raider to `from`.
pub fn nearest_living_raider<W: ArenaWorldView>(world: &W, from: Vec3) -> Option<(W::Agent, f32)> {
    let mut best: Option<(W::Agent, f32)> = None;
    for raider in world.raiders() {
        if !world.is_alive(raider) {
            continue;
        }
        let Some(pos) = world.position(raider) else {
            continue;
        };
        let distance = from.distance(pos);
        if best.map_or(true, |(_, bd)| distance < bd) {
            best = Some((raider, distance));
        }
    }
    best
}
