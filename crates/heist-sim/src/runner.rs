//! The tick loop: boss first, then raiders in stable id order, then
//! movement integration. Update order carries no meaning for the decision
//! core; it only has to be fixed.

use heist_ai::{objective_secured, ArenaWorldView, BossController, PlanEngine};
use heist_core::TickContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The objective sits grounded at a base point.
    ObjectiveSecured,
    /// Every raider is dead.
    RaidersEliminated,
    /// The boss fell; raiders hold the field.
    BossSlain,
    /// The tick budget ran out first.
    TimeExpired,
}

pub struct Match {
    pub world: crate::SimWorld,
    seed: u64,
    engine: PlanEngine,
    boss: BossController<u64>,
}

impl Match {
    pub fn new(world: crate::SimWorld, seed: u64) -> Self {
        Self {
            world,
            seed,
            engine: PlanEngine::new(),
            boss: BossController::new(),
        }
    }

    pub fn boss_controller(&self) -> &BossController<u64> {
        &self.boss
    }

    /// One simulation tick.
    pub fn step(&mut self) {
        let ctx = TickContext {
            tick: self.world.tick,
            dt_seconds: self.world.dt_seconds,
            seed: self.seed,
        };

        if let Some(boss_id) = self.world.boss_id() {
            self.boss.tick(&ctx, boss_id, &mut self.world);
        }
        for raider in self.world.raider_ids() {
            self.engine.tick_raider(&ctx, raider, &mut self.world);
        }

        self.world.integrate();
        self.world.tick += 1;
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        if objective_secured(&self.world) {
            return Some(MatchOutcome::ObjectiveSecured);
        }
        if self.world.living_raiders() == 0 {
            return Some(MatchOutcome::RaidersEliminated);
        }
        if let Some(boss_id) = self.world.boss_id() {
            if !self.world.is_alive(boss_id) {
                return Some(MatchOutcome::BossSlain);
            }
        }
        None
    }

    /// Run until an outcome or the tick budget expires.
    pub fn run(&mut self, max_ticks: u64) -> MatchOutcome {
        for _ in 0..max_ticks {
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
            self.step();
        }
        self.outcome().unwrap_or(MatchOutcome::TimeExpired)
    }
}
