//! A minimal arena for exercising the decision core without movement:
//! tests teleport agents and flip line-of-sight/facing directly.

#![allow(dead_code)]

use std::collections::BTreeMap;

use heist_ai::clocks;
use heist_ai::{
    ArenaWorldMut, ArenaWorldView, CombatStyle, CooldownClocks, Goal, Objective, Plan, RoleArbiter,
    Tuning,
};
use heist_core::{TraceEvent, TraceLog, Vec3, WorldMut, WorldView};

pub const BOSS: u64 = 0;

pub struct TestAgent {
    pub pos: Vec3,
    pub health: u32,
    pub alive: bool,
    pub style: CombatStyle,
    pub base: Vec3,
    pub radius: f32,
    pub clocks: CooldownClocks,
    pub plan: Plan,
    pub goal: Goal<u64>,
}

impl TestAgent {
    pub fn raider(pos: Vec3) -> Self {
        Self {
            pos,
            health: 5,
            alive: true,
            style: CombatStyle::Melee,
            base: Vec3::ZERO,
            radius: 0.5,
            clocks: CooldownClocks::default(),
            plan: Plan::new(),
            goal: Goal::Hold,
        }
    }

    pub fn ranged(pos: Vec3) -> Self {
        Self {
            style: CombatStyle::Ranged,
            health: 2,
            ..Self::raider(pos)
        }
    }

    pub fn boss(pos: Vec3) -> Self {
        Self {
            health: 20,
            ..Self::raider(pos)
        }
    }
}

pub struct Arena {
    pub tick: u64,
    pub agents: BTreeMap<u64, TestAgent>,
    pub arbiter: RoleArbiter<u64>,
    pub objective: Objective<u64>,
    pub covers: Vec<Vec3>,
    pub bases: Vec<Vec3>,
    pub line_of_sight: bool,
    pub facing: bool,
    pub tuning: Tuning,
    pub trace: TraceLog,
}

impl Arena {
    /// Boss at the origin guarding the objective, raiders as given.
    pub fn new(boss_pos: Vec3, objective_pos: Vec3, raiders: Vec<TestAgent>) -> Self {
        let mut agents = BTreeMap::new();
        agents.insert(BOSS, TestAgent::boss(boss_pos));
        for (i, raider) in raiders.into_iter().enumerate() {
            agents.insert(1 + i as u64, raider);
        }
        Self {
            tick: 0,
            agents,
            arbiter: RoleArbiter::new(),
            objective: Objective {
                position: objective_pos,
                holder: None,
            },
            covers: Vec::new(),
            bases: vec![Vec3::ZERO],
            line_of_sight: true,
            facing: true,
            tuning: Tuning::default(),
            trace: TraceLog::default(),
        }
    }

    pub fn agent(&self, id: u64) -> &TestAgent {
        &self.agents[&id]
    }

    pub fn agent_mut(&mut self, id: u64) -> &mut TestAgent {
        self.agents.get_mut(&id).expect("unknown agent")
    }

    /// Keep a carried objective on its carrier.
    pub fn sync_objective(&mut self) {
        if let Some(holder) = self.objective.holder {
            self.objective.position = self.agents[&holder].pos;
        }
    }
}

impl WorldView for Arena {
    type Agent = u64;
}

impl WorldMut for Arena {}

impl ArenaWorldView for Arena {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.pos)
    }

    fn is_alive(&self, agent: u64) -> bool {
        self.agents.get(&agent).map(|a| a.alive).unwrap_or(false)
    }

    fn combat_style(&self, agent: u64) -> CombatStyle {
        self.agents[&agent].style
    }

    fn agent_radius(&self, agent: u64) -> f32 {
        self.agents[&agent].radius
    }

    fn base_point(&self, agent: u64) -> Vec3 {
        self.agents[&agent].base
    }

    fn boss(&self) -> Option<u64> {
        Some(BOSS)
    }

    fn raiders(&self) -> Vec<u64> {
        self.agents.keys().copied().filter(|id| *id != BOSS).collect()
    }

    fn cover_points(&self) -> &[Vec3] {
        &self.covers
    }

    fn base_points(&self) -> &[Vec3] {
        &self.bases
    }

    fn objective(&self) -> &Objective<u64> {
        &self.objective
    }

    fn clocks(&self, agent: u64) -> &CooldownClocks {
        &self.agents[&agent].clocks
    }

    fn plan(&self, agent: u64) -> &Plan {
        &self.agents[&agent].plan
    }

    fn seeker(&self) -> Option<u64> {
        self.arbiter.holder()
    }

    fn has_line_of_sight(&self, _from: Vec3, _to: Vec3) -> bool {
        self.line_of_sight
    }

    fn is_facing(&self, _agent: u64, _target: Vec3, _tolerance_degrees: f32) -> bool {
        self.facing
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

impl ArenaWorldMut for Arena {
    fn set_goal(&mut self, agent: u64, goal: Goal<u64>) {
        self.agent_mut(agent).goal = goal;
    }

    fn apply_damage(&mut self, target: u64, amount: u32, _source: u64) {
        let now = self.tick;
        let tuning = self.tuning.clone();
        let Some(entry) = self.agents.get_mut(&target) else {
            return;
        };
        entry.health = entry.health.saturating_sub(amount);
        if entry.health == 0 {
            entry.alive = false;
            clocks::on_death(target, &mut entry.plan, &mut self.arbiter);
            if self.objective.holder == Some(target) {
                self.objective.holder = None;
            }
        } else {
            clocks::on_damage_taken(
                target,
                now,
                &tuning,
                &mut entry.clocks,
                &mut entry.plan,
                &mut self.arbiter,
            );
        }
    }

    fn try_claim_seeker(&mut self, agent: u64) -> bool {
        self.arbiter.try_claim(agent)
    }

    fn release_seeker(&mut self, agent: u64) {
        self.arbiter.release(agent);
    }

    fn pick_up_objective(&mut self, agent: u64) {
        self.arbiter.try_claim(agent);
        self.objective.holder = Some(agent);
        self.objective.position = self.agents[&agent].pos;
    }

    fn drop_objective(&mut self, agent: u64) {
        if self.objective.holder == Some(agent) {
            self.objective.position = self.agents[&agent].pos;
            self.objective.holder = None;
            self.arbiter.release(agent);
        }
    }

    fn clocks_mut(&mut self, agent: u64) -> &mut CooldownClocks {
        &mut self.agent_mut(agent).clocks
    }

    fn plan_mut(&mut self, agent: u64) -> &mut Plan {
        &mut self.agent_mut(agent).plan
    }

    fn record(&mut self, event: TraceEvent) {
        self.trace.push(event);
    }
}

pub fn ctx(tick: u64, seed: u64) -> heist_core::TickContext {
    heist_core::TickContext {
        tick,
        dt_seconds: 1.0 / 60.0,
        seed,
    }
}
