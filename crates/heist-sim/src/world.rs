//! The concrete arena world.

use std::collections::BTreeMap;

use heist_ai::clocks;
use heist_ai::{
    ArenaWorldMut, ArenaWorldView, CombatStyle, CooldownClocks, Goal, Objective, Plan, RoleArbiter,
    Tuning,
};
use heist_core::{TraceEvent, TraceLog, Vec3, WorldMut, WorldView};

/// Height at which a carrier holds the objective.
const CARRY_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Boss,
    Raider,
}

#[derive(Debug, Clone)]
pub struct SimAgent {
    pub id: u64,
    pub kind: AgentKind,
    pub style: CombatStyle,
    pub pos: Vec3,
    /// Unit planar heading, updated by movement.
    pub heading: Vec3,
    pub health: u32,
    pub alive: bool,
    pub base: Vec3,
    pub radius: f32,
    /// World units per second.
    pub speed: f32,
    pub clocks: CooldownClocks,
    pub plan: Plan,
    pub goal: Goal<u64>,
}

impl SimAgent {
    pub fn boss(id: u64, pos: Vec3, health: u32) -> Self {
        Self {
            id,
            kind: AgentKind::Boss,
            style: CombatStyle::Melee,
            pos,
            heading: Vec3::new(1.0, 0.0, 0.0),
            health,
            alive: true,
            base: pos,
            radius: 0.8,
            speed: 2.5,
            clocks: CooldownClocks::default(),
            plan: Plan::new(),
            goal: Goal::Hold,
        }
    }

    pub fn raider(id: u64, pos: Vec3, style: CombatStyle, health: u32, base: Vec3) -> Self {
        Self {
            id,
            kind: AgentKind::Raider,
            style,
            pos,
            heading: Vec3::new(1.0, 0.0, 0.0),
            health,
            alive: true,
            base,
            radius: 0.4,
            speed: 3.0,
            clocks: CooldownClocks::default(),
            plan: Plan::new(),
            goal: Goal::Hold,
        }
    }
}

/// A circular obstacle patch blocking line of sight.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
}

impl Obstacle {
    /// Whether the planar segment `a -> b` passes through this patch.
    fn blocks(&self, a: Vec3, b: Vec3) -> bool {
        let ax = a.x;
        let az = a.z;
        let dx = b.x - ax;
        let dz = b.z - az;
        let len_sq = dx * dx + dz * dz;

        let t = if len_sq <= f32::EPSILON {
            0.0
        } else {
            (((self.center.x - ax) * dx + (self.center.z - az) * dz) / len_sq).clamp(0.0, 1.0)
        };
        let cx = ax + dx * t - self.center.x;
        let cz = az + dz * t - self.center.z;
        cx * cx + cz * cz < self.radius * self.radius
    }
}

#[derive(Debug)]
pub struct SimWorld {
    pub tick: u64,
    pub dt_seconds: f32,
    agents: BTreeMap<u64, SimAgent>,
    boss_id: Option<u64>,
    arbiter: RoleArbiter<u64>,
    objective: Objective<u64>,
    covers: Vec<Vec3>,
    bases: Vec<Vec3>,
    obstacles: Vec<Obstacle>,
    tuning: Tuning,
    pub trace: TraceLog,
}

impl SimWorld {
    pub(crate) fn assemble(
        agents: Vec<SimAgent>,
        objective_pos: Vec3,
        covers: Vec<Vec3>,
        bases: Vec<Vec3>,
        obstacles: Vec<Obstacle>,
        tuning: Tuning,
    ) -> Self {
        let boss_id = agents
            .iter()
            .find(|a| a.kind == AgentKind::Boss)
            .map(|a| a.id);
        let agents = agents.into_iter().map(|a| (a.id, a)).collect();
        Self {
            tick: 0,
            dt_seconds: 1.0 / 60.0,
            agents,
            boss_id,
            arbiter: RoleArbiter::new(),
            objective: Objective {
                position: objective_pos,
                holder: None,
            },
            covers,
            bases,
            obstacles,
            tuning,
            trace: TraceLog::default(),
        }
    }

    pub fn agent(&self, id: u64) -> Option<&SimAgent> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: u64) -> Option<&mut SimAgent> {
        self.agents.get_mut(&id)
    }

    pub fn boss_id(&self) -> Option<u64> {
        self.boss_id
    }

    pub fn raider_ids(&self) -> Vec<u64> {
        self.agents
            .values()
            .filter(|a| a.kind == AgentKind::Raider)
            .map(|a| a.id)
            .collect()
    }

    pub fn living_raiders(&self) -> usize {
        self.agents
            .values()
            .filter(|a| a.kind == AgentKind::Raider && a.alive)
            .count()
    }

    pub fn tuning_ref(&self) -> &Tuning {
        &self.tuning
    }

    /// Resolve a goal to the point it currently tracks.
    fn goal_target(&self, goal: Goal<u64>) -> Option<Vec3> {
        match goal {
            Goal::Hold => None,
            Goal::Point(p) => Some(p),
            Goal::Agent(id) => self.agents.get(&id).map(|a| a.pos),
            Goal::Objective => Some(self.objective.position),
        }
    }

    /// Advance every agent toward its goal in a straight line, then keep
    /// a carried objective on its carrier. Movement is the out-of-scope
    /// collaborator, reproduced minimally.
    pub fn integrate(&mut self) {
        let dt = self.dt_seconds;
        let ids: Vec<u64> = self.agents.keys().copied().collect();
        for id in ids {
            let Some(agent) = self.agents.get(&id) else {
                continue;
            };
            if !agent.alive {
                continue;
            }
            let Some(target) = self.goal_target(agent.goal) else {
                continue;
            };

            let Some(agent) = self.agents.get_mut(&id) else {
                continue;
            };
            let to_target = Vec3::new(target.x - agent.pos.x, 0.0, target.z - agent.pos.z);
            let dist = to_target.length();
            if dist <= f32::EPSILON {
                continue;
            }

            let step = (agent.speed * dt).min(dist);
            let dir = to_target * (1.0 / dist);
            agent.pos = agent.pos + dir * step;
            agent.heading = dir;
        }

        if let Some(holder) = self.objective.holder {
            if let Some(carrier) = self.agents.get(&holder) {
                self.objective.position = carrier.pos + Vec3::new(0.0, CARRY_HEIGHT, 0.0);
            }
        }
    }
}

impl WorldView for SimWorld {
    type Agent = u64;
}

impl WorldMut for SimWorld {}

impl ArenaWorldView for SimWorld {
    fn position(&self, agent: u64) -> Option<Vec3> {
        self.agents.get(&agent).map(|a| a.pos)
    }

    fn is_alive(&self, agent: u64) -> bool {
        self.agents.get(&agent).map(|a| a.alive).unwrap_or(false)
    }

    fn combat_style(&self, agent: u64) -> CombatStyle {
        self.agents
            .get(&agent)
            .map(|a| a.style)
            .unwrap_or(CombatStyle::Melee)
    }

    fn agent_radius(&self, agent: u64) -> f32 {
        self.agents.get(&agent).map(|a| a.radius).unwrap_or(0.5)
    }

    fn base_point(&self, agent: u64) -> Vec3 {
        self.agents
            .get(&agent)
            .map(|a| a.base)
            .unwrap_or(Vec3::ZERO)
    }

    fn boss(&self) -> Option<u64> {
        self.boss_id
    }

    fn raiders(&self) -> Vec<u64> {
        self.raider_ids()
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

    fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        !self.obstacles.iter().any(|o| o.blocks(from, to))
    }

    fn is_facing(&self, agent: u64, target: Vec3, tolerance_degrees: f32) -> bool {
        let Some(a) = self.agents.get(&agent) else {
            return false;
        };
        let dir = a.pos.planar_direction_to(target);
        if dir == Vec3::ZERO {
            return true;
        }
        a.heading.dot(dir) >= tolerance_degrees.to_radians().cos()
    }

    fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

impl ArenaWorldMut for SimWorld {
    fn set_goal(&mut self, agent: u64, goal: Goal<u64>) {
        if let Some(a) = self.agents.get_mut(&agent) {
            a.goal = goal;
        }
    }

    fn apply_damage(&mut self, target: u64, amount: u32, source: u64) {
        let now = self.tick;
        let tuning = self.tuning.clone();
        let Some(victim) = self.agents.get_mut(&target) else {
            return;
        };
        if !victim.alive {
            return;
        }

        victim.health = victim.health.saturating_sub(amount);
        tracing::debug!(victim = target, source = source, health = victim.health, "hit");

        if victim.health == 0 {
            victim.alive = false;
            victim.goal = Goal::Hold;
            let death_pos = victim.pos;
            clocks::on_death(target, &mut victim.plan, &mut self.arbiter);
            // A corpse cannot carry: ground the objective where it fell.
            if self.objective.holder == Some(target) {
                self.objective.holder = None;
                self.objective.position = Vec3::new(death_pos.x, 0.0, death_pos.z);
                self.trace
                    .push(TraceEvent::new(now, "objective.dropped").with_a(target));
            }
            self.trace
                .push(TraceEvent::new(now, "agent.death").with_a(target).with_b(source));
        } else {
            clocks::on_damage_taken(
                target,
                now,
                &tuning,
                &mut victim.clocks,
                &mut victim.plan,
                &mut self.arbiter,
            );
            self.trace
                .push(TraceEvent::new(now, "agent.hit").with_a(target).with_b(source));
        }
    }

    fn try_claim_seeker(&mut self, agent: u64) -> bool {
        let claimed = self.arbiter.try_claim(agent);
        if claimed {
            self.trace
                .push(TraceEvent::new(self.tick, "role.claimed").with_a(agent));
        }
        claimed
    }

    fn release_seeker(&mut self, agent: u64) {
        self.arbiter.release(agent);
    }

    fn pick_up_objective(&mut self, agent: u64) {
        let now = self.tick;
        let lock = self.tuning.pickup_lock_ticks;
        let Some(carrier) = self.agents.get_mut(&agent) else {
            return;
        };
        carrier.clocks.note_pickup(now, lock);
        self.objective.holder = Some(agent);
        self.objective.position = carrier.pos + Vec3::new(0.0, CARRY_HEIGHT, 0.0);
        self.arbiter.try_claim(agent);
        self.trace
            .push(TraceEvent::new(now, "objective.pickup").with_a(agent));
    }

    fn drop_objective(&mut self, agent: u64) {
        if self.objective.holder != Some(agent) {
            return;
        }
        let pos = self.agents[&agent].pos;
        self.objective.holder = None;
        self.objective.position = Vec3::new(pos.x, 0.0, pos.z);
        self.arbiter.release(agent);
        self.trace
            .push(TraceEvent::new(self.tick, "objective.dropped").with_a(agent));
    }

    fn clocks_mut(&mut self, agent: u64) -> &mut CooldownClocks {
        &mut self
            .agents
            .get_mut(&agent)
            .expect("clocks_mut for unknown agent")
            .clocks
    }

    fn plan_mut(&mut self, agent: u64) -> &mut Plan {
        &mut self
            .agents
            .get_mut(&agent)
            .expect("plan_mut for unknown agent")
            .plan
    }

    fn record(&mut self, event: TraceEvent) {
        self.trace.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_blocks_the_segment_through_it() {
        let wall = Obstacle {
            center: Vec3::new(5.0, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(wall.blocks(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)));
        assert!(!wall.blocks(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)));
        // The segment ends before the patch.
        assert!(!wall.blocks(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn obstacle_ignores_height() {
        let wall = Obstacle {
            center: Vec3::new(5.0, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(wall.blocks(Vec3::new(0.0, 3.0, 0.0), Vec3::new(10.0, 7.0, 0.0)));
    }
}
