use heist_core::{TraceEvent, Vec3, WorldMut, WorldView};

use crate::{CooldownClocks, Plan, Tuning};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a raider fights once the planner routes it into combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CombatStyle {
    Melee,
    Ranged,
}

/// A movement request handed to the pathfinding collaborator.
///
/// Fire-and-forget: the goal is continuously re-sought until replaced.
/// `Agent` and `Objective` goals track their subject's current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal<A> {
    Point(Vec3),
    Agent(A),
    Objective,
    Hold,
}

/// The contested item.
///
/// Exactly one owner at any time: a carrying agent, or the ground. The
/// world reparents it atomically; no tick observes two owners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Objective<A> {
    pub position: Vec3,
    pub holder: Option<A>,
}

impl<A> Objective<A> {
    pub fn grounded(&self) -> bool {
        self.holder.is_none()
    }
}

/// Read-only arena queries consumed by the decision core.
///
/// Distances, line of sight and facing come from the geometry
/// collaborator; the rest is roster and shared-resource state.
pub trait ArenaWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec3>;
    fn is_alive(&self, agent: Self::Agent) -> bool;
    fn combat_style(&self, agent: Self::Agent) -> CombatStyle;
    /// Physical radius, used for waypoint-arrival tolerances.
    fn agent_radius(&self, agent: Self::Agent) -> f32;
    /// The base point this raider returns the objective to.
    fn base_point(&self, agent: Self::Agent) -> Vec3;

    fn boss(&self) -> Option<Self::Agent>;
    /// Living and dead raiders, in stable id order.
    fn raiders(&self) -> Vec<Self::Agent>;
    fn cover_points(&self) -> &[Vec3];
    fn base_points(&self) -> &[Vec3];
    fn objective(&self) -> &Objective<Self::Agent>;

    fn clocks(&self, agent: Self::Agent) -> &CooldownClocks;
    fn plan(&self, agent: Self::Agent) -> &Plan;
    /// Current holder of the exclusive seeker role, if any.
    fn seeker(&self) -> Option<Self::Agent>;

    fn has_line_of_sight(&self, from: Vec3, to: Vec3) -> bool;
    fn is_facing(&self, agent: Self::Agent, target: Vec3, tolerance_degrees: f32) -> bool;

    fn tuning(&self) -> &Tuning;
}

/// Effect sink for the decision core.
///
/// `apply_damage` triggers the target's own interrupt handling as a side
/// effect (cooldown stamps, plan truncation, role release), so damage
/// consequences land within the tick that deals them.
pub trait ArenaWorldMut: WorldMut + ArenaWorldView {
    fn set_goal(&mut self, agent: Self::Agent, goal: Goal<Self::Agent>);
    fn apply_damage(&mut self, target: Self::Agent, amount: u32, source: Self::Agent);

    fn try_claim_seeker(&mut self, agent: Self::Agent) -> bool;
    fn release_seeker(&mut self, agent: Self::Agent);

    /// Reparent the objective onto `agent`. Claims the seeker role.
    fn pick_up_objective(&mut self, agent: Self::Agent);
    /// Ground the objective at the carrier's position. Releases the role.
    fn drop_objective(&mut self, agent: Self::Agent);

    fn clocks_mut(&mut self, agent: Self::Agent) -> &mut CooldownClocks;
    fn plan_mut(&mut self, agent: Self::Agent) -> &mut Plan;

    /// Record a structured trace event. Worlds without tooling ignore it.
    fn record(&mut self, _event: TraceEvent) {}
}
