use heist_core::AgentId;

use crate::{Plan, RoleArbiter, Tuning};

/// Per-agent cooldown clocks.
///
/// Every clock is a monotonic "until" tick timestamp, never a counter: a
/// later event always overwrites the previous one. `None` is the unset
/// sentinel and reads as "ready".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownClocks {
    pub damage_until: Option<u64>,
    pub attack_until: Option<u64>,
    pub pickup_until: Option<u64>,
    pub replan_until: Option<u64>,
}

fn elapsed(until: Option<u64>, now: u64) -> bool {
    until.map_or(true, |t| now >= t)
}

impl CooldownClocks {
    /// While true the agent neither plans nor executes; it idles in place.
    pub fn is_interrupted(&self, now: u64) -> bool {
        !elapsed(self.damage_until, now)
    }

    pub fn attack_ready(&self, now: u64) -> bool {
        elapsed(self.attack_until, now)
    }

    pub fn pickup_ready(&self, now: u64) -> bool {
        elapsed(self.pickup_until, now)
    }

    /// Whether the shared replan-throttle window admits a plan state
    /// change (replan, drop, or advance) this tick.
    pub fn transition_ready(&self, now: u64) -> bool {
        elapsed(self.replan_until, now)
    }

    pub fn note_attack(&mut self, now: u64, window: u64) {
        self.attack_until = Some(now + window);
    }

    pub fn note_pickup(&mut self, now: u64, window: u64) {
        self.pickup_until = Some(now + window);
    }

    pub fn arm_replan_throttle(&mut self, now: u64, window: u64) {
        self.replan_until = Some(now + window);
    }
}

/// Damage interrupt.
///
/// Stamps the stun and pickup windows, truncates the in-flight plan, and
/// releases the seeker role if held. Called synchronously from the
/// world's damage path so all three land within the damaging tick.
pub fn on_damage_taken<A: AgentId>(
    agent: A,
    now: u64,
    tuning: &Tuning,
    clocks: &mut CooldownClocks,
    plan: &mut Plan,
    arbiter: &mut RoleArbiter<A>,
) {
    clocks.damage_until = Some(now + tuning.damage_stun_ticks);
    clocks.pickup_until = Some(now + tuning.pickup_lock_ticks);
    plan.clear();
    arbiter.release(agent);
}

/// Death: the agent stops acting permanently; the role must not stay
/// parked on a corpse.
pub fn on_death<A: AgentId>(agent: A, plan: &mut Plan, arbiter: &mut RoleArbiter<A>) {
    plan.clear();
    arbiter.release(agent);
}
