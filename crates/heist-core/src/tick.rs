use crate::{rng, AgentId, SplitMix64};

/// One logical simulation step.
///
/// All timers in the contest are tick-stamp comparisons against `tick`;
/// nothing reads a wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    /// Derive a per-agent RNG stream for this context.
    ///
    /// The same `(seed, agent, stream)` always yields the same sequence,
    /// which keeps randomized decisions replayable.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}
