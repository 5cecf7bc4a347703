use heist_core::AgentId;

/// Process-wide exclusive-role ledger for the objective seeker.
///
/// An explicit arbitration service rather than a shared flag: claims and
/// releases name the claiming agent, so a stale release can never evict a
/// newer holder. Invariant: at most one holder at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleArbiter<A> {
    holder: Option<A>,
}

impl<A: AgentId> RoleArbiter<A> {
    pub fn new() -> Self {
        Self { holder: None }
    }

    /// Claim the role. Succeeds when free or already held by `agent`.
    pub fn try_claim(&mut self, agent: A) -> bool {
        match self.holder {
            None => {
                self.holder = Some(agent);
                true
            }
            Some(h) => h == agent,
        }
    }

    /// Release the role. No-op unless `agent` is the current holder.
    pub fn release(&mut self, agent: A) {
        if self.holder == Some(agent) {
            self.holder = None;
        }
    }

    pub fn holder(&self) -> Option<A> {
        self.holder
    }

    pub fn is_held_by_other(&self, agent: A) -> bool {
        self.holder.is_some_and(|h| h != agent)
    }

    pub fn clear(&mut self) {
        self.holder = None;
    }
}
