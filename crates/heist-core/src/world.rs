use crate::AgentId;

/// Read-only world access.
///
/// The kernel intentionally does not prescribe which queries a world must
/// expose; the contest crate defines extension traits for arena queries.
pub trait WorldView {
    type Agent: AgentId;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
