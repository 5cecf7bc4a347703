use heist_ai::RoleArbiter;

#[test]
fn claim_is_exclusive() {
    let mut arbiter: RoleArbiter<u64> = RoleArbiter::new();
    assert!(arbiter.try_claim(1));
    assert!(!arbiter.try_claim(2));
    assert_eq!(arbiter.holder(), Some(1));
}

#[test]
fn claim_is_idempotent_for_the_holder() {
    let mut arbiter: RoleArbiter<u64> = RoleArbiter::new();
    assert!(arbiter.try_claim(1));
    assert!(arbiter.try_claim(1));
    assert_eq!(arbiter.holder(), Some(1));
}

#[test]
fn release_by_non_holder_is_a_no_op() {
    let mut arbiter: RoleArbiter<u64> = RoleArbiter::new();
    assert!(arbiter.try_claim(1));
    arbiter.release(2);
    assert_eq!(arbiter.holder(), Some(1));

    arbiter.release(1);
    assert_eq!(arbiter.holder(), None);
    assert!(arbiter.try_claim(2));
}

#[test]
fn is_held_by_other_sees_only_foreign_claims() {
    let mut arbiter: RoleArbiter<u64> = RoleArbiter::new();
    assert!(!arbiter.is_held_by_other(1));
    arbiter.try_claim(1);
    assert!(!arbiter.is_held_by_other(1));
    assert!(arbiter.is_held_by_other(2));
}
