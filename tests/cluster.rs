//! Member classification tests.

mod common;

use trellis::{Health, Member, Role, StatusReport};

// ============================================================================
// Classification
// ============================================================================

fn member(id: u64) -> Member {
    Member::new(
        id,
        format!("node-{}", id),
        vec![format!("http://10.0.0.{}:2380", id)],
        vec![format!("http://10.0.0.{}:2379", id)],
    )
}

#[test]
fn unprobed_member_keeps_pessimistic_defaults() {
    let m = member(1);
    assert_eq!(m.role, Role::Follower);
    assert_eq!(m.status, Health::Unhealthy);
    assert_eq!(m.db_size, 0);
}

#[test]
fn leader_when_reported_leader_is_self() {
    let mut m = member(1);
    m.absorb_status(&StatusReport {
        member_id: 1,
        leader_id: 1,
        db_size: 20480,
    });
    assert_eq!(m.role, Role::Leader);
    assert_eq!(m.status, Health::Healthy);
    assert_eq!(m.db_size, 20480);
}

#[test]
fn follower_when_reported_leader_is_another_member() {
    let mut m = member(2);
    m.absorb_status(&StatusReport {
        member_id: 2,
        leader_id: 1,
        db_size: 20480,
    });
    assert_eq!(m.role, Role::Follower);
    assert_eq!(m.status, Health::Healthy);
}

#[test]
fn id_is_decimal_rendering() {
    let m = member(u64::MAX);
    assert_eq!(m.id, "18446744073709551615");
}

// ============================================================================
// Wire shape
// ============================================================================

#[test]
fn member_serializes_for_ui_consumption() {
    let mut m = member(1);
    m.absorb_status(&StatusReport {
        member_id: 1,
        leader_id: 1,
        db_size: 64,
    });

    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["role"], "Leader");
    assert_eq!(json["status"], "Healthy");
    assert_eq!(json["db_size"], 64);
}
