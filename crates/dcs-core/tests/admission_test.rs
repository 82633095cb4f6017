//! End-to-end admission flow: ingest a population, evaluate a
//! candidate, resolve conflicts by aborting, then admit it.

use chrono::{Duration, TimeZone, Utc};
use dcs_core::{
    DetectionConfig, LifecycleController, Mission, MissionStatus, Waypoint,
};

fn t0() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn mission(id: &str, status: MissionStatus, waypoints: Vec<Waypoint>) -> Mission {
    Mission::new(id, waypoints, t0(), 120.0, status)
}

/// A small fixed population: two missions crossing the candidate's
/// corridor, one far away, one already aborted on the same spot.
fn population() -> Vec<Mission> {
    vec![
        mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![
                Waypoint::new(-500.0, 0.0, 120.0, t0() - Duration::minutes(5)),
                Waypoint::new(20.0, 10.0, 110.0, t0() + Duration::seconds(30)),
            ],
        ),
        mission(
            "SIM_0002",
            MissionStatus::Active,
            vec![Waypoint::new(60.0, 80.0, 100.0, t0())],
        ),
        mission(
            "SIM_0003",
            MissionStatus::Active,
            vec![Waypoint::new(8000.0, -8000.0, 300.0, t0())],
        ),
        mission(
            "SIM_0004",
            MissionStatus::Aborted,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        ),
    ]
}

fn candidate() -> Mission {
    mission(
        "PRIMARY_20260301_090000",
        MissionStatus::Pending,
        vec![
            Waypoint::new(0.0, 0.0, 100.0, t0()),
            Waypoint::new(200.0, 200.0, 150.0, t0() + Duration::minutes(30)),
        ],
    )
}

#[test]
fn admission_blocked_until_conflicts_are_resolved() {
    let mut controller = LifecycleController::new();
    controller.ingest(population());
    controller.set_primary(candidate());

    // Aborted mission on the exact same spot never counts.
    let hits = controller
        .run_detection(&DetectionConfig::default())
        .unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.mission_id.as_str()).collect();
    assert_eq!(ids, vec!["SIM_0001", "SIM_0002"]);

    // Acceptance is refused while the result is non-empty.
    assert!(controller.accept_primary().is_err());
    assert!(controller.registry().primary().is_some());

    let aborted = controller.abort_all_conflicted();
    assert_eq!(aborted, 2);

    // Aborted missions left the airspace view.
    assert!(!controller.airspace().contains("SIM_0001"));
    assert!(!controller.airspace().contains("SIM_0002"));
    assert!(controller.airspace().contains("SIM_0003"));

    // Re-running detection against the shrunken airspace is clean.
    assert!(controller
        .run_detection(&DetectionConfig::default())
        .unwrap()
        .is_empty());

    let id = controller.accept_primary().unwrap();
    assert!(controller.airspace().contains(&id));
    assert!(controller.registry().primary().is_none());

    let stats = controller.stats();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.aborted, 3);
    assert_eq!(stats.airspace, 2);
    assert_eq!(stats.conflicts, 0);
    assert_eq!(stats.primary, None);
}

#[test]
fn view_stays_consistent_across_every_operation() {
    let mut controller = LifecycleController::new();

    let check = |controller: &LifecycleController| {
        let active: Vec<&str> = controller
            .registry()
            .missions()
            .iter()
            .filter(|m| m.status == MissionStatus::Active)
            .map(|m| m.id.as_str())
            .collect();
        let view: Vec<&str> = controller
            .airspace()
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(active, view);
    };

    controller.ingest(population());
    check(&controller);

    controller.set_primary(candidate());
    check(&controller);

    controller.run_detection(&DetectionConfig::default()).unwrap();
    check(&controller);

    controller.abort("SIM_0002").unwrap();
    check(&controller);

    controller.reject_primary().unwrap();
    check(&controller);

    controller.set_primary(candidate());
    controller.abort_all_conflicted();
    check(&controller);
}
