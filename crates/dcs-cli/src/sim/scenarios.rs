//! Pre-defined mission generators for populating the registry.

use chrono::{DateTime, Duration, Utc};
use rand::seq::index;
use rand::Rng;

use dcs_core::{Mission, MissionStatus, Waypoint};

const AREA_HALF_WIDTH_M: f64 = 1000.0;
const MIN_ALTITUDE_M: f64 = 50.0;
const MAX_ALTITUDE_M: f64 = 500.0;

/// Generate a population of simulated missions, all active.
///
/// Each mission starts within the next 24 hours, lasts 30-180 minutes,
/// and carries 3-8 waypoints scattered around a random base point with
/// waypoint times spread evenly across the duration.
pub fn generate_population(count: usize, now: DateTime<Utc>) -> Vec<Mission> {
    let mut rng = rand::rng();
    let mut missions = Vec::with_capacity(count);

    for i in 0..count {
        let id = format!("SIM_{:04}", i + 1);
        let start_time = now + Duration::hours(rng.random_range(0..=24));
        let duration_minutes = rng.random_range(30..=180) as f64;

        let base_x = rng.random_range(-AREA_HALF_WIDTH_M..AREA_HALF_WIDTH_M);
        let base_y = rng.random_range(-AREA_HALF_WIDTH_M..AREA_HALF_WIDTH_M);
        let base_z = rng.random_range(MIN_ALTITUDE_M..MAX_ALTITUDE_M);

        let num_waypoints = rng.random_range(3..=8);
        let mut waypoints = Vec::with_capacity(num_waypoints);
        for j in 0..num_waypoints {
            let offset_s =
                (j as f64 * duration_minutes * 60.0 / num_waypoints as f64) as i64;
            waypoints.push(Waypoint::new(
                base_x + rng.random_range(-500.0..500.0),
                base_y + rng.random_range(-500.0..500.0),
                (base_z + rng.random_range(-100.0..100.0)).max(MIN_ALTITUDE_M),
                start_time + Duration::seconds(offset_s),
            ));
        }

        missions.push(Mission::new(
            id,
            waypoints,
            start_time,
            duration_minutes,
            MissionStatus::Active,
        ));
    }

    missions
}

/// Generate a primary candidate on a fixed corridor through a quiet
/// corner of the area, departing in two hours.
pub fn generate_primary(now: DateTime<Utc>) -> Mission {
    let id = format!("PRIMARY_{}", now.format("%Y%m%d_%H%M%S"));
    let start_time = now + Duration::hours(2);

    let waypoints = vec![
        Waypoint::new(-800.0, 800.0, 100.0, start_time),
        Waypoint::new(-600.0, 600.0, 150.0, start_time + Duration::minutes(30)),
        Waypoint::new(-400.0, 400.0, 200.0, start_time + Duration::minutes(60)),
        Waypoint::new(-200.0, 200.0, 180.0, start_time + Duration::minutes(90)),
    ];

    Mission::new(id, waypoints, start_time, 90.0, MissionStatus::Pending)
}

/// Generate a candidate that deliberately crosses many active
/// missions: sample up to `max_conflicts` of them and drop a waypoint
/// just inside the safety envelope of one of theirs, plus a few random
/// filler waypoints. Waypoints are sorted by time.
pub fn generate_conflict_case(
    active: &[Mission],
    max_conflicts: usize,
    now: DateTime<Utc>,
) -> Mission {
    let mut rng = rand::rng();
    let start_time = now + Duration::hours(2);

    let sample_size = max_conflicts.min(active.len());
    let mut waypoints = Vec::with_capacity(sample_size + 3);

    for idx in index::sample(&mut rng, active.len(), sample_size) {
        let mission = &active[idx];
        if mission.waypoints.is_empty() {
            continue;
        }
        let target = mission.waypoints[rng.random_range(0..mission.waypoints.len())];
        waypoints.push(Waypoint::new(
            target.x + rng.random_range(-40.0..40.0),
            target.y + rng.random_range(-40.0..40.0),
            target.z + rng.random_range(-20.0..20.0),
            target.t + Duration::seconds(rng.random_range(-45..=45)),
        ));
    }

    for _ in 0..3 {
        waypoints.push(Waypoint::new(
            rng.random_range(-AREA_HALF_WIDTH_M..AREA_HALF_WIDTH_M),
            rng.random_range(-AREA_HALF_WIDTH_M..AREA_HALF_WIDTH_M),
            rng.random_range(MIN_ALTITUDE_M..MAX_ALTITUDE_M),
            start_time + Duration::minutes(rng.random_range(10..=110)),
        ));
    }

    waypoints.sort_by_key(|wp| wp.t);

    Mission::new(
        "HIGH_CONFLICT_PRIMARY",
        waypoints,
        start_time,
        120.0,
        MissionStatus::Pending,
    )
}
