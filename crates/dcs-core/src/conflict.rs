//! Spatio-temporal conflict detection between a primary mission and a
//! set of candidate missions.
//!
//! A candidate conflicts with the primary when any waypoint pair is
//! within the safety distance *and* within the time threshold. The
//! test is a deliberate proximity heuristic over stored waypoints, not
//! a trajectory-interpolation collision model.

use serde::{Deserialize, Serialize};

use crate::models::{Mission, MissionStatus};

/// Thresholds for the proximity test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum safe 3D separation in meters (inclusive)
    pub safety_distance_m: f64,
    /// Maximum temporal proximity in seconds (inclusive)
    pub time_threshold_s: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            safety_distance_m: 100.0,
            time_threshold_s: 60.0,
        }
    }
}

/// A candidate mission flagged as unsafe to admit alongside.
///
/// `distance_m` and `time_diff_s` describe the first satisfying pair in
/// scan order. Which pair is reported depends on waypoint order; only
/// membership in the result is contractual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictHit {
    pub mission_id: String,
    pub distance_m: f64,
    pub time_diff_s: f64,
}

/// Check the primary mission against every candidate.
///
/// Candidates with status `Aborted` or `Inactive` are excluded up front
/// and can never appear in the result regardless of geometry. Scanning
/// short-circuits per candidate on the first waypoint pair that is both
/// within `time_threshold_s` and within `safety_distance_m`, both
/// inclusive. The result preserves candidate scan order.
///
/// Pure function: no mission is mutated. The lifecycle controller owns
/// the conflict-flag bookkeeping that follows a detection run.
pub fn detect(
    primary: &Mission,
    candidates: &[Mission],
    config: &DetectionConfig,
) -> Vec<ConflictHit> {
    let mut hits = Vec::new();

    for candidate in candidates {
        if matches!(
            candidate.status,
            MissionStatus::Aborted | MissionStatus::Inactive
        ) {
            continue;
        }

        if let Some(hit) = scan_candidate(primary, candidate, config) {
            tracing::debug!(
                mission_id = %hit.mission_id,
                distance_m = hit.distance_m,
                time_diff_s = hit.time_diff_s,
                "conflict detected"
            );
            hits.push(hit);
        }
    }

    hits
}

/// Scan one candidate against the primary; first satisfying pair wins.
fn scan_candidate(
    primary: &Mission,
    candidate: &Mission,
    config: &DetectionConfig,
) -> Option<ConflictHit> {
    for primary_wp in &primary.waypoints {
        for candidate_wp in &candidate.waypoints {
            let time_diff_s = primary_wp.time_diff_s(candidate_wp);
            if time_diff_s > config.time_threshold_s {
                continue;
            }

            let distance_m = primary_wp.distance_m(candidate_wp);
            if distance_m <= config.safety_distance_m {
                return Some(ConflictHit {
                    mission_id: candidate.id.clone(),
                    distance_m,
                    time_diff_s,
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use chrono::{Duration, TimeZone, Utc};

    fn t0() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn mission(id: &str, status: MissionStatus, waypoints: Vec<Waypoint>) -> Mission {
        Mission::new(id, waypoints, t0(), 90.0, status)
    }

    #[test]
    fn test_close_in_space_and_time_conflicts() {
        // Distance 50m (3-4-5 scaled), time diff 0
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let candidate = mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![Waypoint::new(30.0, 40.0, 100.0, t0())],
        );

        let hits = detect(&primary, &[candidate], &DetectionConfig::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].mission_id, "SIM_0001");
        assert!((hits[0].distance_m - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_close_in_space_but_not_time_is_safe() {
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let candidate = mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0() + Duration::seconds(120))],
        );

        let hits = detect(&primary, &[candidate], &DetectionConfig::default());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        // Exactly 100m apart and exactly 60s apart still counts.
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let candidate = mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![Waypoint::new(100.0, 0.0, 100.0, t0() + Duration::seconds(60))],
        );

        let hits = detect(&primary, &[candidate], &DetectionConfig::default());
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_aborted_candidate_is_excluded() {
        // Identical waypoint, but aborted missions never conflict.
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let aborted = mission(
            "SIM_0001",
            MissionStatus::Aborted,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let inactive = mission(
            "SIM_0002",
            MissionStatus::Inactive,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );

        let hits = detect(&primary, &[aborted, inactive], &DetectionConfig::default());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_primary_yields_no_conflicts() {
        let primary = mission("PRIMARY", MissionStatus::Pending, vec![]);
        let candidate = mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );

        let hits = detect(&primary, &[candidate], &DetectionConfig::default());
        assert!(hits.is_empty());
    }

    #[test]
    fn test_result_preserves_candidate_order() {
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let near = |id: &str| {
            mission(
                id,
                MissionStatus::Active,
                vec![Waypoint::new(10.0, 0.0, 100.0, t0())],
            )
        };
        let far = mission(
            "SIM_FAR",
            MissionStatus::Active,
            vec![Waypoint::new(5000.0, 0.0, 100.0, t0())],
        );

        let hits = detect(
            &primary,
            &[near("SIM_B"), far, near("SIM_A")],
            &DetectionConfig::default(),
        );
        let ids: Vec<_> = hits.iter().map(|h| h.mission_id.as_str()).collect();
        assert_eq!(ids, vec!["SIM_B", "SIM_A"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let primary = mission(
            "PRIMARY",
            MissionStatus::Pending,
            vec![Waypoint::new(0.0, 0.0, 100.0, t0())],
        );
        let candidate = mission(
            "SIM_0001",
            MissionStatus::Active,
            vec![Waypoint::new(150.0, 0.0, 100.0, t0())],
        );

        let default = DetectionConfig::default();
        assert!(detect(&primary, std::slice::from_ref(&candidate), &default).is_empty());

        let wide = DetectionConfig {
            safety_distance_m: 200.0,
            time_threshold_s: 60.0,
        };
        assert_eq!(detect(&primary, &[candidate], &wide).len(), 1);
    }
}
