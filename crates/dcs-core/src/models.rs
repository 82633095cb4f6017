//! Core data models for the mission admission system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single point in space and time along a mission's path.
///
/// Coordinates are meters in a local Cartesian frame; `z` is altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: DateTime<Utc>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64, t: DateTime<Utc>) -> Self {
        Self { x, y, z, t }
    }

    /// Straight-line 3D distance to another waypoint in meters.
    pub fn distance_m(&self, other: &Waypoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Absolute time difference to another waypoint in seconds.
    pub fn time_diff_s(&self, other: &Waypoint) -> f64 {
        (self.t - other.t).num_milliseconds().abs() as f64 / 1000.0
    }
}

/// Lifecycle status of a mission.
///
/// Transitions owned by the lifecycle controller:
/// `Pending -> Active` (accept), `Pending -> Inactive` (reject),
/// `Active -> Aborted` (abort). `Completed` is set by an external
/// process and is terminal here, as are `Aborted` and `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionStatus {
    /// Candidate awaiting an admission decision
    Pending,
    /// Admitted into shared airspace
    Active,
    /// Removed from the airspace by an abort command
    Aborted,
    /// Rejected candidate, retained for history
    Inactive,
    /// Flight finished (set externally)
    Completed,
}

impl MissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Active => "active",
            MissionStatus::Aborted => "aborted",
            MissionStatus::Inactive => "inactive",
            MissionStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A planned drone flight: ordered waypoints plus scheduling metadata
/// and a lifecycle status.
///
/// Waypoint order is temporal but not guaranteed strictly increasing;
/// consumers must not assume sortedness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub waypoints: Vec<Waypoint>,
    /// Scheduled departure time (informational)
    pub start_time: DateTime<Utc>,
    /// Planned flight duration in minutes (informational)
    pub duration_minutes: f64,
    pub status: MissionStatus,
    /// Instant of the most recent status transition
    pub status_timestamp: DateTime<Utc>,
    /// True while this mission appears in the latest conflict result
    #[serde(default, skip_serializing)]
    pub conflict: bool,
}

impl Mission {
    /// Create a mission with a fresh status timestamp.
    pub fn new(
        id: impl Into<String>,
        waypoints: Vec<Waypoint>,
        start_time: DateTime<Utc>,
        duration_minutes: f64,
        status: MissionStatus,
    ) -> Self {
        Self {
            id: id.into(),
            waypoints,
            start_time,
            duration_minutes,
            status,
            status_timestamp: Utc::now(),
            conflict: false,
        }
    }
}

/// Snapshot of registry-wide counters for the control surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionStats {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub aborted: usize,
    pub inactive: usize,
    pub completed: usize,
    /// Missions currently in the airspace view
    pub airspace: usize,
    /// Missions in the last conflict-detection result
    pub conflicts: usize,
    pub primary: Option<String>,
}
