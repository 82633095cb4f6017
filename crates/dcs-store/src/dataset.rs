//! Tabular mission dataset encoding.
//!
//! One CSV row per waypoint; a mission with N waypoints occupies N rows
//! sharing all mission-level columns. Instants are RFC 3339, statuses
//! lowercase. The transient conflict flag is not persisted.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dcs_core::{Mission, MissionStatus, Waypoint};

use crate::StoreError;

/// One waypoint row of the persisted mission table.
#[derive(Debug, Serialize, Deserialize)]
pub struct MissionRow {
    pub mission_id: String,
    /// 1-based index of the waypoint within its mission
    pub waypoint_id: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: f64,
    pub status: MissionStatus,
    pub status_timestamp: DateTime<Utc>,
}

/// Write the missions to `path`, overwriting any existing file.
pub fn save_missions<'a>(
    path: &Path,
    missions: impl IntoIterator<Item = &'a Mission>,
) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;

    for mission in missions {
        for (index, waypoint) in mission.waypoints.iter().enumerate() {
            writer.serialize(MissionRow {
                mission_id: mission.id.clone(),
                waypoint_id: index + 1,
                x: waypoint.x,
                y: waypoint.y,
                z: waypoint.z,
                timestamp: waypoint.t,
                start_time: mission.start_time,
                duration_minutes: mission.duration_minutes,
                status: mission.status,
                status_timestamp: mission.status_timestamp,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Load missions from `path`, grouping rows by mission id in
/// first-seen order.
///
/// A malformed row fails the whole batch recoverably; nothing is
/// returned and any state the caller already holds is untouched.
pub fn load_missions(path: &Path) -> Result<Vec<Mission>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut missions: Vec<Mission> = Vec::new();
    for result in reader.deserialize() {
        let row: MissionRow = result?;
        let waypoint = Waypoint::new(row.x, row.y, row.z, row.timestamp);

        match missions.iter_mut().find(|m| m.id == row.mission_id) {
            Some(mission) => mission.waypoints.push(waypoint),
            None => missions.push(Mission {
                id: row.mission_id,
                waypoints: vec![waypoint],
                start_time: row.start_time,
                duration_minutes: row.duration_minutes,
                status: row.status,
                status_timestamp: row.status_timestamp,
                conflict: false,
            }),
        }
    }

    Ok(missions)
}
