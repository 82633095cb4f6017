//! Mission lifecycle orchestration: admission decisions for the
//! primary candidate and abort handling for active missions.
//!
//! The controller owns the registry, the airspace view, and the last
//! conflict-detection result. It is the sole mutator of mission status;
//! every status change runs through [`LifecycleController::transition`],
//! which pairs the mutation with a view recomputation as one step.
//!
//! The controller is synchronous and expects one logical caller at a
//! time. Embedders running it from multiple threads must serialize
//! mutating calls themselves.

use chrono::Utc;
use thiserror::Error;

use crate::airspace::AirspaceView;
use crate::conflict::{self, ConflictHit, DetectionConfig};
use crate::models::{Mission, MissionStats, MissionStatus};
use crate::registry::MissionRegistry;

/// A refused operation. Never fatal: state is left unchanged and the
/// caller may retry with corrected input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("no primary mission is set")]
    NoPrimary,
    #[error("{0} outstanding conflict(s) block acceptance")]
    OutstandingConflicts(usize),
    #[error("unknown mission id: {0}")]
    UnknownMission(String),
}

#[derive(Debug, Default)]
pub struct LifecycleController {
    registry: MissionRegistry,
    airspace: AirspaceView,
    conflicts: Vec<ConflictHit>,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a controller from persisted state.
    ///
    /// The airspace view is always recomputed from the mission
    /// collection; a persisted airspace dataset is never trusted.
    pub fn restore(
        missions: Vec<Mission>,
        primary: Option<Mission>,
        conflicts: Vec<ConflictHit>,
    ) -> Self {
        let mut registry = MissionRegistry::new();
        registry.add_missions(missions);
        if let Some(primary) = primary {
            registry.set_primary(primary);
        }

        let mut airspace = AirspaceView::new();
        airspace.recompute(registry.missions());

        let mut controller = Self {
            registry,
            airspace,
            conflicts: Vec::new(),
        };
        controller.store_detection_result(conflicts);
        controller
    }

    /// Add a batch of missions, recomputing the view when the batch
    /// can change the active set.
    pub fn ingest(&mut self, batch: Vec<Mission>) {
        let any_active = batch.iter().any(|m| m.status == MissionStatus::Active);
        self.registry.add_missions(batch);
        if any_active {
            self.airspace.recompute(self.registry.missions());
        }
    }

    /// Install a new primary candidate (last candidate wins).
    ///
    /// The stored conflict result was computed against the previous
    /// candidate and no longer gates anything, so it is cleared.
    pub fn set_primary(&mut self, mission: Mission) {
        tracing::info!(mission_id = %mission.id, "primary candidate set");
        self.registry.set_primary(mission);
        self.store_detection_result(Vec::new());
    }

    /// Drop the unresolved candidate, if any, and the stale result.
    pub fn clear_primary(&mut self) -> Option<Mission> {
        let previous = self.registry.clear_primary();
        if previous.is_some() {
            self.store_detection_result(Vec::new());
        }
        previous
    }

    /// Run conflict detection for the primary against the airspace
    /// view and store the result as the authoritative conflict set.
    pub fn run_detection(
        &mut self,
        config: &DetectionConfig,
    ) -> Result<&[ConflictHit], LifecycleError> {
        let hits = {
            let primary = self.registry.primary().ok_or(LifecycleError::NoPrimary)?;
            conflict::detect(primary, self.airspace.missions(), config)
        };

        tracing::info!(conflicts = hits.len(), "conflict detection completed");
        self.store_detection_result(hits);
        Ok(&self.conflicts)
    }

    /// Admit the primary mission into the airspace.
    ///
    /// Succeeds only when a primary is set and the last detection
    /// result is empty. On success the mission becomes active, folds
    /// into the all-missions collection, and the candidate slot is
    /// cleared. On failure nothing is mutated.
    pub fn accept_primary(&mut self) -> Result<String, LifecycleError> {
        if self.registry.primary().is_none() {
            return Err(LifecycleError::NoPrimary);
        }
        if !self.conflicts.is_empty() {
            return Err(LifecycleError::OutstandingConflicts(self.conflicts.len()));
        }

        let Some(mut mission) = self.registry.take_primary() else {
            return Err(LifecycleError::NoPrimary);
        };
        mission.status = MissionStatus::Active;
        mission.status_timestamp = Utc::now();
        let id = mission.id.clone();

        self.transition(|registry| registry.add_missions([mission]));
        tracing::info!(mission_id = %id, "primary mission accepted");
        Ok(id)
    }

    /// Decline the primary mission. Always permitted when a primary is
    /// set, regardless of conflicts. The mission folds into the
    /// all-missions collection as inactive and never enters the view.
    pub fn reject_primary(&mut self) -> Result<String, LifecycleError> {
        let mut mission = self.registry.take_primary().ok_or(LifecycleError::NoPrimary)?;
        mission.status = MissionStatus::Inactive;
        mission.status_timestamp = Utc::now();
        let id = mission.id.clone();

        self.transition(|registry| registry.add_missions([mission]));
        self.store_detection_result(Vec::new());
        tracing::info!(mission_id = %id, "primary mission rejected");
        Ok(id)
    }

    /// Abort one mission by id.
    ///
    /// Re-aborting an already-aborted mission is a harmless success
    /// that refreshes the status timestamp.
    pub fn abort(&mut self, id: &str) -> Result<(), LifecycleError> {
        if self.registry.find(id).is_none() {
            return Err(LifecycleError::UnknownMission(id.to_string()));
        }

        self.transition(|registry| {
            if let Some(mission) = registry.find_mut(id) {
                mission.status = MissionStatus::Aborted;
                mission.status_timestamp = Utc::now();
                mission.conflict = false;
            }
        });
        tracing::info!(mission_id = %id, "mission aborted");
        Ok(())
    }

    /// Abort each id independently; one failure does not stop the
    /// batch. Returns the number of successful aborts.
    pub fn abort_many<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter()
            .filter(|id| self.abort(id).is_ok())
            .count()
    }

    /// Abort every mission in the last detection result, then clear
    /// the result. Returns the number of successful aborts.
    pub fn abort_all_conflicted(&mut self) -> usize {
        let ids: Vec<String> = self.conflicts.iter().map(|h| h.mission_id.clone()).collect();
        let aborted = self.abort_many(ids.iter().map(String::as_str));
        self.store_detection_result(Vec::new());
        tracing::info!(aborted, "all conflicted missions aborted");
        aborted
    }

    pub fn stats(&self) -> MissionStats {
        MissionStats {
            total: self.registry.len(),
            pending: self.registry.count_by_status(MissionStatus::Pending),
            active: self.registry.count_by_status(MissionStatus::Active),
            aborted: self.registry.count_by_status(MissionStatus::Aborted),
            inactive: self.registry.count_by_status(MissionStatus::Inactive),
            completed: self.registry.count_by_status(MissionStatus::Completed),
            airspace: self.airspace.len(),
            conflicts: self.conflicts.len(),
            primary: self.registry.primary().map(|m| m.id.clone()),
        }
    }

    pub fn registry(&self) -> &MissionRegistry {
        &self.registry
    }

    pub fn airspace(&self) -> &AirspaceView {
        &self.airspace
    }

    /// The last conflict-detection result, in scan order.
    pub fn conflicts(&self) -> &[ConflictHit] {
        &self.conflicts
    }

    /// Apply a registry mutation and recompute the airspace view as a
    /// single step. All status changes go through here.
    fn transition(&mut self, mutate: impl FnOnce(&mut MissionRegistry)) {
        mutate(&mut self.registry);
        self.airspace.recompute(self.registry.missions());
    }

    /// Install `hits` as the authoritative conflict set: flag exactly
    /// its members and clear the flag on every other mission.
    fn store_detection_result(&mut self, hits: Vec<ConflictHit>) {
        for mission in self.registry.missions_mut() {
            mission.conflict = hits.iter().any(|h| h.mission_id == mission.id);
        }
        self.conflicts = hits;
        // Refresh view snapshots so flags stay visible through it.
        self.airspace.recompute(self.registry.missions());
    }
}
