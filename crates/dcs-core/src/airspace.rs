//! Derived view of the airspace: exactly the missions that are
//! currently active.
//!
//! The view is always rebuilt from the full mission collection, never
//! incrementally patched, so it cannot drift from the registry as long
//! as every status mutation is followed by a recomputation.

use crate::models::{Mission, MissionStatus};

#[derive(Debug, Default)]
pub struct AirspaceView {
    missions: Vec<Mission>,
}

impl AirspaceView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the view content with exactly the active subset of
    /// `missions`, preserving their order. Idempotent.
    pub fn recompute(&mut self, missions: &[Mission]) {
        self.missions = missions
            .iter()
            .filter(|m| m.status == MissionStatus::Active)
            .cloned()
            .collect();
    }

    /// Read-only snapshot of the active missions.
    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        self.missions.iter()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.missions.iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }
}
