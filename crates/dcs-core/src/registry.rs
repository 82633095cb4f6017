//! Authoritative collection of all known missions plus the single
//! primary candidate slot.
//!
//! The registry is an explicitly owned value, not ambient state; the
//! lifecycle controller holds it and is the only component that reaches
//! its mutable surface. Missions are never deleted: lifecycle progress
//! is represented by status changes, not removal.

use crate::models::{Mission, MissionStatus};

#[derive(Debug, Default)]
pub struct MissionRegistry {
    missions: Vec<Mission>,
    primary: Option<Mission>,
}

impl MissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of missions.
    ///
    /// Does not touch the airspace view; the caller must trigger a
    /// recomputation if any added mission is active.
    pub fn add_missions(&mut self, batch: impl IntoIterator<Item = Mission>) {
        self.missions.extend(batch);
    }

    /// Replace the primary candidate unconditionally.
    ///
    /// Last candidate wins: any unresolved previous candidate is
    /// silently overwritten.
    pub fn set_primary(&mut self, mission: Mission) {
        self.primary = Some(mission);
    }

    /// Drop the unresolved candidate, returning it if present.
    pub fn clear_primary(&mut self) -> Option<Mission> {
        self.primary.take()
    }

    pub(crate) fn take_primary(&mut self) -> Option<Mission> {
        self.primary.take()
    }

    /// Lookup by identifier. A missing id is not an error.
    pub fn find(&self, id: &str) -> Option<&Mission> {
        self.missions.iter().find(|m| m.id == id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut Mission> {
        self.missions.iter_mut().find(|m| m.id == id)
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub(crate) fn missions_mut(&mut self) -> &mut [Mission] {
        &mut self.missions
    }

    pub fn primary(&self) -> Option<&Mission> {
        self.primary.as_ref()
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn count_by_status(&self, status: MissionStatus) -> usize {
        self.missions.iter().filter(|m| m.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use chrono::Utc;

    fn mission(id: &str, status: MissionStatus) -> Mission {
        let now = Utc::now();
        Mission::new(id, vec![Waypoint::new(0.0, 0.0, 100.0, now)], now, 60.0, status)
    }

    #[test]
    fn test_find_missing_id_returns_none() {
        let mut registry = MissionRegistry::new();
        registry.add_missions([mission("SIM_0001", MissionStatus::Active)]);

        assert!(registry.find("SIM_0001").is_some());
        assert!(registry.find("SIM_9999").is_none());
    }

    #[test]
    fn test_set_primary_last_candidate_wins() {
        let mut registry = MissionRegistry::new();
        registry.set_primary(mission("FIRST", MissionStatus::Pending));
        registry.set_primary(mission("SECOND", MissionStatus::Pending));

        assert_eq!(registry.primary().unwrap().id, "SECOND");
    }

    #[test]
    fn test_count_by_status() {
        let mut registry = MissionRegistry::new();
        registry.add_missions([
            mission("A", MissionStatus::Active),
            mission("B", MissionStatus::Active),
            mission("C", MissionStatus::Aborted),
        ]);

        assert_eq!(registry.count_by_status(MissionStatus::Active), 2);
        assert_eq!(registry.count_by_status(MissionStatus::Aborted), 1);
        assert_eq!(registry.count_by_status(MissionStatus::Inactive), 0);
        assert_eq!(registry.len(), 3);
    }
}
