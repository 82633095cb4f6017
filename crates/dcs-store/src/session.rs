//! On-disk session layout for the control surface.
//!
//! A session directory holds up to four files:
//! - `all_missions.csv` — every mission, every status
//! - `airspace.csv` — exactly the current airspace view (derived)
//! - `primary_mission.csv` — the unresolved candidate, when present
//! - `conflicts.json` — the last conflict-detection result
//!
//! `airspace.csv` is rewritten from the view on every save and never
//! read back: the loader rebuilds the view from the all-missions
//! dataset, so a hand-edited or stale airspace file cannot put the
//! system out of sync.

use std::fs;
use std::path::{Path, PathBuf};

use dcs_core::{ConflictHit, LifecycleController, Mission};

use crate::dataset;
use crate::StoreError;

pub const ALL_MISSIONS_FILE: &str = "all_missions.csv";
pub const AIRSPACE_FILE: &str = "airspace.csv";
pub const PRIMARY_FILE: &str = "primary_mission.csv";
pub const CONFLICTS_FILE: &str = "conflicts.json";

#[derive(Debug, Clone)]
pub struct Session {
    dir: PathBuf,
}

impl Session {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Rebuild a controller from the session directory. Missing files
    /// mean empty state, not an error.
    pub fn load(&self) -> Result<LifecycleController, StoreError> {
        let all = self.file(ALL_MISSIONS_FILE);
        let missions = if all.exists() {
            dataset::load_missions(&all)?
        } else {
            Vec::new()
        };

        let primary_path = self.file(PRIMARY_FILE);
        let primary = if primary_path.exists() {
            dataset::load_missions(&primary_path)?.into_iter().next()
        } else {
            None
        };

        let conflicts_path = self.file(CONFLICTS_FILE);
        let conflicts: Vec<ConflictHit> = if conflicts_path.exists() {
            serde_json::from_str(&fs::read_to_string(&conflicts_path)?)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            missions = missions.len(),
            primary = primary.is_some(),
            conflicts = conflicts.len(),
            "session loaded"
        );
        Ok(LifecycleController::restore(missions, primary, conflicts))
    }

    /// Persist the controller's full state.
    ///
    /// The airspace dataset is serialized from the view itself, so the
    /// file content is exactly the view's current content. Files for an
    /// empty primary slot or an empty conflict result are removed.
    pub fn save(&self, controller: &LifecycleController) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;

        dataset::save_missions(
            &self.file(ALL_MISSIONS_FILE),
            controller.registry().missions(),
        )?;
        dataset::save_missions(&self.file(AIRSPACE_FILE), controller.airspace().missions())?;

        let primary_path = self.file(PRIMARY_FILE);
        match controller.registry().primary() {
            Some(primary) => dataset::save_missions(&primary_path, [primary])?,
            None => remove_if_present(&primary_path)?,
        }

        let conflicts_path = self.file(CONFLICTS_FILE);
        if controller.conflicts().is_empty() {
            remove_if_present(&conflicts_path)?;
        } else {
            fs::write(
                &conflicts_path,
                serde_json::to_string_pretty(controller.conflicts())?,
            )?;
        }

        Ok(())
    }

    /// Delete every session file. Missing files are fine.
    pub fn reset(&self) -> Result<(), StoreError> {
        for name in [ALL_MISSIONS_FILE, AIRSPACE_FILE, PRIMARY_FILE, CONFLICTS_FILE] {
            remove_if_present(&self.file(name))?;
        }
        Ok(())
    }

    /// Load a primary candidate from an arbitrary mission CSV: the
    /// first mission in the file.
    pub fn load_primary_from(path: &Path) -> Result<Mission, StoreError> {
        dataset::load_missions(path)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::EmptyDataset(path.to_path_buf()))
    }
}

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
