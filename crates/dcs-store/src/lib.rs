//! Persistence boundary for the drone conflict-detection system.
//!
//! The core exposes an in-memory mission collection; this crate encodes
//! it as the tabular CSV contract (one row per waypoint) and manages
//! the session directory the control surface works against.

pub mod dataset;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

pub use dataset::{load_missions, save_missions, MissionRow};
pub use session::Session;

/// Recoverable persistence failures. Already-loaded state is never
/// rolled back by a failed load.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed mission dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed conflict result: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset contains no missions: {}", .0.display())]
    EmptyDataset(PathBuf),
}
