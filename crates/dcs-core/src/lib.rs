//! Core of the drone conflict-detection system: mission lifecycle
//! state machine, spatio-temporal conflict detection, and the derived
//! airspace view kept consistent with the mission registry.

pub mod airspace;
pub mod conflict;
pub mod lifecycle;
pub mod models;
pub mod registry;

pub use airspace::AirspaceView;
pub use conflict::{detect, ConflictHit, DetectionConfig};
pub use lifecycle::{LifecycleController, LifecycleError};
pub use models::{Mission, MissionStats, MissionStatus, Waypoint};
pub use registry::MissionRegistry;
