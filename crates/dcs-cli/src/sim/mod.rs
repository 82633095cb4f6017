//! Randomized mission generation for test and demo data.
//!
//! Generation policy is not safety-relevant; only the shapes matter:
//! missions conform to the core data model and active missions enter
//! the airspace like any ingested batch.

mod scenarios;

pub use scenarios::{generate_conflict_case, generate_population, generate_primary};
