//! Core types for filebench.
//!
//! Result records written and read by both drivers, the harness naming conventions,
//! the label synonym tables the merger normalizes with, and host environment detection.

pub mod env;
pub mod harness;
pub mod labels;
pub mod schema;

// Re-export key types for convenience
pub use env::EnvironmentInfo;
pub use harness::{EXTERNAL, Harness, NATIVE};
pub use labels::{FORMAT_SYNONYMS, LabelMap, OUTPUT_TYPE_SYNONYMS};
pub use schema::{CaseTiming, ExternalTimingRecord, FileSizeRecord, MergedRecord, TimingRecord};
