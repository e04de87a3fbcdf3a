//! Storage layer for result tables.
//!
//! This module reads and writes the CSV tables both drivers exchange.

pub mod csv;

// Re-export key types
pub use self::csv::{CsvExporter, FILE_SIZE_HEADERS, MERGED_HEADERS, TIMING_HEADERS};
