//! Format read/write benchmarking.
//!
//! The case table drives everything: each dataset is loaded once, every
//! (format, codec, representation) case is timed in declaration order, and the
//! thread count is an explicit parameter of each `Benchmarker`.

pub mod cases;
pub mod config;
pub mod frame;
pub mod io;
pub mod runner;

pub use cases::{BenchCase, Codec, Format, READ_CASES, Representation, StorageCase, WRITE_CASES};
pub use config::{DatasetSpec, HarnessConfig, SourceSpec, load_harness_config};
pub use frame::Frame;
pub use io::{load_source, read_table, write_table};
pub use runner::{BenchMode, Benchmarker, measure, run_benchmarks};
