//! Benchmark runner driver.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::BenchResult;
use crate::bench::{BenchMode, HarnessConfig, run_benchmarks};
use crate::core::env::EnvironmentInfo;
use crate::core::harness::NATIVE;
use crate::storage::CsvExporter;

/// For each thread count: time every write case, write its table, then the same for reads.
///
/// Returns the result tables written, in order.
pub fn run(config: &HarnessConfig, dir: &Path) -> BenchResult<Vec<PathBuf>> {
    let env = EnvironmentInfo::detect();
    info!(
        cpu = env.cpu_model.as_deref().unwrap_or("unknown"),
        logical_cores = env.cpu_cores_logical,
        physical_cores = ?env.cpu_cores_physical,
        ram_bytes = env.total_ram_bytes,
        os = %env.os,
        host = env.hostname.as_deref().unwrap_or("unknown"),
        "environment"
    );
    for threads in env.oversubscribed(&config.thread_counts) {
        warn!(
            threads,
            logical_cores = env.cpu_cores_logical,
            "thread count exceeds logical cores"
        );
    }

    let mut written = Vec::new();
    for &threads in &config.thread_counts {
        for mode in [BenchMode::Write, BenchMode::Read] {
            let results = run_benchmarks(config, dir, threads, mode)?;
            let path = NATIVE.results_file(dir, mode.as_str(), threads);
            CsvExporter::timings().export(&results, &path)?;
            info!(rows = results.len(), "wrote {}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}
