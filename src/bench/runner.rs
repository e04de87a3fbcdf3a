//! Timed execution of the case tables against one dataset.

use std::fmt;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::info;

use super::cases::{BenchCase, READ_CASES, Representation, WRITE_CASES};
use super::config::{DatasetSpec, HarnessConfig};
use super::frame::Frame;
use super::io::{load_source, read_table, write_table};
use crate::core::schema::{CaseTiming, TimingRecord};
use crate::{BenchError, BenchResult};

/// Which half of the battery to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchMode {
    Read,
    Write,
}

impl BenchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenchMode::Read => "read",
            BenchMode::Write => "write",
        }
    }
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run `operation` `iterations` times back to back and return mean wall-clock seconds.
///
/// No warm-up, no outlier rejection. The first error aborts the measurement.
pub fn measure<F>(mut operation: F, iterations: usize) -> BenchResult<f64>
where
    F: FnMut() -> BenchResult<()>,
{
    if iterations == 0 {
        return Err(BenchError::Message(
            "cannot measure zero iterations".to_string(),
        ));
    }
    let start = Instant::now();
    for _ in 0..iterations {
        operation()?;
    }
    Ok(start.elapsed().as_secs_f64() / iterations as f64)
}

/// Runs the read and write batteries for one dataset at a fixed thread count.
pub struct Benchmarker {
    dataset: DatasetSpec,
    dir: PathBuf,
    threads: usize,
    pool: ThreadPool,
    read_iterations: usize,
    write_iterations: usize,
}

impl Benchmarker {
    pub fn new(dataset: &DatasetSpec, dir: &Path, threads: usize) -> BenchResult<Self> {
        if threads == 0 {
            return Err(BenchError::Message(
                "thread count must be at least 1".to_string(),
            ));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("filebench-{i}"))
            .build()
            .map_err(|e| BenchError::Message(format!("failed to build thread pool: {e}")))?;
        let defaults = HarnessConfig::default();
        Ok(Benchmarker {
            dataset: dataset.clone(),
            dir: dir.to_path_buf(),
            threads,
            pool,
            read_iterations: defaults.read_iterations,
            write_iterations: defaults.write_iterations,
        })
    }

    pub fn with_iterations(mut self, read: usize, write: usize) -> Self {
        self.read_iterations = read;
        self.write_iterations = write;
        self
    }

    /// Load the source once, then time every write case.
    ///
    /// Every case overwrites its artifact; the file left behind is the last iteration's.
    pub fn run_writes(&self) -> BenchResult<Vec<CaseTiming>> {
        info!(
            "Reading text file: {}",
            self.dir.join(&self.dataset.source.path).display()
        );
        let table = load_source(&self.dir, &self.dataset.source)?;
        let frame = self.pool.install(|| Frame::from_batch(&table))?;

        let mut results = Vec::with_capacity(WRITE_CASES.len());
        for case in WRITE_CASES {
            let timing = self.time_case(case, self.write_iterations, || {
                self.write_case(case, &table, &frame)
            })?;
            results.push(timing);
        }
        Ok(results)
    }

    /// Time every read case against the artifacts `run_writes` left on disk.
    pub fn run_reads(&self) -> BenchResult<Vec<CaseTiming>> {
        let mut results = Vec::with_capacity(READ_CASES.len());
        for case in READ_CASES {
            let timing = self.time_case(case, self.read_iterations, || self.read_case(case))?;
            results.push(timing);
        }
        Ok(results)
    }

    pub fn run(&self, mode: BenchMode) -> BenchResult<Vec<CaseTiming>> {
        match mode {
            BenchMode::Read => self.run_reads(),
            BenchMode::Write => self.run_writes(),
        }
    }

    fn write_case(&self, case: &BenchCase, table: &RecordBatch, frame: &Frame) -> BenchResult<()> {
        let path = case.artifact_path(&self.dir, &self.dataset.base);
        match case.representation {
            Representation::ArrowTable => write_table(table, &path, case.storage),
            Representation::DataFrame => write_table(&frame.to_batch()?, &path, case.storage),
        }
    }

    fn read_case(&self, case: &BenchCase) -> BenchResult<()> {
        let path = case.artifact_path(&self.dir, &self.dataset.base);
        let table = read_table(&path, case.storage)?;
        match case.representation {
            Representation::ArrowTable => {
                black_box(table);
            }
            Representation::DataFrame => {
                black_box(Frame::from_batch(&table)?);
            }
        }
        Ok(())
    }

    fn time_case<F>(&self, case: &BenchCase, iterations: usize, operation: F) -> BenchResult<CaseTiming>
    where
        F: FnMut() -> BenchResult<()> + Send,
    {
        let expr = case.storage.label();
        info!("{expr}");
        let mean = self.pool.install(move || measure(operation, iterations))?;
        info!(
            dataset = %self.dataset.name,
            threads = self.threads,
            "({expr}, {}, {mean})",
            case.representation
        );
        Ok(CaseTiming {
            expr: expr.to_string(),
            output_type: case.representation.label().to_string(),
            mean,
        })
    }
}

/// Run one mode of the battery over every configured dataset and tag rows by dataset.
pub fn run_benchmarks(
    config: &HarnessConfig,
    dir: &Path,
    threads: usize,
    mode: BenchMode,
) -> BenchResult<Vec<TimingRecord>> {
    let mut records = Vec::new();
    for dataset in &config.datasets {
        info!(dataset = %dataset.name, threads, "Benchmarking {mode}s");
        let benchmarker = Benchmarker::new(dataset, dir, threads)?
            .with_iterations(config.read_iterations, config.write_iterations);
        let timings = benchmarker.run(mode)?;
        records.extend(
            timings
                .into_iter()
                .map(|t| TimingRecord::tagged(t, &dataset.name)),
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_noop_is_small_and_non_negative() {
        let mean = measure(|| Ok(()), 1000).unwrap();
        assert!(mean >= 0.0);
        assert!(mean < 0.01);
    }

    #[test]
    fn test_measure_runs_exact_iteration_count() {
        let mut calls = 0;
        measure(
            || {
                calls += 1;
                Ok(())
            },
            7,
        )
        .unwrap();
        assert_eq!(calls, 7);
    }

    #[test]
    fn test_measure_averages_over_iterations() {
        let mean = measure(
            || {
                std::thread::sleep(std::time::Duration::from_millis(5));
                Ok(())
            },
            3,
        )
        .unwrap();
        assert!(mean >= 0.005);
    }

    #[test]
    fn test_measure_propagates_first_error() {
        let mut calls = 0;
        let result = measure(
            || {
                calls += 1;
                Err(BenchError::Message("boom".to_string()))
            },
            5,
        );
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_measure_zero_iterations_is_error() {
        assert!(measure(|| Ok(()), 0).is_err());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let dataset = DatasetSpec::new("d", "d", "d.csv", ',', true);
        assert!(Benchmarker::new(&dataset, Path::new("."), 0).is_err());
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(BenchMode::Read.as_str(), "read");
        assert_eq!(BenchMode::Write.to_string(), "write");
    }
}
