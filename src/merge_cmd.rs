//! Results merger: unify the native and external timing tables and tabulate artifact sizes.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::BenchResult;
use crate::bench::{BenchMode, HarnessConfig};
use crate::core::harness::{EXTERNAL, NATIVE};
use crate::core::labels::LabelMap;
use crate::core::schema::{ExternalTimingRecord, FileSizeRecord, MergedRecord, TimingRecord};
use crate::storage::CsvExporter;
use crate::storage::csv::{read_external_timings, read_timings};

pub const ALL_READ_RESULTS: &str = "all_read_results.csv";
pub const ALL_WRITE_RESULTS: &str = "all_write_results.csv";
pub const FILE_SIZES: &str = "file_sizes.csv";

const MIB: f64 = (1u64 << 20) as f64;

/// Artifacts both harnesses leave behind: (storage label, file suffix).
pub const CENSUS_CASES: &[(&str, &str)] = &[
    ("feather V1", "_v1.feather"),
    ("feather V2 (UNC)", "_uncompressed.feather"),
    ("feather V2 (LZ4)", "_lz4.feather"),
    ("feather V2 (ZSTD)", "_zstd.feather"),
    ("parquet (UNC)", "_uncompressed.parquet"),
    ("parquet (SNAPPY)", "_snappy.parquet"),
    ("fst (UNC)", "_0.fst"),
    ("fst (C=50)", "_50.fst"),
    ("RDS (C)", "_compressed.rds"),
    ("RDS (UNC)", "_uncompressed.rds"),
];

/// Label maps applied while merging.
#[derive(Debug, Clone)]
pub struct Normalizer {
    pub formats: LabelMap,
    pub output_types: LabelMap,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            formats: LabelMap::formats(),
            output_types: LabelMap::output_types(),
        }
    }
}

impl Normalizer {
    /// Merge one thread count's tables: external rows first, then native rows.
    ///
    /// External times are converted to seconds. Format labels of both harnesses and
    /// the native representation labels go through the synonym maps.
    pub fn merge_tables(
        &self,
        external: Vec<ExternalTimingRecord>,
        native: Vec<TimingRecord>,
        threads: usize,
    ) -> Vec<MergedRecord> {
        let mut merged = Vec::with_capacity(external.len() + native.len());
        merged.extend(external.into_iter().map(|r| MergedRecord {
            expr: self.formats.normalize_owned(r.expr),
            output_type: EXTERNAL.output_type.unwrap_or_default().to_string(),
            time: r.time.map(|t| EXTERNAL.to_seconds(t)),
            dataset: r.dataset,
            nthreads: threads,
            language: EXTERNAL.language.to_string(),
        }));
        merged.extend(native.into_iter().map(|r| MergedRecord {
            expr: self.formats.normalize_owned(r.expr),
            output_type: self.output_types.normalize_owned(r.output_type),
            time: r.mean.map(|t| NATIVE.to_seconds(t)),
            dataset: r.dataset,
            nthreads: threads,
            language: NATIVE.language.to_string(),
        }));
        merged
    }
}

/// Load and merge both harnesses' tables of one mode across `thread_counts`.
pub fn merge(dir: &Path, mode: BenchMode, thread_counts: &[usize]) -> BenchResult<Vec<MergedRecord>> {
    let normalizer = Normalizer::default();
    let mut pieces = Vec::new();
    for &threads in thread_counts {
        let external = read_external_timings(&EXTERNAL.results_file(dir, mode.as_str(), threads))?;
        let native = read_timings(&NATIVE.results_file(dir, mode.as_str(), threads))?;
        pieces.extend(normalizer.merge_tables(external, native, threads));
    }
    Ok(pieces)
}

/// Stat `<dir>/<base><suffix>` for every dataset and case. A missing file is an error.
pub fn file_sizes(
    dir: &Path,
    datasets: &[(String, String)],
    cases: &[(&str, &str)],
) -> BenchResult<Vec<FileSizeRecord>> {
    let mut sizes = Vec::with_capacity(datasets.len() * cases.len());
    for (logical_name, base) in datasets {
        for (storage, suffix) in cases {
            let full_path = dir.join(format!("{base}{suffix}"));
            let bytes = std::fs::metadata(&full_path)?.len();
            let record = FileSizeRecord {
                dataset: logical_name.clone(),
                file_type: storage.to_string(),
                size: bytes as f64 / MIB,
            };
            info!("({}, {}, {})", record.dataset, record.file_type, record.size);
            sizes.push(record);
        }
    }
    Ok(sizes)
}

/// Merge read and write tables, then take the file-size census.
pub fn run(config: &HarnessConfig, dir: &Path) -> BenchResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    for (mode, name) in [
        (BenchMode::Read, ALL_READ_RESULTS),
        (BenchMode::Write, ALL_WRITE_RESULTS),
    ] {
        let merged = merge(dir, mode, &config.thread_counts)?;
        let path = dir.join(name);
        CsvExporter::merged().export(&merged, &path)?;
        info!(rows = merged.len(), "wrote {}", path.display());
        written.push(path);
    }

    let sizes = file_sizes(dir, &config.dataset_bases(), CENSUS_CASES)?;
    let path = dir.join(FILE_SIZES);
    CsvExporter::file_sizes().export(&sizes, &path)?;
    info!(rows = sizes.len(), "wrote {}", path.display());
    written.push(path);

    Ok(written)
}
