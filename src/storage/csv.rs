//! CSV export and import for result tables.
//!
//! Every table is written with its header row first, even when it has no rows, so an
//! empty result still declares its columns.

use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::BenchResult;
use crate::core::schema::{ExternalTimingRecord, FileSizeRecord, MergedRecord, TimingRecord};

/// Columns of `<prefix>_{read,write}_results_<threads>.csv`.
pub const TIMING_HEADERS: &[&str] = &["expr", "output_type", "mean", "dataset"];

/// Columns of `all_{read,write}_results.csv`.
pub const MERGED_HEADERS: &[&str] = &[
    "expr",
    "output_type",
    "time",
    "dataset",
    "nthreads",
    "language",
];

/// Columns of `file_sizes.csv`.
pub const FILE_SIZE_HEADERS: &[&str] = &["dataset", "file_type", "size"];

/// Writes a table of serde records under a fixed header.
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    headers: &'static [&'static str],
}

impl CsvExporter {
    pub fn new(headers: &'static [&'static str]) -> Self {
        CsvExporter { headers }
    }

    pub fn timings() -> Self {
        Self::new(TIMING_HEADERS)
    }

    pub fn merged() -> Self {
        Self::new(MERGED_HEADERS)
    }

    pub fn file_sizes() -> Self {
        Self::new(FILE_SIZE_HEADERS)
    }

    /// Export records to a CSV file, replacing it.
    pub fn export<T: Serialize>(&self, records: &[T], output: &Path) -> BenchResult<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = std::fs::File::create(output)?;
        self.export_to_writer(records, file)
    }

    /// Export records to any writer implementing Write.
    pub fn export_to_writer<T: Serialize, W: Write>(
        &self,
        records: &[T],
        writer: W,
    ) -> BenchResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(self.headers)?;
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Read every row of a headed CSV file. Columns not named by `T` are ignored.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> BenchResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    read_records_from(file)
}

pub fn read_records_from<T: DeserializeOwned, R: Read>(reader: R) -> BenchResult<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

pub fn read_timings(path: &Path) -> BenchResult<Vec<TimingRecord>> {
    read_records(path)
}

pub fn read_external_timings(path: &Path) -> BenchResult<Vec<ExternalTimingRecord>> {
    read_records(path)
}

pub fn read_merged(path: &Path) -> BenchResult<Vec<MergedRecord>> {
    read_records(path)
}

pub fn read_file_sizes(path: &Path) -> BenchResult<Vec<FileSizeRecord>> {
    read_records(path)
}
