//! Result records shared by the benchmark runner and the results merger.

use serde::{Deserialize, Serialize};

/// Mean timing of one case, before it is tagged with its dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseTiming {
    pub expr: String,
    pub output_type: String,
    /// Mean wall-clock seconds per iteration
    pub mean: f64,
}

/// One row of `<prefix>_{read,write}_results_<threads>.csv`.
///
/// Field order is the CSV column order. A `mean` cell that is empty or not a number
/// (`NA`, `nan`) reads as `None` and is written back as an empty cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub expr: String,
    pub output_type: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub mean: Option<f64>,
    pub dataset: String,
}

impl TimingRecord {
    pub fn tagged(timing: CaseTiming, dataset: &str) -> Self {
        TimingRecord {
            expr: timing.expr,
            output_type: timing.output_type,
            mean: Some(timing.mean),
            dataset: dataset.to_string(),
        }
    }
}

/// One row produced by the external harness. `time` is in nanoseconds; `NA` reads as `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExternalTimingRecord {
    pub expr: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub time: Option<f64>,
    pub dataset: String,
}

/// One row of `all_{read,write}_results.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub expr: String,
    pub output_type: String,
    /// Seconds, absent when the source row had no usable time
    #[serde(deserialize_with = "csv::invalid_option")]
    pub time: Option<f64>,
    pub dataset: String,
    pub nthreads: usize,
    pub language: String,
}

/// One row of `file_sizes.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSizeRecord {
    pub dataset: String,
    pub file_type: String,
    /// Mebibytes
    pub size: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_keeps_case_fields() {
        let timing = CaseTiming {
            expr: "parquet (UNC)".to_string(),
            output_type: "arrow Table".to_string(),
            mean: 0.25,
        };
        let record = TimingRecord::tagged(timing, "nyctaxi");

        assert_eq!(record.expr, "parquet (UNC)");
        assert_eq!(record.output_type, "arrow Table");
        assert_eq!(record.mean, Some(0.25));
        assert_eq!(record.dataset, "nyctaxi");
    }
}
