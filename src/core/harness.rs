//! The two benchmark harnesses whose tables get merged.

use std::path::{Path, PathBuf};

/// Naming and unit conventions of one harness's result tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harness {
    /// File-name prefix, as in `<prefix>_read_results_4.csv`
    pub prefix: &'static str,
    /// Value of the `language` column in merged tables
    pub language: &'static str,
    /// Timing units per second in this harness's tables
    pub units_per_second: f64,
    /// Fixed `output_type` for harnesses that do not report one
    pub output_type: Option<&'static str>,
}

/// This repository's runner. The labels are the ones the comparison reports expect.
pub const NATIVE: Harness = Harness {
    prefix: "py",
    language: "Python",
    units_per_second: 1.0,
    output_type: None,
};

/// The external comparison harness, which reports nanoseconds.
pub const EXTERNAL: Harness = Harness {
    prefix: "r",
    language: "R",
    units_per_second: 1e9,
    output_type: Some("R data.frame"),
};

impl Harness {
    pub fn results_file(&self, dir: &Path, mode: &str, threads: usize) -> PathBuf {
        dir.join(format!("{}_{mode}_results_{threads}.csv", self.prefix))
    }

    pub fn to_seconds(&self, time: f64) -> f64 {
        time / self.units_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_file_names() {
        let dir = Path::new("out");
        assert_eq!(
            NATIVE.results_file(dir, "write", 1),
            dir.join("py_write_results_1.csv")
        );
        assert_eq!(
            EXTERNAL.results_file(dir, "read", 4),
            dir.join("r_read_results_4.csv")
        );
    }

    #[test]
    fn test_external_nanoseconds_to_seconds() {
        assert_eq!(EXTERNAL.to_seconds(2_500_000_000.0), 2.5);
        assert_eq!(NATIVE.to_seconds(0.75), 0.75);
    }
}
