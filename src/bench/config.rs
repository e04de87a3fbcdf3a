use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{BenchError, BenchResult};

pub const DEFAULT_THREAD_COUNTS: &[usize] = &[1, 4];
pub const DEFAULT_READ_ITERATIONS: usize = 5;
pub const DEFAULT_WRITE_ITERATIONS: usize = 2;

/// Delimited text file a dataset is loaded from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceSpec {
    pub path: PathBuf,
    #[serde(default = "default_sep")]
    pub sep: char,
    #[serde(default = "default_header")]
    pub header: bool,
}

fn default_sep() -> char {
    ','
}

fn default_header() -> bool {
    true
}

impl SourceSpec {
    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter(&self) -> BenchResult<u8> {
        if !self.sep.is_ascii() {
            return Err(BenchError::Message(format!(
                "delimiter {:?} for {} is not an ASCII character",
                self.sep,
                self.path.display()
            )));
        }
        Ok(self.sep as u8)
    }
}

/// A benchmarked dataset: logical name, artifact base name, and its text source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetSpec {
    pub name: String,
    pub base: String,
    pub source: SourceSpec,
}

impl DatasetSpec {
    pub fn new(name: &str, base: &str, path: &str, sep: char, header: bool) -> Self {
        DatasetSpec {
            name: name.to_string(),
            base: base.to_string(),
            source: SourceSpec {
                path: PathBuf::from(path),
                sep,
                header,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    #[serde(rename = "dataset")]
    pub datasets: Vec<DatasetSpec>,
    pub thread_counts: Vec<usize>,
    pub read_iterations: usize,
    pub write_iterations: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            datasets: vec![
                DatasetSpec::new("fanniemae", "2016Q4", "data/2016Q4.csv", '|', false),
                DatasetSpec::new(
                    "nyctaxi",
                    "yellow_tripdata_2010-01",
                    "data/yellow_tripdata_2010-01.csv",
                    ',',
                    true,
                ),
            ],
            thread_counts: DEFAULT_THREAD_COUNTS.to_vec(),
            read_iterations: DEFAULT_READ_ITERATIONS,
            write_iterations: DEFAULT_WRITE_ITERATIONS,
        }
    }
}

impl HarnessConfig {
    /// Dataset (logical name, base name) pairs, as the file-size census wants them.
    pub fn dataset_bases(&self) -> Vec<(String, String)> {
        self.datasets
            .iter()
            .map(|d| (d.name.clone(), d.base.clone()))
            .collect()
    }
}

/// Load a harness config from TOML. Missing keys keep their defaults.
pub fn load_harness_config(path: &Path) -> BenchResult<HarnessConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg: HarnessConfig = toml::from_str(&s)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_builtin_datasets() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.thread_counts, vec![1, 4]);
        assert_eq!(cfg.read_iterations, 5);
        assert_eq!(cfg.write_iterations, 2);

        let names: Vec<&str> = cfg.datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["fanniemae", "nyctaxi"]);

        let fannie = &cfg.datasets[0];
        assert_eq!(fannie.base, "2016Q4");
        assert_eq!(fannie.source.sep, '|');
        assert!(!fannie.source.header);
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filebench.toml");
        std::fs::write(
            &path,
            r#"
thread_counts = [2]

[[dataset]]
name = "tiny"
base = "tiny"
source = { path = "tiny.csv", sep = ";" }
"#,
        )
        .unwrap();

        let cfg = load_harness_config(&path).unwrap();
        assert_eq!(cfg.thread_counts, vec![2]);
        assert_eq!(cfg.read_iterations, DEFAULT_READ_ITERATIONS);
        assert_eq!(cfg.datasets.len(), 1);
        assert_eq!(cfg.datasets[0].source.sep, ';');
        assert!(cfg.datasets[0].source.header);
        assert_eq!(cfg.datasets[0].source.delimiter().unwrap(), b';');
    }

    #[test]
    fn test_multibyte_delimiter_is_rejected() {
        let spec = DatasetSpec::new("x", "x", "x.csv", '→', true);
        assert!(spec.source.delimiter().is_err());
    }

    #[test]
    fn test_missing_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_harness_config(&dir.path().join("nope.toml")).is_err());
    }
}
