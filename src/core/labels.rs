//! Label synonym tables used to line up results from different harnesses.

use std::borrow::Cow;
use std::collections::HashMap;

/// Format labels emitted by either harness, mapped to the label used in merged reports.
pub const FORMAT_SYNONYMS: &[(&str, &str)] = &[
    ("parquet_unc", "parquet (UNC)"),
    ("parquet_snappy", "parquet (SNAPPY)"),
    ("feather_v1", "feather V1"),
    ("feather_unc", "feather V2 (UNC)"),
    ("feather_lz4", "feather V2 (LZ4)"),
    ("feather_zstd", "feather V2 (ZSTD)"),
    ("fst_unc", "fst (UNC)"),
    ("fst_50", "fst (c=50)"),
    ("rds_unc", "RDS (UNC)"),
    ("rds_compressed", "RDS (C)"),
    ("pyarrow.parquet", "parquet (SNAPPY)"),
    ("pyarrow.feather (UNC)", "feather V2 (UNC)"),
    ("pyarrow.feather (LZ4)", "feather V2 (LZ4)"),
    ("pyarrow.feather (ZSTD)", "feather V2 (ZSTD)"),
];

/// Representation labels from the native harness.
pub const OUTPUT_TYPE_SYNONYMS: &[(&str, &str)] = &[("pyarrow.Table", "arrow Table")];

/// A label rewrite table.
///
/// Lookups are identity on a miss: a label with no entry is returned unchanged.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    entries: HashMap<String, String>,
}

impl LabelMap {
    pub fn new(pairs: &[(&str, &str)]) -> Self {
        LabelMap {
            entries: pairs
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    pub fn formats() -> Self {
        Self::new(FORMAT_SYNONYMS)
    }

    pub fn output_types() -> Self {
        Self::new(OUTPUT_TYPE_SYNONYMS)
    }

    pub fn normalize<'a>(&'a self, label: &'a str) -> Cow<'a, str> {
        match self.entries.get(label) {
            Some(canonical) => Cow::Borrowed(canonical.as_str()),
            None => Cow::Borrowed(label),
        }
    }

    pub fn normalize_owned(&self, label: String) -> String {
        match self.entries.get(&label) {
            Some(canonical) => canonical.clone(),
            None => label,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
