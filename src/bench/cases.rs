//! Declarative benchmark case table.
//!
//! A case is a (format, codec, representation) triple. The runner walks these
//! tables in declaration order; nothing here holds a closure.

use std::fmt;
use std::path::{Path, PathBuf};

use self::Representation::{ArrowTable, DataFrame};

/// On-disk container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Parquet row groups
    Parquet,
    /// Arrow IPC file ("feather V2")
    Feather,
}

/// Compression codec applied inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    Uncompressed,
    Snappy,
    Lz4,
    Zstd,
}

/// In-memory form handed to (or produced by) the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// A single Arrow `RecordBatch`
    ArrowTable,
    /// The owned column-major `Frame`
    DataFrame,
}

impl Representation {
    pub fn label(&self) -> &'static str {
        match self {
            Representation::ArrowTable => "arrow Table",
            Representation::DataFrame => "pandas",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A format/codec pair together with its report label and artifact suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageCase {
    pub format: Format,
    pub codec: Codec,
}

impl StorageCase {
    pub const PARQUET_UNC: StorageCase = StorageCase::new(Format::Parquet, Codec::Uncompressed);
    pub const PARQUET_SNAPPY: StorageCase = StorageCase::new(Format::Parquet, Codec::Snappy);
    pub const FEATHER_UNC: StorageCase = StorageCase::new(Format::Feather, Codec::Uncompressed);
    pub const FEATHER_LZ4: StorageCase = StorageCase::new(Format::Feather, Codec::Lz4);
    pub const FEATHER_ZSTD: StorageCase = StorageCase::new(Format::Feather, Codec::Zstd);

    pub const fn new(format: Format, codec: Codec) -> Self {
        StorageCase { format, codec }
    }

    pub fn label(&self) -> &'static str {
        match (self.format, self.codec) {
            (Format::Parquet, Codec::Uncompressed) => "parquet (UNC)",
            (Format::Parquet, Codec::Snappy) => "parquet (SNAPPY)",
            (Format::Parquet, Codec::Lz4) => "parquet (LZ4)",
            (Format::Parquet, Codec::Zstd) => "parquet (ZSTD)",
            (Format::Feather, Codec::Uncompressed) => "feather V2 (UNC)",
            (Format::Feather, Codec::Snappy) => "feather V2 (SNAPPY)",
            (Format::Feather, Codec::Lz4) => "feather V2 (LZ4)",
            (Format::Feather, Codec::Zstd) => "feather V2 (ZSTD)",
        }
    }

    /// File-name suffix appended to a dataset's base name.
    pub fn suffix(&self) -> String {
        let codec = match self.codec {
            Codec::Uncompressed => "uncompressed",
            Codec::Snappy => "snappy",
            Codec::Lz4 => "lz4",
            Codec::Zstd => "zstd",
        };
        let ext = match self.format {
            Format::Parquet => "parquet",
            Format::Feather => "feather",
        };
        format!("_{codec}.{ext}")
    }
}

/// One benchmarked combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BenchCase {
    pub storage: StorageCase,
    pub representation: Representation,
}

impl BenchCase {
    pub const fn new(storage: StorageCase, representation: Representation) -> Self {
        BenchCase {
            storage,
            representation,
        }
    }

    /// Artifact path for this case under `dir`.
    ///
    /// Table cases write `<base><suffix>`, which is the name the file-size census and
    /// the external harness use. Data-frame cases write `<base>_frame<suffix>` so each
    /// representation reads back the file it wrote.
    pub fn artifact_path(&self, dir: &Path, base: &str) -> PathBuf {
        let name = match self.representation {
            Representation::ArrowTable => format!("{base}{}", self.storage.suffix()),
            Representation::DataFrame => format!("{base}_frame{}", self.storage.suffix()),
        };
        dir.join(name)
    }
}

pub const WRITE_CASES: &[BenchCase] = &[
    BenchCase::new(StorageCase::PARQUET_UNC, ArrowTable),
    BenchCase::new(StorageCase::PARQUET_UNC, DataFrame),
    BenchCase::new(StorageCase::PARQUET_SNAPPY, ArrowTable),
    BenchCase::new(StorageCase::PARQUET_SNAPPY, DataFrame),
    BenchCase::new(StorageCase::FEATHER_UNC, DataFrame),
    BenchCase::new(StorageCase::FEATHER_UNC, ArrowTable),
    BenchCase::new(StorageCase::FEATHER_LZ4, DataFrame),
    BenchCase::new(StorageCase::FEATHER_LZ4, ArrowTable),
    BenchCase::new(StorageCase::FEATHER_ZSTD, DataFrame),
    BenchCase::new(StorageCase::FEATHER_ZSTD, ArrowTable),
];

pub const READ_CASES: &[BenchCase] = &[
    BenchCase::new(StorageCase::PARQUET_UNC, ArrowTable),
    BenchCase::new(StorageCase::PARQUET_UNC, DataFrame),
    BenchCase::new(StorageCase::PARQUET_SNAPPY, ArrowTable),
    BenchCase::new(StorageCase::PARQUET_SNAPPY, DataFrame),
    BenchCase::new(StorageCase::FEATHER_UNC, DataFrame),
    BenchCase::new(StorageCase::FEATHER_LZ4, DataFrame),
    BenchCase::new(StorageCase::FEATHER_ZSTD, DataFrame),
    BenchCase::new(StorageCase::FEATHER_UNC, ArrowTable),
    BenchCase::new(StorageCase::FEATHER_LZ4, ArrowTable),
    BenchCase::new(StorageCase::FEATHER_ZSTD, ArrowTable),
];
