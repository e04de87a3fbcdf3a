//! Loading delimited sources and moving tables through the benchmarked formats.

use std::fs::File;
use std::io::{BufReader, BufWriter, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format as CsvFormat;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::ipc::CompressionType;
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::{FileWriter, IpcWriteOptions};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use rayon::prelude::*;
use tracing::debug;

use super::cases::{Codec, Format, StorageCase};
use super::config::SourceSpec;
use crate::{BenchError, BenchResult};

/// Load a delimited text source into one `RecordBatch`.
///
/// Column types are inferred from the whole file. Sources without a header row get
/// columns named `f0..f{n-1}`.
pub fn load_source(dir: &Path, source: &SourceSpec) -> BenchResult<RecordBatch> {
    let path = dir.join(&source.path);
    let delimiter = source.delimiter()?;

    let mut file = File::open(&path)?;
    let format = CsvFormat::default()
        .with_header(source.header)
        .with_delimiter(delimiter);
    let (inferred, records) = format.infer_schema(&mut file, None)?;
    file.rewind()?;
    debug!(path = %path.display(), records, "inferred source schema");

    let schema: SchemaRef = if source.header {
        Arc::new(inferred)
    } else {
        let fields: Vec<Field> = inferred
            .fields()
            .iter()
            .enumerate()
            .map(|(i, f)| f.as_ref().clone().with_name(format!("f{i}")))
            .collect();
        Arc::new(Schema::new(fields))
    };

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(source.header)
        .with_delimiter(delimiter)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    Ok(concat_batches(&schema, &batches)?)
}

fn parquet_compression(codec: Codec) -> Compression {
    match codec {
        Codec::Uncompressed => Compression::UNCOMPRESSED,
        Codec::Snappy => Compression::SNAPPY,
        Codec::Lz4 => Compression::LZ4_RAW,
        Codec::Zstd => Compression::ZSTD(ZstdLevel::default()),
    }
}

fn ipc_compression(codec: Codec) -> BenchResult<Option<CompressionType>> {
    match codec {
        Codec::Uncompressed => Ok(None),
        Codec::Lz4 => Ok(Some(CompressionType::LZ4_FRAME)),
        Codec::Zstd => Ok(Some(CompressionType::ZSTD)),
        Codec::Snappy => Err(BenchError::Message(
            "feather does not support snappy compression".to_string(),
        )),
    }
}

/// Serialize `batch` to `path`, replacing whatever was there.
pub fn write_table(batch: &RecordBatch, path: &Path, storage: StorageCase) -> BenchResult<()> {
    match storage.format {
        Format::Parquet => {
            let props = WriterProperties::builder()
                .set_compression(parquet_compression(storage.codec))
                .build();
            let file = File::create(path)?;
            let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
            writer.write(batch)?;
            writer.close()?;
        }
        Format::Feather => {
            let options =
                IpcWriteOptions::default().try_with_compression(ipc_compression(storage.codec)?)?;
            let file = BufWriter::new(File::create(path)?);
            let mut writer = FileWriter::try_new_with_options(file, &batch.schema(), options)?;
            writer.write(batch)?;
            writer.finish()?;
        }
    }
    Ok(())
}

/// Deserialize the file at `path` into one `RecordBatch`.
///
/// Parquet row groups are decoded in parallel on the current rayon pool.
pub fn read_table(path: &Path, storage: StorageCase) -> BenchResult<RecordBatch> {
    match storage.format {
        Format::Parquet => read_parquet(path),
        Format::Feather => {
            let reader = FileReader::try_new(BufReader::new(File::open(path)?), None)?;
            let schema = reader.schema();
            let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
            Ok(concat_batches(&schema, &batches)?)
        }
    }
}

fn read_parquet(path: &Path) -> BenchResult<RecordBatch> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let schema = builder.schema().clone();
    let row_groups = builder.metadata().num_row_groups();

    if row_groups <= 1 {
        let batches = builder.build()?.collect::<Result<Vec<_>, ArrowError>>()?;
        return Ok(concat_batches(&schema, &batches)?);
    }

    let per_group = (0..row_groups)
        .into_par_iter()
        .map(|i| -> BenchResult<Vec<RecordBatch>> {
            let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?
                .with_row_groups(vec![i])
                .build()?;
            Ok(reader.collect::<Result<Vec<_>, ArrowError>>()?)
        })
        .collect::<BenchResult<Vec<_>>>()?;
    Ok(concat_batches(&schema, per_group.iter().flatten())?)
}
