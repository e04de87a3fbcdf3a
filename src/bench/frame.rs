//! Column-major, owned data-frame representation.
//!
//! A `Frame` holds plain Rust vectors per column. Handing one to a serializer means
//! converting it to an Arrow `RecordBatch` first, and reading one back means converting
//! the decoded batch out of Arrow. Those conversions are part of what the data-frame
//! benchmark cases measure. Both directions run column-parallel on the current rayon pool.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int32Array, Int64Array, NullArray,
    StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Int32Type, Int64Type, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use rayon::prelude::*;

use crate::BenchResult;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Boolean(Vec<Option<bool>>),
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    Utf8(Vec<Option<String>>),
    /// 64-bit temporal values kept as their physical integer, tagged with the logical type
    Temporal {
        values: Vec<Option<i64>>,
        data_type: DataType,
    },
    /// `Date32` and `Time32` values, same idea with a 32-bit physical integer
    Temporal32 {
        values: Vec<Option<i32>>,
        data_type: DataType,
    },
    /// All-null column of the given length
    Null(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub nullable: bool,
    pub data: ColumnData,
}

fn is_wide_temporal(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Timestamp(_, _) | DataType::Date64 | DataType::Time64(_) | DataType::Duration(_)
    )
}

fn is_narrow_temporal(data_type: &DataType) -> bool {
    matches!(data_type, DataType::Date32 | DataType::Time32(_))
}

fn strings(array: &ArrayRef) -> Vec<Option<String>> {
    array
        .as_string::<i32>()
        .iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

impl Column {
    /// Copy an Arrow array out into owned vectors.
    ///
    /// Narrow integers widen to `Int64`, floats to `Float64`, and any type without a
    /// native slot is carried as its string rendering.
    pub fn from_array(field: &Field, array: &ArrayRef) -> BenchResult<Self> {
        let data = match array.data_type() {
            DataType::Boolean => ColumnData::Boolean(array.as_boolean().iter().collect()),
            DataType::Int64 => ColumnData::Int64(array.as_primitive::<Int64Type>().iter().collect()),
            DataType::Float64 => {
                ColumnData::Float64(array.as_primitive::<Float64Type>().iter().collect())
            }
            DataType::Utf8 => ColumnData::Utf8(strings(array)),
            DataType::Null => ColumnData::Null(array.len()),
            dt if is_wide_temporal(dt) => {
                let ints = cast(array, &DataType::Int64)?;
                ColumnData::Temporal {
                    values: ints.as_primitive::<Int64Type>().iter().collect(),
                    data_type: dt.clone(),
                }
            }
            dt if is_narrow_temporal(dt) => {
                let ints = cast(array, &DataType::Int32)?;
                ColumnData::Temporal32 {
                    values: ints.as_primitive::<Int32Type>().iter().collect(),
                    data_type: dt.clone(),
                }
            }
            dt if dt.is_integer() => {
                let ints = cast(array, &DataType::Int64)?;
                ColumnData::Int64(ints.as_primitive::<Int64Type>().iter().collect())
            }
            dt if dt.is_floating() => {
                let floats = cast(array, &DataType::Float64)?;
                ColumnData::Float64(floats.as_primitive::<Float64Type>().iter().collect())
            }
            _ => ColumnData::Utf8(strings(&cast(array, &DataType::Utf8)?)),
        };
        Ok(Column {
            name: field.name().clone(),
            nullable: field.is_nullable() || array.null_count() > 0,
            data,
        })
    }

    pub fn to_array(&self) -> BenchResult<ArrayRef> {
        let array: ArrayRef = match &self.data {
            ColumnData::Boolean(v) => Arc::new(v.iter().collect::<BooleanArray>()),
            ColumnData::Int64(v) => Arc::new(v.iter().collect::<Int64Array>()),
            ColumnData::Float64(v) => Arc::new(v.iter().collect::<Float64Array>()),
            ColumnData::Utf8(v) => Arc::new(v.iter().map(|s| s.as_deref()).collect::<StringArray>()),
            ColumnData::Temporal { values, data_type } => {
                let ints: ArrayRef = Arc::new(values.iter().collect::<Int64Array>());
                cast(&ints, data_type)?
            }
            ColumnData::Temporal32 { values, data_type } => {
                let ints: ArrayRef = Arc::new(values.iter().collect::<Int32Array>());
                cast(&ints, data_type)?
            }
            ColumnData::Null(n) => Arc::new(NullArray::new(*n)),
        };
        Ok(array)
    }

    pub fn data_type(&self) -> DataType {
        match &self.data {
            ColumnData::Boolean(_) => DataType::Boolean,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float64(_) => DataType::Float64,
            ColumnData::Utf8(_) => DataType::Utf8,
            ColumnData::Temporal { data_type, .. } | ColumnData::Temporal32 { data_type, .. } => {
                data_type.clone()
            }
            ColumnData::Null(_) => DataType::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Frame {
    pub fn from_batch(batch: &RecordBatch) -> BenchResult<Self> {
        let schema = batch.schema();
        let pairs: Vec<(&Arc<Field>, &ArrayRef)> =
            schema.fields().iter().zip(batch.columns()).collect();
        let columns = pairs
            .into_par_iter()
            .map(|(field, array)| Column::from_array(field, array))
            .collect::<BenchResult<Vec<Column>>>()?;
        Ok(Frame {
            columns,
            num_rows: batch.num_rows(),
        })
    }

    pub fn to_batch(&self) -> BenchResult<RecordBatch> {
        let arrays = self
            .columns
            .par_iter()
            .map(Column::to_array)
            .collect::<BenchResult<Vec<ArrayRef>>>()?;
        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|c| Field::new(c.name.clone(), c.data_type(), c.nullable))
            .collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows));
        let batch = RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), arrays, &options)?;
        Ok(batch)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
