//! Parquet writers built on Arrow record batches.

use std::{io::Write, sync::Arc};

use arrow_array::{ArrayRef, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{ArrowError, DataType, Field, Schema};
use parquet::arrow::ArrowWriter;

use crate::{
    errors::TabularExportError,
    rows::{EdgeRow, NodeRow},
};

fn node_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::UInt32, false),
        Field::new("label", DataType::Utf8, false),
    ])
}

fn edge_schema() -> Schema {
    Schema::new(vec![
        Field::new("source", DataType::UInt32, false),
        Field::new("target", DataType::UInt32, false),
        Field::new("weight", DataType::UInt32, false),
        Field::new("label", DataType::Utf8, false),
    ])
}

/// Builds the `(id, label)` record batch for a node table.
///
/// # Errors
/// Returns an [`ArrowError`] when the columns do not match the schema.
pub fn node_batch(rows: &[NodeRow]) -> Result<RecordBatch, ArrowError> {
    let ids = UInt32Array::from_iter_values(rows.iter().map(|row| row.id));
    let labels = StringArray::from_iter_values(rows.iter().map(|row| row.label.as_str()));
    RecordBatch::try_new(
        Arc::new(node_schema()),
        vec![Arc::new(ids) as ArrayRef, Arc::new(labels)],
    )
}

/// Builds the `(source, target, weight, label)` record batch for an edge
/// table.
///
/// # Errors
/// Returns an [`ArrowError`] when the columns do not match the schema.
pub fn edge_batch(rows: &[EdgeRow]) -> Result<RecordBatch, ArrowError> {
    let column = |value: fn(&EdgeRow) -> u32| {
        Arc::new(UInt32Array::from_iter_values(rows.iter().map(value))) as ArrayRef
    };
    let labels = StringArray::from_iter_values(rows.iter().map(|row| row.label.as_str()));
    RecordBatch::try_new(
        Arc::new(edge_schema()),
        vec![
            column(|row| row.source),
            column(|row| row.target),
            column(|row| row.weight),
            Arc::new(labels),
        ],
    )
}

/// Writes a node table as a single-row-group Parquet file.
///
/// # Errors
/// Returns [`TabularExportError::Arrow`] or [`TabularExportError::Parquet`]
/// when encoding fails.
pub fn write_nodes_parquet<W: Write + Send>(
    writer: W,
    rows: &[NodeRow],
) -> Result<(), TabularExportError> {
    write_batch(writer, &node_batch(rows)?)
}

/// Writes an edge table as a single-row-group Parquet file.
///
/// # Errors
/// Returns [`TabularExportError::Arrow`] or [`TabularExportError::Parquet`]
/// when encoding fails.
pub fn write_edges_parquet<W: Write + Send>(
    writer: W,
    rows: &[EdgeRow],
) -> Result<(), TabularExportError> {
    write_batch(writer, &edge_batch(rows)?)
}

fn write_batch<W: Write + Send>(writer: W, batch: &RecordBatch) -> Result<(), TabularExportError> {
    let mut writer = ArrowWriter::try_new(writer, batch.schema(), None)?;
    writer.write(batch)?;
    // `into_inner` writes the footer; the sink may still buffer it.
    let mut sink = writer.into_inner()?;
    sink.flush()?;
    Ok(())
}
