//! Tabular exporters for co-occurrence graphs and spanning forests.
//!
//! Graphs and forests are flattened into [`NodeRow`] and [`EdgeRow`] tables
//! and written either as CSV or as Parquet files built from Arrow record
//! batches.

mod csv;
mod errors;
mod export;
mod parquet_table;
mod rows;

pub use crate::{
    csv::{write_edges_csv, write_nodes_csv},
    errors::{TabularExportError, TabularExportErrorCode},
    export::{ExportedTables, TableFormat, export_tables},
    parquet_table::{edge_batch, node_batch, write_edges_parquet, write_nodes_parquet},
    rows::{EdgeRow, NodeRow, edge_rows, forest_rows, node_rows},
};
