//! Writes the node, edge and forest tables of one run to a directory.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use cotrack_core::{Graph, SpanningForest};
use tracing::{info, instrument};

use crate::{
    csv::{write_edges_csv, write_nodes_csv},
    errors::TabularExportError,
    parquet_table::{write_edges_parquet, write_nodes_parquet},
    rows::{EdgeRow, edge_rows, forest_rows, node_rows},
};

/// On-disk encoding of exported tables.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TableFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl TableFormat {
    /// File extension used for tables in this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// Paths of the tables written by [`export_tables`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportedTables {
    nodes: PathBuf,
    edges: PathBuf,
    forest: PathBuf,
}

impl ExportedTables {
    /// Path of the node table.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &Path { &self.nodes }

    /// Path of the filtered edge table.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &Path { &self.edges }

    /// Path of the forest edge table.
    #[must_use]
    #[rustfmt::skip]
    pub fn forest(&self) -> &Path { &self.forest }
}

/// Writes `nodes.<ext>`, `edges.<ext>` and `forest.<ext>` into `out_dir`.
///
/// The directory is created when missing and existing tables are replaced.
///
/// # Errors
/// Returns [`TabularExportError::Io`] when the directory or a file cannot be
/// written, and the Arrow or Parquet variants when encoding fails.
///
/// # Examples
/// ```
/// use cotrack_core::{PipelineBuilder, PlaylistCorpus};
/// use cotrack_providers_tabular::{TableFormat, export_tables};
///
/// let corpus = PlaylistCorpus::from_names("demo", &[&["a", "b"], &["b", "c"]]);
/// let output = PipelineBuilder::new().build()?.run(&corpus)?;
/// let dir = std::env::temp_dir().join("cotrack-export-doc");
/// let tables = export_tables(&dir, TableFormat::Csv, output.graph(), output.forest())?;
/// assert!(tables.nodes().ends_with("nodes.csv"));
/// # std::fs::remove_dir_all(&dir)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "tabular.export",
    err,
    skip(out_dir, graph, forest),
    fields(out_dir = %out_dir.as_ref().display(), format = ?format),
)]
pub fn export_tables(
    out_dir: impl AsRef<Path>,
    format: TableFormat,
    graph: &Graph,
    forest: &SpanningForest,
) -> Result<ExportedTables, TabularExportError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;
    let path = |stem: &str| out_dir.join(format!("{stem}.{}", format.extension()));
    let tables = ExportedTables {
        nodes: path("nodes"),
        edges: path("edges"),
        forest: path("forest"),
    };

    let nodes = node_rows(graph);
    let file = BufWriter::new(File::create(&tables.nodes)?);
    match format {
        TableFormat::Csv => write_nodes_csv(file, &nodes)?,
        TableFormat::Parquet => write_nodes_parquet(file, &nodes)?,
    }
    write_edge_table(&tables.edges, format, &edge_rows(graph))?;
    write_edge_table(&tables.forest, format, &forest_rows(forest))?;

    info!(
        nodes = nodes.len(),
        edges = graph.edges().len(),
        forest_edges = forest.edges().len(),
        "exported tables"
    );
    Ok(tables)
}

fn write_edge_table(
    path: &Path,
    format: TableFormat,
    rows: &[EdgeRow],
) -> Result<(), TabularExportError> {
    let file = BufWriter::new(File::create(path)?);
    match format {
        TableFormat::Csv => write_edges_csv(file, rows),
        TableFormat::Parquet => write_edges_parquet(file, rows),
    }
}
