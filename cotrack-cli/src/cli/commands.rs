//! Command implementations and argument parsing for the cotrack CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use cotrack_core::{
    CotrackError, EmptyCorpusPolicy, ExecutionStrategy, NameNormalization, PipelineBuilder,
    PipelineStats, PlaylistSource,
};
use cotrack_providers_json::{JsonPlaylistSource, JsonProviderError};
use cotrack_providers_tabular::{ExportedTables, TableFormat, TabularExportError, export_tables};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cotrack",
    about = "Build a track co-occurrence graph and its maximum spanning forest."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the pipeline over a JSON playlist slice.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a JSON document with a top-level `playlists` array.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// Minimum number of corpus-wide occurrences a track needs to be kept.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_track_occurrences: i64,

    /// Weight an edge must exceed to be kept.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub min_edge_weight: i64,

    /// Only consider the first N playlists of the document.
    #[arg(long)]
    pub playlist_limit: Option<usize>,

    /// Canonicalization applied to track names before comparison.
    #[arg(long, value_enum, default_value_t = NormalizeArg::Exact)]
    pub normalize: NormalizeArg,

    /// Execution strategy for graph construction and sorting.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Fail instead of warning when no track survives filtering.
    #[arg(long)]
    pub reject_empty: bool,

    /// Directory receiving the node, edge and forest tables.
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Encoding of the exported tables; only valid together with `--out-dir`.
    #[arg(
        long,
        value_enum,
        default_value_t = TableFormatArg::Csv,
        requires = "out_dir"
    )]
    pub format: TableFormatArg,
}

/// Track name canonicalization choices.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum NormalizeArg {
    /// Compare names byte for byte.
    Exact,
    /// Strip surrounding whitespace.
    Trim,
    /// Strip surrounding whitespace and fold to lowercase.
    TrimLowercase,
}

impl From<NormalizeArg> for NameNormalization {
    fn from(value: NormalizeArg) -> Self {
        match value {
            NormalizeArg::Exact => Self::Exact,
            NormalizeArg::Trim => Self::Trim,
            NormalizeArg::TrimLowercase => Self::TrimLowercase,
        }
    }
}

/// Execution strategy choices.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, sequential otherwise.
    Auto,
    /// Run on the calling thread.
    Sequential,
    /// Run on the Rayon thread pool.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Table encoding choices.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum TableFormatArg {
    /// Comma-separated values.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl From<TableFormatArg> for TableFormat {
    fn from(value: TableFormatArg) -> Self {
        match value {
            TableFormatArg::Csv => Self::Csv,
            TableFormatArg::Parquet => Self::Parquet,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// JSON ingestion failed.
    #[error(transparent)]
    Json(#[from] JsonProviderError),
    /// Writing the output tables failed.
    #[error(transparent)]
    Export(#[from] TabularExportError),
    /// Core orchestration failed.
    #[error(transparent)]
    Core(#[from] CotrackError),
}

impl CliError {
    /// Stable machine-readable code of the underlying error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Json(err) => err.code().as_str(),
            Self::Export(err) => err.code().as_str(),
            Self::Core(err) => err.code().as_str(),
        }
    }

    /// Code of the playlist source failure wrapped by a core error, if any.
    #[must_use]
    pub fn playlist_source_code(&self) -> Option<&'static str> {
        match self {
            Self::Core(err) => err.playlist_source_code().map(|code| code.as_str()),
            Self::Json(_) | Self::Export(_) => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source implementation.
    pub data_source: String,
    /// Counters gathered by the pipeline.
    pub stats: PipelineStats,
    /// Tables written to disk, when an output directory was given.
    pub exported: Option<ExportedTables>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, running or exporting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cotrack_cli::cli::Cli;
/// # use cotrack_cli::cli::run_cli;
/// # use clap::Parser;
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"playlists": [{"tracks": [{"track_name": "a"}, {"track_name": "b"}]}]}"#,
/// )?;
/// let path = file.path().to_string_lossy().into_owned();
/// let cli = Cli::try_parse_from(["cotrack", "run", path.as_str()])?;
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.stats.forest_edges, 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, override_name = field::Empty, format = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let RunCommand {
        path,
        name,
        min_track_occurrences,
        min_edge_weight,
        playlist_limit,
        normalize,
        strategy,
        reject_empty,
        out_dir,
        format,
    } = command;

    let policy = if reject_empty {
        EmptyCorpusPolicy::Reject
    } else {
        EmptyCorpusPolicy::Allow
    };
    let pipeline = PipelineBuilder::new()
        .with_min_track_occurrences(min_track_occurrences)
        .with_min_edge_weight(min_edge_weight)
        .with_playlist_limit(playlist_limit)
        .with_normalization(normalize.into())
        .with_execution_strategy(strategy.into())
        .with_empty_corpus_policy(policy)
        .build()?;

    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );

    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let source = JsonPlaylistSource::try_from_path(chosen_name, &path)?;
    let output = pipeline.run(&source)?;

    let exported = match out_dir {
        Some(dir) => {
            let table_format = TableFormat::from(format);
            span.record("format", field::display(table_format.extension()));
            Some(export_tables(
                dir,
                table_format,
                output.graph(),
                output.forest(),
            )?)
        }
        None => None,
    };

    let summary = ExecutionSummary {
        data_source: source.name().to_owned(),
        stats: *output.stats(),
        exported,
    };
    info!(
        data_source = summary.data_source.as_str(),
        tracks = summary.stats.tracks_after_filter,
        forest_edges = summary.stats.forest_edges,
        "command completed"
    );
    Ok(summary)
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cotrack_cli::cli::{ExecutionSummary, render_summary};
/// # use cotrack_core::PipelineStats;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     stats: PipelineStats { forest_edges: 2, components: 1, ..PipelineStats::default() },
///     exported: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("forest: 2 edges, 1 components"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let stats = &summary.stats;
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(
        writer,
        "playlists: {} read, {} emptied by filtering",
        stats.playlists_read, stats.playlists_emptied
    )?;
    writeln!(
        writer,
        "tracks: {} -> {}",
        stats.tracks_before_filter, stats.tracks_after_filter
    )?;
    writeln!(
        writer,
        "edges: {} -> {}",
        stats.edges_before_filter, stats.edges_after_filter
    )?;
    writeln!(
        writer,
        "forest: {} edges, {} components, total weight {}",
        stats.forest_edges, stats.components, stats.forest_weight
    )?;
    if let Some(tables) = &summary.exported {
        writeln!(writer, "nodes table: {}", tables.nodes().display())?;
        writeln!(writer, "edges table: {}", tables.edges().display())?;
        writeln!(writer, "forest table: {}", tables.forest().display())?;
    }
    Ok(())
}
