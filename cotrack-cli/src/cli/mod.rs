//! Command-line interface orchestration for cotrack.
//!
//! The `run` command loads a JSON playlist slice, runs the co-occurrence
//! pipeline and optionally exports the node, edge and forest tables.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, NormalizeArg, RunCommand, StrategyArg,
    TableFormatArg, render_summary, run_cli,
};
