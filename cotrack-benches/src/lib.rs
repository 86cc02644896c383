//! Benchmark support crate for cotrack.
//!
//! Provides a synthetic playlist corpus and parameter types used by the
//! Criterion benchmarks for graph construction, forest extraction and the
//! end-to-end pipeline.

pub mod error;
pub mod params;
pub mod source;
