//! Benchmark parameter types.

use std::fmt;

/// Parameters describing the corpus fed to one benchmark run.
#[derive(Clone, Debug)]
pub struct CorpusBenchParams {
    /// Number of playlists in the corpus.
    pub playlist_count: usize,
    /// Number of distinct tracks the generator draws from.
    pub catalog_size: usize,
}

impl fmt::Display for CorpusBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p={},t={}", self.playlist_count, self.catalog_size)
    }
}

/// Parameters for a filtered end-to-end pipeline run.
#[derive(Clone, Debug)]
pub struct PipelineBenchParams {
    /// Number of playlists in the corpus.
    pub playlist_count: usize,
    /// Popularity threshold applied before graph construction.
    pub min_track_occurrences: i64,
    /// Significance threshold applied to edges.
    pub min_edge_weight: i64,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p={},occ={},w={}",
            self.playlist_count, self.min_track_occurrences, self.min_edge_weight,
        )
    }
}
