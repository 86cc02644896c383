//! cotrack core library.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod catalog;
mod error;
mod forest;
mod graph;
mod pipeline;
mod playlist;
mod popularity;
mod significance;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{EmptyCorpusPolicy, ExecutionStrategy, PipelineBuilder},
    catalog::{NameNormalization, TrackCatalog, TrackId},
    error::{CotrackError, CotrackErrorCode, PlaylistSourceError, PlaylistSourceErrorCode, Result},
    forest::{MaximumSpanningForest, SpanningForest},
    graph::{CooccurrenceGraphBuilder, Edge, Graph},
    pipeline::{Pipeline, PipelineOutput, PipelineStats},
    playlist::{Playlist, PlaylistCorpus, PlaylistSource},
    popularity::{PopularityFilter, PopularityOutcome, occurrence_counts},
    significance::EdgeSignificanceFilter,
};
