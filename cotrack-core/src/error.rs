//! Error types for the cotrack core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::sync::Arc;

use thiserror::Error;

use crate::{builder::ExecutionStrategy, catalog::TrackId};

/// Generates a stable error-code enum for an error type.
///
/// Used by every cotrack library crate so codes share one shape.
#[doc(hidden)]
#[macro_export]
macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl ::core::fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::PlaylistSource`] implementations.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PlaylistSourceError {
    /// Requested playlist index was outside the source's bounds.
    #[error("playlist index {index} is out of bounds")]
    OutOfBounds {
        /// The requested playlist index.
        index: usize,
    },
    /// The source could not produce a well-formed playlist record.
    #[error("playlist {index} is malformed: {reason}")]
    Malformed {
        /// Index of the offending playlist.
        index: usize,
        /// Human-readable description of the defect.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`PlaylistSourceError`] variants.
    enum PlaylistSourceErrorCode for PlaylistSourceError {
        /// Requested playlist index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "PLAYLIST_SOURCE_OUT_OF_BOUNDS",
        /// The source could not produce a well-formed playlist record.
        Malformed => Malformed { .. } => "PLAYLIST_SOURCE_MALFORMED",
    }
}

/// Error type produced when configuring or running a [`crate::Pipeline`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CotrackError {
    /// A threshold or other numeric parameter was out of range.
    #[error("`{parameter}` must be non-negative (got {got})")]
    InvalidArgument {
        /// Name of the rejected parameter.
        parameter: &'static str,
        /// The value supplied by the caller.
        got: i64,
    },
    /// A playlist or track record was missing required data.
    #[error("data source `{data_source}` playlist {playlist} position {position}: {reason}")]
    MalformedInput {
        /// Identifier for the data source holding the record.
        data_source: Arc<str>,
        /// Index of the offending playlist.
        playlist: usize,
        /// Position of the offending track inside the playlist.
        position: usize,
        /// Human-readable description of the defect.
        reason: Arc<str>,
    },
    /// An edge paired a track with itself.
    #[error("edge pairs track {track} with itself")]
    SelfLoopEdge {
        /// The track referenced by both endpoints.
        track: TrackId,
    },
    /// An edge referenced a track that is not part of the node set.
    #[error("edge references track {track}, but the graph has {node_count} nodes")]
    UnknownTrack {
        /// The unknown track identifier.
        track: TrackId,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge set contained two entries for the same unordered pair.
    #[error("edge set contains more than one edge between {source_track} and {target_track}")]
    DuplicateEdge {
        /// Smaller endpoint of the repeated pair.
        source_track: TrackId,
        /// Larger endpoint of the repeated pair.
        target_track: TrackId,
    },
    /// More distinct tracks were registered than `TrackId` can address.
    #[error("track catalog is full: {registered} tracks already registered")]
    CatalogOverflow {
        /// Number of tracks registered when the next one was rejected.
        registered: usize,
    },
    /// No playlists or no tracks survived filtering.
    #[error("data source `{data_source}` has no tracks left after filtering")]
    EmptyCorpus {
        /// Identifier for the empty data source.
        data_source: Arc<str>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// A [`crate::PlaylistSource`] operation failed while running the pipeline.
    #[error("data source `{data_source}` failed: {error}")]
    PlaylistSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying playlist source error.
        error: PlaylistSourceError,
    },
}

define_error_codes! {
    /// Stable codes describing [`CotrackError`] variants.
    enum CotrackErrorCode for CotrackError {
        /// A threshold or other numeric parameter was out of range.
        InvalidArgument => InvalidArgument { .. } => "COTRACK_INVALID_ARGUMENT",
        /// A playlist or track record was missing required data.
        MalformedInput => MalformedInput { .. } => "COTRACK_MALFORMED_INPUT",
        /// An edge paired a track with itself.
        SelfLoopEdge => SelfLoopEdge { .. } => "COTRACK_SELF_LOOP_EDGE",
        /// An edge referenced a track that is not part of the node set.
        UnknownTrack => UnknownTrack { .. } => "COTRACK_UNKNOWN_TRACK",
        /// An edge set contained two entries for the same unordered pair.
        DuplicateEdge => DuplicateEdge { .. } => "COTRACK_DUPLICATE_EDGE",
        /// More distinct tracks were registered than `TrackId` can address.
        CatalogOverflow => CatalogOverflow { .. } => "COTRACK_CATALOG_OVERFLOW",
        /// No playlists or no tracks survived filtering.
        EmptyCorpus => EmptyCorpus { .. } => "COTRACK_EMPTY_CORPUS",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "COTRACK_BACKEND_UNAVAILABLE",
        /// A [`crate::PlaylistSource`] operation failed while running the pipeline.
        PlaylistSourceFailure => PlaylistSource { .. } => "COTRACK_PLAYLIST_SOURCE_FAILURE",
    }
}

impl CotrackError {
    /// Retrieve the inner [`PlaylistSourceErrorCode`] when the error originated in a
    /// [`crate::PlaylistSource`].
    pub const fn playlist_source_code(&self) -> Option<PlaylistSourceErrorCode> {
        match self {
            Self::PlaylistSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CotrackError>;
