//! Playlist records and the source abstraction the pipeline reads from.

use crate::error::PlaylistSourceError;

/// An ordered list of track names.
///
/// Order is preserved for round-tripping but has no effect on the graph;
/// only membership matters.
///
/// # Examples
/// ```
/// use cotrack_core::Playlist;
///
/// let playlist = Playlist::new(vec!["Intro".into(), "Outro".into()]);
/// assert_eq!(playlist.len(), 2);
/// assert_eq!(playlist.tracks()[1], "Outro");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Playlist {
    tracks: Vec<String>,
}

impl Playlist {
    /// Creates a playlist from track names.
    #[must_use]
    pub const fn new(tracks: Vec<String>) -> Self {
        Self { tracks }
    }

    /// Returns the track names in playlist order.
    #[must_use]
    #[rustfmt::skip]
    pub fn tracks(&self) -> &[String] { &self.tracks }

    /// Number of entries, counting repeats.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.tracks.len() }

    /// Returns `true` when the playlist has no entries.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.tracks.is_empty() }
}

impl<S: Into<String>> FromIterator<S> for Playlist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Abstraction over a collection of playlists.
///
/// # Examples
/// ```
/// use cotrack_core::{Playlist, PlaylistSource, PlaylistSourceError};
///
/// struct Single(Playlist);
///
/// impl PlaylistSource for Single {
///     fn len(&self) -> usize { 1 }
///     fn name(&self) -> &str { "single" }
///     fn playlist(&self, index: usize) -> Result<&Playlist, PlaylistSourceError> {
///         if index == 0 {
///             Ok(&self.0)
///         } else {
///             Err(PlaylistSourceError::OutOfBounds { index })
///         }
///     }
/// }
///
/// let source = Single(Playlist::from_iter(["a", "b"]));
/// assert_eq!(source.len(), 1);
/// assert!(!source.is_empty());
/// assert_eq!(source.playlist(0)?.len(), 2);
/// # Ok::<(), PlaylistSourceError>(())
/// ```
pub trait PlaylistSource {
    /// Returns number of playlists in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no playlists.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the playlist stored at `index`.
    ///
    /// # Errors
    /// Implementations must return [`PlaylistSourceError::OutOfBounds`] for
    /// invalid indices and [`PlaylistSourceError::Malformed`] when a record
    /// cannot be turned into a playlist.
    fn playlist(&self, index: usize) -> Result<&Playlist, PlaylistSourceError>;
}

/// In-memory playlist collection.
///
/// # Examples
/// ```
/// use cotrack_core::{PlaylistCorpus, PlaylistSource};
///
/// let corpus = PlaylistCorpus::from_names("demo", &[&["a", "b"], &["c"]]);
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.name(), "demo");
/// assert_eq!(corpus.track_entries(), 3);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlaylistCorpus {
    name: String,
    playlists: Vec<Playlist>,
}

impl PlaylistCorpus {
    /// Creates a named corpus.
    #[must_use]
    pub fn new(name: impl Into<String>, playlists: Vec<Playlist>) -> Self {
        Self {
            name: name.into(),
            playlists,
        }
    }

    /// Builds a corpus from nested name slices, mostly useful in tests and docs.
    #[must_use]
    pub fn from_names(name: impl Into<String>, playlists: &[&[&str]]) -> Self {
        Self::new(
            name,
            playlists
                .iter()
                .map(|tracks| tracks.iter().copied().collect())
                .collect(),
        )
    }

    /// Returns the playlists in source order.
    #[must_use]
    #[rustfmt::skip]
    pub fn playlists(&self) -> &[Playlist] { &self.playlists }

    /// Consumes the corpus and returns its playlists.
    #[must_use]
    pub fn into_playlists(self) -> Vec<Playlist> {
        self.playlists
    }

    /// Total number of track entries across all playlists.
    #[must_use]
    pub fn track_entries(&self) -> usize {
        self.playlists.iter().map(Playlist::len).sum()
    }
}

impl PlaylistSource for PlaylistCorpus {
    fn len(&self) -> usize {
        self.playlists.len()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn playlist(&self, index: usize) -> Result<&Playlist, PlaylistSourceError> {
        self.playlists
            .get(index)
            .ok_or(PlaylistSourceError::OutOfBounds { index })
    }
}
