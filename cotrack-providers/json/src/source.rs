//! In-memory playlist source loaded from a JSON document.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use cotrack_core::{Playlist, PlaylistCorpus, PlaylistSource, PlaylistSourceError};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::JsonProviderError;

// Required fields are optional here so that a missing field is reported with
// the index of the record holding it instead of serde's line/column message.
#[derive(Deserialize)]
struct RawDocument {
    playlists: Option<Vec<RawPlaylist>>,
}

#[derive(Deserialize)]
struct RawPlaylist {
    name: Option<String>,
    pid: Option<u64>,
    tracks: Option<Vec<RawTrack>>,
}

#[derive(Deserialize)]
struct RawTrack {
    track_name: Option<String>,
}

/// Playlists parsed from a JSON document.
///
/// Unknown fields such as `artist_name` or `duration_ms` are ignored.
///
/// # Examples
/// ```
/// use cotrack_core::PlaylistSource;
/// use cotrack_providers_json::JsonPlaylistSource;
///
/// let json = r#"{"playlists": [
///     {"name": "road trip", "pid": 7, "tracks": [
///         {"track_name": "Africa", "artist_name": "Toto"},
///         {"track_name": "Rosanna"}
///     ]}
/// ]}"#;
/// let source = JsonPlaylistSource::try_from_reader("slice", json.as_bytes())?;
/// assert_eq!(source.len(), 1);
/// assert_eq!(source.title(0), Some("road trip"));
/// assert_eq!(source.pid(0), Some(7));
/// assert_eq!(source.playlist(0)?.tracks(), ["Africa", "Rosanna"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct JsonPlaylistSource {
    name: String,
    playlists: Vec<Playlist>,
    titles: Vec<Option<String>>,
    pids: Vec<Option<u64>>,
}

impl JsonPlaylistSource {
    /// Loads playlists from the JSON document at `path`.
    ///
    /// # Errors
    /// Returns [`JsonProviderError::Io`] when the file cannot be opened and
    /// the errors of [`JsonPlaylistSource::try_from_reader`] otherwise.
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, JsonProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, file)
    }

    /// Loads playlists from a reader yielding a JSON document.
    ///
    /// # Errors
    /// Returns [`JsonProviderError::Json`] for malformed JSON and
    /// [`JsonProviderError::MissingField`] when `playlists`, `tracks` or a
    /// `track_name` is absent or null.
    #[instrument(name = "json.load", err, skip(name, reader))]
    pub fn try_from_reader<R: Read>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, JsonProviderError> {
        let document: RawDocument = serde_json::from_reader(BufReader::new(reader))?;
        let raw = document.playlists.ok_or(JsonProviderError::MissingField {
            playlist: None,
            pid: None,
            track: None,
            field: "playlists",
        })?;

        let mut source = Self {
            name: name.into(),
            playlists: Vec::with_capacity(raw.len()),
            titles: Vec::with_capacity(raw.len()),
            pids: Vec::with_capacity(raw.len()),
        };
        for (index, playlist) in raw.into_iter().enumerate() {
            source.playlists.push(convert_tracks(index, &playlist)?);
            source.titles.push(playlist.name);
            source.pids.push(playlist.pid);
        }

        info!(
            data_source = %source.name,
            playlists = source.playlists.len(),
            "loaded JSON playlists"
        );
        Ok(source)
    }

    /// Returns the `name` declared by playlist `index`, if any.
    #[must_use]
    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index)?.as_deref()
    }

    /// Returns the `pid` declared by playlist `index`, if any.
    #[must_use]
    pub fn pid(&self, index: usize) -> Option<u64> {
        self.pids.get(index).copied().flatten()
    }

    /// Converts the source into a plain in-memory corpus.
    #[must_use]
    pub fn into_corpus(self) -> PlaylistCorpus {
        PlaylistCorpus::new(self.name, self.playlists)
    }
}

fn convert_tracks(index: usize, playlist: &RawPlaylist) -> Result<Playlist, JsonProviderError> {
    let missing = |track, field| JsonProviderError::MissingField {
        playlist: Some(index),
        pid: playlist.pid,
        track,
        field,
    };
    let tracks = playlist.tracks.as_ref().ok_or_else(|| missing(None, "tracks"))?;
    tracks
        .iter()
        .enumerate()
        .map(|(position, track)| {
            track
                .track_name
                .clone()
                .ok_or_else(|| missing(Some(position), "track_name"))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Playlist::new)
}

impl PlaylistSource for JsonPlaylistSource {
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
