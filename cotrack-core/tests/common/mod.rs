use std::sync::Arc;

use cotrack_core::{Playlist, PlaylistSource, PlaylistSourceError};

/// Source that serves its playlists until `fail_at`, then reports a
/// malformed record.
#[derive(Clone)]
pub struct FlakySource {
    playlists: Vec<Playlist>,
    fail_at: usize,
}

impl FlakySource {
    #[must_use]
    pub fn new(playlists: Vec<Playlist>, fail_at: usize) -> Self {
        Self { playlists, fail_at }
    }
}

impl PlaylistSource for FlakySource {
    fn len(&self) -> usize {
        self.playlists.len()
    }

    fn name(&self) -> &str {
        "flaky"
    }

    fn playlist(&self, index: usize) -> Result<&Playlist, PlaylistSourceError> {
        if index >= self.fail_at {
            return Err(PlaylistSourceError::Malformed {
                index,
                reason: Arc::from("record truncated"),
            });
        }
        self.playlists
            .get(index)
            .ok_or(PlaylistSourceError::OutOfBounds { index })
    }
}

#[must_use]
pub fn playlists(raw: &[&[&str]]) -> Vec<Playlist> {
    raw.iter()
        .map(|tracks| tracks.iter().copied().collect())
        .collect()
}
