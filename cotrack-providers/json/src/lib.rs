//! JSON playlist provider for Million Playlist Dataset style slices.
//!
//! Parses `{"playlists": [{"tracks": [{"track_name": ...}]}]}` documents into
//! an in-memory [`JsonPlaylistSource`] implementing
//! [`cotrack_core::PlaylistSource`].

mod errors;
mod source;

pub use errors::{JsonProviderError, JsonProviderErrorCode};
pub use source::JsonPlaylistSource;
