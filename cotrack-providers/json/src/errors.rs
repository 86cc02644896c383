use std::io;

use cotrack_core::define_error_codes;
use thiserror::Error;

/// Errors raised while loading a JSON playlist document.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum JsonProviderError {
    /// The document could not be read.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// The document is not valid JSON or has the wrong shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    /// A required field was absent or null.
    #[error("{}missing required field `{field}`", location(*playlist, *pid, *track))]
    MissingField {
        /// Index of the offending playlist, when the defect is inside one.
        playlist: Option<usize>,
        /// `pid` of the offending playlist, when it declares one.
        pid: Option<u64>,
        /// Index of the offending track inside the playlist.
        track: Option<usize>,
        /// Name of the missing field.
        field: &'static str,
    },
}

define_error_codes! {
    /// Stable codes describing [`JsonProviderError`] variants.
    enum JsonProviderErrorCode for JsonProviderError {
        /// The document could not be read.
        Io => Io { .. } => "JSON_PROVIDER_IO",
        /// The document is not valid JSON or has the wrong shape.
        Json => Json { .. } => "JSON_PROVIDER_SYNTAX",
        /// A required field was absent or null.
        MissingField => MissingField { .. } => "JSON_PROVIDER_MISSING_FIELD",
    }
}

fn location(playlist: Option<usize>, pid: Option<u64>, track: Option<usize>) -> String {
    let mut out = String::new();
    if let Some(index) = playlist {
        out.push_str(&format!("playlist {index}"));
        if let Some(pid) = pid {
            out.push_str(&format!(" (pid {pid})"));
        }
        if let Some(position) = track {
            out.push_str(&format!(" track {position}"));
        }
        out.push_str(": ");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(None, None, None, "playlists", "missing required field `playlists`")]
    #[case(Some(3), None, None, "tracks", "playlist 3: missing required field `tracks`")]
    #[case(
        Some(0),
        Some(17),
        Some(2),
        "track_name",
        "playlist 0 (pid 17) track 2: missing required field `track_name`"
    )]
    fn missing_field_messages_locate_the_record(
        #[case] playlist: Option<usize>,
        #[case] pid: Option<u64>,
        #[case] track: Option<usize>,
        #[case] field: &'static str,
        #[case] expected: &str,
    ) {
        let err = JsonProviderError::MissingField {
            playlist,
            pid,
            track,
            field,
        };
        assert_eq!(err.to_string(), expected);
        assert_eq!(err.code().as_str(), "JSON_PROVIDER_MISSING_FIELD");
    }
}
