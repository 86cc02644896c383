//! Synthetic playlist corpora for benchmarks.
//!
//! Track popularity is skewed towards low catalog indices, mimicking the
//! long-tail distribution of real playlist data: a handful of tracks appear
//! in most playlists while the majority appear once or twice.

use cotrack_core::{Playlist, PlaylistCorpus};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors raised by [`generate_corpus`].
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum SyntheticError {
    /// The requested playlist count was zero.
    #[error("playlist count must be greater than zero")]
    ZeroPlaylists,
    /// The requested catalog size was zero.
    #[error("catalog size must be greater than zero")]
    ZeroCatalog,
    /// The requested playlist length range was invalid.
    #[error("invalid playlist length range: min={min_length}, max={max_length}")]
    InvalidLengthRange {
        /// Minimum configured playlist length.
        min_length: usize,
        /// Maximum configured playlist length.
        max_length: usize,
    },
}

/// Shape of a generated corpus.
#[derive(Clone, Debug)]
pub struct SyntheticCorpusConfig {
    /// Number of playlists to generate.
    pub playlist_count: usize,
    /// Number of distinct track names available.
    pub catalog_size: usize,
    /// Shortest playlist length, inclusive.
    pub min_length: usize,
    /// Longest playlist length, inclusive.
    pub max_length: usize,
    /// Seed for the deterministic generator.
    pub seed: u64,
}

impl SyntheticCorpusConfig {
    /// Creates a configuration with playlists of 5 to 40 tracks.
    #[must_use]
    pub const fn new(playlist_count: usize, catalog_size: usize, seed: u64) -> Self {
        Self {
            playlist_count,
            catalog_size,
            min_length: 5,
            max_length: 40,
            seed,
        }
    }

    fn validate(&self) -> Result<(), SyntheticError> {
        if self.playlist_count == 0 {
            return Err(SyntheticError::ZeroPlaylists);
        }
        if self.catalog_size == 0 {
            return Err(SyntheticError::ZeroCatalog);
        }
        if self.min_length > self.max_length {
            return Err(SyntheticError::InvalidLengthRange {
                min_length: self.min_length,
                max_length: self.max_length,
            });
        }
        Ok(())
    }
}

/// Generates a deterministic corpus named `synthetic`.
///
/// Track names have the form `track-<index>`. Playlists may repeat a track.
///
/// # Errors
/// Returns [`SyntheticError`] when the configuration is degenerate.
///
/// # Examples
/// ```
/// use cotrack_benches::source::{SyntheticCorpusConfig, generate_corpus};
///
/// let corpus = generate_corpus(&SyntheticCorpusConfig::new(10, 50, 7))?;
/// assert_eq!(corpus.playlists().len(), 10);
/// # Ok::<(), cotrack_benches::source::SyntheticError>(())
/// ```
pub fn generate_corpus(config: &SyntheticCorpusConfig) -> Result<PlaylistCorpus, SyntheticError> {
    config.validate()?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let playlists = (0..config.playlist_count)
        .map(|_| {
            let length = rng.gen_range(config.min_length..=config.max_length);
            (0..length)
                .map(|_| format!("track-{}", skewed_index(&mut rng, config.catalog_size)))
                .collect::<Playlist>()
        })
        .collect();
    Ok(PlaylistCorpus::new("synthetic", playlists))
}

// Drawing a uniform bound and then a uniform index below it favours small
// indices with a roughly logarithmic falloff.
fn skewed_index(rng: &mut SmallRng, catalog_size: usize) -> usize {
    let bound = rng.gen_range(0..catalog_size);
    rng.gen_range(0..=bound)
}
