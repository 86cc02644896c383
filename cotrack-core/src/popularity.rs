//! Corpus-wide popularity filtering of tracks.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
    Result,
    error::CotrackError,
    playlist::Playlist,
};

/// Drops track entries whose corpus-wide occurrence count is below a
/// threshold.
///
/// Counts are taken once over the unfiltered corpus; removing a track from
/// one playlist never lowers the count used for any other playlist. Every
/// entry counts, so a track listed twice in one playlist contributes two
/// occurrences.
///
/// # Examples
/// ```
/// use cotrack_core::{Playlist, PopularityFilter};
///
/// let playlists = vec![
///     Playlist::from_iter(["a", "b"]),
///     Playlist::from_iter(["a", "c"]),
/// ];
/// let filter = PopularityFilter::new(2)?;
/// let filtered = filter.apply(&playlists);
/// assert_eq!(filtered.playlists[0].tracks(), ["a"]);
/// assert_eq!(filtered.playlists[1].tracks(), ["a"]);
/// assert_eq!(filtered.removed_entries, 2);
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PopularityFilter {
    min_occurrences: u64,
}

/// Output of [`PopularityFilter::apply`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PopularityOutcome {
    /// Filtered playlists, one per input playlist and in input order.
    pub playlists: Vec<Playlist>,
    /// Distinct track names seen before filtering.
    pub distinct_before: usize,
    /// Distinct track names that survived.
    pub distinct_after: usize,
    /// Number of track entries removed.
    pub removed_entries: usize,
    /// Playlists that were non-empty before filtering and empty afterwards.
    pub emptied_playlists: usize,
}

impl PopularityFilter {
    /// Creates a filter keeping tracks with at least `min_occurrences`
    /// occurrences.
    ///
    /// # Errors
    /// Returns [`CotrackError::InvalidArgument`] when `min_occurrences` is
    /// negative.
    pub fn new(min_occurrences: i64) -> Result<Self> {
        let min_occurrences =
            u64::try_from(min_occurrences).map_err(|_| CotrackError::InvalidArgument {
                parameter: "min_track_occurrences",
                got: min_occurrences,
            })?;
        Ok(Self { min_occurrences })
    }

    /// Returns the configured threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_occurrences(&self) -> u64 { self.min_occurrences }

    /// Applies the filter, returning a fresh collection.
    #[must_use]
    #[instrument(
        name = "core.popularity_filter",
        skip(self, playlists),
        fields(playlists = playlists.len(), min_occurrences = self.min_occurrences),
    )]
    pub fn apply(&self, playlists: &[Playlist]) -> PopularityOutcome {
        let counts = occurrence_counts(playlists);
        let distinct_before = counts.len();
        let keep = |name: &str| counts.get(name).copied().unwrap_or(0) >= self.min_occurrences;

        let mut removed_entries = 0_usize;
        let mut emptied_playlists = 0_usize;
        let filtered: Vec<Playlist> = playlists
            .iter()
            .map(|playlist| {
                let retained: Vec<String> = playlist
                    .tracks()
                    .iter()
                    .filter(|name| keep(name))
                    .cloned()
                    .collect();
                removed_entries += playlist.len() - retained.len();
                if retained.is_empty() && !playlist.is_empty() {
                    emptied_playlists += 1;
                }
                Playlist::new(retained)
            })
            .collect();

        let distinct_after = counts
            .values()
            .filter(|&&count| count >= self.min_occurrences)
            .count();
        debug!(
            distinct_before,
            distinct_after, removed_entries, emptied_playlists, "popularity filter applied"
        );

        PopularityOutcome {
            playlists: filtered,
            distinct_before,
            distinct_after,
            removed_entries,
            emptied_playlists,
        }
    }
}

/// Counts every track entry across `playlists`.
#[must_use]
pub fn occurrence_counts(playlists: &[Playlist]) -> HashMap<&str, u64> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for name in playlists.iter().flat_map(Playlist::tracks) {
        *counts.entry(name.as_str()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};

    #[fixture]
    fn playlists() -> Vec<Playlist> {
        vec![
            Playlist::from_iter(["a", "b", "c"]),
            Playlist::from_iter(["a", "b"]),
            Playlist::from_iter(["a", "d"]),
            Playlist::from_iter(["d"]),
        ]
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn low_thresholds_are_no_ops(playlists: Vec<Playlist>, #[case] threshold: i64) {
        let filter = PopularityFilter::new(threshold).expect("threshold is valid");
        let outcome = filter.apply(&playlists);
        assert_eq!(outcome.playlists, playlists);
        assert_eq!(outcome.removed_entries, 0);
        assert_eq!(outcome.distinct_before, outcome.distinct_after);
    }

    #[rstest]
    fn rejects_negative_threshold() {
        let err = PopularityFilter::new(-1).expect_err("negative threshold must fail");
        assert_eq!(
            err,
            CotrackError::InvalidArgument {
                parameter: "min_track_occurrences",
                got: -1,
            }
        );
    }

    #[rstest]
    fn keeps_emptied_playlists(playlists: Vec<Playlist>) {
        let filter = PopularityFilter::new(3).expect("threshold is valid");
        let outcome = filter.apply(&playlists);
        assert_eq!(outcome.playlists.len(), playlists.len());
        assert_eq!(outcome.playlists[0].tracks(), ["a"]);
        assert_eq!(outcome.playlists[2].tracks(), ["a"]);
        assert!(outcome.playlists[3].is_empty());
        assert_eq!(outcome.emptied_playlists, 1);
        assert_eq!(outcome.distinct_after, 1);
    }

    #[rstest]
    fn counts_do_not_cascade() {
        // "b" reaches the threshold only through its first playlist entry, so
        // removing "c" from that playlist must not affect it.
        let playlists = vec![
            Playlist::from_iter(["b", "c"]),
            Playlist::from_iter(["b"]),
        ];
        let outcome = PopularityFilter::new(2)
            .expect("threshold is valid")
            .apply(&playlists);
        assert_eq!(outcome.playlists[0].tracks(), ["b"]);
        assert_eq!(outcome.playlists[1].tracks(), ["b"]);
    }

    #[rstest]
    fn adjacent_unpopular_entries_are_all_removed() {
        let playlists = vec![
            Playlist::from_iter(["x", "y", "a", "z"]),
            Playlist::from_iter(["a"]),
        ];
        let outcome = PopularityFilter::new(2)
            .expect("threshold is valid")
            .apply(&playlists);
        assert_eq!(outcome.playlists[0].tracks(), ["a"]);
        assert_eq!(outcome.removed_entries, 3);
    }

    #[rstest]
    fn repeated_entries_count_separately() {
        let playlists = vec![Playlist::from_iter(["loop", "loop"]), Playlist::from_iter(["once"])];
        let counts = occurrence_counts(&playlists);
        assert_eq!(counts.get("loop"), Some(&2));
        let outcome = PopularityFilter::new(2)
            .expect("threshold is valid")
            .apply(&playlists);
        assert_eq!(outcome.playlists[0].tracks(), ["loop", "loop"]);
        assert!(outcome.playlists[1].is_empty());
    }
}
