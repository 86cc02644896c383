//! Track identity registration.
//!
//! The catalog hands out dense [`TrackId`]s in first-encounter order so the
//! graph and forest stages can work on integers instead of names, and so the
//! exporter can translate identifiers back into labels.

use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use crate::{Result, error::CotrackError};

/// Dense identifier for a registered track.
///
/// # Examples
/// ```
/// use cotrack_core::TrackId;
///
/// let id = TrackId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TrackId(u32);

impl TrackId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u32 { self.0 }

    /// Returns the identifier as a slice index.
    #[must_use]
    #[rustfmt::skip]
    pub const fn index(self) -> usize { self.0 as usize }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How track names are canonicalized before they are compared.
///
/// Identity is always exact string equality of the normalized name; no fuzzy
/// matching is attempted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NameNormalization {
    /// Compare names byte for byte.
    #[default]
    Exact,
    /// Strip leading and trailing whitespace.
    Trim,
    /// Strip surrounding whitespace and fold to lowercase.
    TrimLowercase,
}

impl NameNormalization {
    /// Applies the normalization to `name`.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::NameNormalization;
    ///
    /// assert_eq!(NameNormalization::Exact.apply(" Hey Jude "), " Hey Jude ");
    /// assert_eq!(NameNormalization::Trim.apply(" Hey Jude "), "Hey Jude");
    /// assert_eq!(NameNormalization::TrimLowercase.apply(" Hey Jude "), "hey jude");
    /// ```
    #[must_use]
    pub fn apply(self, name: &str) -> Cow<'_, str> {
        match self {
            Self::Exact => Cow::Borrowed(name),
            Self::Trim => Cow::Borrowed(name.trim()),
            Self::TrimLowercase => {
                let trimmed = name.trim();
                if trimmed.chars().any(char::is_uppercase) {
                    Cow::Owned(trimmed.to_lowercase())
                } else {
                    Cow::Borrowed(trimmed)
                }
            }
        }
    }
}

/// Bidirectional mapping between track names and [`TrackId`]s.
///
/// # Examples
/// ```
/// use cotrack_core::TrackCatalog;
///
/// let mut catalog = TrackCatalog::new();
/// let a = catalog.register("Africa")?;
/// let b = catalog.register("Hold the Line")?;
/// assert_eq!(catalog.register("Africa")?, a);
/// assert_ne!(a, b);
/// assert_eq!(catalog.name(b), Some("Hold the Line"));
/// assert_eq!(catalog.len(), 2);
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackCatalog {
    names: Vec<Arc<str>>,
    ids: HashMap<Arc<str>, TrackId>,
}

impl TrackCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier for `name`, registering it when unseen.
    ///
    /// # Errors
    /// Returns [`CotrackError::CatalogOverflow`] when every `u32` identifier
    /// has already been handed out.
    pub fn register(&mut self, name: &str) -> Result<TrackId> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        let id = next_id(self.names.len())?;
        let shared: Arc<str> = Arc::from(name);
        self.names.push(Arc::clone(&shared));
        self.ids.insert(shared, id);
        Ok(id)
    }

    /// Looks up an already registered name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<TrackId> {
        self.ids.get(name).copied()
    }

    /// Returns the name registered for `id`.
    #[must_use]
    pub fn name(&self, id: TrackId) -> Option<&str> {
        self.names.get(id.index()).map(AsRef::as_ref)
    }

    /// Returns `true` when `id` was handed out by this catalog.
    #[must_use]
    pub fn contains(&self, id: TrackId) -> bool {
        id.index() < self.names.len()
    }

    /// Number of registered tracks.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.names.len() }

    /// Returns `true` when no track has been registered.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// Iterates over `(id, name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &str)> + '_ {
        self.names
            .iter()
            .zip(0_u32..)
            .map(|(name, raw)| (TrackId(raw), name.as_ref()))
    }
}

fn next_id(registered: usize) -> Result<TrackId> {
    u32::try_from(registered)
        .map(TrackId)
        .map_err(|_| CotrackError::CatalogOverflow { registered })
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    fn registration_assigns_ids_in_first_encounter_order() {
        let mut catalog = TrackCatalog::new();
        let ids: Vec<u32> = ["b", "a", "b", "c", "a"]
            .into_iter()
            .map(|name| catalog.register(name).expect("catalog has room").get())
            .collect();
        assert_eq!(ids, vec![0, 1, 0, 2, 1]);
        let names: Vec<&str> = catalog.iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[rstest]
    fn iter_pairs_each_id_with_its_name() {
        let mut catalog = TrackCatalog::new();
        for name in ["Creep", "Karma Police", "Creep", "Airbag"] {
            catalog.register(name).expect("catalog has room");
        }
        let pairs: Vec<(u32, &str)> = catalog.iter().map(|(id, name)| (id.get(), name)).collect();
        assert_eq!(pairs, vec![(0, "Creep"), (1, "Karma Police"), (2, "Airbag")]);
        assert!(catalog.iter().all(|(id, name)| catalog.name(id) == Some(name)));
    }

    #[rstest]
    fn next_id_accepts_the_last_u32() {
        assert_eq!(next_id(0), Ok(TrackId::new(0)));
        let last = usize::try_from(u32::MAX).expect("u32 fits in usize");
        assert_eq!(next_id(last), Ok(TrackId::new(u32::MAX)));
    }

    #[cfg(target_pointer_width = "64")]
    #[rstest]
    fn next_id_reports_exhausted_catalog() {
        let registered = usize::try_from(u32::MAX).expect("u32 fits in usize") + 1;
        let err = next_id(registered).expect_err("identifier space is exhausted");
        assert_eq!(err, CotrackError::CatalogOverflow { registered });
        assert_eq!(err.code().as_str(), "COTRACK_CATALOG_OVERFLOW");
    }

    #[rstest]
    fn identity_is_exact_string_equality() {
        let mut catalog = TrackCatalog::new();
        let upper = catalog.register("Roxanne").expect("catalog has room");
        let lower = catalog.register("roxanne").expect("catalog has room");
        assert_ne!(upper, lower);
        assert_eq!(catalog.lookup("Roxanne"), Some(upper));
        assert_eq!(catalog.lookup("ROXANNE"), None);
    }

    #[rstest]
    fn unknown_ids_have_no_name() {
        let mut catalog = TrackCatalog::new();
        let id = catalog.register("Creep").expect("catalog has room");
        assert!(catalog.contains(id));
        assert!(!catalog.contains(TrackId::new(1)));
        assert_eq!(catalog.name(TrackId::new(1)), None);
    }

    #[rstest]
    #[case::exact(NameNormalization::Exact, "  Yesterday ", "  Yesterday ")]
    #[case::trim(NameNormalization::Trim, "  Yesterday ", "Yesterday")]
    #[case::trim_lowercase(NameNormalization::TrimLowercase, "  YesterDay ", "yesterday")]
    #[case::already_lowercase(NameNormalization::TrimLowercase, "yesterday", "yesterday")]
    fn normalization_canonicalizes_names(
        #[case] normalization: NameNormalization,
        #[case] raw: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(normalization.apply(raw), expected);
    }
}
