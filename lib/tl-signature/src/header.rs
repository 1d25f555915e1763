use indexmap::IndexMap;
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// Header name that keeps its casing but compares and hashes case-insensitively
#[derive(Clone, Copy, Eq)]
pub struct HeaderName<'a>(&'a str);

impl<'a> HeaderName<'a> {
    /// Wrap a header name as-is
    #[inline]
    #[must_use]
    pub const fn new(name: &'a str) -> Self {
        Self(name)
    }

    /// The name with the casing it was created with
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }
}

impl AsRef<str> for HeaderName<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl<'a> From<&'a str> for HeaderName<'a> {
    fn from(name: &'a str) -> Self {
        Self(name)
    }
}

impl fmt::Debug for HeaderName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for HeaderName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Hash for HeaderName<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        // Terminator, mirrors `impl Hash for str`
        state.write_u8(0xff);
    }
}

impl PartialEq for HeaderName<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

/// Insertion-ordered header map keyed by [`HeaderName`]
///
/// Re-inserting a name (in any casing) replaces the value only.
/// The first-seen casing and the original position are kept.
#[derive(Clone, Debug, Default)]
pub struct HeaderMap<'a> {
    inner: IndexMap<HeaderName<'a>, &'a [u8]>,
}

impl<'a> HeaderMap<'a> {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, returning the value it replaced
    pub fn insert(&mut self, name: &'a str, value: &'a [u8]) -> Option<&'a [u8]> {
        self.inner.insert(HeaderName(name), value)
    }

    /// Look a header value up by name, ignoring case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a [u8]> {
        self.inner.get(&HeaderName(name)).copied()
    }

    /// Whether a header with this name (ignoring case) is present
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(&HeaderName(name))
    }

    /// Number of distinct header names
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the map is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over the headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (HeaderName<'a>, &'a [u8])> + '_ {
        self.inner.iter().map(|(name, value)| (*name, *value))
    }

    /// Iterate over the header names in insertion order, with their first-seen casing
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.inner.keys().map(HeaderName::as_str)
    }

    /// Pick the headers listed in `names`, in that order, under the casing used in `names`
    ///
    /// Names that aren't present in the map are skipped.
    pub(crate) fn select<'n>(&self, names: &[&'n str]) -> Vec<(&'n str, &'a [u8])> {
        names
            .iter()
            .filter_map(|name| Some((*name, self.get(name)?)))
            .collect()
    }
}

impl<'a> Extend<(&'a str, &'a [u8])> for HeaderMap<'a> {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a [u8])> for HeaderMap<'a> {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (&'a str, &'a [u8])>,
    {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
