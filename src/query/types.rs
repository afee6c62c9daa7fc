//! Parameter set and the `QueryParams` trait

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Transport-level query parameters.
///
/// An ordered multimap: insertion order is kept and a key may appear more
/// than once, the same way a URL query string allows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pairs: Vec<(String, String)>,
}

impl ParameterSet {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, keeping any existing values for the key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replace every value for the key with a single value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.into()));
    }

    /// First value for the key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values for the key, in insertion order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove every value for the key, returning how many were removed
    pub fn remove(&mut self, key: &str) -> usize {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        before - self.pairs.len()
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if there are no pairs
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as an `application/x-www-form-urlencoded` query string
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ParameterSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.append(k, v);
        }
    }
}

impl IntoIterator for ParameterSet {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

// ============================================================================
// QueryParams
// ============================================================================

/// A caller-defined query object that can produce a [`ParameterSet`]
pub trait QueryParams {
    /// Flatten into transport-level parameters
    fn prepare(&self) -> ParameterSet;
}

impl QueryParams for ParameterSet {
    fn prepare(&self) -> ParameterSet {
        self.clone()
    }
}

impl QueryParams for () {
    fn prepare(&self) -> ParameterSet {
        ParameterSet::new()
    }
}

impl QueryParams for BTreeMap<String, String> {
    fn prepare(&self) -> ParameterSet {
        self.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

// Sorted so the same map always yields the same URI.
impl<S: std::hash::BuildHasher> QueryParams for HashMap<String, String, S> {
    fn prepare(&self) -> ParameterSet {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort();
        pairs
            .into_iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryParams for [(K, V)] {
    fn prepare(&self) -> ParameterSet {
        self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())).collect()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> QueryParams for Vec<(K, V)> {
    fn prepare(&self) -> ParameterSet {
        self.as_slice().prepare()
    }
}
