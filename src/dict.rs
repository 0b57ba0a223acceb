//! Ordered string-keyed dictionary for plist values.
//!
//! [`PlistDict`] wraps [`IndexMap`] so dictionaries remember insertion
//! order while being built; the canonical descending key order required
//! for byte-reproducible output is applied when a document is lowered for
//! serialization (see [`PlistValue::canonical`](crate::PlistValue::canonical)),
//! not on every mutation.

use indexmap::IndexMap;

use crate::value::PlistValue;

/// An ordered map of string keys to plist values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlistDict(IndexMap<String, PlistValue>);

impl PlistDict {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        PlistDict(IndexMap::new())
    }

    /// Creates an empty dictionary with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        PlistDict(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PlistValue>) -> Option<PlistValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in their current stored order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PlistValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, PlistValue> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, PlistValue> {
        self.0.values()
    }
}

impl IntoIterator for PlistDict {
    type Item = (String, PlistValue);
    type IntoIter = indexmap::map::IntoIter<String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlistDict {
    type Item = (&'a String, &'a PlistValue);
    type IntoIter = indexmap::map::Iter<'a, String, PlistValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, PlistValue)> for PlistDict {
    fn from_iter<T: IntoIterator<Item = (String, PlistValue)>>(iter: T) -> Self {
        PlistDict(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut dict = PlistDict::new();
        assert!(dict.insert("key", 42i64).is_none());
        assert!(dict.insert("key", 43i64).is_some());
        assert_eq!(dict.get("key").and_then(PlistValue::as_int), Some(43));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut dict = PlistDict::new();
        dict.insert("first", true);
        dict.insert("second", false);
        let keys: Vec<_> = dict.keys().cloned().collect();
        assert_eq!(keys, vec!["first", "second"]);
    }
}
