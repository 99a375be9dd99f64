//! Key/value facade over streams of [`MapEntry`].
//!
//! Entries usually come from [`from_map`](crate::from_map), whose iteration
//! order is unspecified. Sort first if the order of the result matters,
//! including for [`EntryStream::collect_to_map`], where the last entry seen
//! for a key wins.
//!
//! # Example
//! ```
//! use ironstream::*;
//! use std::collections::HashMap;
//!
//! let p = Pipeline::default();
//! let prices = HashMap::from([("apple", 3), ("pear", 5), ("plum", 2)]);
//! let cheap = from_map(&p, prices)
//!     .filter_values(|v| *v < 5)
//!     .sorted_by(SortOrder::Ascending)
//!     .keys_only()
//!     .collect()?;
//! assert_eq!(cheap, vec!["apple", "plum"]);
//! # Ok::<(), StreamError>(())
//! ```

use crate::error::Result;
use crate::helpers::ordering::SortOrder;
use crate::Stream;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// One key/value pair.
///
/// Ordering is by key, then by value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> MapEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for MapEntry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// A stream of key/value entries.
#[derive(Clone, Debug)]
pub struct EntryStream<K, V> {
    inner: Stream<MapEntry<K, V>>,
}

impl<K: Send + 'static, V: Send + 'static> Stream<MapEntry<K, V>> {
    /// Rebind this stream as an [`EntryStream`].
    #[must_use]
    pub fn entries(self) -> EntryStream<K, V> {
        EntryStream { inner: self }
    }
}

impl<K: Send + 'static, V: Send + 'static> From<Stream<MapEntry<K, V>>> for EntryStream<K, V> {
    fn from(inner: Stream<MapEntry<K, V>>) -> Self {
        Self { inner }
    }
}

impl<K: Send + 'static, V: Send + 'static> EntryStream<K, V> {
    pub fn new(inner: Stream<MapEntry<K, V>>) -> Self {
        Self { inner }
    }

    /// Transform each entry into an arbitrary element, leaving the facade.
    #[must_use]
    pub fn map_entries<U, F>(self, mut f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnMut(K, V) -> U + Send + 'static,
    {
        self.inner.map(move |e| f(e.key, e.value))
    }

    #[must_use]
    pub fn filter_entries<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&K, &V) -> bool + Send + 'static,
    {
        Self::new(self.inner.filter(move |e| pred(&e.key, &e.value)))
    }

    /// Replace every value, keeping its key.
    #[must_use]
    pub fn map_values<W, F>(self, mut f: F) -> EntryStream<K, W>
    where
        W: Send + 'static,
        F: FnMut(V) -> W + Send + 'static,
    {
        EntryStream::new(self.inner.map(move |e| MapEntry::new(e.key, f(e.value))))
    }

    #[must_use]
    pub fn filter_keys<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&K) -> bool + Send + 'static,
    {
        Self::new(self.inner.filter(move |e| pred(&e.key)))
    }

    #[must_use]
    pub fn filter_values<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&V) -> bool + Send + 'static,
    {
        Self::new(self.inner.filter(move |e| pred(&e.value)))
    }

    #[must_use]
    pub fn keys_only(self) -> Stream<K> {
        self.inner.map(|e| e.key)
    }

    #[must_use]
    pub fn values_only(self) -> Stream<V> {
        self.inner.map(|e| e.value)
    }

    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        Self::new(self.inner.limit(n))
    }

    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        Self::new(self.inner.skip(n))
    }

    /// Fold entries in emission order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn reduce_entries<R, F>(self, seed: R, mut f: F) -> Result<R>
    where
        F: FnMut(R, K, V) -> R,
    {
        self.inner.reduce(seed, move |acc, e| f(acc, e.key, e.value))
    }

    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn for_each<F>(self, mut f: F) -> Result<()>
    where
        F: FnMut(K, V),
    {
        self.inner.for_each(move |e| f(e.key, e.value))
    }

    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn count(self) -> Result<u64> {
        self.inner.count()
    }

    /// Materialize every element, in emission order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect(self) -> Result<Vec<MapEntry<K, V>>> {
        self.inner.collect()
    }

    /// Drop the facade and return the underlying stream.
    pub fn into_stream(self) -> Stream<MapEntry<K, V>> {
        self.inner
    }
}

impl<K, V> EntryStream<K, V>
where
    K: PartialOrd + Send + 'static,
    V: PartialOrd + Send + 'static,
{
    /// Sort entries by key, then by value.
    #[must_use]
    pub fn sorted_by(self, order: SortOrder) -> Self {
        Self::new(self.inner.sorted_by(order))
    }
}

impl<K, V> EntryStream<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
{
    /// Gather entries into a map. A later entry replaces an earlier one with
    /// the same key.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect_to_map(self) -> Result<HashMap<K, V>> {
        self.inner.reduce(HashMap::new(), |mut map, e| {
            map.insert(e.key, e.value);
            map
        })
    }
}

impl<K, V> EntryStream<K, V>
where
    K: Eq + Hash + Send + 'static,
    V: Eq + Hash + Send + 'static,
{
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect_to_set(self) -> Result<HashSet<MapEntry<K, V>>> {
        self.inner.collect_to_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{from_vec, Pipeline};

    fn entries(pairs: Vec<(&'static str, i32)>) -> EntryStream<&'static str, i32> {
        let p = Pipeline::default();
        from_vec(&p, pairs.into_iter().map(MapEntry::from).collect()).entries()
    }

    #[test]
    fn entries_order_by_key_then_value() {
        let sorted = entries(vec![("b", 1), ("a", 2), ("a", 1)])
            .sorted_by(SortOrder::Ascending)
            .collect()
            .unwrap();
        let pairs: Vec<_> = sorted.into_iter().map(MapEntry::into_pair).collect();
        assert_eq!(pairs, vec![("a", 1), ("a", 2), ("b", 1)]);
    }

    #[test]
    fn collect_to_map_last_writer_wins() {
        let map = entries(vec![("k", 1), ("j", 5), ("k", 2)]).collect_to_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["k"], 2);
        assert_eq!(map["j"], 5);
    }

    #[test]
    fn map_values_keeps_keys() {
        let out = entries(vec![("x", 2), ("y", 3)])
            .map_values(|v| v * 10)
            .map_entries(|k, v| format!("{k}={v}"))
            .collect()
            .unwrap();
        assert_eq!(out, vec!["x=20", "y=30"]);
    }

    #[test]
    fn reduce_entries_sees_key_and_value() {
        let total = entries(vec![("a", 1), ("bb", 2)])
            .reduce_entries(0usize, |acc, k, v| acc + k.len() * v as usize)
            .unwrap();
        assert_eq!(total, 5);
    }
}
