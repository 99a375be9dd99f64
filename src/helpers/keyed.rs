//! Sources over key/value mappings.
//!
//! A mapping has unique keys but no defined iteration order, so neither do
//! these sources: sort the stream if the order matters.
//!
//! - [`from_map`] -- one [`MapEntry`] per key/value pair, as an [`EntryStream`].
//! - [`from_map_keys`] -- keys only.
//! - [`from_map_values`] -- values only.
//!
//! ### Example
//! ```
//! use ironstream::*;
//! use std::collections::HashMap;
//!
//! let p = Pipeline::default();
//! let m = HashMap::from([("a", 2), ("b", 1)]);
//! let values = from_map_values(&p, m).sorted_by(SortOrder::Ascending);
//! assert_eq!(values.collect().unwrap(), vec![1, 2]);
//! ```

use crate::facades::entries::{EntryStream, MapEntry};
use crate::{Pipeline, Stream, from_vec};
use std::collections::HashMap;

/// Stream the entries of `map`.
pub fn from_map<K, V, S>(p: &Pipeline, map: HashMap<K, V, S>) -> EntryStream<K, V>
where
    K: Send + 'static,
    V: Send + 'static,
{
    let entries: Vec<MapEntry<K, V>> = map.into_iter().map(MapEntry::from).collect();
    EntryStream::new(from_vec(p, entries))
}

/// Stream the keys of `map`.
pub fn from_map_keys<K, V, S>(p: &Pipeline, map: HashMap<K, V, S>) -> Stream<K>
where
    K: Send + 'static,
{
    from_vec(p, map.into_keys().collect())
}

/// Stream the values of `map`.
pub fn from_map_values<K, V, S>(p: &Pipeline, map: HashMap<K, V, S>) -> Stream<V>
where
    V: Send + 'static,
{
    from_vec(p, map.into_values().collect())
}
