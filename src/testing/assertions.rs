//! Assertion functions for comparing stream output with expected results.
//!
//! The slice-based assertions work on anything already collected. The
//! `assert_stream_*` variants take a [`Stream`] and run it first, panicking
//! if the chain fails.

use crate::facades::MapEntry;
use crate::Stream;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics at the first differing index, or on a length mismatch.
///
/// # Example
///
/// ```
/// use ironstream::testing::assert_collections_equal;
///
/// assert_collections_equal(&[1, 2, 3], &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    if let Some(i) = actual.iter().zip(expected).position(|(a, e)| a != e) {
        panic!(
            "Collection mismatch at index {i}:\n  Expected: {:?}\n  Actual: {:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}",
            expected[i], actual[i]
        );
    }
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that two collections hold the same elements with the same
/// multiplicities, in any order.
///
/// # Panics
///
/// Panics listing the elements that are missing from or extra in `actual`.
///
/// # Example
///
/// ```
/// use ironstream::testing::assert_collections_unordered_equal;
///
/// assert_collections_unordered_equal(&[3, 1, 2, 1], &[1, 1, 2, 3]);
/// ```
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    let mut balance: HashMap<&T, i64> = HashMap::new();
    for e in expected {
        *balance.entry(e).or_default() += 1;
    }
    for a in actual {
        *balance.entry(a).or_default() -= 1;
    }
    let missing: Vec<_> = balance.iter().filter(|(_, n)| **n > 0).map(|(t, n)| (*t, *n)).collect();
    let extra: Vec<_> = balance.iter().filter(|(_, n)| **n < 0).map(|(t, n)| (*t, -*n)).collect();
    assert!(
        missing.is_empty() && extra.is_empty(),
        "Collection content mismatch:\n  Missing (element, times): {missing:?}\n  Extra (element, times): {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}

/// Assert that a collection of entries matches `expected` pairs, ignoring
/// order. Both sides are sorted by key, then value, before comparing.
///
/// # Panics
///
/// Panics if the sorted collections differ.
///
/// # Example
///
/// ```
/// use ironstream::MapEntry;
/// use ironstream::testing::assert_kv_collections_equal;
///
/// let actual = vec![MapEntry::new("b", 2), MapEntry::new("a", 1)];
/// assert_kv_collections_equal(actual, vec![("a", 1), ("b", 2)]);
/// ```
pub fn assert_kv_collections_equal<K, V>(actual: Vec<MapEntry<K, V>>, expected: Vec<(K, V)>)
where
    K: Debug + Ord,
    V: Debug + Ord,
{
    let mut actual: Vec<(K, V)> = actual.into_iter().map(MapEntry::into_pair).collect();
    let mut expected = expected;
    actual.sort();
    expected.sort();
    assert_collections_equal(&actual, &expected);
}

/// Run `stream` to completion and compare its output, in order.
///
/// # Panics
///
/// Panics if the chain fails or its output differs from `expected`.
pub fn assert_stream_yields<T>(stream: Stream<T>, expected: &[T])
where
    T: Debug + PartialEq + Send + 'static,
{
    match stream.collect() {
        Ok(actual) => assert_collections_equal(&actual, expected),
        Err(err) => panic!("Stream failed: {err}\n  Expected: {expected:?}"),
    }
}

/// Run `stream` to completion and compare its output, ignoring order.
///
/// # Panics
///
/// Panics if the chain fails or its output differs from `expected`.
pub fn assert_stream_yields_unordered<T>(stream: Stream<T>, expected: &[T])
where
    T: Debug + Eq + Hash + Send + 'static,
{
    match stream.collect() {
        Ok(actual) => assert_collections_unordered_equal(&actual, expected),
        Err(err) => panic!("Stream failed: {err}\n  Expected: {expected:?}"),
    }
}
