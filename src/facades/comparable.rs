//! [`ComparableStream`]: a stream over hashable elements, adding
//! `distinct` and set collection.

use crate::error::Result;
use crate::Stream;
use std::collections::HashSet;
use std::hash::Hash;

/// A stream whose elements support equality and hashing.
#[derive(Clone, Debug)]
pub struct ComparableStream<T> {
    inner: Stream<T>,
}

impl<T: Eq + Hash + Send + 'static> Stream<T> {
    /// Rebind this stream as a [`ComparableStream`].
    #[must_use]
    pub fn comparable(self) -> ComparableStream<T> {
        ComparableStream { inner: self }
    }
}

impl<T: Eq + Hash + Send + 'static> From<Stream<T>> for ComparableStream<T> {
    fn from(inner: Stream<T>) -> Self {
        Self { inner }
    }
}

impl<T: Eq + Hash + Send + 'static> ComparableStream<T> {
    /// See [`Stream::distinct`]. The result stays comparable, so it can be
    /// followed directly by [`collect_to_set`](ComparableStream::collect_to_set).
    #[must_use]
    pub fn distinct(self) -> Self
    where
        T: Clone,
    {
        Self { inner: self.inner.distinct() }
    }

    /// Collect into a set, discarding duplicates and order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect_to_set(self) -> Result<HashSet<T>> {
        self.inner.collect_to_set()
    }

    /// Materialize every element, in emission order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect(self) -> Result<Vec<T>> {
        self.inner.collect()
    }

    /// Drop the facade and return the underlying stream.
    pub fn into_stream(self) -> Stream<T> {
        self.inner
    }
}
