//! [`OrderedStream`]: a stream over naturally ordered elements, adding
//! `min`/`max` and a sort that keeps the facade.

use crate::error::Result;
use crate::helpers::ordering::SortOrder;
use crate::Stream;

/// A stream whose elements have a natural order.
#[derive(Clone, Debug)]
pub struct OrderedStream<T> {
    inner: Stream<T>,
}

impl<T: PartialOrd + Send + 'static> Stream<T> {
    /// Rebind this stream as an [`OrderedStream`].
    #[must_use]
    pub fn ordered(self) -> OrderedStream<T> {
        OrderedStream { inner: self }
    }
}

impl<T: PartialOrd + Send + 'static> From<Stream<T>> for OrderedStream<T> {
    fn from(inner: Stream<T>) -> Self {
        Self { inner }
    }
}

impl<T: PartialOrd + Send + 'static> OrderedStream<T> {
    /// See [`Stream::sorted_by`].
    #[must_use]
    pub fn sorted_by(self, order: SortOrder) -> Self {
        Self { inner: self.inner.sorted_by(order) }
    }

    /// Smallest element; the first one seen wins ties.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn min(self) -> Result<Option<T>> {
        extremum(self.inner, |candidate, best| candidate < best)
    }

    /// Largest element; the first one seen wins ties.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn max(self) -> Result<Option<T>> {
        extremum(self.inner, |candidate, best| candidate > best)
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

/// Keep the current best unless `replaces(candidate, best)` holds. Strict
/// comparisons make the first-seen element win ties.
pub(crate) fn extremum<T, F>(stream: Stream<T>, replaces: F) -> Result<Option<T>>
where
    T: Send + 'static,
    F: Fn(&T, &T) -> bool,
{
    stream.reduce(None, |best, t| match best {
        Some(b) if !replaces(&t, &b) => Some(b),
        _ => Some(t),
    })
}
