//! Numeric facade: aggregates over streams of primitive numbers.
//!
//! [`NumberStream`] re-exposes the element-preserving intermediate operations
//! so a chain stays numeric, and adds `sum`, `average`, `min` and `max`.
//!
//! # Example
//! ```
//! use ironstream::*;
//!
//! let p = Pipeline::default();
//! let n = from_vec(&p, vec![1, 2, 3, 4, 5]).numeric();
//! assert_eq!(n.filter(|x| x % 2 == 1).sum()?, 9);
//!
//! let avg = from_vec(&p, Vec::<i64>::new()).numeric().average()?;
//! assert_eq!(avg, 0.0);
//! # Ok::<(), StreamError>(())
//! ```

use crate::error::Result;
use crate::facades::ordered::extremum;
use crate::helpers::ordering::SortOrder;
use crate::Stream;
use std::ops::Add;

/// Element types the numeric facade accepts: every primitive integer and float.
pub trait Numeric: Copy + PartialOrd + Default + Add<Output = Self> + Send + 'static {
    /// Widen to `f64` for averaging. May lose precision for large 64/128-bit values.
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// A stream of numbers.
#[derive(Clone, Debug)]
pub struct NumberStream<T> {
    inner: Stream<T>,
}

impl<T: Numeric> Stream<T> {
    /// Rebind this stream as a [`NumberStream`].
    #[must_use]
    pub fn numeric(self) -> NumberStream<T> {
        NumberStream { inner: self }
    }
}

impl<T: Numeric> From<Stream<T>> for NumberStream<T> {
    fn from(inner: Stream<T>) -> Self {
        Self { inner }
    }
}

impl<T: Numeric> NumberStream<T> {
    fn rewrap(inner: Stream<T>) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn filter<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        Self::rewrap(self.inner.filter(pred))
    }

    /// Element-type-preserving map.
    #[must_use]
    pub fn map<F>(self, f: F) -> Self
    where
        F: FnMut(T) -> T + Send + 'static,
    {
        Self::rewrap(self.inner.map(f))
    }

    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        Self::rewrap(self.inner.limit(n))
    }

    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        Self::rewrap(self.inner.skip(n))
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        Self::rewrap(self.inner.reverse())
    }

    #[must_use]
    pub fn peek<F>(self, f: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        Self::rewrap(self.inner.peek(f))
    }

    #[must_use]
    pub fn drop_while<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        Self::rewrap(self.inner.drop_while(pred))
    }

    #[must_use]
    pub fn take_while<P>(self, pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        Self::rewrap(self.inner.take_while(pred))
    }

    #[must_use]
    pub fn sorted_by(self, order: SortOrder) -> Self {
        Self::rewrap(self.inner.sorted_by(order))
    }

    /// Sum of all elements; zero for an empty stream. Integer overflow
    /// behaves as `+` does for `T`.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn sum(self) -> Result<T> {
        self.inner.reduce(T::default(), |acc, t| acc + t)
    }

    /// Arithmetic mean computed in `f64`; `0.0` for an empty stream.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    #[allow(clippy::cast_precision_loss)]
    pub fn average(self) -> Result<f64> {
        let (total, count) = self
            .inner
            .reduce((0.0_f64, 0u64), |(total, count), t| (total + t.to_f64(), count + 1))?;
        if count == 0 {
            return Ok(0.0);
        }
        Ok(total / count as f64)
    }

    /// Smallest element, `None` when empty; the first one seen wins ties.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn min(self) -> Result<Option<T>> {
        extremum(self.inner, |candidate, best| candidate < best)
    }

    /// Largest element, `None` when empty; the first one seen wins ties.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn max(self) -> Result<Option<T>> {
        extremum(self.inner, |candidate, best| candidate > best)
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
    pub fn collect(self) -> Result<Vec<T>> {
        self.inner.collect()
    }

    /// Drop the facade and return the underlying stream.
    pub fn into_stream(self) -> Stream<T> {
        self.inner
    }
}
