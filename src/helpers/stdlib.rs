//! Standard library helpers for constructing [`Stream`]s.
//!
//! These helpers create in-memory sources directly from native Rust data. The
//! input is captured when the source is built; elements are emitted one at a
//! time, in order, only once a terminal operation pulls them.
//!
//! ### Overview
//! - [`from_vec`] -- Converts a `Vec<T>` into a source stream.
//! - [`from_iter`] -- Builds a source from any `IntoIterator<Item = T>`.
//! - [`from_slice`] -- Clones the elements of a slice into a source.
//! - [`empty`] -- A source with no elements.
//!
//! ### Example
//! ```
//! use ironstream::*;
//!
//! let p = Pipeline::default();
//! let words = from_vec(&p, vec!["alpha", "beta", "gamma"]);
//! let numbers = from_iter(&p, 1..=5);
//!
//! assert_eq!(words.count().unwrap(), 3);
//! assert_eq!(numbers.map(|n| n * n).collect().unwrap(), vec![1, 4, 9, 16, 25]);
//! ```

use crate::{Pipeline, Stream};

/// Create a source [`Stream<T>`] from a [`Vec<T>`].
///
/// ### Example
/// ```
/// use ironstream::*;
///
/// let p = Pipeline::default();
/// let s = from_vec(&p, vec![10, 20, 30]);
/// assert_eq!(s.collect().unwrap(), vec![10, 20, 30]);
/// ```
pub fn from_vec<T: Send + 'static>(p: &Pipeline, data: Vec<T>) -> Stream<T> {
    Stream::produce(p, data)
}

/// Create a source [`Stream<T>`] from any iterable. The iterator is consumed
/// immediately.
pub fn from_iter<T, I>(p: &Pipeline, iter: I) -> Stream<T>
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
{
    from_vec(p, iter.into_iter().collect())
}

/// Create a source [`Stream<T>`] from clones of the elements of `data`.
pub fn from_slice<T: Clone + Send + 'static>(p: &Pipeline, data: &[T]) -> Stream<T> {
    from_vec(p, data.to_vec())
}

/// A source that closes without emitting anything.
pub fn empty<T: Send + 'static>(p: &Pipeline) -> Stream<T> {
    from_vec(p, Vec::new())
}
