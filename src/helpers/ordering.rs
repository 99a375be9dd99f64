//! Order-changing intermediate operations.
//!
//! - [`Stream::reverse`] -- emit elements last-to-first.
//! - [`Stream::sorted_by`] -- emit elements in natural order, ascending or
//!   descending.
//!
//! Both are stateful barriers: they drain their entire upstream into memory
//! before emitting the first element. Sorting is stable, so elements that
//! compare equal keep their upstream order in either direction.

use crate::Stream;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a natural-order sort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Compare `a` and `b` by natural order in this direction.
    ///
    /// Incomparable pairs (a `NaN` against anything) compare as equal and so
    /// keep their relative order.
    pub fn compare<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> Ordering {
        let natural = a.partial_cmp(b).unwrap_or(Ordering::Equal);
        match self {
            Self::Ascending => natural,
            Self::Descending => natural.reverse(),
        }
    }
}

impl<T: Send + 'static> Stream<T> {
    /// Emit every upstream element in reverse order.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let out = from_vec(&p, vec![1, 2, 3]).reverse().collect()?;
    /// assert_eq!(out, vec![3, 2, 1]);
    /// # Ok::<(), StreamError>(())
    /// ```
    #[must_use]
    pub fn reverse(self) -> Self {
        self.derive("reverse", |input, out| {
            let buffered: Vec<T> = input.iter().collect();
            input.check()?;
            for t in buffered.into_iter().rev() {
                out.send(t)?;
            }
            Ok(())
        })
    }
}

impl<T: PartialOrd + Send + 'static> Stream<T> {
    /// Emit every upstream element sorted by natural order.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let asc = from_vec(&p, vec![5, 3, 1, 4, 2]).sorted_by(SortOrder::Ascending);
    /// assert_eq!(asc.collect()?, vec![1, 2, 3, 4, 5]);
    ///
    /// let desc = from_vec(&p, vec![5, 3, 1, 4, 2]).sorted_by(SortOrder::Descending);
    /// assert_eq!(desc.collect()?, vec![5, 4, 3, 2, 1]);
    /// # Ok::<(), StreamError>(())
    /// ```
    #[must_use]
    pub fn sorted_by(self, order: SortOrder) -> Self {
        self.derive("sorted_by", move |input, out| {
            let mut buffered: Vec<T> = input.iter().collect();
            input.check()?;
            buffered.sort_by(|a, b| order.compare(a, b));
            for t in buffered {
                out.send(t)?;
            }
            Ok(())
        })
    }
}
