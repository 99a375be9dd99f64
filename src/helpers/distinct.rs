//! Equality-based helpers.
//!
//! - [`Stream::distinct`] -- forward first occurrences only, in upstream order.
//! - [`Stream::collect_to_set`] -- terminal collection into a `HashSet`.

use crate::Stream;
use crate::error::Result;
use std::collections::HashSet;
use std::hash::Hash;

impl<T: Eq + Hash + Clone + Send + 'static> Stream<T> {
    /// Stable distinct: each value is forwarded the first time it is seen and
    /// dropped afterwards. The set of seen values grows with the number of
    /// distinct elements.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let out = from_vec(&p, vec![3, 1, 3, 2, 1]).distinct().collect()?;
    /// assert_eq!(out, vec![3, 1, 2]);
    /// # Ok::<(), StreamError>(())
    /// ```
    #[must_use]
    pub fn distinct(self) -> Self {
        self.derive("distinct", |input, out| {
            let mut seen = HashSet::new();
            for t in input.iter() {
                if seen.insert(t.clone()) {
                    out.send(t)?;
                }
            }
            Ok(())
        })
    }
}

impl<T: Eq + Hash + Send + 'static> Stream<T> {
    /// Collect into a set, discarding duplicates and order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn collect_to_set(self) -> Result<HashSet<T>> {
        self.reduce(HashSet::new(), |mut set, t| {
            set.insert(t);
            set
        })
    }
}
