//! Terminal operations that consume a [`Stream`] to produce a value.
//!
//! Every terminal activates the chain and reads the final conduit on the
//! calling thread. A terminal that reads the conduit to its close returns
//! `Err` if the chain closed it with a failure. Operations that can stop early
//! ([`find_first`](Stream::find_first), [`find_first_or`](Stream::find_first_or))
//! abandon the remainder of the conduit so upstream producers are released,
//! and return their answer; a stage failing after that point is logged but
//! never changes the result.

use crate::Stream;
use crate::error::Result;

impl<T: Send + 'static> Stream<T> {
    /// Materialize every element, in emission order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let out = from_vec(&p, vec![3, 1, 2])
    ///     .filter(|x| *x > 1)
    ///     .map(|x| x * 10)
    ///     .collect()?;
    /// assert_eq!(out, vec![30, 20]);
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn collect(self) -> Result<Vec<T>> {
        self.reduce(Vec::new(), |mut acc, t| {
            acc.push(t);
            acc
        })
    }

    /// Fold elements left to right, in emission order, starting from `seed`.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let joined = from_vec(&p, vec!["a", "b", "c"])
    ///     .reduce(String::new(), |acc, s| acc + s)?;
    /// assert_eq!(joined, "abc");
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn reduce<R, F>(self, seed: R, mut f: F) -> Result<R>
    where
        F: FnMut(R, T) -> R,
    {
        let input = self.open();
        let mut acc = seed;
        for t in input.iter() {
            acc = f(acc, t);
        }
        input.finish(acc)
    }

    /// Call `f` on every element, in emission order.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn for_each<F>(self, mut f: F) -> Result<()>
    where
        F: FnMut(T),
    {
        let input = self.open();
        for t in input.iter() {
            f(t);
        }
        input.finish(())
    }

    /// Number of elements.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did.
    pub fn count(self) -> Result<u64> {
        self.reduce(0u64, |n, _| n + 1)
    }

    /// The first element, or `None` for an empty stream.
    ///
    /// Only one element is read; the rest is abandoned.
    ///
    /// # Errors
    /// Returns the failure that closed the chain before any element arrived.
    /// Once an element has been read the result is `Ok`, whatever happens
    /// upstream afterwards.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// assert_eq!(from_vec(&p, vec![1, 2, 3]).find_first()?, Some(1));
    /// assert_eq!(empty::<i32>(&p).find_first()?, None);
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn find_first(self) -> Result<Option<T>> {
        let input = self.open();
        match input.recv() {
            Some(first) => {
                input.abandon();
                Ok(Some(first))
            }
            None => input.finish(None),
        }
    }

    /// The first element, or `default` for an empty stream.
    ///
    /// # Errors
    /// See [`find_first`](Stream::find_first).
    pub fn find_first_or(self, default: T) -> Result<T> {
        Ok(self.find_first()?.unwrap_or(default))
    }
}
