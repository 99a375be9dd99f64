//! Predicate terminals: `all_match`, `any_match`, `none_match`,
//! `not_all_match`, and the `if_all_match` family.
//!
//! The plain match operations short-circuit: as soon as the answer is known,
//! the rest of the conduit is abandoned and the result returned. A failure
//! surfaces only if the chain closed with it before the answer was known.
//!
//! [`Stream::if_all_match_else`] does not short-circuit. It materializes the
//! whole stream while testing the predicate, because the `then` action must
//! not run on a prefix only to discover a counterexample later. The buffered
//! elements back the [`ElseStream`] it returns, whichever way the predicate
//! went, so the `otherwise` branch runs over the same data without a second
//! upstream pass. Memory use is proportional to the stream length.

use crate::error::Result;
use crate::helpers::stdlib::from_vec;
use crate::Stream;

impl<T: Send + 'static> Stream<T> {
    /// `true` if `pred` holds for every element (vacuously `true` when empty).
    /// Stops at the first counterexample.
    ///
    /// # Errors
    /// Returns the failure that closed the chain before a counterexample was
    /// found.
    pub fn all_match<P>(self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        let input = self.open();
        let mut all = true;
        for t in input.iter() {
            if !pred(&t) {
                all = false;
                break;
            }
        }
        if !all {
            input.abandon();
            return Ok(false);
        }
        input.finish(true)
    }

    /// Negation of [`all_match`](Stream::all_match).
    ///
    /// # Errors
    /// See [`all_match`](Stream::all_match).
    pub fn not_all_match<P>(self, pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        self.all_match(pred).map(|all| !all)
    }

    /// `true` if `pred` holds for at least one element. Stops at the first match.
    ///
    /// # Errors
    /// Returns the failure that closed the chain before a match was found.
    pub fn any_match<P>(self, mut pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        let input = self.open();
        let mut found = false;
        for t in input.iter() {
            if pred(&t) {
                found = true;
                break;
            }
        }
        if found {
            input.abandon();
            return Ok(true);
        }
        input.finish(false)
    }

    /// `true` if `pred` holds for no element. Stops at the first match.
    ///
    /// # Errors
    /// See [`any_match`](Stream::any_match).
    pub fn none_match<P>(self, pred: P) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
    {
        self.any_match(pred).map(|any| !any)
    }

    /// Run `action` on every element if, and only if, `pred` holds for all of
    /// them. Returns whether the action ran.
    ///
    /// Elements are buffered while the predicate is tested; at the first
    /// counterexample the buffer is discarded and the rest of the stream
    /// abandoned.
    ///
    /// # Errors
    /// Returns the failure that closed the chain before a counterexample was
    /// found. The action does not run in that case.
    pub fn if_all_match<P, A>(self, mut pred: P, action: A) -> Result<bool>
    where
        P: FnMut(&T) -> bool,
        A: FnMut(T),
    {
        let input = self.open();
        let mut buffered = Vec::new();
        let mut all = true;
        for t in input.iter() {
            if !pred(&t) {
                all = false;
                break;
            }
            buffered.push(t);
        }
        if !all {
            input.abandon();
            return Ok(false);
        }
        input.finish(())?;
        buffered.into_iter().for_each(action);
        Ok(true)
    }

    /// Two-branch form of [`if_all_match`](Stream::if_all_match).
    ///
    /// Consumes the whole stream, testing `pred` until it first fails. If it
    /// held for every element, `then` runs over a copy of each of them. The
    /// returned [`ElseStream`] replays every element, in order, in both cases.
    ///
    /// # Errors
    /// Returns the failure that closed the chain, if one did. Neither branch
    /// runs in that case.
    ///
    /// # Example
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let mut sum = 0;
    /// from_vec(&p, vec![1, 2, 3, 4, 5])
    ///     .if_all_match_else(|x| *x < 3, |_| unreachable!())?
    ///     .otherwise(|x| sum += x * 2)?;
    /// assert_eq!(sum, 30);
    ///
    /// let mut seen = Vec::new();
    /// let replay = from_vec(&p, vec![1, 2])
    ///     .if_all_match_else(|x| *x < 3, |x| seen.push(x))?
    ///     .into_stream()
    ///     .collect()?;
    /// assert_eq!(seen, vec![1, 2]);
    /// assert_eq!(replay, vec![1, 2]);
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn if_all_match_else<P, A>(self, mut pred: P, then: A) -> Result<ElseStream<T>>
    where
        T: Clone,
        P: FnMut(&T) -> bool,
        A: FnMut(T),
    {
        let input = self.open();
        let mut buffered = Vec::new();
        let mut all = true;
        for t in input.iter() {
            if all && !pred(&t) {
                all = false;
            }
            buffered.push(t);
        }
        input.finish(())?;
        if all {
            buffered.iter().cloned().for_each(then);
        }
        Ok(ElseStream { branch: from_vec(self.pipeline(), buffered) })
    }
}

/// The `else` branch returned by [`Stream::if_all_match_else`].
///
/// Holds every element the stream produced, whether or not the predicate held
/// for all of them.
#[derive(Debug)]
#[must_use = "the else branch does nothing unless `otherwise` is called"]
pub struct ElseStream<T> {
    branch: Stream<T>,
}

impl<T: Send + 'static> ElseStream<T> {
    /// Run `action` over the replayed elements.
    ///
    /// # Errors
    /// Propagates a failure of the replay stage.
    pub fn otherwise<A>(self, action: A) -> Result<()>
    where
        A: FnMut(T),
    {
        self.branch.for_each(action)
    }

    /// Keep processing the replayed elements as an ordinary stream.
    pub fn into_stream(self) -> Stream<T> {
        self.branch
    }
}
