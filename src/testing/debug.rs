//! Debug utilities for watching elements flow through a chain.
//!
//! Each helper is a pass-through stage that logs through `tracing` at
//! `debug` level under the `ironstream::debug` target; install a subscriber
//! (for example `tracing-subscriber` with `RUST_LOG=ironstream::debug=debug`)
//! to see the output.

use crate::Stream;
use std::fmt::Debug;
use tracing::debug;

/// Elements printed individually by [`Stream::debug_inspect`] before it
/// switches to a summary.
const INSPECT_LIMIT: u64 = 10;

impl<T: Send + 'static> Stream<T> {
    /// Log each element as it passes, up to a small cap, then the total.
    ///
    /// # Example
    ///
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let out = from_vec(&p, vec![1, 2, 3])
    ///     .debug_inspect("after source")
    ///     .map(|x| x * 2)
    ///     .debug_inspect("after map")
    ///     .collect()
    ///     .unwrap();
    /// assert_eq!(out, vec![2, 4, 6]);
    /// ```
    #[must_use]
    pub fn debug_inspect(self, label: &str) -> Self
    where
        T: Debug,
    {
        self.debug_inspect_with(label, |_| {})
    }

    /// Like [`debug_inspect`](Stream::debug_inspect), also calling `inspector`
    /// on every element.
    #[must_use]
    pub fn debug_inspect_with<F>(self, label: &str, mut inspector: F) -> Self
    where
        T: Debug,
        F: FnMut(&T) + Send + 'static,
    {
        let label = label.to_string();
        self.derive("debug_inspect", move |input, out| {
            let mut seen = 0u64;
            for t in input.iter() {
                inspector(&t);
                if seen < INSPECT_LIMIT {
                    debug!(target: "ironstream::debug", label = %label, index = seen, element = ?t);
                }
                seen += 1;
                out.send(t)?;
            }
            if seen > INSPECT_LIMIT {
                debug!(target: "ironstream::debug", label = %label, more = seen - INSPECT_LIMIT, "more elements");
            }
            Ok(())
        })
    }

    /// Log how many elements passed once upstream is exhausted.
    #[must_use]
    pub fn debug_count(self, label: &str) -> Self {
        let label = label.to_string();
        self.derive("debug_count", move |input, out| {
            let mut count = 0u64;
            for t in input.iter() {
                count += 1;
                out.send(t)?;
            }
            debug!(target: "ironstream::debug", label = %label, count, "stream exhausted");
            Ok(())
        })
    }

    /// Log the first `n` elements only.
    #[must_use]
    pub fn debug_sample(self, n: usize, label: &str) -> Self
    where
        T: Debug,
    {
        let label = label.to_string();
        self.derive("debug_sample", move |input, out| {
            for (i, t) in input.iter().enumerate() {
                if i < n {
                    debug!(target: "ironstream::debug", label = %label, index = i, element = ?t);
                }
                out.send(t)?;
            }
            Ok(())
        })
    }
}
