//! Fallible element processing: `try_map` and the `collect_fail_fast`
//! terminal over streams of `Result`s.

use crate::Stream;
use crate::error::{Result, StreamError};
use std::fmt::Display;

impl<T: Send + 'static> Stream<T> {
    /// Fallible `map`. The first `Err` fails this stage: nothing more is
    /// emitted, upstream is disconnected, and the terminal operation returns
    /// [`StreamError::Transform`].
    ///
    /// ```
    /// use ironstream::*;
    ///
    /// let p = Pipeline::default();
    /// let err = from_vec(&p, vec!["1", "x", "3"])
    ///     .try_map(|s| s.parse::<i32>())
    ///     .collect()
    ///     .unwrap_err();
    /// assert!(matches!(err, StreamError::Transform { .. }));
    /// ```
    #[must_use]
    pub fn try_map<U, E, F>(self, mut f: F) -> Stream<U>
    where
        U: Send + 'static,
        E: Into<anyhow::Error>,
        F: FnMut(T) -> std::result::Result<U, E> + Send + 'static,
    {
        self.derive("try_map", move |input, out| {
            for t in input.iter() {
                match f(t) {
                    Ok(u) => out.send(u)?,
                    Err(e) => {
                        let source: anyhow::Error = e.into();
                        return Err(StreamError::Transform {
                            stage: out.stage(),
                            source: source.into(),
                        }
                        .into());
                    }
                }
            }
            Ok(())
        })
    }
}

// Fail-fast terminal (keeps errors ergonomic)
impl<T: Send + 'static, E: Display + Send + 'static> Stream<std::result::Result<T, E>> {
    /// Collect the `Ok` values, stopping at the first `Err` element.
    ///
    /// # Errors
    /// [`StreamError::ElementFailed`] carrying the element's message, or the
    /// failure that closed the chain before any `Err` element arrived.
    pub fn collect_fail_fast(self) -> Result<Vec<T>> {
        let input = self.open();
        let mut ok = Vec::new();
        let mut failed = None;
        for r in input.iter() {
            match r {
                Ok(v) => ok.push(v),
                Err(e) => {
                    failed = Some(e.to_string());
                    break;
                }
            }
        }
        if let Some(message) = failed {
            input.abandon();
            return Err(StreamError::ElementFailed { message });
        }
        input.finish(ok)
    }
}
