//! Lightweight unique identifier for stages within a [`Pipeline`](crate::pipeline::Pipeline).
//!
//! Each stage created against a pipeline (source or intermediate) is assigned
//! a sequential `StageId`. The id shows up in producer thread names, in log
//! fields, and in [`StreamError`](crate::StreamError) variants so a failure can
//! be traced back to the stage that raised it.

use std::fmt;

/// Unique numeric identifier for a stage in a pipeline.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StageId(u64);

impl StageId {
    /// Create a new `StageId` (used internally by the pipeline).
    pub(crate) const fn new(v: u64) -> Self {
        Self(v)
    }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
