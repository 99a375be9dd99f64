//! Testing utilities for ironstream pipelines.
//!
//! - **Assertions**: compare stream output with expected results, with or
//!   without regard to order
//! - **Waiting**: poll for background effects (drains, producer shutdown)
//!   with a deadline instead of sleeping
//! - **Debug utilities**: log elements as they pass through a chain
//!
//! # Quick Start
//!
//! ```no_run
//! use ironstream::*;
//! use ironstream::testing::*;
//!
//! #[test]
//! fn doubles() -> anyhow::Result<()> {
//!     let p = TestPipeline::new();
//!
//!     let result = from_vec(&p, vec![1, 2, 3])
//!         .debug_inspect("source")
//!         .map(|x| x * 2)
//!         .collect()?;
//!
//!     assert_collections_equal(&result, &[2, 4, 6]);
//!     Ok(())
//! }
//! ```
//!
//! # Background work
//!
//! Abandoned conduits are drained on their own threads, after the terminal
//! operation has already returned. Use [`wait_for`] or
//! [`TestPipeline::wait_until_settled`] before asserting on their effects:
//!
//! ```
//! use ironstream::*;
//! use ironstream::testing::*;
//! use std::time::Duration;
//!
//! let p = TestPipeline::new();
//! let first = from_vec(&p, (0..100).collect()).find_first().unwrap();
//! assert_eq!(first, Some(0));
//! assert!(p.wait_until_settled(Duration::from_secs(5)));
//! assert_eq!(p.metrics().snapshot().elements_drained, 99);
//! ```

pub mod assertions;
pub mod debug;

pub use assertions::*;
pub use debug::*;

use crate::{EngineConfig, Pipeline};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// A [`Pipeline`] for tests, with helpers to wait for background stage work.
///
/// Dereferences to [`Pipeline`], so it can be passed to every source.
///
/// ```
/// use ironstream::testing::TestPipeline;
/// use ironstream::from_vec;
///
/// let p = TestPipeline::new();
/// let data = from_vec(&p, vec![1, 2, 3]);
/// assert_eq!(p.stage_count(), 1);
/// # drop(data);
/// ```
#[derive(Clone, Debug)]
pub struct TestPipeline {
    pipeline: Pipeline,
}

impl TestPipeline {
    /// Default configuration with metrics enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { pipeline: Pipeline::new(config) }
    }

    /// Wait until every activated stage has finished its producer and every
    /// started drain has run to completion.
    ///
    /// Returns `false` if that did not happen within `timeout`, or if the
    /// pipeline does not record metrics.
    pub fn wait_until_settled(&self, timeout: Duration) -> bool {
        let metrics = self.pipeline.metrics();
        if !metrics.is_enabled() {
            return false;
        }
        wait_for(timeout, || {
            let s = metrics.snapshot();
            s.stages_completed == s.stages_activated && metrics.drains_in_flight() == 0
        })
    }

    /// Print the current counters, for use while debugging a failing test.
    pub fn debug_print_metrics(&self) {
        println!("Pipeline metrics: {}", self.pipeline.metrics().to_json());
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestPipeline {
    type Target = Pipeline;

    fn deref(&self) -> &Self::Target {
        &self.pipeline
    }
}

impl AsRef<Pipeline> for TestPipeline {
    fn as_ref(&self) -> &Pipeline {
        &self.pipeline
    }
}

/// Poll `cond` until it holds or `timeout` elapses. Returns the last result.
pub fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if cond() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(POLL_INTERVAL);
    }
}
