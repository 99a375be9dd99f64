//! # Ironstream
//!
//! A **lazily evaluated stream library** over in-memory collections. Chain
//! transformations onto a source, then call a terminal operation; only then
//! does anything run.
//!
//! ## Key Features
//!
//! - **Fluent API**: filter, map, limit, skip, sort, distinct, flat-map and more
//! - **Lazy, pull-driven execution**: each stage runs on its own thread and hands
//!   elements downstream through an unbuffered rendezvous conduit, so no stage
//!   computes ahead of its consumer
//! - **Exactly-once stages**: a stage's producer starts at most once, however
//!   many handles or threads trigger it
//! - **Safe early stop**: `limit`, `take_while`, `find_first` and the `*_match`
//!   terminals abandon the rest of their input without leaving an upstream
//!   producer blocked
//! - **Typed facades**: numeric aggregates, ordered min/max, set collection and
//!   key/value entry helpers
//! - **Failure propagation**: a panicking or failing stage surfaces as
//!   [`StreamError`] from the terminal operation
//!
//! ## Quick Start
//!
//! ```
//! use ironstream::*;
//!
//! # fn main() -> Result<(), StreamError> {
//! let p = Pipeline::default();
//!
//! let out = from_vec(&p, vec![3, 1, 2])
//!     .filter(|x| *x > 1)
//!     .map(|x| x * 10)
//!     .sorted_by(SortOrder::Ascending)
//!     .collect()?;
//! assert_eq!(out, vec![20, 30]);
//!
//! let total = from_vec(&p, vec![1, 2, 3, 4]).numeric().sum()?;
//! assert_eq!(total, 10);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Pipeline
//!
//! A [`Pipeline`] carries the [`EngineConfig`], the [`EngineMetrics`] counters
//! and the stage id counter shared by every stream built against it. Clone it
//! freely; clones share all three.
//!
//! ### Stream
//!
//! A [`Stream<T>`] is a handle to one stage. Intermediate operations consume
//! the handle and return a new one wired to it; terminal operations consume
//! the handle and return a [`Result`]. Cloning a stream rebinds the same stage
//! rather than copying elements, and only one of the clones should be driven.
//!
//! ### Early stop
//!
//! When a consumer stops reading before its input is exhausted, the remainder
//! is abandoned according to [`AbandonPolicy`]: drained on a background thread
//! (the default) or disconnected so upstream producers exit on their next send.
//!
//! ## Module Overview
//!
//! - [`stream`] - the `Stream` handle and its intermediate operations
//! - [`helpers`] - sources, terminals, ordering, distinct and matching
//! - [`facades`] - numeric, ordered, comparable and key/value wrappers
//! - [`pipeline`] - the shared execution context
//! - [`config`] - engine configuration
//! - [`metrics`] - stage and element counters
//! - [`error`] - the error type returned by terminal operations
//! - [`testing`] - helpers for writing tests against pipelines

pub(crate) mod conduit;
pub mod config;
pub mod error;
pub mod facades;
pub mod helpers;
pub mod metrics;
pub mod pipeline;
pub(crate) mod stage;
pub mod stage_id;
pub mod stream;
pub mod testing;

// General re-exports
pub use config::{AbandonPolicy, EngineConfig};
pub use error::{BoxError, StreamError};
pub use facades::*;
pub use helpers::*;
pub use metrics::{EngineMetrics, MetricsSnapshot};
pub use pipeline::Pipeline;
pub use stage_id::StageId;
pub use stream::Stream;
