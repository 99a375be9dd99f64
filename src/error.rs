//! Error type returned by terminal operations.
//!
//! Stages never fail on their own: the data they carry is already in memory.
//! What can fail is caller-supplied code running inside a producer thread (a
//! panicking transform, a `try_map` closure returning `Err`) or the OS refusing
//! to start a thread. Such failures are recorded against the chain and surface
//! from the nearest terminal operation once its conduit ends.
//!
//! Stages upstream of a failing stage are released (their conduit is
//! disconnected) but their remaining elements are not drained.

use crate::stage_id::StageId;
use thiserror::Error;

/// Boxed error produced by a fallible transform.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by terminal operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A transform, predicate, or other closure panicked inside a producer.
    #[error("stage {stage} panicked: {message}")]
    ProducerPanicked { stage: StageId, message: String },

    /// A fallible transform (`try_map`) returned an error.
    #[error("stage {stage} transform failed: {source}")]
    Transform {
        stage: StageId,
        #[source]
        source: BoxError,
    },

    /// A `Result` element was `Err` when collected with `collect_fail_fast`.
    #[error("element failed: {message}")]
    ElementFailed { message: String },

    /// The producer thread for a stage could not be started.
    #[error("failed to spawn thread for stage {stage}: {source}")]
    Spawn {
        stage: StageId,
        #[source]
        source: std::io::Error,
    },

    /// An [`EngineConfig`](crate::EngineConfig) could not be parsed.
    #[error("invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

impl StreamError {
    /// The stage that raised the error, when there is one.
    #[must_use]
    pub const fn stage(&self) -> Option<StageId> {
        match self {
            Self::ProducerPanicked { stage, .. }
            | Self::Transform { stage, .. }
            | Self::Spawn { stage, .. } => Some(*stage),
            Self::ElementFailed { .. } | Self::Config(_) => None,
        }
    }
}
