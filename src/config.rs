//! Engine configuration.
//!
//! An [`EngineConfig`] is attached to a [`Pipeline`](crate::Pipeline) and is
//! shared by every stage created against it. It controls how producer threads
//! are spawned and what happens to a conduit once its consumer stops reading.
//!
//! # Example
//!
//! ```
//! use ironstream::*;
//!
//! let config = EngineConfig::from_json_str(
//!     r#"{ "thread_name_prefix": "etl", "abandon_policy": "disconnect" }"#,
//! )?;
//! let p = Pipeline::new(config);
//! let first = from_vec(&p, vec![1, 2, 3]).find_first()?;
//! assert_eq!(first, Some(1));
//! # Ok::<(), ironstream::StreamError>(())
//! ```

use crate::error::StreamError;
use serde::{Deserialize, Serialize};

/// What a consumer does with the rest of a conduit it no longer needs.
///
/// Short-circuiting operations (`limit`, `take_while`, `find_first`,
/// `any_match`, ...) stop reading before their upstream is exhausted. The
/// upstream producer is blocked on a rendezvous send at that point and must be
/// released one way or the other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonPolicy {
    /// Keep reading the abandoned conduit on a background thread until the
    /// upstream closes it. Upstream transforms still run for every remaining
    /// element, including their side effects.
    #[default]
    Drain,
    /// Drop the consumer end. The upstream producer sees a disconnected conduit
    /// on its next send and exits, and so does every stage above it.
    Disconnect,
}

/// Configuration shared by every stage of a pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix for producer (`{prefix}-stage-{id}`) and drain
    /// (`{prefix}-drain-{id}`) thread names.
    pub thread_name_prefix: String,
    /// Stack size for producer and drain threads. `None` uses the platform default.
    pub stack_size: Option<usize>,
    /// How abandoned conduits are released.
    pub abandon_policy: AbandonPolicy,
    /// Record engine counters in [`EngineMetrics`](crate::metrics::EngineMetrics).
    pub metrics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thread_name_prefix: "ironstream".to_string(),
            stack_size: None,
            abandon_policy: AbandonPolicy::Drain,
            metrics: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their default value.
    ///
    /// # Errors
    /// Returns [`StreamError::Config`] if the document is not valid JSON or a
    /// field has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self, StreamError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style override of the abandon policy.
    #[must_use]
    pub fn with_abandon_policy(mut self, policy: AbandonPolicy) -> Self {
        self.abandon_policy = policy;
        self
    }

    /// Builder-style override of the thread name prefix.
    #[must_use]
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json_str(r#"{ "stack_size": 65536 }"#).unwrap();
        assert_eq!(cfg.stack_size, Some(65536));
        assert_eq!(cfg.thread_name_prefix, "ironstream");
        assert_eq!(cfg.abandon_policy, AbandonPolicy::Drain);
        assert!(cfg.metrics);
    }

    #[test]
    fn abandon_policy_is_snake_case() {
        let cfg = EngineConfig::from_json_str(r#"{ "abandon_policy": "disconnect" }"#).unwrap();
        assert_eq!(cfg.abandon_policy, AbandonPolicy::Disconnect);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, StreamError::Config(_)));
    }
}
