//! Engine counters.
//!
//! Every [`Pipeline`](crate::Pipeline) owns an [`EngineMetrics`] that its stages
//! update as they run. Counters are plain atomics; reading them while a
//! pipeline is still running yields a consistent-enough view for diagnostics
//! and for tests that wait for background drains to finish.
//!
//! Counting is compiled in with the `metrics` feature (on by default) and can
//! be switched off per pipeline with [`EngineConfig::metrics`](crate::EngineConfig).
//!
//! # Example
//!
//! ```no_run
//! use ironstream::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let p = Pipeline::default();
//! let total = from_vec(&p, vec![1, 2, 3]).map(|x| x * 2).count()?;
//! assert_eq!(total, 3);
//!
//! let snapshot = p.metrics().snapshot();
//! println!("{}", p.metrics().to_json());
//! p.metrics().save_to_file("metrics.json")?;
//! # let _ = snapshot;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the engine counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Stages whose producer was started.
    pub stages_activated: u64,
    /// Stages whose producer returned (normally, early, or by failure).
    pub stages_completed: u64,
    /// Elements sent into conduits, summed over all stages.
    pub elements_emitted: u64,
    /// Background drains started for abandoned conduits.
    pub drains_started: u64,
    /// Background drains that reached the end of their conduit.
    pub drains_completed: u64,
    /// Elements discarded by those drains.
    pub elements_drained: u64,
    /// Producer failures (panics, transform errors, spawn errors).
    pub producer_failures: u64,
}

/// Thread-safe engine counters shared by all stages of a pipeline.
#[derive(Clone, Debug)]
pub struct EngineMetrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    enabled: bool,
    stages_activated: AtomicU64,
    stages_completed: AtomicU64,
    elements_emitted: AtomicU64,
    drains_started: AtomicU64,
    drains_completed: AtomicU64,
    elements_drained: AtomicU64,
    producer_failures: AtomicU64,
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EngineMetrics {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            inner: Arc::new(Counters {
                enabled: enabled && cfg!(feature = "metrics"),
                ..Counters::default()
            }),
        }
    }

    /// Whether counters are being recorded.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled
    }

    fn bump(&self, counter: &AtomicU64, by: u64) {
        if self.inner.enabled {
            counter.fetch_add(by, Ordering::Relaxed);
        }
    }

    pub(crate) fn stage_activated(&self) {
        self.bump(&self.inner.stages_activated, 1);
    }

    pub(crate) fn stage_completed(&self, emitted: u64) {
        self.bump(&self.inner.elements_emitted, emitted);
        self.bump(&self.inner.stages_completed, 1);
    }

    pub(crate) fn drain_started(&self) {
        self.bump(&self.inner.drains_started, 1);
    }

    pub(crate) fn drained(&self, elements: u64) {
        self.bump(&self.inner.elements_drained, elements);
        self.bump(&self.inner.drains_completed, 1);
    }

    /// Drains started but not yet finished.
    #[must_use]
    pub fn drains_in_flight(&self) -> u64 {
        let s = self.snapshot();
        s.drains_started.saturating_sub(s.drains_completed)
    }

    pub(crate) fn producer_failed(&self) {
        self.bump(&self.inner.producer_failures, 1);
    }

    /// Read all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = &self.inner;
        MetricsSnapshot {
            stages_activated: c.stages_activated.load(Ordering::Relaxed),
            stages_completed: c.stages_completed.load(Ordering::Relaxed),
            elements_emitted: c.elements_emitted.load(Ordering::Relaxed),
            drains_started: c.drains_started.load(Ordering::Relaxed),
            drains_completed: c.drains_completed.load(Ordering::Relaxed),
            elements_drained: c.elements_drained.load(Ordering::Relaxed),
            producer_failures: c.producer_failures.load(Ordering::Relaxed),
        }
    }

    /// Render the current counters as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.snapshot()).unwrap_or(Value::Null)
    }

    /// Emit the current counters as a single `info` event.
    pub fn log_summary(&self) {
        let s = self.snapshot();
        tracing::info!(
            stages_activated = s.stages_activated,
            stages_completed = s.stages_completed,
            elements_emitted = s.elements_emitted,
            drains_started = s.drains_started,
            drains_completed = s.drains_completed,
            elements_drained = s.elements_drained,
            producer_failures = s.producer_failures,
            "engine metrics"
        );
    }

    /// Write the current counters to `path` as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        let mut file = File::create(path)
            .with_context(|| format!("creating metrics file {}", path.display()))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
