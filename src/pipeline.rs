use crate::config::EngineConfig;
use crate::error::StreamError;
use crate::metrics::EngineMetrics;
use crate::stage_id::StageId;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;

/// -------- Pipeline context --------
/// Shared by every stage built against it: configuration, counters and the
/// stage id sequence. Cloning is cheap and yields a handle to the same context.
pub struct Pipeline {
    pub(crate) inner: Arc<PipelineInner>,
}

pub(crate) struct PipelineInner {
    pub(crate) config: EngineConfig,
    pub(crate) metrics: EngineMetrics,
    pub(crate) next_id: AtomicU64,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Allow `Pipeline` cloning.
impl Clone for Pipeline {
    fn clone(&self) -> Self {
        Pipeline { inner: Arc::clone(&self.inner) }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.inner.config)
            .field("stages", &self.stage_count())
            .finish()
    }
}

impl Pipeline {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let metrics = EngineMetrics::new(config.metrics);
        Self {
            inner: Arc::new(PipelineInner {
                config,
                metrics,
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Build a pipeline from a JSON configuration document.
    ///
    /// # Errors
    /// Returns [`StreamError::Config`] if the document cannot be parsed.
    pub fn from_json_config(json: &str) -> Result<Self, StreamError> {
        Ok(Self::new(EngineConfig::from_json_str(json)?))
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn metrics(&self) -> &EngineMetrics {
        &self.inner.metrics
    }

    /// Number of stages created against this pipeline so far.
    #[must_use]
    pub fn stage_count(&self) -> u64 {
        self.inner.next_id.load(Ordering::Relaxed)
    }

    pub(crate) fn next_stage_id(&self) -> StageId {
        StageId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Start a detached, named thread for `stage`. `role` is `stage` for
    /// producers and `drain` for abandoned-conduit drains.
    pub(crate) fn spawn<F>(&self, role: &str, stage: StageId, f: F) -> io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let cfg = &self.inner.config;
        let mut builder =
            thread::Builder::new().name(format!("{}-{role}-{}", cfg.thread_name_prefix, stage.raw()));
        if let Some(size) = cfg.stack_size {
            builder = builder.stack_size(size);
        }
        builder.spawn(f).map(|_detached| ())
    }
}
