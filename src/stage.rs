//! The single-execution stage at the heart of the engine.
//!
//! A [`Stage`] bundles three things:
//! - the receiving end of its output conduit,
//! - a producer procedure that fills that conduit (pulling from an upstream
//!   stage first, if it has one),
//! - an execution flag guarding the procedure.
//!
//! Nothing runs until [`Stage::activate`] is called. The first call flips the
//! flag with a single compare-and-set and starts the producer on its own
//! thread; every later call, from any thread, is a no-op. The producer owns
//! the sending end of the conduit and closes it on return or unwind.
//!
//! Each stage owns a [`FailureSlot`]. A producer that panics or whose
//! transform fails records the error there *before* its conduit closes. The
//! consumer picks it up when it observes the close and, if it is itself a
//! stage, closes its own conduit with the same error, so a failure travels
//! down the chain along with the data it interrupted.

use crate::conduit::{self, Emit, FailureSlot, Halt, Inlet, Outlet, lock};
use crate::error::StreamError;
use crate::pipeline::Pipeline;
use crate::stage_id::StageId;
use crossbeam_channel::{Receiver, Sender};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, trace, warn};

type Producer = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct Stage<T> {
    id: StageId,
    op: &'static str,
    pipeline: Pipeline,
    ran: AtomicBool,
    producer: Mutex<Option<Producer>>,
    inlet: Mutex<Option<Receiver<T>>>,
    keepalive: Mutex<Option<Sender<T>>>,
    failures: Arc<FailureSlot>,
}

impl<T: Send + 'static> Stage<T> {
    /// Build a stage whose producer runs `body` against the stage's outlet.
    ///
    /// `body` is not invoked here; it runs on a dedicated thread the first
    /// time the stage is activated.
    pub(crate) fn new<F>(pipeline: &Pipeline, op: &'static str, body: F) -> Arc<Self>
    where
        F: FnOnce(&Outlet<T>) -> Emit + Send + 'static,
    {
        let id = pipeline.next_stage_id();
        let (outlet, rx) = conduit::rendezvous(id);
        let keepalive = outlet.keepalive();

        let failures = FailureSlot::new();
        let slot = Arc::clone(&failures);
        let metrics = pipeline.metrics().clone();
        let run: Producer = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| body(&outlet)));
            let failure = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(Halt::Downstream)) => {
                    trace!(stage = %id, op, "consumer went away, stopping early");
                    None
                }
                Ok(Err(Halt::Failed(err))) => Some(err),
                Ok(Err(Halt::Upstream(err))) => {
                    trace!(stage = %id, op, error = %err, "passing upstream failure on");
                    slot.record(err);
                    None
                }
                Err(payload) => Some(StreamError::ProducerPanicked {
                    stage: id,
                    message: panic_message(payload.as_ref()),
                }),
            };
            if let Some(err) = failure {
                warn!(stage = %id, op, error = %err, "stage producer failed");
                metrics.producer_failed();
                slot.record(err);
            }
            let emitted = outlet.emitted();
            metrics.stage_completed(emitted);
            debug!(stage = %id, op, emitted, "stage producer finished");
            // Closes the conduit.
            drop(outlet);
        });

        Arc::new(Self {
            id,
            op,
            pipeline: pipeline.clone(),
            ran: AtomicBool::new(false),
            producer: Mutex::new(Some(run)),
            inlet: Mutex::new(Some(rx)),
            keepalive: Mutex::new(Some(keepalive)),
            failures,
        })
    }

    /// Start the producer procedure if it has not been started yet.
    ///
    /// Never blocks on the producer itself. Safe to call concurrently: exactly
    /// one caller wins the compare-and-set and spawns the producer thread.
    pub(crate) fn activate(&self) {
        if self
            .ran
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        let keepalive = lock(&self.keepalive).take();
        let Some(producer) = lock(&self.producer).take() else {
            return;
        };
        self.pipeline.metrics().stage_activated();
        debug!(stage = %self.id, op = self.op, "activating stage");
        if let Err(source) = self.pipeline.spawn("stage", self.id, producer) {
            error!(stage = %self.id, op = self.op, error = %source, "failed to spawn stage producer");
            self.pipeline.metrics().producer_failed();
            self.pipeline.metrics().stage_completed(0);
            self.failures.record(StreamError::Spawn { stage: self.id, source });
        }
        // Only now may the conduit close if the producer never started.
        drop(keepalive);
    }

    /// Activate the stage and take its output conduit. A second caller gets
    /// an already-closed conduit that never reports this stage's failure.
    pub(crate) fn open(&self) -> Inlet<T> {
        self.activate();
        let (rx, failures) = match lock(&self.inlet).take() {
            Some(rx) => (rx, Arc::clone(&self.failures)),
            None => (conduit::closed(), FailureSlot::new()),
        };
        Inlet::new(rx, self.id, self.pipeline.clone(), failures)
    }
}

impl<T> Stage<T> {
    pub(crate) fn id(&self) -> StageId {
        self.id
    }

    pub(crate) fn op(&self) -> &'static str {
        self.op
    }

    pub(crate) fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub(crate) fn is_activated(&self) -> bool {
        self.ran.load(Ordering::Acquire)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
