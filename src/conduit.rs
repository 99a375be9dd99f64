//! The hand-off between two adjacent stages.
//!
//! A conduit is a zero-capacity (rendezvous) channel: a send blocks until the
//! consumer is ready to receive and vice versa, so a stage never computes an
//! element ahead of demand and a stalled consumer stalls its whole upstream.
//! Each conduit has exactly one producing stage ([`Outlet`]) and one consuming
//! side ([`Inlet`]).
//!
//! The conduit closes when the last sender is dropped. The producing stage
//! owns its outlet for the lifetime of its producer procedure, so the
//! conduit closes exactly once, when that procedure returns or unwinds.
//!
//! A conduit closes either cleanly or with a failure. The producing stage
//! records its failure in a [`FailureSlot`] before dropping its outlet, and
//! the consumer reads that slot only once it has observed the close. A
//! consumer that stops early never observes the close, so whatever happens
//! upstream after that point cannot change its result.

use crate::config::AbandonPolicy;
use crate::error::StreamError;
use crate::pipeline::Pipeline;
use crate::stage_id::StageId;
use crossbeam_channel::{Receiver, Sender, bounded};
use std::cell::Cell;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, trace};

/// The failure, if any, that closed one stage's conduit.
#[derive(Debug, Default)]
pub(crate) struct FailureSlot {
    first: Mutex<Option<StreamError>>,
}

impl FailureSlot {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Keep `err` unless an earlier failure is already recorded.
    pub(crate) fn record(&self, err: StreamError) {
        let mut first = lock(&self.first);
        if first.is_none() {
            *first = Some(err);
        } else {
            trace!(error = %err, "dropping secondary stage failure");
        }
    }

    pub(crate) fn take(&self) -> Option<StreamError> {
        lock(&self.first).take()
    }
}

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Why a producer procedure stopped before its input was exhausted.
#[derive(Debug)]
pub(crate) enum Halt {
    /// The consumer dropped its end of the conduit.
    Downstream,
    /// Caller-supplied code failed.
    Failed(StreamError),
    /// The upstream conduit closed with a failure, which is passed on.
    Upstream(StreamError),
}

impl From<StreamError> for Halt {
    fn from(err: StreamError) -> Self {
        Self::Failed(err)
    }
}

/// Outcome of a producer procedure.
pub(crate) type Emit = std::result::Result<(), Halt>;

/// Create a rendezvous conduit for `stage`.
pub(crate) fn rendezvous<T>(stage: StageId) -> (Outlet<T>, Receiver<T>) {
    let (tx, rx) = bounded(0);
    (Outlet { tx, stage, emitted: Cell::new(0) }, rx)
}

/// A receiver whose conduit is already closed. Handed out when a stage's
/// inlet has been taken by another consumer.
pub(crate) fn closed<T>() -> Receiver<T> {
    let (tx, rx) = bounded(0);
    drop(tx);
    rx
}

/// Producing end of a conduit.
pub(crate) struct Outlet<T> {
    tx: Sender<T>,
    stage: StageId,
    emitted: Cell<u64>,
}

impl<T> Outlet<T> {
    /// Hand `value` to the consumer, blocking until it is received.
    pub(crate) fn send(&self, value: T) -> Emit {
        self.tx.send(value).map_err(|_| Halt::Downstream)?;
        self.emitted.set(self.emitted.get() + 1);
        Ok(())
    }

    /// The stage this outlet belongs to.
    pub(crate) fn stage(&self) -> StageId {
        self.stage
    }

    /// Number of elements handed off so far.
    pub(crate) fn emitted(&self) -> u64 {
        self.emitted.get()
    }

    /// A second sender that keeps the conduit open while a stage is being
    /// activated.
    pub(crate) fn keepalive(&self) -> Sender<T> {
        self.tx.clone()
    }
}

/// Consuming end of a conduit.
pub(crate) struct Inlet<T> {
    rx: Receiver<T>,
    stage: StageId,
    pipeline: Pipeline,
    upstream: Arc<FailureSlot>,
    carried: Arc<FailureSlot>,
}

impl<T: Send + 'static> Inlet<T> {
    /// `upstream` is the failure slot of the stage producing into `rx`.
    pub(crate) fn new(
        rx: Receiver<T>,
        stage: StageId,
        pipeline: Pipeline,
        upstream: Arc<FailureSlot>,
    ) -> Self {
        Self { rx, stage, pipeline, upstream, carried: FailureSlot::new() }
    }

    /// Next element, or `None` once the producer has closed the conduit.
    pub(crate) fn recv(&self) -> Option<T> {
        match self.rx.recv() {
            Ok(t) => Some(t),
            Err(_) => {
                if let Some(err) = self.upstream.take() {
                    self.carried.record(err);
                }
                None
            }
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = T> + '_ {
        std::iter::from_fn(move || self.recv())
    }

    /// Where the failure that closed the conduit ends up once the close has
    /// been observed. Stays empty for a clean close or an abandoned conduit.
    pub(crate) fn carried(&self) -> Arc<FailureSlot> {
        Arc::clone(&self.carried)
    }

    /// Stop a producer whose input closed with a failure.
    pub(crate) fn check(&self) -> Emit {
        match self.carried.take() {
            Some(err) => Err(Halt::Upstream(err)),
            None => Ok(()),
        }
    }

    /// Turn a fully consumed conduit into a terminal result.
    pub(crate) fn finish<R>(&self, value: R) -> Result<R, StreamError> {
        match self.carried.take() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }

    /// Stop consuming. Every short-circuiting consumer must end with this so
    /// the producer blocked on the other side is released.
    pub(crate) fn abandon(self) {
        let Inlet { rx, stage, pipeline, .. } = self;
        match pipeline.config().abandon_policy {
            AbandonPolicy::Disconnect => {
                trace!(stage = %stage, "disconnecting abandoned conduit");
                drop(rx);
            }
            AbandonPolicy::Drain => {
                let metrics = pipeline.metrics().clone();
                let drain_metrics = metrics.clone();
                let spawned = pipeline.spawn("drain", stage, move || {
                    let drained = rx.iter().count() as u64;
                    drain_metrics.drained(drained);
                    trace!(stage = %stage, drained, "abandoned conduit drained");
                });
                // On failure the closure, and with it the receiver, is dropped,
                // which disconnects the producer instead.
                match spawned {
                    Ok(()) => metrics.drain_started(),
                    Err(err) => {
                        error!(stage = %stage, error = %err, "could not start drain thread, disconnecting");
                    }
                }
            }
        }
    }
}
