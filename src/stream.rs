//! The [`Stream`] handle and its intermediate operations.
//!
//! Every intermediate operation wraps the previous stage in a new one whose
//! producer reads the upstream conduit and writes its own. Terminal
//! operations live in [`crate::helpers`].

use crate::conduit::{Emit, Halt, Inlet, Outlet};
use crate::pipeline::Pipeline;
use crate::stage::Stage;
use crate::stage_id::StageId;
use std::fmt;
use std::sync::Arc;

/// A lazily evaluated sequence of elements flowing out of one stage.
///
/// Building a `Stream` (from a source or by chaining intermediate operations)
/// only wires stages together. Nothing is computed until a terminal operation
/// such as [`collect`](Stream::collect) or [`find_first`](Stream::find_first)
/// activates the last stage, which activates its upstream, and so on back to
/// the source. Each stage then runs on its own thread and hands elements to
/// the next one through a rendezvous conduit.
///
/// Cloning a `Stream` does not copy data: both handles refer to the same
/// stage. Activating either one starts the producer exactly once, and only the
/// first consumer observes the elements; the other sees an empty stream.
pub struct Stream<T> {
    pub(crate) stage: Arc<Stage<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self { stage: Arc::clone(&self.stage) }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("stage", &self.stage.id())
            .field("op", &self.stage.op())
            .field("activated", &self.stage.is_activated())
            .finish()
    }
}

impl<T: Send + 'static> Stream<T> {
    /// Source stage over already-materialized elements: captured eagerly,
    /// emitted lazily in order, then the conduit is closed.
    pub fn produce(p: &Pipeline, data: Vec<T>) -> Self {
        Self::from_stage(Stage::new(p, "source", move |out| {
            for t in data {
                out.send(t)?;
            }
            Ok(())
        }))
    }

    /// Source stage on a fresh default [`Pipeline`].
    ///
    /// ```
    /// use ironstream::Stream;
    /// assert_eq!(Stream::of(vec![1, 2, 3]).count().unwrap(), 3);
    /// ```
    pub fn of(data: Vec<T>) -> Self {
        Self::produce(&Pipeline::default(), data)
    }

    pub(crate) fn from_stage(stage: Arc<Stage<T>>) -> Self {
        Self { stage }
    }

    /// Id of the stage behind this handle.
    #[must_use]
    pub fn id(&self) -> StageId {
        self.stage.id()
    }

    /// The pipeline this stream was built against.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        self.stage.pipeline()
    }

    /// Whether the producer behind this handle has been started.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.stage.is_activated()
    }

    /// Start the producer without consuming. Idempotent.
    pub fn activate(&self) {
        self.stage.activate();
    }

    /// Activate and take the output conduit.
    pub(crate) fn open(&self) -> Inlet<T> {
        self.stage.open()
    }

    /// Build the next stage of the chain. Its producer activates `self`, then
    /// runs `body` over this stage's output. If `body` read that output to its
    /// close and the upstream stage had failed, the new stage closes with the
    /// same failure.
    pub(crate) fn derive<U, F>(self, op: &'static str, body: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnOnce(Inlet<T>, &Outlet<U>) -> Emit + Send + 'static,
    {
        let pipeline = self.pipeline().clone();
        let upstream = self;
        Stream::from_stage(Stage::new(&pipeline, op, move |out| {
            let input = upstream.open();
            let carried = input.carried();
            body(input, out)?;
            match carried.take() {
                Some(err) => Err(Halt::Upstream(err)),
                None => Ok(()),
            }
        }))
    }

    /// Keep only elements for which `pred` holds, preserving order.
    ///
    /// ```
    /// use ironstream::*;
    /// let p = Pipeline::default();
    /// let evens = from_vec(&p, vec![1, 2, 3, 4, 5]).filter(|x| x % 2 == 0);
    /// assert_eq!(evens.collect().unwrap(), vec![2, 4]);
    /// ```
    #[must_use]
    pub fn filter<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.derive("filter", move |input, out| {
            for t in input.iter() {
                if pred(&t) {
                    out.send(t)?;
                }
            }
            Ok(())
        })
    }

    /// Transform every element, possibly into another type.
    ///
    /// ```
    /// use ironstream::*;
    /// let p = Pipeline::default();
    /// let lens = from_vec(&p, vec!["a", "bb", "ccc"]).map(str::len);
    /// assert_eq!(lens.collect().unwrap(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn map<U, F>(self, mut f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        self.derive("map", move |input, out| {
            for t in input.iter() {
                out.send(f(t))?;
            }
            Ok(())
        })
    }

    /// Forward at most `n` leading elements.
    ///
    /// Once the cap is reached the rest of the upstream output is abandoned
    /// (drained in the background by default), so the upstream producer never
    /// stays blocked.
    #[must_use]
    pub fn limit(self, n: usize) -> Self {
        self.derive("limit", move |input, out| {
            for _ in 0..n {
                match input.recv() {
                    Some(t) => out.send(t)?,
                    None => return Ok(()),
                }
            }
            input.abandon();
            Ok(())
        })
    }

    /// Discard the first `n` elements and forward the rest.
    #[must_use]
    pub fn skip(self, n: usize) -> Self {
        self.derive("skip", move |input, out| {
            for t in input.iter().skip(n) {
                out.send(t)?;
            }
            Ok(())
        })
    }

    /// Discard leading elements while `pred` holds; forward everything from
    /// the first element for which it does not, without testing `pred` again.
    #[must_use]
    pub fn drop_while<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.derive("drop_while", move |input, out| {
            let mut dropping = true;
            for t in input.iter() {
                if dropping && pred(&t) {
                    continue;
                }
                dropping = false;
                out.send(t)?;
            }
            Ok(())
        })
    }

    /// Forward leading elements while `pred` holds. The first element that
    /// fails the predicate is discarded and the rest of the upstream output is
    /// abandoned.
    ///
    /// ```
    /// use ironstream::*;
    /// let p = Pipeline::default();
    /// let head = from_vec(&p, vec![1, 2, 3, 4, 5]).take_while(|x| *x < 4);
    /// assert_eq!(head.collect().unwrap(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn take_while<P>(self, mut pred: P) -> Self
    where
        P: FnMut(&T) -> bool + Send + 'static,
    {
        self.derive("take_while", move |input, out| {
            while let Some(t) = input.recv() {
                if !pred(&t) {
                    input.abandon();
                    return Ok(());
                }
                out.send(t)?;
            }
            Ok(())
        })
    }

    /// Observe every element as it passes, without changing it.
    #[must_use]
    pub fn peek<F>(self, mut f: F) -> Self
    where
        F: FnMut(&T) + Send + 'static,
    {
        self.derive("peek", move |input, out| {
            for t in input.iter() {
                f(&t);
                out.send(t)?;
            }
            Ok(())
        })
    }

    /// Replace every element with the elements of a nested stream.
    ///
    /// Flattening is depth-first: the nested stream for one element is
    /// activated and fully drained before the next upstream element is read,
    /// so only one nested stream is open at a time. A failure inside a nested
    /// stream fails this stage.
    ///
    /// ```
    /// use ironstream::*;
    /// let p = Pipeline::default();
    /// let q = p.clone();
    /// let flat = from_vec(&p, vec![vec![1, 2], vec![], vec![3]])
    ///     .flat_map(move |v| from_vec(&q, v));
    /// assert_eq!(flat.collect().unwrap(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn flat_map<U, F>(self, mut f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> Stream<U> + Send + 'static,
    {
        self.derive("flat_map", move |input, out| {
            for t in input.iter() {
                let inner = f(t).open();
                for u in inner.iter() {
                    out.send(u)?;
                }
                inner.check()?;
            }
            Ok(())
        })
    }

    /// Replace every element with the items of an iterator.
    #[must_use]
    pub fn flat_map_iter<U, I, F>(self, mut f: F) -> Stream<U>
    where
        U: Send + 'static,
        I: IntoIterator<Item = U>,
        F: FnMut(T) -> I + Send + 'static,
    {
        self.derive("flat_map_iter", move |input, out| {
            for t in input.iter() {
                for u in f(t) {
                    out.send(u)?;
                }
            }
            Ok(())
        })
    }
}
