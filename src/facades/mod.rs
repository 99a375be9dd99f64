//! Typed wrappers over [`Stream`](crate::Stream) that add operations only
//! meaningful for a capability of the element type.
//!
//! | Facade | Capability | Adds |
//! |---|---|---|
//! | [`NumberStream`] | [`Numeric`] | `sum`, `average`, `min`, `max` |
//! | [`OrderedStream`] | `PartialOrd` | `sorted_by`, `min`, `max` |
//! | [`ComparableStream`] | `Eq + Hash` | `distinct`, `collect_to_set` |
//! | [`EntryStream`] | [`MapEntry`] elements | entry/key/value projections, `collect_to_map` |
//!
//! Wrapping never copies data or starts anything: the facade holds a handle
//! to the same stage, and the stage's exactly-once guard is shared with every
//! other handle to it.

pub mod comparable;
pub mod entries;
pub mod numeric;
pub mod ordered;

pub use comparable::ComparableStream;
pub use entries::{EntryStream, MapEntry};
pub use numeric::{NumberStream, Numeric};
pub use ordered::OrderedStream;
