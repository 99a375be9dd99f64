pub(crate) mod distinct;
pub(crate) mod keyed;
pub(crate) mod matching;
pub(crate) mod ordering;
pub(crate) mod stdlib;
pub(crate) mod terminal;
pub(crate) mod try_process;

// Only re-export files with top-level functions or public types
pub use keyed::*;
pub use matching::ElseStream;
pub use ordering::SortOrder;
pub use stdlib::*;
