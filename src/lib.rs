//! An ordered map built on a skip list with link widths.
//!
//! Every forward link of the list records how many elements it skips over.
//! Searching, inserting and removing by key work like in any skip list, and the
//! widths additionally allow reaching the `k`-th smallest element, or the rank
//! of a key, in `O(log n)` expected time.
//!
//! The list is single threaded. Wrap it in a lock to share it.
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod comparator;
mod error;
mod internal;
mod level;
mod options;
pub mod skiplist;

pub use comparator::{Comparator, FnComparator, Natural};
pub use error::Error;
pub use level::recommended_max_level;
pub use options::{Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY};
pub use skiplist::SkipList;
