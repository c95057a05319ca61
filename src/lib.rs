//! An ordered multiset built on a skip list.
//!
//! Besides the usual `O(log n)` insert, delete and search, every forward link records how
//! many elements it skips. That makes rank queries ([SkipList::rank],
//! [SkipList::get_by_rank]) `O(log n)` as well, which is what sorted sets and leaderboards
//! are usually built on.
//!
//! ```
//! use rankskip::SkipList;
//!
//! let mut scores = SkipList::new();
//! for score in [5, 2, 3, 1, 4, 2, 3, 6, 2, 7, 8, 6] {
//!     scores.insert(score);
//! }
//!
//! assert_eq!(scores.rank(&3), 5);
//! let fifth = scores.get_by_rank(5).unwrap();
//! assert_eq!(scores.get(fifth), Some(&3));
//! ```
//!
//! The list is single-threaded: mutation takes `&mut self`, and sharing one across threads
//! needs an external lock.
#![warn(
    // missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
pub mod collections;
pub mod error;
mod internal;
pub mod skiplist;

pub use error::{ConfigError, InvariantError};
pub use internal::utils::{LevelGenerator, MAX_LEVEL, P};
pub use skiplist::{Comparator, FnLess, Handle, Natural, SkipList};
