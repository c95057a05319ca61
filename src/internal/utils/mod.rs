mod level;
mod node;

pub use level::LevelGenerator;
pub(crate) use node::{Link, Node};

/// The tallest tower any list can grow. Head towers are allocated at the generator's
/// `max_level`, which may be lower but never higher.
pub const MAX_LEVEL: usize = 32;

/// Probability that a tower reaching level `n` also reaches level `n + 1`.
pub const P: f64 = 0.25;

/// Slot of the head tower in the node arena.
pub(crate) const HEAD: usize = 0;

/// A reference to one element of a [SkipList](crate::SkipList).
///
/// Handles stay cheap to copy and never borrow the list. Every handle carries the stamp its
/// element was created with; once that element is removed (or the list is reset) the handle
/// goes stale and every operation taking it returns `None`, even if the arena slot is reused.
/// A handle only means something to the list that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) index: usize,
    pub(crate) stamp: u64,
}

/// The path recorded by a single top-down descent.
///
/// `update[i]` is the last node at level `i` ordered strictly before the target and `rank[i]`
/// is the number of elements up to and including that node (zero for the head).
pub(crate) struct Trail {
    pub(crate) update: [usize; MAX_LEVEL],
    pub(crate) rank: [usize; MAX_LEVEL],
}

impl Trail {
    pub(crate) fn new() -> Self {
        Trail {
            update: [HEAD; MAX_LEVEL],
            rank: [0; MAX_LEVEL],
        }
    }
}
