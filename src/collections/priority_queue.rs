use rand::{rngs::StdRng, RngCore};

use crate::internal::skiplist::{iter, SkipList};
use crate::internal::utils::LevelGenerator;
use crate::skiplist::{Comparator, Natural};

/// [PriorityQueue](PriorityQueue) is a min-queue implemented using a
/// [SkipList](crate::skiplist::SkipList).
///
/// Values that compare equal pop in the order they were pushed.
pub struct PriorityQueue<V, C = Natural, R = StdRng> {
    queue: SkipList<V, C, R>,
}

impl<V> PriorityQueue<V>
where
    V: Ord,
{
    pub fn new() -> Self {
        PriorityQueue {
            queue: SkipList::new(),
        }
    }
}

impl<V> Default for PriorityQueue<V>
where
    V: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> PriorityQueue<V, C>
where
    C: Comparator<V>,
{
    pub fn with_comparator(comparator: C) -> Self {
        PriorityQueue {
            queue: SkipList::with_comparator(comparator),
        }
    }
}

impl<V, C, R> PriorityQueue<V, C, R>
where
    C: Comparator<V>,
    R: RngCore,
{
    pub fn with_generator(comparator: C, generator: LevelGenerator<R>) -> Self {
        PriorityQueue {
            queue: SkipList::with_generator(comparator, generator),
        }
    }

    pub fn push(&mut self, value: V) {
        self.queue.insert(value);
    }

    pub fn peek(&self) -> Option<&V> {
        self.queue.first()
    }

    pub fn pop(&mut self) -> Option<V> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

mod into_iter {
    use super::*;

    impl<V, C, R> PriorityQueue<V, C, R> {
        /// Iterates in pop order without consuming anything.
        pub fn iter(&self) -> iter::Iter<'_, V> {
            self.queue.iter()
        }
    }

    impl<V, C, R> IntoIterator for PriorityQueue<V, C, R>
    where
        C: Comparator<V>,
        R: RngCore,
    {
        type Item = V;
        type IntoIter = iter::IntoIter<V, C, R>;

        fn into_iter(self) -> Self::IntoIter {
            self.queue.into_iter()
        }
    }
}
