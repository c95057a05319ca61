use core::fmt::{self, Debug, Display};

use rand::{rngs::StdRng, RngCore};

use crate::error::InvariantError;
use crate::internal::utils::{Handle, LevelGenerator, Link, Node, Trail, HEAD, MAX_LEVEL};
use crate::skiplist::{Comparator, Natural};

/// An ordered multiset with `O(log n)` expected insertion, removal, search and rank queries.
///
/// Elements are kept sorted by the comparator `C`. Equivalent elements are allowed and keep
/// their insertion order. Every forward link carries the number of elements it skips, which
/// turns the usual search into an order-statistics search.
///
/// Nodes live in an arena owned by the list; links are slot indices and callers get
/// [Handle]s back instead of references.
///
/// The comparator must be a consistent strict weak order over every value ever inserted.
/// If it is not, the list stays memory safe but its ordering is unspecified.
pub struct SkipList<T, C = Natural, R = StdRng> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    tail: Option<usize>,
    level: usize,
    len: usize,
    stamp: u64,
    comparator: C,
    generator: LevelGenerator<R>,
}

impl<T> SkipList<T>
where
    T: Ord,
{
    pub fn new() -> Self {
        SkipList::with_comparator(Natural)
    }
}

impl<T> Default for SkipList<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> SkipList<T, C>
where
    C: Comparator<T>,
{
    /// Creates a list ordered by `comparator`, drawing heights from an entropy-seeded
    /// generator.
    pub fn with_comparator(comparator: C) -> Self {
        SkipList::with_generator(comparator, LevelGenerator::default())
    }
}

impl<T, C, R> SkipList<T, C, R> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len < 1
    }

    /// The number of levels currently in use, at least one.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Drops every element and returns the list to its freshly created state.
    ///
    /// Handles taken before the reset go stale.
    pub fn reset(&mut self) {
        let height = self.nodes[HEAD].height();

        self.nodes.clear();
        self.nodes.push(Node::head(height));
        self.free.clear();
        self.tail = None;
        self.level = 1;
        self.len = 0;
    }

    pub fn clear(&mut self) {
        self.reset()
    }

    /// Maps a handle to its arena slot, or `None` if the element is gone.
    fn resolve(&self, handle: Handle) -> Option<usize> {
        if handle.index == HEAD {
            return None;
        }

        let node = self.nodes.get(handle.index)?;

        (node.value.is_some() && node.stamp == handle.stamp).then_some(handle.index)
    }

    fn handle(&self, index: usize) -> Handle {
        Handle {
            index,
            stamp: self.nodes[index].stamp,
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.nodes[self.resolve(handle)?].value.as_ref()
    }

    pub fn front(&self) -> Option<Handle> {
        self.nodes[HEAD].next().map(|first| self.handle(first))
    }

    pub fn back(&self) -> Option<Handle> {
        self.tail.map(|last| self.handle(last))
    }

    pub fn first(&self) -> Option<&T> {
        self.get(self.front()?)
    }

    pub fn last(&self) -> Option<&T> {
        self.get(self.back()?)
    }

    /// The element after `handle`, or `None` at the end or for a stale handle.
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle)?;

        self.nodes[index].next().map(|next| self.handle(next))
    }

    /// The element before `handle`, or `None` at the front or for a stale handle.
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        let index = self.resolve(handle)?;

        self.nodes[index].backward.map(|prev| self.handle(prev))
    }

    /// Returns the element at 1-based position `rank`, or `None` when `rank` is outside
    /// `[1, len]`.
    pub fn get_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank == 0 || rank > self.len {
            return None;
        }

        let mut curr = HEAD;
        let mut traversed = 0;

        for level in (0..self.level).rev() {
            while let Some(next) = self.nodes[curr].levels[level].forward {
                let span = self.nodes[curr].levels[level].span;

                if traversed + span > rank {
                    break;
                }

                traversed += span;
                curr = next;
            }

            if traversed == rank {
                return Some(self.handle(curr));
            }
        }

        None
    }

    pub fn iter(&self) -> iter::Iter<'_, T> {
        iter::Iter::from_list(self)
    }

    /// Iterates over handles rather than values, front to back.
    pub fn handles(&self) -> iter::Handles<'_, T> {
        iter::Handles::from_list(self)
    }
}

impl<T, C, R> SkipList<T, C, R>
where
    C: Comparator<T>,
    R: RngCore,
{
    /// Creates a list ordered by `comparator` whose tower heights come from `generator`.
    ///
    /// The head tower is as tall as the generator's `max_level`.
    pub fn with_generator(comparator: C, generator: LevelGenerator<R>) -> Self {
        SkipList {
            nodes: vec![Node::head(generator.max_level())],
            free: Vec::new(),
            tail: None,
            level: 1,
            len: 0,
            stamp: 0,
            comparator,
            generator,
        }
    }

    /// Walks from the head down to level 0, stopping at every level on the last node that
    /// is strictly less than `target`.
    fn descend(&self, target: &T) -> Trail {
        let mut trail = Trail::new();
        let mut curr = HEAD;
        let mut traversed = 0;

        for level in (0..self.level).rev() {
            while let Some(next) = self.nodes[curr].levels[level].forward {
                match &self.nodes[next].value {
                    Some(value) if self.comparator.less(value, target) => {
                        traversed += self.nodes[curr].levels[level].span;
                        curr = next;
                    }
                    _ => break,
                }
            }

            trail.update[level] = curr;
            trail.rank[level] = traversed;
        }

        trail
    }

    /// Descends to the exact node at `index`, stepping past equivalent elements stored before
    /// it. Returns the trail together with the node's rank.
    fn locate(&self, index: usize) -> Option<(Trail, usize)> {
        let target = self.nodes[index].value.as_ref()?;
        let mut trail = self.descend(target);
        let mut rank = trail.rank[0];
        let mut cursor = self.nodes[trail.update[0]].next();

        loop {
            let curr = cursor?;
            rank += 1;

            if curr == index {
                return Some((trail, rank));
            }

            for level in 0..self.nodes[curr].height() {
                trail.update[level] = curr;
            }

            cursor = self.nodes[curr].next();
        }
    }

    fn matches(&self, index: usize, target: &T) -> bool {
        match &self.nodes[index].value {
            Some(value) => self.comparator.equivalent(value, target),
            None => false,
        }
    }

    fn alloc(&mut self, value: T, height: usize) -> usize {
        self.stamp += 1;
        let node = Node::new(value, height, self.stamp);

        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Inserts `value` after every element equivalent to it and returns its handle.
    pub fn insert(&mut self, value: T) -> Handle {
        let mut trail = self.descend(&value);
        let height = self.generator.next_level();

        if height > self.level {
            for level in self.level..height {
                trail.update[level] = HEAD;
                trail.rank[level] = 0;
                self.nodes[HEAD].levels[level].span = self.len;
            }

            self.level = height;
        }

        let index = self.alloc(value, height);

        for level in 0..height {
            let prev = trail.update[level];
            let skipped = trail.rank[0] - trail.rank[level];
            let link = self.nodes[prev].levels[level];

            self.nodes[index].levels[level] = Link {
                forward: link.forward,
                span: link.span - skipped,
            };
            self.nodes[prev].levels[level] = Link {
                forward: Some(index),
                span: skipped + 1,
            };
        }

        // levels the new tower does not reach now skip one more element
        for level in height..self.level {
            self.nodes[trail.update[level]].levels[level].span += 1;
        }

        if trail.update[0] != HEAD {
            self.nodes[index].backward = Some(trail.update[0]);
        }

        match self.nodes[index].next() {
            Some(next) => self.nodes[next].backward = Some(index),
            None => self.tail = Some(index),
        }

        self.len += 1;

        self.handle(index)
    }

    /// Splices the node at `index` out of every level, given the predecessors recorded for it.
    fn unlink(&mut self, index: usize, update: &[usize; MAX_LEVEL]) -> Option<T> {
        for (level, &prev) in update.iter().enumerate().take(self.level) {
            if self.nodes[prev].levels[level].forward == Some(index) {
                let link = self.nodes[index].levels[level];
                let prev_link = &mut self.nodes[prev].levels[level];

                prev_link.forward = link.forward;
                prev_link.span = prev_link.span + link.span - 1;
            } else {
                self.nodes[prev].levels[level].span -= 1;
            }
        }

        let backward = self.nodes[index].backward;

        match self.nodes[index].next() {
            Some(next) => self.nodes[next].backward = backward,
            None => self.tail = backward,
        }

        while self.level > 1 && self.nodes[HEAD].levels[self.level - 1].forward.is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        self.free.push(index);

        self.nodes[index].vacate()
    }

    /// Removes the first element equivalent to `value` and returns it.
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let trail = self.descend(value);
        let candidate = self.nodes[trail.update[0]].next()?;

        if !self.matches(candidate, value) {
            return None;
        }

        self.unlink(candidate, &trail.update)
    }

    /// Removes exactly the element behind `handle`, even among equivalent ones.
    ///
    /// The search lands on the first equivalent element and then steps forward to `handle`,
    /// so removing from a run of `d` equivalent elements costs `O(log n + d)`.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let index = self.resolve(handle)?;
        let (trail, _) = self.locate(index)?;

        self.unlink(index, &trail.update)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let first = self.nodes[HEAD].next()?;

        // every level of the first tower hangs off the head
        self.unlink(first, &[HEAD; MAX_LEVEL])
    }

    pub fn pop_back(&mut self) -> Option<T> {
        let last = self.tail?;
        let mut update = [HEAD; MAX_LEVEL];
        let mut curr = HEAD;
        let mut traversed = 0;

        // the tail always sits at rank `len`; stop every level just short of it
        for level in (0..self.level).rev() {
            while let Some(next) = self.nodes[curr].levels[level].forward {
                let span = self.nodes[curr].levels[level].span;

                if traversed + span >= self.len {
                    break;
                }

                traversed += span;
                curr = next;
            }

            update[level] = curr;
        }

        self.unlink(last, &update)
    }

    /// Finds the first element equivalent to `value`.
    pub fn find(&self, value: &T) -> Option<Handle> {
        let trail = self.descend(value);
        let candidate = self.nodes[trail.update[0]].next()?;

        self.matches(candidate, value).then(|| self.handle(candidate))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The 1-based rank of the first element equivalent to `value`, or 0 if there is none.
    pub fn rank(&self, value: &T) -> usize {
        let trail = self.descend(value);

        match self.nodes[trail.update[0]].next() {
            Some(candidate) if self.matches(candidate, value) => trail.rank[0] + 1,
            _ => 0,
        }
    }

    /// The 1-based rank of the element behind `handle`.
    pub fn rank_of(&self, handle: Handle) -> Option<usize> {
        let index = self.resolve(handle)?;

        self.locate(index).map(|(_, rank)| rank)
    }

    /// Checks every structural invariant: ordering and nesting of each level, span sums,
    /// backward links, the tail, the live level count and the length.
    pub fn verify(&self) -> Result<(), InvariantError> {
        let mut ranks = vec![0; self.nodes.len()];
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.nodes[HEAD].next();

        while let Some(curr) = cursor {
            count += 1;

            if count >= self.nodes.len() {
                return Err(InvariantError::Length {
                    expected: count,
                    found: self.len,
                });
            }

            ranks[curr] = count;

            if self.nodes[curr].backward != prev {
                return Err(InvariantError::Backward { rank: count });
            }

            prev = Some(curr);
            cursor = self.nodes[curr].next();
        }

        if count != self.len {
            return Err(InvariantError::Length {
                expected: count,
                found: self.len,
            });
        }

        if self.tail != prev {
            return Err(InvariantError::Tail);
        }

        let head = &self.nodes[HEAD];
        let occupied = (0..head.height())
            .rev()
            .find(|&level| head.levels[level].forward.is_some())
            .map_or(1, |level| level + 1);

        if occupied != self.level {
            return Err(InvariantError::Level {
                expected: occupied,
                found: self.level,
            });
        }

        for level in 0..self.level {
            let tall = self.nodes[1..]
                .iter()
                .filter(|node| node.value.is_some() && node.height() > level)
                .count();
            let mut linked = 0;
            let mut curr = HEAD;

            loop {
                let Some(&link) = self.nodes[curr].levels.get(level) else {
                    return Err(InvariantError::Nesting {
                        level,
                        expected: tall,
                        found: linked,
                    });
                };
                let expected = match link.forward {
                    Some(next) if ranks[next] > ranks[curr] => ranks[next] - ranks[curr],
                    Some(_) => {
                        return Err(InvariantError::Order {
                            level,
                            rank: ranks[curr],
                        })
                    }
                    None => self.len - ranks[curr],
                };

                if link.span != expected {
                    return Err(InvariantError::Span {
                        level,
                        rank: ranks[curr],
                        expected,
                        found: link.span,
                    });
                }

                let Some(next) = link.forward else {
                    break;
                };

                if let (Some(before), Some(after)) =
                    (&self.nodes[curr].value, &self.nodes[next].value)
                {
                    if self.comparator.less(after, before) {
                        return Err(InvariantError::Order {
                            level,
                            rank: ranks[next],
                        });
                    }
                }

                linked += 1;
                curr = next;
            }

            if linked != tall {
                return Err(InvariantError::Nesting {
                    level,
                    expected: tall,
                    found: linked,
                });
            }
        }

        Ok(())
    }
}

impl<T, C, R> Extend<T> for SkipList<T, C, R>
where
    C: Comparator<T>,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> FromIterator<T> for SkipList<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<T, C, R> Debug for SkipList<T, C, R>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Dumps every live level, one line each, head to end:
///
/// ```text
/// LEVEL[0]: 1 -> 2 -> 3 -> NULL
/// LEVEL[1]: 2 -> NULL
/// ```
impl<T, C, R> Display for SkipList<T, C, R>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in 0..self.level {
            write!(f, "LEVEL[{}]: ", level)?;

            let mut cursor = self.nodes[HEAD].levels[level].forward;

            while let Some(curr) = cursor {
                if let Some(value) = &self.nodes[curr].value {
                    write!(f, "{} -> ", value)?;
                }

                cursor = self.nodes[curr].levels[level].forward;
            }

            writeln!(f, "NULL")?;
        }

        Ok(())
    }
}

pub mod iter {
    use super::SkipList;
    use crate::internal::utils::{Handle, Node, HEAD};
    use core::iter::FusedIterator;
    use rand::RngCore;

    use crate::skiplist::Comparator;

    /// Walks level 0 from both ends until they meet.
    struct Cursor<'a, T> {
        nodes: &'a [Node<T>],
        front: Option<usize>,
        back: Option<usize>,
        remaining: usize,
    }

    impl<'a, T> Cursor<'a, T> {
        fn from_list<C, R>(list: &'a SkipList<T, C, R>) -> Self {
            Cursor {
                nodes: &list.nodes,
                front: list.nodes[HEAD].next(),
                back: list.tail,
                remaining: list.len,
            }
        }

        fn next_index(&mut self) -> Option<usize> {
            if self.remaining == 0 {
                return None;
            }

            let curr = self.front?;
            self.front = self.nodes[curr].next();
            self.remaining -= 1;

            Some(curr)
        }

        fn next_back_index(&mut self) -> Option<usize> {
            if self.remaining == 0 {
                return None;
            }

            let curr = self.back?;
            self.back = self.nodes[curr].backward;
            self.remaining -= 1;

            Some(curr)
        }
    }

    pub struct Iter<'a, T> {
        cursor: Cursor<'a, T>,
    }

    impl<'a, T> Iter<'a, T> {
        pub fn from_list<C, R>(list: &'a SkipList<T, C, R>) -> Self {
            Iter {
                cursor: Cursor::from_list(list),
            }
        }
    }

    impl<'a, T> Iterator for Iter<'a, T> {
        type Item = &'a T;

        fn next(&mut self) -> Option<Self::Item> {
            let index = self.cursor.next_index()?;

            self.cursor.nodes[index].value.as_ref()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.cursor.remaining, Some(self.cursor.remaining))
        }
    }

    impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
        fn next_back(&mut self) -> Option<Self::Item> {
            let index = self.cursor.next_back_index()?;

            self.cursor.nodes[index].value.as_ref()
        }
    }

    impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

    impl<'a, T> FusedIterator for Iter<'a, T> {}

    pub struct Handles<'a, T> {
        cursor: Cursor<'a, T>,
    }

    impl<'a, T> Handles<'a, T> {
        pub fn from_list<C, R>(list: &'a SkipList<T, C, R>) -> Self {
            Handles {
                cursor: Cursor::from_list(list),
            }
        }

        fn handle(&self, index: usize) -> Handle {
            Handle {
                index,
                stamp: self.cursor.nodes[index].stamp,
            }
        }
    }

    impl<'a, T> Iterator for Handles<'a, T> {
        type Item = Handle;

        fn next(&mut self) -> Option<Self::Item> {
            let index = self.cursor.next_index()?;

            Some(self.handle(index))
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.cursor.remaining, Some(self.cursor.remaining))
        }
    }

    impl<'a, T> DoubleEndedIterator for Handles<'a, T> {
        fn next_back(&mut self) -> Option<Self::Item> {
            let index = self.cursor.next_back_index()?;

            Some(self.handle(index))
        }
    }

    impl<'a, T> ExactSizeIterator for Handles<'a, T> {}

    impl<'a, T> FusedIterator for Handles<'a, T> {}

    /// Drains the list in order, popping from whichever end is asked for.
    pub struct IntoIter<T, C, R> {
        list: SkipList<T, C, R>,
    }

    impl<T, C, R> IntoIter<T, C, R> {
        pub fn from_list(list: SkipList<T, C, R>) -> Self {
            IntoIter { list }
        }
    }

    impl<T, C, R> Iterator for IntoIter<T, C, R>
    where
        C: Comparator<T>,
        R: RngCore,
    {
        type Item = T;

        fn next(&mut self) -> Option<Self::Item> {
            self.list.pop_front()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.list.len(), Some(self.list.len()))
        }
    }

    impl<T, C, R> DoubleEndedIterator for IntoIter<T, C, R>
    where
        C: Comparator<T>,
        R: RngCore,
    {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.list.pop_back()
        }
    }

    impl<T, C, R> ExactSizeIterator for IntoIter<T, C, R>
    where
        C: Comparator<T>,
        R: RngCore,
    {
    }

    impl<T, C, R> IntoIterator for SkipList<T, C, R>
    where
        C: Comparator<T>,
        R: RngCore,
    {
        type Item = T;
        type IntoIter = IntoIter<T, C, R>;

        fn into_iter(self) -> Self::IntoIter {
            IntoIter::from_list(self)
        }
    }

    impl<'a, T, C, R> IntoIterator for &'a SkipList<T, C, R> {
        type Item = &'a T;
        type IntoIter = Iter<'a, T>;

        fn into_iter(self) -> Self::IntoIter {
            self.iter()
        }
    }
}
