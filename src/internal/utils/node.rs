/// One level of a tower: where it leads and how many elements the hop covers.
///
/// `span` counts level-0 steps from the owning node to `forward`. When `forward` is `None`
/// the span runs to the logical end of the list, so it equals the number of elements after
/// the owning node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Link {
    pub(crate) forward: Option<usize>,
    pub(crate) span: usize,
}

/// A tower in the node arena.
///
/// The head and vacant slots carry no value. A node's height is the length of `levels` and
/// is fixed when the node is created.
pub(crate) struct Node<T> {
    pub(crate) value: Option<T>,
    pub(crate) stamp: u64,
    pub(crate) backward: Option<usize>,
    pub(crate) levels: Vec<Link>,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, height: usize, stamp: u64) -> Self {
        Node {
            value: Some(value),
            stamp,
            backward: None,
            levels: vec![Link::default(); height],
        }
    }

    pub(crate) fn head(height: usize) -> Self {
        Node {
            value: None,
            stamp: 0,
            backward: None,
            levels: vec![Link::default(); height],
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.levels.len()
    }

    pub(crate) fn next(&self) -> Option<usize> {
        self.levels[0].forward
    }

    /// Empties a removed slot, handing back its value. Links are cleared so nothing can be
    /// reached through the slot afterwards.
    pub(crate) fn vacate(&mut self) -> Option<T> {
        self.backward = None;
        self.levels.clear();
        self.value.take()
    }
}
