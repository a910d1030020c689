//! The vine: a fully right-leaning chain of nodes, the intermediate form between a
//! sorted list of entries and a balanced [`AugmentedTree`](crate::AugmentedTree).

use gtftree_core::errors::Result;
use gtftree_core::models::Entry;

use crate::augmented_tree::Node;

/// A degenerate tree in which every node only has a right child.
///
/// Node `i` of the arena links to node `i + 1`, so the head is always index 0 and the
/// chain order is the order entries were pushed.
#[derive(Debug, Clone, Default)]
pub struct Vine {
    pub(crate) nodes: Vec<Node>,
    pub(crate) head: Option<usize>,
}

impl Vine {
    /// Creates an empty vine with room for `capacity` nodes, failing instead of
    /// aborting when the allocation cannot be made.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Vine { nodes, head: None })
    }

    /// Appends an entry at the tail of the chain.
    pub fn push(&mut self, entry: Entry) {
        let idx = self.nodes.len();
        match idx.checked_sub(1) {
            Some(tail) => self.nodes[tail].right = Some(idx),
            None => self.head = Some(idx),
        }
        self.nodes.push(Node::new(entry));
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Follows the right links from the head.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        std::iter::successors(self.head, |&idx| self.nodes[idx].right)
            .map(|idx| &self.nodes[idx].entry)
    }
}

impl Extend<Entry> for Vine {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        for entry in iter {
            self.push(entry);
        }
    }
}

/// Turns already sorted entries into a vine, keeping their order.
pub fn linearize(sorted: Vec<Entry>) -> Result<Vine> {
    let mut vine = Vine::try_with_capacity(sorted.len())?;
    vine.extend(sorted);
    Ok(vine)
}
