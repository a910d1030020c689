use gtftree_core::errors::Result;
use gtftree_core::models::Entry;

use crate::balance::{collapse, sort_entries};
use crate::traits::Overlapper;
use crate::vine::linearize;

/// A node of an [`AugmentedTree`]. Children are indices into the tree's node arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub entry: Entry,
    pub left: Option<usize>,
    pub right: Option<usize>,
    /// The largest `end` in the subtree rooted here, this node included.
    pub max_end: u32,
}

impl Node {
    pub fn new(entry: Entry) -> Self {
        let max_end = entry.end;
        Node {
            entry,
            left: None,
            right: None,
            max_end,
        }
    }
}

/// A height-balanced binary search tree of [`Entry`] values keyed by `(start, end)`,
/// augmented with the maximum `end` of every subtree.
///
/// Nodes live in a single arena and refer to each other by index. The tree is built
/// once, from a [`Vine`](crate::vine::Vine), and is read-only afterwards.
///
/// # Examples
///
/// ```
/// use gtftree_overlaprs::{AugmentedTree, Overlapper};
/// use gtftree_core::models::{Entry, Strand};
///
/// let entry = |start: u32, end: u32, name: &str| Entry {
///     start,
///     end,
///     strand: Strand::Unstranded,
///     name: Some(name.to_string()),
///     label_idx: 0,
/// };
///
/// let tree = AugmentedTree::build(vec![
///     entry(300, 400, "geneC"),
///     entry(100, 200, "geneA"),
///     entry(150, 250, "geneB"),
/// ])
/// .unwrap();
///
/// let names: Vec<_> = tree
///     .find_iter(180, 210)
///     .filter_map(|e| e.name.as_deref())
///     .collect();
/// assert_eq!(names, vec!["geneA", "geneB"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AugmentedTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl AugmentedTree {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: Option<usize>) -> Self {
        AugmentedTree { nodes, root }
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.map(|idx| &self.nodes[idx])
    }

    pub fn node(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// Number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    pub fn height(&self) -> usize {
        fn height_of(nodes: &[Node], idx: Option<usize>) -> usize {
            match idx {
                Some(idx) => {
                    1 + height_of(nodes, nodes[idx].left).max(height_of(nodes, nodes[idx].right))
                }
                None => 0,
            }
        }
        height_of(&self.nodes, self.root)
    }

    /// In-order traversal of the nodes, i.e. ascending by `(start, end)`.
    pub fn iter_nodes(&self) -> IterNodes<'_> {
        IterNodes {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
        }
    }

    /// In-order traversal of the entries.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.iter_nodes().map(|node| &node.entry)
    }

    /// Lazily yields every entry overlapping the half-open range `[start, end)`,
    /// ascending by start.
    pub fn iter_find(&self, start: u32, end: u32) -> IterFind<'_> {
        IterFind {
            nodes: &self.nodes,
            stack: Vec::new(),
            cursor: self.root,
            start,
            end,
        }
    }

    /// Counts the entries overlapping `[start, end)` without allocating a result vector.
    pub fn count(&self, start: u32, end: u32) -> usize {
        self.iter_find(start, end).count()
    }
}

impl Overlapper for AugmentedTree {
    /// Sort the entries by `(start, end)`, keeping insertion order among ties, and
    /// balance them into a new tree.
    fn build(mut entries: Vec<Entry>) -> Result<Self>
    where
        Self: Sized,
    {
        sort_entries(&mut entries);
        let vine = linearize(entries)?;
        Ok(collapse(vine))
    }

    fn find(&self, start: u32, end: u32) -> Vec<Entry> {
        self.iter_find(start, end).cloned().collect()
    }

    fn find_iter<'a>(&'a self, start: u32, end: u32) -> Box<dyn Iterator<Item = &'a Entry> + 'a> {
        Box::new(self.iter_find(start, end))
    }
}

/// In-order iterator over the nodes of an [`AugmentedTree`].
#[derive(Debug)]
pub struct IterNodes<'a> {
    nodes: &'a [Node],
    stack: Vec<usize>,
    cursor: Option<usize>,
}

impl<'a> Iterator for IterNodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        while let Some(idx) = self.cursor {
            self.stack.push(idx);
            self.cursor = nodes[idx].left;
        }
        let node = &nodes[self.stack.pop()?];
        self.cursor = node.right;
        Some(node)
    }
}

/// An iterator over the entries of an [`AugmentedTree`] that overlap a query range.
///
/// This struct is created by [`AugmentedTree::iter_find`] and by
/// [`find_iter`](Overlapper::find_iter). It walks the tree in order, skipping any subtree
/// whose `max_end` does not reach past the query start, and stops as soon as it reaches
/// an entry starting at or after the query end.
#[derive(Debug)]
pub struct IterFind<'a> {
    nodes: &'a [Node],
    stack: Vec<usize>,
    cursor: Option<usize>,
    start: u32,
    end: u32,
}

impl<'a> Iterator for IterFind<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        loop {
            // walk down the left spine, dropping subtrees that end before the query
            while let Some(idx) = self.cursor {
                let node = &nodes[idx];
                if node.max_end <= self.start {
                    self.cursor = None;
                } else {
                    self.stack.push(idx);
                    self.cursor = node.left;
                }
            }

            let node = &nodes[self.stack.pop()?];
            if node.entry.start >= self.end {
                // everything left in order starts at or after this node
                self.stack.clear();
                return None;
            }
            self.cursor = node.right;

            if node.entry.overlap(self.start, self.end) {
                return Some(&node.entry);
            }
        }
    }
}
