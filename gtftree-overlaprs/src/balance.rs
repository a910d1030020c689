//! Day-Stout-Warren balancing.
//!
//! A sorted [`Vine`] is collapsed into a complete binary search tree by rounds of left
//! rotations along its right spine, in O(n) time and without extra storage beyond the
//! node arena. The subtree `max_end` augmentation is filled in afterwards in a single
//! bottom-up pass.
//!
//! With `n` nodes, the first round rotates away the
//! `n + 1 - 2^floor(log2(n + 1))` nodes that will not fit in a perfect tree; every
//! following round halves the length of the spine until a single root remains. The
//! result has height `floor(log2(n)) + 1` and the same in-order sequence as the vine.

use gtftree_core::models::Entry;

use crate::augmented_tree::{AugmentedTree, Node};
use crate::vine::Vine;

/// Sorts entries by `(start, end)`. The sort is stable, so entries with identical bounds
/// keep the order they were added in.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by_key(|entry| entry.sort_key());
}

/// Collapses a vine into a balanced, augmented tree, preserving its in-order sequence.
pub fn collapse(vine: Vine) -> AugmentedTree {
    let Vine { mut nodes, head } = vine;
    let mut root = head;

    let n = nodes.len();
    if n > 1 {
        let leaves = n + 1 - (1usize << (n + 1).ilog2());
        compress(&mut nodes, &mut root, leaves);

        let mut spine = n - leaves;
        while spine > 1 {
            spine /= 2;
            compress(&mut nodes, &mut root, spine);
        }
    }

    augment(&mut nodes, root);
    AugmentedTree::from_parts(nodes, root)
}

/// Performs `count` left rotations down the right spine, starting at the root.
///
/// Each rotation lifts the right child of the current spine node over it, so the
/// rotated node becomes the left child of its successor and the spine shortens by one.
fn compress(nodes: &mut [Node], root: &mut Option<usize>, count: usize) {
    // `None` stands for a pseudo-root whose right child is `root`
    let mut scanner: Option<usize> = None;

    for _ in 0..count {
        let child = match scanner {
            Some(idx) => nodes[idx].right,
            None => *root,
        };
        // counts never exceed the spine length, so both links exist
        let Some(child) = child else { break };
        let Some(next) = nodes[child].right else { break };

        match scanner {
            Some(idx) => nodes[idx].right = Some(next),
            None => *root = Some(next),
        }
        nodes[child].right = nodes[next].left;
        nodes[next].left = Some(child);

        scanner = Some(next);
    }
}

/// Sets `max_end` on every node below `idx` and returns the value for `idx` itself.
fn augment(nodes: &mut [Node], idx: Option<usize>) -> Option<u32> {
    let idx = idx?;
    let left = augment(nodes, nodes[idx].left);
    let right = augment(nodes, nodes[idx].right);

    let node = &mut nodes[idx];
    node.max_end = [left, right]
        .into_iter()
        .flatten()
        .fold(node.entry.end, u32::max);
    Some(node.max_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    use gtftree_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::vine::linearize;

    fn iv(start: u32, end: u32) -> Entry {
        Entry {
            start,
            end,
            strand: Strand::Unstranded,
            name: None,
            label_idx: start,
        }
    }

    fn vine_of(n: u32) -> Vine {
        linearize((0..n).map(|i| iv(i * 10, i * 10 + 5)).collect()).unwrap()
    }

    fn minimal_height(n: usize) -> usize {
        if n == 0 { 0 } else { n.ilog2() as usize + 1 }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    #[case(7)]
    #[case(8)]
    #[case(15)]
    #[case(16)]
    #[case(100)]
    #[case(1023)]
    #[case(1024)]
    #[case(5000)]
    fn test_collapse_minimizes_height(#[case] n: u32) {
        let vine = vine_of(n);
        let before: Vec<Entry> = vine.iter().cloned().collect();

        let tree = collapse(vine);

        assert_eq!(tree.len(), n as usize);
        assert_eq!(tree.height(), minimal_height(n as usize));
        assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[rstest]
    fn test_collapse_three_nodes() {
        let tree = collapse(vine_of(3));
        let root = tree.root().unwrap();

        assert_eq!(root.entry.start, 10);
        assert_eq!(tree.node(root.left.unwrap()).unwrap().entry.start, 0);
        assert_eq!(tree.node(root.right.unwrap()).unwrap().entry.start, 20);
    }

    #[rstest]
    fn test_collapse_seven_nodes_is_perfect() {
        let tree = collapse(vine_of(7));
        let root = tree.root().unwrap();
        assert_eq!(root.entry.start, 30);

        // every internal node has two children, every leaf is at depth 3
        let leaves = tree
            .iter_nodes()
            .filter(|node| node.left.is_none() && node.right.is_none())
            .count();
        assert_eq!(leaves, 4);
        assert!(tree
            .iter_nodes()
            .all(|node| node.left.is_some() == node.right.is_some()));
    }

    #[rstest]
    fn test_augment_max_end() {
        let vine = linearize(vec![iv(0, 100), iv(10, 20), iv(30, 40), iv(50, 60), iv(70, 80)]).unwrap();
        let tree = collapse(vine);

        assert_eq!(tree.root().unwrap().max_end, 100);
        for node in tree.iter_nodes() {
            let children = [node.left, node.right]
                .into_iter()
                .flatten()
                .map(|idx| tree.node(idx).unwrap().max_end);
            assert_eq!(node.max_end, children.fold(node.entry.end, u32::max));
        }
    }

    #[rstest]
    fn test_sort_entries_is_stable() {
        let mut entries = vec![
            Entry { label_idx: 0, ..iv(5, 10) },
            Entry { label_idx: 1, ..iv(1, 10) },
            Entry { label_idx: 2, ..iv(5, 10) },
            Entry { label_idx: 3, ..iv(5, 7) },
        ];
        sort_entries(&mut entries);

        let labels: Vec<u32> = entries.iter().map(|e| e.label_idx).collect();
        assert_eq!(labels, vec![1, 3, 0, 2]);
    }
}
