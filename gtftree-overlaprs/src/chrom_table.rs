//! Per-chromosome storage of entries.
//!
//! Each chromosome owns a [`ChromTree`] which is either still open for ingestion (an
//! unsorted, append-only list) or sealed into an [`AugmentedTree`]. The [`ChromTable`]
//! maps chromosome names to trees and remembers the order in which names first appeared.

use fxhash::FxHashMap as HashMap;
use log::trace;

use gtftree_core::errors::{Result, StateError};
use gtftree_core::models::Entry;

use crate::augmented_tree::AugmentedTree;
use crate::balance::{collapse, sort_entries};
use crate::vine::Vine;

/// All entries of one chromosome.
#[derive(Debug, Clone)]
pub enum ChromTree {
    /// Accepting entries, in insertion order.
    Open(Vec<Entry>),
    /// Balanced and read-only.
    Sealed(AugmentedTree),
}

impl Default for ChromTree {
    fn default() -> Self {
        ChromTree::Open(Vec::new())
    }
}

impl ChromTree {
    pub fn len(&self) -> usize {
        match self {
            ChromTree::Open(entries) => entries.len(),
            ChromTree::Sealed(tree) => tree.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self, ChromTree::Sealed(_))
    }

    pub fn as_sealed(&self) -> Option<&AugmentedTree> {
        match self {
            ChromTree::Sealed(tree) => Some(tree),
            ChromTree::Open(_) => None,
        }
    }

    /// Appends an entry. Amortized O(1); fails if the tree is sealed or the list
    /// cannot grow, leaving the tree as it was.
    pub fn push(&mut self, entry: Entry) -> Result<()> {
        match self {
            ChromTree::Open(entries) => {
                entries.try_reserve(1)?;
                entries.push(entry);
                Ok(())
            }
            ChromTree::Sealed(_) => Err(StateError::Finalized.into()),
        }
    }

    /// Sorts the open entries into `vine` and collapses it into a balanced tree.
    ///
    /// `vine` should be empty with capacity for every entry, so that sealing itself never
    /// allocates. Sealing an already sealed tree is a no-op.
    pub fn seal(&mut self, mut vine: Vine) {
        if let ChromTree::Open(entries) = self {
            let mut entries = std::mem::take(entries);
            sort_entries(&mut entries);
            vine.extend(entries);
            *self = ChromTree::Sealed(collapse(vine));
        }
    }

    /// Entries in insertion order while open, ascending by `(start, end)` once sealed.
    pub fn entries(&self) -> Box<dyn Iterator<Item = &Entry> + '_> {
        match self {
            ChromTree::Open(entries) => Box::new(entries.iter()),
            ChromTree::Sealed(tree) => Box::new(tree.iter()),
        }
    }
}

/// Chromosome name to [`ChromTree`] mapping, enumerated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ChromTable {
    index: HashMap<String, usize>,
    chroms: Vec<(String, ChromTree)>,
}

impl ChromTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.chroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    pub fn get(&self, chrom: &str) -> Option<&ChromTree> {
        self.index.get(chrom).map(|&idx| &self.chroms[idx].1)
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.index.contains_key(chrom)
    }

    /// Looks up a chromosome, creating an empty open tree for it on first sight.
    ///
    /// A newly created tree already has room for one entry, so the first push into it
    /// cannot fail on allocation.
    pub fn get_or_insert(&mut self, chrom: &str) -> Result<&mut ChromTree> {
        let idx = match self.index.get(chrom) {
            Some(&idx) => idx,
            None => {
                let mut entries = Vec::new();
                entries.try_reserve(1)?;
                self.chroms.try_reserve(1)?;
                self.index.try_reserve(1)?;

                trace!("adding chromosome {chrom}");
                let idx = self.chroms.len();
                self.index.insert(chrom.to_string(), idx);
                self.chroms.push((chrom.to_string(), ChromTree::Open(entries)));
                idx
            }
        };
        Ok(&mut self.chroms[idx].1)
    }

    /// Chromosome names in the order they were first added.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chroms.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChromTree)> {
        self.chroms.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ChromTree)> {
        self.chroms.iter_mut().map(|(name, tree)| (name.as_str(), tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use gtftree_core::errors::GtfTreeError;
    use gtftree_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn iv(start: u32, end: u32) -> Entry {
        Entry {
            start,
            end,
            strand: Strand::Unstranded,
            name: None,
            label_idx: 0,
        }
    }

    #[rstest]
    fn test_lazy_creation_keeps_first_seen_order() {
        let mut table = ChromTable::new();
        for chrom in ["chr2", "chr1", "chr2", "chrX", "chr1"] {
            table.get_or_insert(chrom).unwrap().push(iv(1, 2)).unwrap();
        }

        assert_eq!(table.len(), 3);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["chr2", "chr1", "chrX"]);
        assert_eq!(table.get("chr2").unwrap().len(), 2);
        assert_eq!(table.get("chrX").unwrap().len(), 1);
        assert!(table.get("chr3").is_none());
        assert!(!table.contains("chr3"));
    }

    #[rstest]
    fn test_seal_sorts_and_balances() {
        let mut tree = ChromTree::default();
        for (start, end) in [(50, 60), (10, 20), (30, 40), (10, 15)] {
            tree.push(iv(start, end)).unwrap();
        }
        assert!(!tree.is_sealed());

        let vine = Vine::try_with_capacity(tree.len()).unwrap();
        tree.seal(vine);

        assert!(tree.is_sealed());
        assert_eq!(tree.len(), 4);
        let keys: Vec<_> = tree.entries().map(|e| e.sort_key()).collect();
        assert_eq!(keys, vec![(10, 15), (10, 20), (30, 40), (50, 60)]);
        assert_eq!(tree.as_sealed().unwrap().height(), 3);
    }

    #[rstest]
    fn test_push_after_seal_fails() {
        let mut tree = ChromTree::default();
        tree.push(iv(1, 2)).unwrap();
        tree.seal(Vine::default());

        let err = tree.push(iv(3, 4)).unwrap_err();
        assert!(matches!(err, GtfTreeError::State(StateError::Finalized)));
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_open_entries_keep_insertion_order() {
        let mut tree = ChromTree::default();
        tree.push(iv(9, 10)).unwrap();
        tree.push(iv(1, 2)).unwrap();

        let keys: Vec<_> = tree.entries().map(|e| e.sort_key()).collect();
        assert_eq!(keys, vec![(9, 10), (1, 2)]);
    }
}
