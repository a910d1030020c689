//! The genome-wide tree of feature annotations.
//!
//! A [`GtfTree`] goes through a fixed lifecycle:
//!
//! 1. [`GtfTree::new`] creates an empty tree.
//! 2. [`GtfTree::add_entry`] files records under their chromosome, in any order.
//! 3. [`GtfTree::balance`] sorts and balances every chromosome, once.
//! 4. [`GtfTree::find_overlaps`] and friends answer queries, any number of times.
//! 5. [`GtfTree::destroy`] (or simply dropping the tree) releases everything.
//!
//! Calls made in the wrong phase fail with a [`StateError`].
//!
//! # Examples
//!
//! ```
//! use gtftree_overlaprs::{GtfTree, QueryFilter};
//!
//! let mut tree = GtfTree::new();
//! tree.add_entry("chr1", 100, 200, 0, Some("geneA"), 0).unwrap();
//! tree.add_entry("chr1", 150, 250, 1, Some("geneB"), 0).unwrap();
//! tree.add_entry("chr1", 300, 400, 3, Some("geneC"), 1).unwrap();
//! tree.balance().unwrap();
//!
//! let hits = tree.find_overlaps("chr1", 180, 210, &QueryFilter::default()).unwrap();
//! let names: Vec<_> = hits.iter().filter_map(|e| e.name.as_deref()).collect();
//! assert_eq!(names, vec!["geneA", "geneB"]);
//!
//! assert!(tree.find_overlaps("chr1", 260, 290, &QueryFilter::default()).unwrap().is_empty());
//! tree.destroy();
//! ```

use std::fmt::Debug;
use std::io::{self, Write};

use log::debug;
use num_traits::PrimInt;

use gtftree_core::errors::{Result, StateError, ValidationError};
use gtftree_core::models::Entry;
use gtftree_core::utils::build_entry;

use crate::chrom_table::{ChromTable, ChromTree};
use crate::query::{QueryFilter, QueryRegion};
use crate::traits::Overlapper;
use crate::vine::Vine;

/// Interval trees for every chromosome of a set of feature annotations.
///
/// Label indices are stored and returned exactly as given; resolving them to group
/// names is up to the caller.
#[derive(Debug, Clone, Default)]
pub struct GtfTree {
    table: ChromTable,
    balanced: bool,
}

impl GtfTree {
    /// Creates an empty tree, ready for ingestion.
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// File a feature under `chrom`.
    ///
    /// Coordinates, strand and label may be given in any primitive integer type; they
    /// are validated, in that order, before anything is stored:
    ///
    /// - `start >= end` is [`ValidationError::InvalidBounds`]
    /// - a coordinate that does not fit in 32 bits is [`ValidationError::CoordinateOutOfBounds`]
    /// - a strand other than 0, 1 or 3 is [`ValidationError::InvalidStrand`]
    /// - a label that does not fit in 32 bits is [`ValidationError::LabelOutOfBounds`]
    ///
    /// After [`balance`](Self::balance) this fails with [`StateError::Finalized`].
    ///
    pub fn add_entry<C, S, L>(
        &mut self,
        chrom: &str,
        start: C,
        end: C,
        strand: S,
        name: Option<&str>,
        label_idx: L,
    ) -> Result<()>
    where
        C: PrimInt + Debug,
        S: PrimInt + Debug,
        L: PrimInt + Debug,
    {
        let entry = build_entry(start, end, strand, name, label_idx)?;
        if self.balanced {
            return Err(StateError::Finalized.into());
        }
        self.table.get_or_insert(chrom)?.push(entry)
    }

    ///
    /// Sort and balance every chromosome, making the tree queryable and read-only.
    ///
    /// May only be called once; a second call fails with [`StateError::AlreadyBalanced`].
    /// Storage for every chromosome is reserved before any of them is touched, so an
    /// allocation failure leaves the whole tree open and unchanged.
    ///
    pub fn balance(&mut self) -> Result<()> {
        if self.balanced {
            return Err(StateError::AlreadyBalanced.into());
        }

        let mut vines = Vec::new();
        vines.try_reserve_exact(self.table.len())?;
        for (_, tree) in self.table.iter() {
            vines.push(Vine::try_with_capacity(tree.len())?);
        }

        for ((chrom, tree), vine) in self.table.iter_mut().zip(vines) {
            tree.seal(vine);
            debug!(
                "balanced {chrom}: {} entries, height {}",
                tree.len(),
                tree.as_sealed().map_or(0, |t| t.height())
            );
        }
        self.balanced = true;

        Ok(())
    }

    ///
    /// Lazily iterate over the entries on `chrom` overlapping the half-open range
    /// `[start, end)` and passing `filter`, ascending by start.
    ///
    /// An unknown chromosome yields nothing. `start >= end` is a
    /// [`ValidationError::InvalidBounds`]; querying before [`balance`](Self::balance) is a
    /// [`StateError::NotBalanced`].
    ///
    pub fn find_overlaps_iter<'a>(
        &'a self,
        chrom: &str,
        start: u32,
        end: u32,
        filter: &QueryFilter,
    ) -> Result<Box<dyn Iterator<Item = &'a Entry> + 'a>> {
        if start >= end {
            return Err(
                ValidationError::InvalidBounds(start.to_string(), end.to_string()).into(),
            );
        }
        if !self.balanced {
            return Err(StateError::NotBalanced.into());
        }

        let filter = *filter;
        match self.table.get(chrom).and_then(ChromTree::as_sealed) {
            Some(tree) => Ok(Box::new(
                tree.find_iter(start, end)
                    .filter(move |entry| filter.matches(entry)),
            )),
            None => Ok(Box::new(std::iter::empty())),
        }
    }

    /// Collect the overlaps on `chrom` into a vector. See
    /// [`find_overlaps_iter`](Self::find_overlaps_iter).
    pub fn find_overlaps(
        &self,
        chrom: &str,
        start: u32,
        end: u32,
        filter: &QueryFilter,
    ) -> Result<Vec<Entry>> {
        Ok(self
            .find_overlaps_iter(chrom, start, end, filter)?
            .cloned()
            .collect())
    }

    /// Count the overlaps on `chrom` without collecting them.
    pub fn count_overlaps(
        &self,
        chrom: &str,
        start: u32,
        end: u32,
        filter: &QueryFilter,
    ) -> Result<usize> {
        Ok(self.find_overlaps_iter(chrom, start, end, filter)?.count())
    }

    /// Query several regions at once. Hits come back grouped by query region, in the order
    /// the regions were given, each paired with its chromosome.
    pub fn find_overlaps_many(
        &self,
        regions: &[QueryRegion],
        filter: &QueryFilter,
    ) -> Result<Vec<(String, Entry)>> {
        let mut hits = Vec::new();
        for region in regions {
            for entry in self.find_overlaps_iter(&region.chrom, region.start, region.end, filter)? {
                hits.push((region.chrom.clone(), entry.clone()));
            }
        }
        Ok(hits)
    }

    /// Release every chromosome and entry. The tree cannot be used afterwards.
    pub fn destroy(self) {
        debug!(
            "releasing {} entries on {} chromosomes",
            self.len(),
            self.n_chroms()
        );
        drop(self);
    }

    /// Total number of entries across all chromosomes.
    pub fn len(&self) -> usize {
        self.table.iter().map(|(_, tree)| tree.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn n_chroms(&self) -> usize {
        self.table.len()
    }

    /// Chromosome names in the order they were first seen.
    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }

    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    /// Number of entries filed under `chrom`, or `None` for an unknown chromosome.
    pub fn chrom_len(&self, chrom: &str) -> Option<usize> {
        self.table.get(chrom).map(ChromTree::len)
    }

    /// Height of the balanced tree for `chrom`, or `None` if it is unknown or not yet
    /// balanced.
    pub fn chrom_height(&self, chrom: &str) -> Option<usize> {
        self.table
            .get(chrom)
            .and_then(ChromTree::as_sealed)
            .map(|tree| tree.height())
    }

    ///
    /// Dump the tree as tab separated text, one line per entry:
    /// `chrom, start, end, strand, name, label`, followed by the subtree `max_end` once
    /// the tree is balanced.
    ///
    /// Chromosomes are written in first-seen order; entries in insertion order before
    /// balancing and in tree order afterwards.
    ///
    pub fn write_tree<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (chrom, tree) in self.table.iter() {
            match tree {
                ChromTree::Open(entries) => {
                    for entry in entries {
                        writeln!(writer, "{chrom}\t{entry}")?;
                    }
                }
                ChromTree::Sealed(tree) => {
                    for node in tree.iter_nodes() {
                        writeln!(writer, "{chrom}\t{}\t{}", node.entry, node.max_end)?;
                    }
                }
            }
        }
        Ok(())
    }
}
