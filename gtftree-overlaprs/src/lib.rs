//! Interval trees over genomic feature annotations.
//!
//! This crate indexes GTF/BED-style feature records per chromosome and answers "which
//! features overlap this region" queries. Records are first collected unsorted, then
//! every chromosome is balanced once into an augmented binary search tree that keeps the
//! largest interval end of each subtree, so that queries can skip whole subtrees.
//!
//! Parsing annotation files and resolving label indices to group names are left to the
//! caller: this crate stores exactly the coordinates, strand, name and label index it is
//! given.
//!
//! ## Quick Start
//!
//! ```rust
//! use gtftree_overlaprs::{GtfTree, QueryFilter};
//! use gtftree_core::models::Strand;
//!
//! let mut tree = GtfTree::new();
//! tree.add_entry("chr1", 1000, 2000, 0, Some("BRCA1"), 0).unwrap();
//! tree.add_entry("chr1", 3000, 4000, 1, Some("TP53"), 0).unwrap();
//! tree.add_entry("chr2", 5000, 6000, 3, Some("EGFR"), 1).unwrap();
//!
//! // vine -> tree
//! tree.balance().unwrap();
//!
//! let hits = tree.find_overlaps("chr1", 1500, 3500, &QueryFilter::default()).unwrap();
//! assert_eq!(hits.len(), 2);
//!
//! // only features on the reverse strand
//! let reverse = QueryFilter::default().with_strand(Strand::Reverse);
//! for entry in tree.find_overlaps_iter("chr1", 1500, 3500, &reverse).unwrap() {
//!     println!("Found overlap: {}", entry);
//! }
//! ```
//!
//! ## Thread safety
//!
//! Every structure here owns its data, so a balanced [`GtfTree`] is `Send + Sync` and
//! can be queried from many threads through shared references. Ingestion and balancing
//! take `&mut self` and so cannot race with queries.

/// Balanced, augmented search tree for one chromosome.
///
/// See [`AugmentedTree`] for details.
pub mod augmented_tree;

/// Day-Stout-Warren balancing of a vine into an [`AugmentedTree`].
pub mod balance;

/// Chromosome name to per-chromosome tree mapping.
pub mod chrom_table;

/// Genome-wide tree and its lifecycle.
///
/// See [`GtfTree`] for details.
pub mod gtf_tree;

/// Query filters and regions.
pub mod query;

/// Core traits for overlap operations.
///
/// See [`Overlapper`] for the main trait.
pub mod traits;

/// Right-leaning chain used as the input to balancing.
pub mod vine;

// re-exports
pub use self::augmented_tree::AugmentedTree;
pub use self::gtf_tree::GtfTree;
pub use self::query::{QueryFilter, QueryRegion};
pub use self::traits::Overlapper;
pub use gtftree_core::models::{Entry, Strand};
