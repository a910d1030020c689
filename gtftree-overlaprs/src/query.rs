use std::fmt::{self, Display};

use gtftree_core::models::{Entry, Strand};

/// Post-filters applied to overlap candidates.
///
/// Filtering happens after the tree search and never changes which subtrees are
/// visited. An empty filter accepts every entry.
///
/// # Examples
///
/// ```
/// use gtftree_overlaprs::QueryFilter;
/// use gtftree_core::models::Strand;
///
/// let filter = QueryFilter::default().with_strand(Strand::Forward).with_label(2);
/// assert_eq!(filter.strand, Some(Strand::Forward));
/// assert_eq!(filter.label_idx, Some(2));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// Keep only entries on exactly this strand.
    pub strand: Option<Strand>,
    /// Keep only entries carrying exactly this label index.
    pub label_idx: Option<u32>,
}

impl QueryFilter {
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn with_label(mut self, label_idx: u32) -> Self {
        self.label_idx = Some(label_idx);
        self
    }

    #[inline]
    pub fn matches(&self, entry: &Entry) -> bool {
        self.strand.is_none_or(|strand| entry.strand == strand)
            && self.label_idx.is_none_or(|label| entry.label_idx == label)
    }
}

///
/// A region to look up with [`GtfTree::find_overlaps_many`](crate::GtfTree::find_overlaps_many).
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct QueryRegion {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
}

impl QueryRegion {
    pub fn new(chrom: &str, start: u32, end: u32) -> Self {
        QueryRegion {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }
}

impl Display for QueryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
