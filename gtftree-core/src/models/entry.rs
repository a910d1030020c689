use std::fmt::{self, Display};

use crate::models::Strand;

///
/// Entry struct, one genomic feature filed under a chromosome.
/// Represents the half-open range [start, end).
///
/// The chromosome name is the key the entry is filed under and is not
/// repeated here.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
    pub name: Option<String>,
    /// Index into a label table owned by the caller.
    pub label_idx: u32,
}

impl Entry {
    ///
    /// Get length of the entry
    ///
    pub fn width(&self) -> u32 {
        self.end - self.start
    }

    /// Key used to order entries in a balanced tree.
    #[inline]
    pub fn sort_key(&self) -> (u32, u32) {
        (self.start, self.end)
    }

    /// Check if the entry overlaps the half-open range [start, end)
    #[inline]
    pub fn overlap(&self, start: u32, end: u32) -> bool {
        self.start < end && self.end > start
    }

    ///
    /// Get a tab separated line for the entry: start, end, strand, name, label
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.start,
            self.end,
            self.strand,
            self.name.as_deref().unwrap_or("."),
            self.label_idx,
        )
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn entry() -> Entry {
        Entry {
            start: 100,
            end: 200,
            strand: Strand::Reverse,
            name: Some("geneA".to_string()),
            label_idx: 2,
        }
    }

    #[rstest]
    #[case(150, 160, true)]
    #[case(50, 101, true)]
    #[case(199, 300, true)]
    #[case(200, 300, false)]
    #[case(0, 100, false)]
    fn test_half_open_overlap(
        entry: Entry,
        #[case] start: u32,
        #[case] end: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(entry.overlap(start, end), expected);
    }

    #[rstest]
    fn test_width(entry: Entry) {
        assert_eq!(entry.width(), 100);
    }

    #[rstest]
    fn test_as_string(entry: Entry) {
        assert_eq!(entry.to_string(), "100\t200\t-\tgeneA\t2");

        let unnamed = Entry { name: None, ..entry };
        assert_eq!(unnamed.as_string(), "100\t200\t-\t.\t2");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_serde_round_trip(entry: Entry) {
        let json = serde_json::to_string(&entry).unwrap();
        let back: Entry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
