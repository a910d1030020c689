use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::ValidationError;

///
/// Strand of a feature. The numeric values are part of the external
/// interface and are kept as-is: 2 is not a valid strand.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Strand {
    Forward = 0,
    Reverse = 1,
    #[default]
    Unstranded = 3,
}

impl Strand {
    ///
    /// The GTF/BED column symbol for this strand.
    ///
    pub fn symbol(&self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::Unstranded => '.',
        }
    }
}

impl TryFrom<u8> for Strand {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Strand::Forward),
            1 => Ok(Strand::Reverse),
            3 => Ok(Strand::Unstranded),
            other => Err(ValidationError::InvalidStrand(other.to_string())),
        }
    }
}

impl From<Strand> for u8 {
    fn from(strand: Strand) -> Self {
        strand as u8
    }
}

impl FromStr for Strand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unstranded),
            other => Err(ValidationError::InvalidStrand(other.to_string())),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
