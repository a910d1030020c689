use std::fmt::Debug;

use num_traits::PrimInt;

use crate::errors::ValidationError;
use crate::models::{Entry, Strand};

///
/// Convert a raw interval to 32-bit genome coordinates.
///
/// Bounds are checked before representability, so an inverted interval is
/// reported as such even if one side would also overflow.
///
pub fn to_coordinates<C>(start: C, end: C) -> Result<(u32, u32), ValidationError>
where
    C: PrimInt + Debug,
{
    if start >= end {
        return Err(ValidationError::InvalidBounds(
            format!("{:?}", start),
            format!("{:?}", end),
        ));
    }
    match (start.to_u32(), end.to_u32()) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ValidationError::CoordinateOutOfBounds(
            format!("{:?}", start),
            format!("{:?}", end),
        )),
    }
}

///
/// Convert a raw strand value (0, 1 or 3) to a [`Strand`].
///
pub fn to_strand<S>(strand: S) -> Result<Strand, ValidationError>
where
    S: PrimInt + Debug,
{
    strand
        .to_u8()
        .ok_or_else(|| ValidationError::InvalidStrand(format!("{:?}", strand)))
        .and_then(Strand::try_from)
}

///
/// Convert a raw label index to the stored 32-bit form.
///
pub fn to_label_idx<L>(label_idx: L) -> Result<u32, ValidationError>
where
    L: PrimInt + Debug,
{
    label_idx
        .to_u32()
        .ok_or_else(|| ValidationError::LabelOutOfBounds(format!("{:?}", label_idx)))
}

///
/// Validate raw record fields and build an [`Entry`] from them.
///
/// Checks run in a fixed order: bounds, coordinate range, strand, label.
///
pub fn build_entry<C, S, L>(
    start: C,
    end: C,
    strand: S,
    name: Option<&str>,
    label_idx: L,
) -> Result<Entry, ValidationError>
where
    C: PrimInt + Debug,
    S: PrimInt + Debug,
    L: PrimInt + Debug,
{
    let (start, end) = to_coordinates(start, end)?;
    let strand = to_strand(strand)?;
    let label_idx = to_label_idx(label_idx)?;

    Ok(Entry {
        start,
        end,
        strand,
        name: name.map(str::to_string),
        label_idx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_valid_record() {
        let entry = build_entry(100u32, 200u32, 1u8, Some("geneB"), 4u32).unwrap();
        assert_eq!(
            entry,
            Entry {
                start: 100,
                end: 200,
                strand: Strand::Reverse,
                name: Some("geneB".to_string()),
                label_idx: 4,
            }
        );
    }

    #[rstest]
    #[case(100i64, 100i64)]
    #[case(200i64, 100i64)]
    fn test_invalid_bounds(#[case] start: i64, #[case] end: i64) {
        assert!(matches!(
            to_coordinates(start, end),
            Err(ValidationError::InvalidBounds(_, _))
        ));
    }

    #[rstest]
    #[case(0u64, 0x1_0000_0000u64)]
    #[case(0x1_0000_0000u64, 0x1_0000_0001u64)]
    fn test_coordinate_overflow(#[case] start: u64, #[case] end: u64) {
        assert!(matches!(
            to_coordinates(start, end),
            Err(ValidationError::CoordinateOutOfBounds(_, _))
        ));
    }

    #[rstest]
    fn test_max_end_is_representable() {
        assert_eq!(
            to_coordinates(0u64, 0xFFFF_FFFFu64).unwrap(),
            (0, u32::MAX)
        );
    }

    #[rstest]
    fn test_negative_start_is_out_of_bounds() {
        assert!(matches!(
            to_coordinates(-5i64, 10i64),
            Err(ValidationError::CoordinateOutOfBounds(_, _))
        ));
    }

    #[rstest]
    #[case(2i64)]
    #[case(-1i64)]
    #[case(300i64)]
    fn test_invalid_strand(#[case] strand: i64) {
        assert!(matches!(
            to_strand(strand),
            Err(ValidationError::InvalidStrand(_))
        ));
    }

    #[rstest]
    fn test_label_overflow() {
        assert_eq!(
            to_label_idx(0x1_0000_0000u64),
            Err(ValidationError::LabelOutOfBounds("4294967296".to_string()))
        );
    }

    #[rstest]
    fn test_validation_order() {
        // bad bounds win over a bad strand and a bad label
        let err = build_entry(10u64, 5u64, 2u8, None, u64::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBounds(_, _)));

        // a bad strand wins over a bad label
        let err = build_entry(5u64, 10u64, 2u8, None, u64::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStrand(_)));
    }
}
