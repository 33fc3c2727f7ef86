use std::io::{Cursor, Read};

use byteorder::{NativeEndian, ReadBytesExt};

use crate::consts::{FLAG_BIT, MAGNITUDE_MASK};
use crate::error::{DecodeError, InputError};

/// Split an encoded wire integer into its sign-bit flag and 31-bit magnitude.
#[inline]
pub(crate) fn unpack_flagged(encoded: i32) -> (bool, i32) {
    (encoded < 0, encoded & MAGNITUDE_MASK)
}

/// Inverse of [`unpack_flagged`]. `magnitude` must already fit in 31 bits.
#[inline]
pub(crate) fn pack_flagged(flag: bool, magnitude: i32) -> i32 {
    let magnitude = magnitude & MAGNITUDE_MASK;
    if flag { magnitude | FLAG_BIT } else { magnitude }
}

/// Convert a non-negative length or index into a 31-bit wire field.
pub(crate) fn to_wire_field(field: &'static str, value: usize) -> Result<i32, InputError> {
    i32::try_from(value).map_err(|_| InputError::FieldOverflow {
        field,
        value: value as i64,
    })
}

pub(crate) fn read_i32(cursor: &mut Cursor<&[u8]>) -> Result<i32, DecodeError> {
    let offset = cursor.position() as usize;
    cursor
        .read_i32::<NativeEndian>()
        .map_err(|_| DecodeError::Truncated {
            offset,
            needed: 4,
            len: cursor.get_ref().len(),
        })
}

/// Read an int32 that must not be negative (a count, length or offset).
pub(crate) fn read_count(
    cursor: &mut Cursor<&[u8]>,
    field: &'static str,
) -> Result<usize, DecodeError> {
    let offset = cursor.position() as usize;
    let value = read_i32(cursor)?;
    if value < 0 {
        return Err(DecodeError::NegativeField {
            field,
            offset,
            value,
        });
    }
    Ok(value as usize)
}

/// Check that `needed` more bytes are available without reading them.
pub(crate) fn ensure_remaining(cursor: &Cursor<&[u8]>, needed: usize) -> Result<(), DecodeError> {
    let offset = cursor.position() as usize;
    let len = cursor.get_ref().len();
    match offset.checked_add(needed) {
        Some(end) if end <= len => Ok(()),
        _ => Err(DecodeError::Truncated {
            offset,
            needed,
            len,
        }),
    }
}

pub(crate) fn skip(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<(), DecodeError> {
    ensure_remaining(cursor, len)?;
    cursor.set_position(cursor.position() + len as u64);
    Ok(())
}

pub(crate) fn read_bytes(cursor: &mut Cursor<&[u8]>, len: usize) -> Result<Vec<u8>, DecodeError> {
    ensure_remaining(cursor, len)?;
    let offset = cursor.position() as usize;
    let mut bytes = vec![0u8; len];
    cursor
        .read_exact(&mut bytes)
        .map_err(|_| DecodeError::Truncated {
            offset,
            needed: len,
            len: cursor.get_ref().len(),
        })?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(0, (false, 0))]
    #[case(17, (false, 17))]
    #[case(17 | i32::MIN, (true, 17))]
    #[case(-1, (true, i32::MAX))]
    #[case(i32::MIN, (true, 0))]
    fn test_unpack_flagged(#[case] encoded: i32, #[case] expected: (bool, i32)) {
        assert_eq!(unpack_flagged(encoded), expected);
    }

    #[rstest]
    fn test_pack_flagged_sets_sign_bit() {
        assert_eq!(pack_flagged(true, 5), 5 | i32::MIN);
        assert_eq!(pack_flagged(false, 5), 5);
        assert_eq!(unpack_flagged(pack_flagged(true, 123)), (true, 123));
    }

    #[rstest]
    fn test_read_count_rejects_negative() {
        let bytes = (-3i32).to_ne_bytes();
        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(
            read_count(&mut cursor, "sequence length").unwrap_err(),
            DecodeError::NegativeField {
                field: "sequence length",
                offset: 0,
                value: -3
            }
        );
    }

    #[rstest]
    fn test_short_reads_report_offset() {
        let bytes = [1u8, 2, 3, 4, 5, 6];
        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(
            read_i32(&mut cursor).unwrap(),
            i32::from_ne_bytes([1, 2, 3, 4])
        );
        assert!(skip(&mut cursor, 3).is_err());
        assert_eq!(read_bytes(&mut cursor, 2).unwrap(), vec![5, 6]);
        assert_eq!(
            read_i32(&mut cursor).unwrap_err(),
            DecodeError::Truncated {
                offset: 6,
                needed: 4,
                len: 6
            }
        );
    }
}
