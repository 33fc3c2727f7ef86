use std::io::Cursor;

use log::debug;

use fermigraph_core::models::{BasesAndQuals, SequencedRead};

use crate::consts::{READ_COUNT_LEN, READ_TERMINATOR};
use crate::error::{DecodeError, InputError};
use crate::wire::read_count;

///
/// Exact size of the read buffer for a set of reads: the read count plus, for each
/// read, its bases and quals with one terminator after each.
///
pub fn read_buffer_len<R: BasesAndQuals>(reads: &[R]) -> usize {
    reads
        .iter()
        .fold(READ_COUNT_LEN, |acc, read| acc + 2 * (read.bases().len() + 1))
}

fn validate_read<R: BasesAndQuals>(idx: usize, read: &R) -> Result<(), InputError> {
    let (bases, quals) = (read.bases(), read.quals());
    if bases.len() != quals.len() {
        return Err(InputError::LengthMismatch {
            read: idx,
            bases: bases.len(),
            quals: quals.len(),
        });
    }
    // the engine finds the end of each field by scanning for the terminator
    let nul = |field: &[u8]| field.iter().position(|&b| b == READ_TERMINATOR);
    if let Some(position) = nul(bases).or_else(|| nul(quals)) {
        return Err(InputError::EmbeddedNul {
            read: idx,
            position,
        });
    }
    Ok(())
}

///
/// Serialize reads into the buffer consumed by the assembly engine.
///
/// Layout, host byte order:
/// ```text
/// int32 readCount
/// repeat readCount times: bases, 0x00, quals, 0x00
/// ```
///
/// The buffer is sized exactly before it is filled and never grows. An empty
/// input yields a 4 byte buffer holding a zero read count.
///
/// # Arguments
/// - reads: anything that yields [`BasesAndQuals`], e.g. `&[SequencedRead]`
///
/// # Returns
/// - the encoded buffer, or an [`InputError`] if a read has mismatched bases and
///   quals or contains a NUL byte
pub fn encode_reads<I>(reads: I) -> Result<Vec<u8>, InputError>
where
    I: IntoIterator,
    I::Item: BasesAndQuals,
{
    let reads: Vec<I::Item> = reads.into_iter().collect();

    let read_count = i32::try_from(reads.len()).map_err(|_| InputError::TooManyReads {
        count: reads.len(),
    })?;
    for (idx, read) in reads.iter().enumerate() {
        validate_read(idx, read)?;
    }

    let capacity = read_buffer_len(&reads);
    let mut buffer = Vec::with_capacity(capacity);
    buffer.extend_from_slice(&read_count.to_ne_bytes());
    for read in &reads {
        buffer.extend_from_slice(read.bases());
        buffer.push(READ_TERMINATOR);
        buffer.extend_from_slice(read.quals());
        buffer.push(READ_TERMINATOR);
    }
    debug_assert_eq!(buffer.len(), capacity);

    debug!("Encoded {} reads into {} bytes", reads.len(), buffer.len());

    Ok(buffer)
}

///
/// Serialize reads of any type, given a projection onto [`BasesAndQuals`].
///
/// The projection runs exactly once per input element; its results are kept for
/// both the sizing and the filling pass.
///
pub fn encode_reads_with<I, T, R, F>(reads: I, projection: F) -> Result<Vec<u8>, InputError>
where
    I: IntoIterator<Item = T>,
    R: BasesAndQuals,
    F: FnMut(T) -> R,
{
    encode_reads(reads.into_iter().map(projection))
}

///
/// Parse a read buffer the way the assembly engine does.
///
/// The end of the bases is found by scanning for the terminator; the quals are
/// taken to be as long as the bases and must be followed by a terminator too.
///
pub fn decode_reads(buffer: &[u8]) -> Result<Vec<SequencedRead>, DecodeError> {
    let mut cursor = Cursor::new(buffer);
    let count = read_count(&mut cursor, "read count")?;

    // every read takes at least its two terminators
    let mut reads = Vec::with_capacity(count.min(buffer.len() / 2));
    let mut offset = READ_COUNT_LEN;
    for idx in 0..count {
        let rest = &buffer[offset..];
        let len = rest
            .iter()
            .position(|&b| b == READ_TERMINATOR)
            .ok_or(DecodeError::UnterminatedRead { read: idx, offset })?;
        let bases = rest[..len].to_vec();

        let quals_start = offset + len + 1;
        let quals_end = quals_start + len;
        if quals_end >= buffer.len() {
            return Err(DecodeError::Truncated {
                offset: quals_start,
                needed: len + 1,
                len: buffer.len(),
            });
        }
        if buffer[quals_end] != READ_TERMINATOR {
            return Err(DecodeError::UnterminatedRead {
                read: idx,
                offset: quals_start,
            });
        }
        let quals = buffer[quals_start..quals_end].to_vec();

        reads.push(SequencedRead::new(bases, quals));
        offset = quals_end + 1;
    }

    Ok(reads)
}

///
/// Number of reads declared at the start of a read buffer.
///
pub fn declared_read_count(buffer: &[u8]) -> Result<usize, DecodeError> {
    read_count(&mut Cursor::new(buffer), "read count")
}
