use std::io::Cursor;

use log::debug;

use fermigraph_core::models::{Assembly, Connection, Contig};

use crate::consts::{ASSEMBLY_HEADER_LEN, CONNECTION_RECORD_LEN, CONTIG_HEADER_LEN};
use crate::error::{DecodeError, FermiError, InputError, Result};
use crate::wire::{
    pack_flagged, read_bytes, read_count, read_i32, skip, to_wire_field, unpack_flagged,
};

///
/// Decode the buffer produced by the assembly engine into an [`Assembly`].
///
/// Expected layout, host byte order:
/// ```text
/// int32 contigCount
/// int32 seqPoolOffset
/// repeat contigCount times:
///     int32 seqLen
///     int32 supportingReadCount
///     int32 connectionCount
///     repeat connectionCount times:
///         int32 overlapLen    (sign bit = isRC)
///         int32 targetId      (sign bit = isTargetRC)
/// at seqPoolOffset, repeat contigCount times:
///     byte[seqLen] sequence
///     byte[seqLen] perBaseCoverage
/// ```
///
/// Headers and sequence bytes live in two separate regions, so decoding runs two
/// passes. The first builds every contig, walking the headers with one cursor and
/// the sequence pool with another. The second walks the headers again and wires up
/// the connections, which can only be resolved once every contig exists.
///
/// The sign bit of `overlapLen` is always read as the `isRC` flag and is never
/// part of the overlap length.
///
/// # Arguments
/// - buffer: engine output; an empty buffer means the engine produced no assembly
///
/// # Returns
/// - the decoded assembly, [`FermiError::AssemblyFailure`] for an empty buffer, or
///   [`FermiError::Decode`] if the buffer breaks the layout
pub fn decode_assembly(buffer: &[u8]) -> Result<Assembly> {
    if buffer.is_empty() {
        return Err(FermiError::AssemblyFailure);
    }

    let contigs = build_contigs(buffer)?;
    let contigs = connect_contigs(buffer, contigs)?;

    let assembly = Assembly::new(contigs)?;
    debug!(
        "Decoded {} contigs with {} connections from {} bytes",
        assembly.len(),
        assembly.connection_count(),
        buffer.len()
    );

    Ok(assembly)
}

fn build_contigs(buffer: &[u8]) -> Result<Vec<Contig>> {
    let mut headers = Cursor::new(buffer);
    let contig_count = read_count(&mut headers, "contig count")?;
    let pool_offset = read_count(&mut headers, "sequence pool offset")?;
    if pool_offset < ASSEMBLY_HEADER_LEN || pool_offset > buffer.len() {
        return Err(DecodeError::PoolOffsetOutOfRange {
            offset: pool_offset,
            len: buffer.len(),
        }
        .into());
    }

    let mut pool = Cursor::new(buffer);
    pool.set_position(pool_offset as u64);

    let mut contigs = Vec::with_capacity(contig_count.min(buffer.len() / CONTIG_HEADER_LEN));
    for _ in 0..contig_count {
        let seq_len = read_count(&mut headers, "sequence length")?;
        let supporting_reads = read_count(&mut headers, "supporting read count")?;
        let connection_count = read_count(&mut headers, "connection count")?;
        let records_len = connection_count
            .checked_mul(CONNECTION_RECORD_LEN)
            .ok_or(DecodeError::Truncated {
                offset: headers.position() as usize,
                needed: usize::MAX,
                len: buffer.len(),
            })?;
        skip(&mut headers, records_len)?;

        let sequence = read_bytes(&mut pool, seq_len)?;
        let coverage = read_bytes(&mut pool, seq_len)?;
        contigs.push(Contig::new(sequence, coverage, supporting_reads as u32)?);
    }

    let headers_end = headers.position() as usize;
    if headers_end > pool_offset {
        return Err(DecodeError::PoolOverlapsHeaders {
            pool: pool_offset,
            headers_end,
        }
        .into());
    }

    Ok(contigs)
}

fn connect_contigs(buffer: &[u8], mut contigs: Vec<Contig>) -> Result<Vec<Contig>> {
    let contig_count = contigs.len();
    let mut headers = Cursor::new(buffer);
    headers.set_position(ASSEMBLY_HEADER_LEN as u64);

    for (idx, contig) in contigs.iter_mut().enumerate() {
        read_i32(&mut headers)?; // sequence length
        read_i32(&mut headers)?; // supporting read count
        let connection_count = read_count(&mut headers, "connection count")?;

        let mut connections = Vec::with_capacity(connection_count);
        for _ in 0..connection_count {
            let offset = headers.position() as usize;
            let (is_rc, overlap_len) = unpack_flagged(read_i32(&mut headers)?);
            let (is_target_rc, target) = unpack_flagged(read_i32(&mut headers)?);

            let target = target as usize;
            if target >= contig_count {
                return Err(DecodeError::TargetOutOfRange {
                    contig: idx,
                    target,
                    count: contig_count,
                    offset,
                }
                .into());
            }
            connections.push(Connection::new(target, overlap_len, is_rc, is_target_rc));
        }
        contig.set_connections(connections)?;
    }

    Ok(contigs)
}

///
/// Exact size of the engine buffer describing `assembly`.
///
pub fn assembly_buffer_len(assembly: &Assembly) -> usize {
    pool_offset(assembly) + 2 * assembly.total_length() as usize
}

fn pool_offset(assembly: &Assembly) -> usize {
    assembly.iter().fold(ASSEMBLY_HEADER_LEN, |acc, contig| {
        acc + CONTIG_HEADER_LEN + CONNECTION_RECORD_LEN * contig.connections().len()
    })
}

///
/// Write an assembly in the layout the engine produces.
///
/// This is the engine's side of [`decode_assembly`]. It is what a stand-in engine
/// returns, and it lets an assembly be stored and decoded again later.
///
/// Overlap lengths must be non-negative: the sign bit of the overlap field carries
/// the `is_rc` flag, so gaps have no representation on the wire.
///
pub fn encode_assembly(assembly: &Assembly) -> std::result::Result<Vec<u8>, InputError> {
    let capacity = assembly_buffer_len(assembly);
    let pool_offset = pool_offset(assembly);

    let mut buffer = Vec::with_capacity(capacity);
    buffer.extend_from_slice(&to_wire_field("contig count", assembly.len())?.to_ne_bytes());
    buffer.extend_from_slice(&to_wire_field("sequence pool offset", pool_offset)?.to_ne_bytes());

    for contig in assembly {
        let seq_len = to_wire_field("sequence length", contig.len())?;
        let supporting_reads =
            to_wire_field("supporting read count", contig.supporting_read_count() as usize)?;
        let connection_count = to_wire_field("connection count", contig.connections().len())?;
        buffer.extend_from_slice(&seq_len.to_ne_bytes());
        buffer.extend_from_slice(&supporting_reads.to_ne_bytes());
        buffer.extend_from_slice(&connection_count.to_ne_bytes());

        for connection in contig.connections() {
            if connection.overlap_len() < 0 {
                return Err(InputError::FieldOverflow {
                    field: "overlap length",
                    value: connection.overlap_len() as i64,
                });
            }
            let target = to_wire_field("target contig id", connection.target())?;
            let overlap = pack_flagged(connection.is_rc(), connection.overlap_len());
            let target = pack_flagged(connection.is_target_rc(), target);
            buffer.extend_from_slice(&overlap.to_ne_bytes());
            buffer.extend_from_slice(&target.to_ne_bytes());
        }
    }
    debug_assert_eq!(buffer.len(), pool_offset);

    for contig in assembly {
        buffer.extend_from_slice(contig.sequence());
        buffer.extend_from_slice(contig.per_base_coverage());
    }
    debug_assert_eq!(buffer.len(), capacity);

    Ok(buffer)
}
