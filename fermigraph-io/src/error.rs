use std::io;
use thiserror::Error;

use fermigraph_core::errors::GraphError;

/// Problems with the reads (or assembly) handed to an encoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Bases and quals of one read have different lengths.
    #[error("Read {read} has {bases} bases but {quals} quality scores")]
    LengthMismatch {
        read: usize,
        bases: usize,
        quals: usize,
    },

    /// A read contains the byte used as a terminator on the wire.
    #[error("Read {read} contains a NUL byte at position {position}")]
    EmbeddedNul { read: usize, position: usize },

    /// More reads than the 32-bit read count can describe.
    #[error("{count} reads do not fit in a 32-bit read count")]
    TooManyReads { count: usize },

    /// A value that must be written as a non-negative 31-bit wire field is out of range.
    #[error("{field} of {value} cannot be encoded in 31 bits")]
    FieldOverflow { field: &'static str, value: i64 },
}

/// The buffer does not follow the documented layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Buffer of {len} bytes ends before the {needed} bytes needed at offset {offset}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },

    #[error("Negative {field} ({value}) at offset {offset}")]
    NegativeField {
        field: &'static str,
        offset: usize,
        value: i32,
    },

    #[error("Sequence pool offset {offset} lies outside the buffer header region of a {len} byte buffer")]
    PoolOffsetOutOfRange { offset: usize, len: usize },

    #[error("Contig headers run to offset {headers_end}, past the sequence pool at {pool}")]
    PoolOverlapsHeaders { pool: usize, headers_end: usize },

    #[error(
        "Connection at offset {offset} of contig {contig} targets contig {target}, but only {count} contigs exist"
    )]
    TargetOutOfRange {
        contig: usize,
        target: usize,
        count: usize,
        offset: usize,
    },

    #[error("Read {read} starting at offset {offset} is not NUL terminated")]
    UnterminatedRead { read: usize, offset: usize },
}

/// Error type for fermigraph round trips.
#[derive(Error, Debug)]
pub enum FermiError {
    /// The caller's reads cannot be encoded.
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// The engine returned no assembly for well-formed input.
    #[error("The assembly engine produced no assembly")]
    AssemblyFailure,

    /// The engine's output does not follow the documented layout.
    #[error("Malformed assembly buffer: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for fermigraph-io operations.
pub type Result<T> = std::result::Result<T, FermiError>;
