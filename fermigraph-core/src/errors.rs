use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Contig index {index} is out of range for an assembly of {len} contigs")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Sequence length {sequence} does not match per-base coverage length {coverage}")]
    CoverageLengthMismatch { sequence: usize, coverage: usize },

    #[error("Connections have already been assigned to this contig")]
    ConnectionsAlreadySet,

    #[error("Contig {contig} has a connection to contig {target}, but the assembly has {len} contigs")]
    DanglingConnection {
        contig: usize,
        target: usize,
        len: usize,
    },

    #[error("Size statistic found no length covering the total of {total}; contig lengths are inconsistent")]
    SizeStatisticInvariant { total: u64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
