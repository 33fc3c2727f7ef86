/// Size of the read count that opens a read buffer.
pub const READ_COUNT_LEN: usize = 4;

/// Terminator written after the bases and after the quals of every read.
pub const READ_TERMINATOR: u8 = 0x00;

/// Contig count plus sequence pool offset.
pub const ASSEMBLY_HEADER_LEN: usize = 8;

/// Sequence length, supporting read count and connection count.
pub const CONTIG_HEADER_LEN: usize = 12;

/// Encoded overlap length plus encoded target id.
pub const CONNECTION_RECORD_LEN: usize = 8;

/// Size of the engine options block.
pub const OPTIONS_BLOCK_LEN: usize = 80;

/// Sign bit of an encoded wire integer, used as an orientation flag.
pub const FLAG_BIT: i32 = i32::MIN;

/// Low 31 bits of an encoded wire integer.
pub const MAGNITUDE_MASK: i32 = i32::MAX;

/// Quality byte given to reads loaded from files that carry no qualities.
pub const DEFAULT_QUALITY: u8 = 30;

pub const GFA_HEADER: &str = "H\tVN:Z:1.0";
pub const GFA_SEGMENT_PREFIX: &str = "tig";
