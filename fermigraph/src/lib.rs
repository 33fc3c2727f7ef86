//! fermigraph: drive a short-read assembly engine and work with the contig graph it
//! returns.
//!
//! Each part lives in its own crate and is re-exported here behind a feature:
//!
//! - `core`: reads, contigs, connections and assemblies
//! - `io`: the read and assembly buffers, the options block, GFA output and read files
//! - `assembler`: the engine boundary and the round trip through it

#[cfg(feature = "core")]
#[doc(inline)]
pub use fermigraph_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use fermigraph_io as io;

#[cfg(feature = "assembler")]
#[doc(inline)]
pub use fermigraph_assembler as assembler;
