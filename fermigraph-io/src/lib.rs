//! # Wire formats for talking to a short-read assembly engine.
//!
//! This crate holds everything that crosses the boundary between fermigraph and
//! the assembly engine, plus the text formats that come out the other side:
//!
//! - [`reads`]: the read buffer handed to the engine (and the engine's view of it)
//! - [`assembly`]: the assembly buffer the engine hands back, decoded into an
//!   [`Assembly`](fermigraph_core::models::Assembly)
//! - [`options`]: the fixed 80-byte options block
//! - [`gfa`]: GFA 1.0 export of an assembly
//! - [`fastx`]: loading reads from FASTQ or plain sequence files
//!
//! All binary integers are written and read in host byte order, since the buffers
//! never leave the process that produced them.
//!
pub mod assembly;
pub mod consts;
pub mod error;
pub mod fastx;
pub mod gfa;
pub mod options;
pub mod reads;
mod wire;

// re-expose core functions
pub use assembly::*;
pub use consts::*;
pub use error::*;
pub use fastx::*;
pub use gfa::*;
pub use options::*;
pub use reads::*;
