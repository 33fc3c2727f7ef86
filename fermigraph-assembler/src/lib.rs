//! Drive a black-box short-read assembly engine from Rust.
//!
//! The engine itself lives outside this crate. It takes an options block and a read
//! buffer and hands back an assembly buffer, or nothing when it fails. This crate
//! defines that boundary as the [`Engine`] trait and provides the [`Assembler`],
//! which runs one encode, assemble and decode round trip per call.
//!
//! ## Quick Start
//!
//! ```rust
//! use fermigraph_assembler::{Assembler, Engine};
//! use fermigraph_core::models::{Assembly, Contig, SequencedRead};
//! use fermigraph_io::{OPTIONS_BLOCK_LEN, decode_reads, encode_assembly};
//!
//! // an engine that turns every read into its own contig
//! struct OneContigPerRead;
//!
//! impl Engine for OneContigPerRead {
//!     fn assemble(&mut self, _options: &[u8; OPTIONS_BLOCK_LEN], reads: &[u8]) -> Option<Vec<u8>> {
//!         let contigs = decode_reads(reads)
//!             .ok()?
//!             .into_iter()
//!             .map(|r| Contig::new(r.bases, r.quals, 1))
//!             .collect::<Result<Vec<_>, _>>()
//!             .ok()?;
//!         encode_assembly(&Assembly::new(contigs).ok()?).ok()
//!     }
//! }
//!
//! let reads = vec![SequencedRead::with_constant_quality(b"ACGTTGCA".to_vec(), 30)];
//! let mut assembler = Assembler::new(OneContigPerRead);
//! let assembly = assembler.create_assembly(&reads).unwrap();
//! assert_eq!(assembly.contig(0).unwrap().sequence(), b"ACGTTGCA");
//! ```
pub mod assembler;
pub mod engine;

pub use assembler::*;
pub use engine::*;
