//! Core data model for working with short-read assemblies in Rust.
//!
//! This crate holds the in-memory side of fermigraph: the reads that go into an
//! assembly engine and the contig graph that comes out of it. It is part of the
//! fermigraph project, which wraps a black-box short-read assembler behind a
//! byte-exact binary protocol.
//!
//! ## Quick Start
//!
//! ```rust
//! use fermigraph_core::models::{Assembly, Connection, Contig};
//!
//! let mut left = Contig::new(b"ACGTACGT".to_vec(), vec![3; 8], 4).unwrap();
//! let mut right = Contig::new(b"ACGTTT".to_vec(), vec![2; 6], 2).unwrap();
//!
//! // contig 0 flows into contig 1 with a 4 base overlap
//! left.set_connections(vec![Connection::new(1, 4, false, false)]).unwrap();
//! right.set_connections(vec![Connection::new(0, 4, true, false)]).unwrap();
//!
//! let assembly = Assembly::new(vec![left, right]).unwrap();
//! assert_eq!(assembly.len(), 2);
//! assert_eq!(assembly.size_statistic().unwrap(), 8);
//! ```
pub mod errors;
pub mod models;

// re-export for cleaner imports
pub use errors::*;
pub use models::*;
