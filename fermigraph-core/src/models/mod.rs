pub mod assembly;
pub mod contig;
pub mod read;

// re-export for cleaner imports
pub use self::assembly::Assembly;
pub use self::contig::{Connection, Contig, SoleConnection};
pub use self::read::{BasesAndQuals, SequencedRead};
