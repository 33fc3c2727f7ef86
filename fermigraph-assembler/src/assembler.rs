use log::{debug, info, warn};

use fermigraph_core::models::{Assembly, BasesAndQuals};
use fermigraph_io::error::{FermiError, Result};
use fermigraph_io::options::AssemblerOptions;
use fermigraph_io::{decode_assembly, encode_reads, encode_reads_with};

use crate::engine::Engine;

///
/// Turns reads into an [`Assembly`] by way of an [`Engine`].
///
/// Each assembler owns its options and its engine; nothing is shared between
/// instances, so run one assembler per thread. The options are written into a
/// fresh block on every call, so changes through [`Assembler::options_mut`] apply
/// to the next assembly.
///
#[derive(Debug, Clone)]
pub struct Assembler<E> {
    options: AssemblerOptions,
    engine: E,
}

impl<E: Engine> Assembler<E> {
    ///
    /// Create an assembler with default options.
    ///
    pub fn new(engine: E) -> Self {
        Self::with_options(engine, AssemblerOptions::default())
    }

    pub fn with_options(engine: E, options: AssemblerOptions) -> Self {
        Assembler { options, engine }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    ///
    /// Mutable access to the options passed to the engine.
    ///
    pub fn options_mut(&mut self) -> &mut AssemblerOptions {
        &mut self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    ///
    /// Version reported by the engine, if any.
    ///
    pub fn engine_version(&self) -> Option<&str> {
        self.engine.version()
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    ///
    /// Assemble a set of reads.
    ///
    /// # Arguments
    /// - reads: anything that yields [`BasesAndQuals`]
    ///
    /// # Returns
    /// - the assembly, or a [`FermiError`]: `Input` if the reads cannot be encoded,
    ///   `AssemblyFailure` if the engine returns nothing, `Decode` if its output
    ///   is malformed
    pub fn create_assembly<I>(&mut self, reads: I) -> Result<Assembly>
    where
        I: IntoIterator,
        I::Item: BasesAndQuals,
    {
        let buffer = encode_reads(reads)?;
        self.run(&buffer)
    }

    ///
    /// Assemble reads of any type, given a projection onto [`BasesAndQuals`].
    ///
    /// The projection runs exactly once per read.
    ///
    pub fn create_assembly_with<I, T, R, F>(&mut self, reads: I, projection: F) -> Result<Assembly>
    where
        I: IntoIterator<Item = T>,
        R: BasesAndQuals,
        F: FnMut(T) -> R,
    {
        let buffer = encode_reads_with(reads, projection)?;
        self.run(&buffer)
    }

    fn run(&mut self, reads: &[u8]) -> Result<Assembly> {
        let options = self.options.to_bytes();
        debug!(
            "Calling {} ({}) with {} bytes of reads",
            self.engine.name(),
            self.engine.version().unwrap_or("unknown version"),
            reads.len()
        );

        let output = match self.engine.assemble(&options, reads) {
            Some(output) => output,
            None => {
                warn!("{} returned no assembly", self.engine.name());
                return Err(FermiError::AssemblyFailure);
            }
        };

        let assembly = decode_assembly(&output)?;
        let size_statistic = assembly.size_statistic()?;
        info!(
            "Assembled {} contigs ({} bases, size statistic {})",
            assembly.len(),
            assembly.total_length(),
            size_statistic
        );

        Ok(assembly)
    }
}
