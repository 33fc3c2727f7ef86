use fermigraph_io::consts::OPTIONS_BLOCK_LEN;

///
/// The assembly engine, seen from the outside.
///
/// An engine receives the options block and the read buffer and returns the
/// assembly buffer, or `None` when it could not assemble the reads. Neither buffer
/// is retained past the call.
///
pub trait Engine {
    fn assemble(&mut self, options: &[u8; OPTIONS_BLOCK_LEN], reads: &[u8]) -> Option<Vec<u8>>;

    /// Name used when logging engine calls.
    fn name(&self) -> &str {
        "assembly engine"
    }

    /// Version string reported by the engine, if it has one.
    fn version(&self) -> Option<&str> {
        None
    }
}

impl<F> Engine for F
where
    F: FnMut(&[u8; OPTIONS_BLOCK_LEN], &[u8]) -> Option<Vec<u8>>,
{
    fn assemble(&mut self, options: &[u8; OPTIONS_BLOCK_LEN], reads: &[u8]) -> Option<Vec<u8>> {
        self(options, reads)
    }
}
