use std::fmt::{self, Display};

///
/// Anything that can hand over base calls and their per-base qualities.
///
/// Implementors must return `bases` and `quals` of the same length; the read
/// encoder reports a mismatch as an input error rather than truncating.
///
pub trait BasesAndQuals {
    fn bases(&self) -> &[u8];
    fn quals(&self) -> &[u8];
}

impl<T: BasesAndQuals + ?Sized> BasesAndQuals for &T {
    fn bases(&self) -> &[u8] {
        (**self).bases()
    }

    fn quals(&self) -> &[u8] {
        (**self).quals()
    }
}

impl BasesAndQuals for (&[u8], &[u8]) {
    fn bases(&self) -> &[u8] {
        self.0
    }

    fn quals(&self) -> &[u8] {
        self.1
    }
}

///
/// A single sequencing read: one base call and one quality byte per position.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencedRead {
    pub bases: Vec<u8>,
    pub quals: Vec<u8>,
}

impl SequencedRead {
    pub fn new(bases: Vec<u8>, quals: Vec<u8>) -> Self {
        SequencedRead { bases, quals }
    }

    ///
    /// Build a read that carries the same quality byte at every position.
    ///
    pub fn with_constant_quality(bases: Vec<u8>, qual: u8) -> Self {
        let quals = vec![qual; bases.len()];
        SequencedRead { bases, quals }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl BasesAndQuals for SequencedRead {
    fn bases(&self) -> &[u8] {
        &self.bases
    }

    fn quals(&self) -> &[u8] {
        &self.quals
    }
}

impl Display for SequencedRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bases))
    }
}
