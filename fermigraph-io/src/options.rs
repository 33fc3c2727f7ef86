use std::ffi::OsStr;
use std::fs::read_to_string;
use std::io::Cursor;
use std::path::Path;

use byteorder::{NativeEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::OPTIONS_BLOCK_LEN;
use crate::error::DecodeError;

/// Graph cleaning: don't simplify the graph.
pub const CLEAN_FLAG_NO_SIMPLIFY: i32 = 0x80;
/// Graph cleaning: pop bubbles that are open at one end.
pub const CLEAN_FLAG_POP_OPEN: i32 = 0x40;
/// Graph cleaning: aggressive bubble popping.
pub const CLEAN_FLAG_AGGRESSIVE: i32 = 0x20;

///
/// Graph cleaning knobs, passed through to the engine untouched.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CleaningOptions {
    pub flag: i32,
    pub min_ovlp: i32,
    pub min_elen: i32,
    pub min_ensr: i32,
    pub min_insr: i32,
    pub max_bdist: i32,
    pub max_bdiff: i32,
    pub max_bvtx: i32,
    pub min_merge_len: i32,
    pub trim_len: i32,
    pub trim_depth: i32,
    pub min_dratio1: f32,
    pub max_bcov: f32,
    pub max_bfrac: f32,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        CleaningOptions {
            flag: CLEAN_FLAG_NO_SIMPLIFY | CLEAN_FLAG_POP_OPEN,
            min_ovlp: 0,
            min_elen: 300,
            min_ensr: 4,
            min_insr: 3,
            max_bdist: 512,
            max_bdiff: 50,
            max_bvtx: 64,
            min_merge_len: 0,
            trim_len: 0,
            trim_depth: 6,
            min_dratio1: 0.7,
            max_bcov: 10.0,
            max_bfrac: 0.15,
        }
    }
}

///
/// Options handed to the assembly engine alongside the reads.
///
/// On the wire this is a fixed 80 byte block of int32/float32 fields in host byte
/// order; see [`AssemblerOptions::to_bytes`] for the offsets.
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssemblerOptions {
    /// number of engine threads; keep at 1 for small read sets
    pub n_threads: i32,
    /// k-mer length for error correction; -1 lets the engine pick
    pub ec_k: i32,
    /// lower bound of the occurrence threshold used in correction and tip trimming
    pub min_cnt: i32,
    /// upper bound of the same threshold
    pub max_cnt: i32,
    /// minimum overlap during assembly
    pub min_asm_ovlp: i32,
    /// overlaps shorter than this are not merged during assembly
    pub min_merge_len: i32,
    pub cleaning: CleaningOptions,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        AssemblerOptions {
            n_threads: 1,
            ec_k: -1,
            min_cnt: 4,
            max_cnt: 8,
            min_asm_ovlp: 33,
            min_merge_len: 0,
            cleaning: CleaningOptions::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum OptionsConfigError {
    #[error("Missing or invalid file extension in options file. It must be `toml` or `json`")]
    InvalidFileType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type OptionsConfigResult<T> = std::result::Result<T, OptionsConfigError>;

impl AssemblerOptions {
    ///
    /// Lay the options out as the engine's 80 byte block.
    ///
    /// | offset | field |
    /// |--------|-------|
    /// | 0      | n_threads |
    /// | 4      | ec_k |
    /// | 8      | min_cnt |
    /// | 12     | max_cnt |
    /// | 16     | min_asm_ovlp |
    /// | 20     | min_merge_len |
    /// | 24..68 | cleaning: flag, min_ovlp, min_elen, min_ensr, min_insr, max_bdist, max_bdiff, max_bvtx, min_merge_len, trim_len, trim_depth |
    /// | 68..80 | cleaning: min_dratio1, max_bcov, max_bfrac (float32) |
    ///
    pub fn to_bytes(&self) -> [u8; OPTIONS_BLOCK_LEN] {
        let c = &self.cleaning;
        let ints = [
            self.n_threads,
            self.ec_k,
            self.min_cnt,
            self.max_cnt,
            self.min_asm_ovlp,
            self.min_merge_len,
            c.flag,
            c.min_ovlp,
            c.min_elen,
            c.min_ensr,
            c.min_insr,
            c.max_bdist,
            c.max_bdiff,
            c.max_bvtx,
            c.min_merge_len,
            c.trim_len,
            c.trim_depth,
        ];
        let floats = [c.min_dratio1, c.max_bcov, c.max_bfrac];

        let mut block = [0u8; OPTIONS_BLOCK_LEN];
        let fields = ints
            .iter()
            .map(|v| v.to_ne_bytes())
            .chain(floats.iter().map(|v| v.to_ne_bytes()));
        for (slot, bytes) in block.chunks_exact_mut(4).zip(fields) {
            slot.copy_from_slice(&bytes);
        }
        block
    }

    ///
    /// Read options back from an engine options block.
    ///
    pub fn from_bytes(block: &[u8]) -> Result<Self, DecodeError> {
        if block.len() < OPTIONS_BLOCK_LEN {
            return Err(DecodeError::Truncated {
                offset: 0,
                needed: OPTIONS_BLOCK_LEN,
                len: block.len(),
            });
        }

        let mut rdr = Cursor::new(&block[..OPTIONS_BLOCK_LEN]);
        Self::read_block(&mut rdr).map_err(|_| DecodeError::Truncated {
            offset: rdr.position() as usize,
            needed: 4,
            len: OPTIONS_BLOCK_LEN,
        })
    }

    fn read_block(rdr: &mut Cursor<&[u8]>) -> std::io::Result<Self> {
        // struct fields are evaluated in the order written, which is block order
        Ok(AssemblerOptions {
            n_threads: rdr.read_i32::<NativeEndian>()?,
            ec_k: rdr.read_i32::<NativeEndian>()?,
            min_cnt: rdr.read_i32::<NativeEndian>()?,
            max_cnt: rdr.read_i32::<NativeEndian>()?,
            min_asm_ovlp: rdr.read_i32::<NativeEndian>()?,
            min_merge_len: rdr.read_i32::<NativeEndian>()?,
            cleaning: CleaningOptions {
                flag: rdr.read_i32::<NativeEndian>()?,
                min_ovlp: rdr.read_i32::<NativeEndian>()?,
                min_elen: rdr.read_i32::<NativeEndian>()?,
                min_ensr: rdr.read_i32::<NativeEndian>()?,
                min_insr: rdr.read_i32::<NativeEndian>()?,
                max_bdist: rdr.read_i32::<NativeEndian>()?,
                max_bdiff: rdr.read_i32::<NativeEndian>()?,
                max_bvtx: rdr.read_i32::<NativeEndian>()?,
                min_merge_len: rdr.read_i32::<NativeEndian>()?,
                trim_len: rdr.read_i32::<NativeEndian>()?,
                trim_depth: rdr.read_i32::<NativeEndian>()?,
                min_dratio1: rdr.read_f32::<NativeEndian>()?,
                max_bcov: rdr.read_f32::<NativeEndian>()?,
                max_bfrac: rdr.read_f32::<NativeEndian>()?,
            },
        })
    }

    ///
    /// Render the options as a TOML document.
    ///
    pub fn to_toml_string(&self) -> OptionsConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

impl TryFrom<&Path> for AssemblerOptions {
    type Error = OptionsConfigError;

    ///
    /// Load options from a `.toml` or `.json` file. Missing fields keep their defaults.
    ///
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let contents = read_to_string(path)?;
        match path.extension().and_then(OsStr::to_str) {
            Some("toml") => Ok(toml::from_str(&contents)?),
            Some("json") => Ok(serde_json::from_str(&contents)?),
            _ => Err(OptionsConfigError::InvalidFileType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    fn field_at(block: &[u8], offset: usize) -> [u8; 4] {
        block[offset..offset + 4].try_into().unwrap()
    }

    #[rstest]
    fn test_block_is_eighty_bytes() {
        let block = AssemblerOptions::default().to_bytes();
        assert_eq!(block.len(), 80);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(4, -1)]
    #[case(8, 4)]
    #[case(12, 8)]
    #[case(16, 33)]
    #[case(20, 0)]
    #[case(24, 0xC0)]
    #[case(32, 300)]
    #[case(44, 512)]
    #[case(52, 64)]
    #[case(64, 6)]
    fn test_default_int_offsets(#[case] offset: usize, #[case] expected: i32) {
        let block = AssemblerOptions::default().to_bytes();
        assert_eq!(i32::from_ne_bytes(field_at(&block, offset)), expected);
    }

    #[rstest]
    fn test_float_offsets() {
        let mut options = AssemblerOptions::default();
        options.cleaning.max_bfrac = 0.25;
        let block = options.to_bytes();
        assert_eq!(f32::from_ne_bytes(field_at(&block, 68)), 0.7);
        assert_eq!(f32::from_ne_bytes(field_at(&block, 72)), 10.0);
        assert_eq!(f32::from_ne_bytes(field_at(&block, 76)), 0.25);
    }

    #[rstest]
    fn test_from_bytes_reads_block_back() {
        let mut options = AssemblerOptions::default();
        options.n_threads = 4;
        options.cleaning.trim_len = 17;
        let parsed = AssemblerOptions::from_bytes(&options.to_bytes()).unwrap();
        assert_eq!(parsed, options);
    }

    #[rstest]
    fn test_from_bytes_rejects_short_block() {
        let result = AssemblerOptions::from_bytes(&[0u8; 40]);
        assert_eq!(
            result.unwrap_err(),
            DecodeError::Truncated {
                offset: 0,
                needed: 80,
                len: 40
            }
        );
    }

    #[rstest]
    fn test_partial_toml_keeps_defaults() {
        let options: AssemblerOptions =
            toml::from_str("min_asm_ovlp = 20\n[cleaning]\nmin_elen = 150\n").unwrap();
        assert_eq!(options.min_asm_ovlp, 20);
        assert_eq!(options.cleaning.min_elen, 150);
        assert_eq!(options.max_cnt, 8);
        assert_eq!(options.cleaning.trim_depth, 6);
    }

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/fermigraph/options.toml");
        let options = AssemblerOptions::try_from(path.as_path()).unwrap();
        assert_eq!(options.n_threads, 2);
        assert_eq!(options.min_asm_ovlp, 25);
    }

    #[rstest]
    fn test_try_from_invalid_extension() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("options.yaml");
        std::fs::write(&path, "n_threads: 2").unwrap();
        assert!(matches!(
            AssemblerOptions::try_from(path.as_path()),
            Err(OptionsConfigError::InvalidFileType)
        ));
    }

    #[rstest]
    fn test_toml_string_parses_back() {
        let options = AssemblerOptions::default();
        let rendered = options.to_toml_string().unwrap();
        let parsed: AssemblerOptions = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, options);
    }
}
