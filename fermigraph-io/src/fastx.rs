use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use flate2::read::MultiGzDecoder;
use log::info;

use fermigraph_core::models::SequencedRead;

use crate::consts::DEFAULT_QUALITY;

///
/// Get a buffered reader for a file, decompressing it if it ends in `.gz`.
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Load reads from a FASTQ file or a plain file with one sequence per line.
///
/// The format is picked from the first non-empty line: `@` starts a FASTQ file,
/// anything else is read as bare sequences, each given a constant quality of
/// [`DEFAULT_QUALITY`]. FASTQ quality strings are kept as written. Gzipped input
/// is detected by the `.gz` extension.
///
/// # Arguments
/// - path: path to the read file
///
/// # Returns
/// - the reads in file order
pub fn load_reads<T: AsRef<Path>>(path: T) -> Result<Vec<SequencedRead>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let reads = parse_reads(reader).with_context(|| format!("Failed to parse reads from {:?}", path))?;

    info!("Loaded {} reads from {}", reads.len(), path.display());
    Ok(reads)
}

///
/// Parse reads from any buffered reader; see [`load_reads`] for the formats.
///
pub fn parse_reads<R: BufRead>(reader: R) -> Result<Vec<SequencedRead>> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| line.map(|l| (idx + 1, l.trim_end().to_string())));

    let first = match next_non_blank(&mut lines)? {
        Some(line) => line,
        None => return Ok(Vec::new()),
    };

    if first.1.starts_with('@') {
        parse_fastq(first, lines)
    } else {
        std::iter::once(Ok(first))
            .chain(lines.filter(|line| !matches!(line, Ok((_, l)) if l.is_empty())))
            .map(|line| -> Result<SequencedRead> {
                let (_, seq) = line?;
                Ok(SequencedRead::with_constant_quality(
                    seq.into_bytes(),
                    DEFAULT_QUALITY,
                ))
            })
            .collect()
    }
}

fn next_non_blank<I>(lines: &mut I) -> Result<Option<(usize, String)>>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    for line in lines {
        let line = line?;
        if !line.1.is_empty() {
            return Ok(Some(line));
        }
    }
    Ok(None)
}

// blank lines are skipped between records only; inside a record they are an empty
// sequence or quality string
fn parse_fastq<I>(first: (usize, String), mut lines: I) -> Result<Vec<SequencedRead>>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    let mut reads = Vec::new();
    let mut header = Some(first);

    while let Some((line_no, name)) = header.take() {
        if !name.starts_with('@') {
            bail!("Expected a FASTQ header at line {}, found {:?}", line_no, name);
        }

        let mut field = |what: &str| -> Result<(usize, String)> {
            match lines.next() {
                Some(line) => Ok(line?),
                None => bail!("Record starting at line {} has no {} line", line_no, what),
            }
        };
        let (_, bases) = field("sequence")?;
        let (sep_no, separator) = field("separator")?;
        if !separator.starts_with('+') {
            bail!("Expected '+' at line {}, found {:?}", sep_no, separator);
        }
        let (qual_no, quals) = field("quality")?;
        if quals.len() != bases.len() {
            bail!(
                "Quality line {} has {} scores for {} bases",
                qual_no,
                quals.len(),
                bases.len()
            );
        }

        reads.push(SequencedRead::new(bases.into_bytes(), quals.into_bytes()));
        header = next_non_blank(&mut lines)?;
    }

    Ok(reads)
}
