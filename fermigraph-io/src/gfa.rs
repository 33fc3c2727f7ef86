use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::info;

use fermigraph_core::models::{Assembly, Connection};

use crate::consts::{GFA_HEADER, GFA_SEGMENT_PREFIX};

fn orientation(reverse: bool) -> char {
    if reverse { '-' } else { '+' }
}

fn cigar(connection: &Connection) -> String {
    let overlap = connection.overlap_len();
    if overlap >= 0 {
        format!("{}M", overlap)
    } else {
        // a gap, only reachable for hand-built connections
        format!("{}H", -(overlap as i64))
    }
}

///
/// Write an assembly as GFA 1.0.
///
/// Every contig becomes a segment named `tig<index>` carrying its length and the
/// number of supporting reads. Both endpoints of an overlap hold a connection, so
/// a link is only written from the endpoint with the smaller (or equal) index.
///
/// # Arguments
/// - assembly: the assembly to render
/// - writer: destination; each line, header included, ends in `\n`
pub fn write_gfa<W: Write>(assembly: &Assembly, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "{}", GFA_HEADER)?;

    for (id, contig) in assembly.iter().enumerate() {
        write!(writer, "S\t{}{}\t", GFA_SEGMENT_PREFIX, id)?;
        writer.write_all(contig.sequence())?;
        writeln!(
            writer,
            "\tLN:i:{}\tRC:i:{}",
            contig.len(),
            contig.supporting_read_count()
        )?;

        for connection in contig.connections() {
            if id > connection.target() {
                continue;
            }
            writeln!(
                writer,
                "L\t{prefix}{}\t{}\t{prefix}{}\t{}\t{}",
                id,
                orientation(connection.is_rc()),
                connection.target(),
                orientation(connection.is_target_rc()),
                cigar(connection),
                prefix = GFA_SEGMENT_PREFIX,
            )?;
        }
    }

    writer.flush()
}

///
/// Render an assembly as GFA 1.0 bytes, exactly as [`write_gfa`] streams them.
///
pub fn to_gfa_bytes(assembly: &Assembly) -> Vec<u8> {
    let mut buffer = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_gfa(assembly, &mut buffer);
    buffer
}

///
/// Render an assembly as a GFA 1.0 string.
///
/// This is lossy: sequence bytes that are not valid UTF-8 are replaced with
/// U+FFFD. Use [`to_gfa_bytes`] or [`write_gfa`] for the verbatim output.
///
pub fn to_gfa_string(assembly: &Assembly) -> String {
    String::from_utf8_lossy(&to_gfa_bytes(assembly)).into_owned()
}

///
/// Save an assembly as a GFA file, gzip compressed when the path ends in `.gz`.
///
/// Missing parent directories are created.
///
pub fn write_gfa_file<T: AsRef<Path>>(assembly: &Assembly, path: T) -> std::io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = BufWriter::new(File::create(path)?);
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");
    if is_gzipped {
        let mut encoder = GzEncoder::new(file, Compression::best());
        write_gfa(assembly, &mut encoder)?;
        encoder.finish()?;
    } else {
        write_gfa(assembly, file)?;
    }

    info!("Wrote {} segments to {}", assembly.len(), path.display());
    Ok(())
}
