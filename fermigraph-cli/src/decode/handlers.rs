use std::fs;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::ArgMatches;

use fermigraph_core::models::Assembly;
use fermigraph_io::{decode_assembly, write_gfa, write_gfa_file};

///
/// Read and decode an assembly buffer from disk.
///
pub fn load_assembly(path: &str) -> Result<Assembly> {
    let buffer = fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let assembly =
        decode_assembly(&buffer).with_context(|| format!("Failed to decode assembly in {}", path))?;
    Ok(assembly)
}

pub fn run_decode(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to an assembly buffer is required.")?;

    let assembly = load_assembly(input)?;

    match matches.get_one::<String>("output") {
        Some(output) => write_gfa_file(&assembly, output)
            .with_context(|| format!("Failed to write {}", output))?,
        None => write_gfa(&assembly, BufWriter::new(io::stdout().lock()))?,
    }

    Ok(())
}
