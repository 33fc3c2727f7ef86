use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use fermigraph_io::{AssemblerOptions, encode_reads, load_reads};

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("A path to a read file is required.")?;
    let output = matches
        .get_one::<String>("output")
        .context("A path for the read buffer is required.")?;

    let reads = load_reads(input)?;
    let buffer = encode_reads(&reads)
        .with_context(|| format!("Failed to encode reads from {}", input))?;
    fs::write(output, &buffer).with_context(|| format!("Failed to write {}", output))?;
    info!("Wrote {} reads ({} bytes) to {}", reads.len(), buffer.len(), output);

    if let Some(options_out) = matches.get_one::<String>("options-out") {
        let options = match matches.get_one::<String>("options") {
            Some(path) => AssemblerOptions::try_from(Path::new(path))
                .with_context(|| format!("Failed to load options from {}", path))?,
            None => AssemblerOptions::default(),
        };
        fs::write(options_out, options.to_bytes())
            .with_context(|| format!("Failed to write {}", options_out))?;
    }

    Ok(())
}
