use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use fermigraph_io::AssemblerOptions;

pub fn resolve_options(matches: &ArgMatches) -> Result<AssemblerOptions> {
    match matches.get_one::<String>("config") {
        Some(path) => AssemblerOptions::try_from(Path::new(path))
            .with_context(|| format!("Failed to load options from {}", path)),
        None => Ok(AssemblerOptions::default()),
    }
}

pub fn run_options(matches: &ArgMatches) -> Result<()> {
    let options = resolve_options(matches)?;

    match matches.get_one::<String>("output") {
        Some(output) => {
            fs::write(output, options.to_bytes())
                .with_context(|| format!("Failed to write {}", output))?;
            info!("Wrote options block to {}", output);
        }
        None => print!("{}", options.to_toml_string()?),
    }

    Ok(())
}
