mod decode;
mod encode;
mod options;
mod stats;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "fermigraph";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Encode reads for a short-read assembly engine and inspect the assemblies it returns.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Log more; repeat for debug and trace output"),
        )
        .subcommand(encode::cli::create_encode_cli())
        .subcommand(decode::cli::create_decode_cli())
        .subcommand(stats::cli::create_stats_cli())
        .subcommand(options::cli::create_options_cli())
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches.get_count(consts::VERBOSE_ARG) {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    match matches.subcommand() {
        //
        // READ BUFFERS
        //
        Some((encode::cli::ENCODE_CMD, matches)) => {
            encode::handlers::run_encode(matches)?;
        }

        //
        // ASSEMBLY BUFFERS
        //
        Some((decode::cli::DECODE_CMD, matches)) => {
            decode::handlers::run_decode(matches)?;
        }
        Some((stats::cli::STATS_CMD, matches)) => {
            stats::handlers::run_stats(matches)?;
        }

        //
        // ENGINE OPTIONS
        //
        Some((options::cli::OPTIONS_CMD, matches)) => {
            options::handlers::run_options(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
