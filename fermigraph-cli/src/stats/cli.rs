use clap::{Command, arg};

pub const STATS_CMD: &str = "stats";

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .author("Databio")
        .about("Summarize an engine assembly buffer: contigs, connections, bases and size statistic.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Assembly buffer written by the engine").required(true))
        .arg(arg!(--json "Print the summary as JSON"))
}
