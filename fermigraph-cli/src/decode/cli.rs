use clap::{Command, arg};

pub const DECODE_CMD: &str = "decode";

pub fn create_decode_cli() -> Command {
    Command::new(DECODE_CMD)
        .author("Databio")
        .about("Decode an engine assembly buffer and write it as GFA.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Assembly buffer written by the engine").required(true))
        .arg(arg!(-o --output <output> "GFA output; gzipped if it ends in .gz, stdout if omitted"))
}
