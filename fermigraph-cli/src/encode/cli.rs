use clap::{Command, arg};

pub const ENCODE_CMD: &str = "encode";

pub fn create_encode_cli() -> Command {
    Command::new(ENCODE_CMD)
        .author("Databio")
        .about("Encode a FASTQ or plain sequence file into an engine read buffer.")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "Reads to encode (FASTQ or one sequence per line, optionally gzipped)").required(true))
        .arg(arg!(-o --output <output> "Where to write the read buffer").required(true))
        .arg(arg!(--options <options> "Engine options as TOML or JSON").requires("options-out"))
        .arg(arg!(--"options-out" <options_out> "Also write the 80 byte options block here"))
}
