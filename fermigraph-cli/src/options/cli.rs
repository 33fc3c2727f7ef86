use clap::{Command, arg};

pub const OPTIONS_CMD: &str = "options";

pub fn create_options_cli() -> Command {
    Command::new(OPTIONS_CMD)
        .author("Databio")
        .about("Print the effective engine options as TOML, or write them as an 80 byte block.")
        .arg(arg!(-c --config <config> "Options file (TOML or JSON); defaults are used for missing fields"))
        .arg(arg!(-o --output <output> "Write the options block here instead of printing TOML"))
}
