pub mod handlers;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("shapeforge")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build, inspect and invoke runtime service contracts")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(cmd_check())
        .subcommand(cmd_inspect())
        .subcommand(cmd_invoke())
}

fn contract_arg() -> Arg {
    Arg::new("contract")
        .required(true)
        .value_name("FILE")
        .help("Contract definition (TOML)")
}

fn cmd_check() -> Command {
    Command::new("check")
        .about("Validate a contract and materialize its type")
        .arg(contract_arg())
}

fn cmd_inspect() -> Command {
    Command::new("inspect")
        .about("Print the materialized type definition")
        .arg(contract_arg())
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the definition as JSON"),
        )
}

fn cmd_invoke() -> Command {
    Command::new("invoke")
        .about("Call a method on an instance wired to an echo handler")
        .arg(contract_arg())
        .arg(Arg::new("method").required(true).help("Method name"))
        .arg(
            Arg::new("args")
                .num_args(0..)
                .value_name("JSON")
                .allow_hyphen_values(true)
                .help("Arguments, one JSON value each"),
        )
}
