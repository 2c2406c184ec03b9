mod check;
mod inspect;
mod invoke;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;
use shapeforge_core::{load_contract_file, TypeDefinition, TypeRegistry};

pub fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("check", sub_m)) => check::handle(sub_m),
        Some(("inspect", sub_m)) => inspect::handle(sub_m),
        Some(("invoke", sub_m)) => invoke::handle(sub_m),
        _ => anyhow::bail!("Unknown command. Run 'shapeforge --help' for usage."),
    }
}

fn contract_path(matches: &ArgMatches) -> Result<&Path> {
    matches
        .get_one::<String>("contract")
        .map(Path::new)
        .context("missing contract file argument")
}

/// Load a contract file and materialize its type in a fresh registry
fn materialize(path: &Path) -> Result<Arc<TypeDefinition>> {
    let config = load_contract_file(path)?;
    let mut registry = TypeRegistry::new();
    let definition = config.open_builder(&mut registry)?.to_type()?;
    Ok(definition)
}
