use anyhow::Result;
use clap::ArgMatches;

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let path = super::contract_path(matches)?;
    let definition = super::materialize(path)?;
    println!(
        "ok {} ({} methods)",
        definition.name(),
        definition.methods().len()
    );
    Ok(())
}
