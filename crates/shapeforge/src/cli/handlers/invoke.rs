use anyhow::Result;
use clap::ArgMatches;
use serde_json::{json, Value};
use shapeforge_core::{load_contract_file, DispatchError, MethodDefinition, TypeRegistry};

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let path = super::contract_path(matches)?;
    let method = matches
        .get_one::<String>("method")
        .map(String::as_str)
        .unwrap_or_default();
    let args = matches
        .get_many::<String>("args")
        .into_iter()
        .flatten()
        .map(|raw| serde_json::from_str(raw).map_err(shapeforge_core::Error::from))
        .collect::<shapeforge_core::Result<Vec<Value>>>()?;

    let config = load_contract_file(path)?;
    let mut registry = TypeRegistry::new();
    let instance = config.open_builder(&mut registry)?.to_instance(echo)?;

    let result = instance.invoke(method, &args)?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

/// Answers every call with the operation name and the arguments it received
fn echo(method: &MethodDefinition, args: &[Value]) -> std::result::Result<Value, DispatchError> {
    tracing::debug!(operation = method.operation_name(), "Echoing call");
    Ok(json!({
        "operation": method.operation_name(),
        "args": args,
    }))
}
