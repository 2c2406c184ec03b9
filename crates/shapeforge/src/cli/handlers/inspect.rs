use anyhow::Result;
use clap::ArgMatches;
use itertools::Itertools;
use shapeforge_core::{FieldValue, TypeDefinition};

pub fn handle(matches: &ArgMatches) -> Result<()> {
    let path = super::contract_path(matches)?;
    let definition = super::materialize(path)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&*definition)?);
    } else {
        print!("{}", render(&definition));
    }
    Ok(())
}

/// Human-readable summary of a definition
fn render(definition: &TypeDefinition) -> String {
    let mut out = format!("type {}\n", definition.name());
    if let Some(path) = definition.routing_path() {
        out.push_str(&format!("  path: {path}\n"));
    }
    let media = definition.media_types();
    if !media.is_empty() {
        out.push_str(&format!("  produces: {}\n", media.join(", ")));
    }
    if let Some(binding) = definition.data_binding() {
        out.push_str(&format!("  binding: uid={}\n", binding.uid));
    }
    for field in definition.fields() {
        match &field.initial {
            FieldValue::Null => out.push_str(&format!("  field {} {}\n", field.type_ref, field.name)),
            value => out.push_str(&format!(
                "  field {} {} = {value}\n",
                field.type_ref, field.name
            )),
        }
    }
    for method in definition.methods() {
        let params = method
            .signature()
            .param_types
            .iter()
            .zip(method.param_names())
            .map(|(ty, name)| format!("{ty} {name}"))
            .join(", ");
        out.push_str(&format!(
            "  method {}({params}) -> {} [operation {}]{}\n",
            method.name(),
            method.return_type(),
            method.operation_name(),
            if method.is_excluded() { " (excluded)" } else { "" }
        ));
    }
    out
}
