//! Loading and replay tests for contract files

use std::io::Write;

use crate::config::{load_contract_file, parse_contract};
use crate::descriptors::Direction;
use crate::{BuilderState, Error, Result, TypeRegistry};

const GREETER: &str = r#"
name = "svc.Greeter"
declare = ["svc.Person"]

[routing]
path = "/greeter"
media_types = ["application/json"]

[binding]
uid = "42"
payload = '{"a":1}'

[[fields]]
type = "int"
name = "calls"
value = 0

[[methods]]
name = "sayHello"
returns = "string"
result_name = "greeting"

[[methods.params]]
type = "string"
name = "name"

[[methods]]
name = "lookup"
returns = "svc.Person"
operation = "LookupPerson"
exclude = true

[[methods.params]]
type = "long"
name = "id"
mode = "INOUT"
part = "idPart"
"#;

fn write_temp(content: &str) -> Result<(tempfile::TempDir, std::path::PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("contract.toml");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok((dir, path))
}

#[test]
fn test_parse_full_contract() -> Result<()> {
    let config = parse_contract(GREETER)?;
    assert_eq!(config.name, "svc.Greeter");
    assert_eq!(config.methods.len(), 2);
    assert_eq!(config.methods[0].returns, "string");
    assert_eq!(config.methods[1].params[0].mode, Direction::InOut);
    assert_eq!(config.fields[0].value, Some(crate::FieldValue::Int(0)));
    Ok(())
}

#[test]
fn test_returns_defaults_to_void() -> Result<()> {
    let config = parse_contract("name = \"svc.X\"\n[[methods]]\nname = \"ping\"\n")?;
    assert_eq!(config.methods[0].returns, "void");
    Ok(())
}

#[test]
fn test_unknown_key_is_parse_error() {
    let result = parse_contract("name = \"svc.X\"\ncolour = \"blue\"\n");
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let (_dir, path) = write_temp(GREETER)?;
    let config = load_contract_file(&path)?;
    assert_eq!(config.routing.map(|r| r.path), Some("/greeter".to_string()));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let result = load_contract_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
    assert!(matches!(load_contract_file(dir.path()), Err(Error::Io(_))));
    Ok(())
}

#[test]
fn test_malformed_toml_mentions_path() -> Result<()> {
    let (_dir, path) = write_temp("name = \n [[[")?;
    let result = load_contract_file(&path);
    assert!(matches!(result, Err(Error::Parse(ref msg)) if msg.contains("contract.toml")));
    Ok(())
}

#[test]
fn test_validate_rejects_bad_names_and_duplicate_fields() -> Result<()> {
    let empty = parse_contract("name = \"  \"")?;
    assert!(matches!(empty.validate(), Err(Error::InvalidConfig(_))));

    let bad = parse_contract("name = \"svc..Broken\"")?;
    assert!(matches!(bad.validate(), Err(Error::InvalidConfig(_))));

    let dup = parse_contract(
        "name = \"svc.X\"\n[[fields]]\ntype = \"int\"\nname = \"a\"\n[[fields]]\ntype = \"long\"\nname = \"a\"\n",
    )?;
    assert!(matches!(dup.validate(), Err(Error::InvalidConfig(_))));
    Ok(())
}

#[test]
fn test_open_builder_replays_contract() -> Result<()> {
    let config = parse_contract(GREETER)?;
    let mut registry = TypeRegistry::new();
    let mut builder = config.open_builder(&mut registry)?;
    assert_eq!(builder.state(), BuilderState::Open);

    let definition = builder.to_type()?;
    assert_eq!(definition.routing_path(), Some("/greeter"));
    assert_eq!(definition.media_types(), vec!["application/json"]);
    assert_eq!(definition.methods().len(), 2);
    assert_eq!(definition.contract_methods().count(), 1);

    let lookup = definition
        .methods_named("lookup")
        .next()
        .ok_or_else(|| Error::UnknownMethod("lookup".into()))?;
    assert_eq!(lookup.operation_name(), "LookupPerson");
    assert_eq!(lookup.param_names(), vec!["id"]);
    assert_eq!(
        definition.data_binding().map(|b| b.payload),
        Some("{\"a\":1}".to_string())
    );
    Ok(())
}

#[test]
fn test_undeclared_type_fails_resolution() -> Result<()> {
    let config = parse_contract(&GREETER.replace("declare = [\"svc.Person\"]", ""))?;
    let mut registry = TypeRegistry::new();
    let result = config.open_builder(&mut registry);
    assert!(matches!(result, Err(Error::TypeResolution(_))));
    Ok(())
}
