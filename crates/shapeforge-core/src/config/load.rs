//! Reading contract files

use std::path::Path;

use super::types::ContractConfig;
use crate::{Error, Result};

/// Load a contract file
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read, or the path is a directory (`Error::Io`)
/// - TOML is malformed or has unknown keys (`Error::Parse`)
pub fn load_contract_file(path: &Path) -> Result<ContractConfig> {
    if path.is_dir() {
        return Err(Error::Io(format!(
            "Contract path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(format!("Failed to read contract file {}: {e}", path.display()))
    })?;

    let config = parse_contract(&content).map_err(|e| match e {
        Error::Parse(msg) => Error::Parse(format!("{}: {msg}", path.display())),
        other => other,
    })?;
    tracing::debug!(path = %path.display(), contract = %config.name, "Loaded contract file");
    Ok(config)
}

/// Parse contract TOML from a string
///
/// # Errors
///
/// Returns `Error::Parse` if the TOML is malformed or has unknown keys.
pub fn parse_contract(content: &str) -> Result<ContractConfig> {
    Ok(toml::from_str(content)?)
}
