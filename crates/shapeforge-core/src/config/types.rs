//! Contract file structures
//!
//! Pure data holders; behavior lives in `apply`.

use serde::{Deserialize, Serialize};

use crate::descriptors::{Direction, FieldValue};

/// Root of a contract file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<RoutingConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingConfig>,
    /// External types the contract refers to
    #[serde(default)]
    pub declare: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
    #[serde(default)]
    pub methods: Vec<MethodConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    pub path: String,
    #[serde(default)]
    pub media_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    pub uid: String,
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub type_ref: String,
    pub name: String,
    /// Literal initializer; absent means null
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FieldValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodConfig {
    pub name: String,
    #[serde(default = "default_returns")]
    pub returns: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub result_name: String,
    #[serde(default)]
    pub result_part: String,
    #[serde(default)]
    pub result_namespace: String,
    #[serde(default)]
    pub result_header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<BindingConfig>,
    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
    #[serde(rename = "type")]
    pub type_ref: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub mode: Direction,
    #[serde(default)]
    pub header: bool,
}

fn default_returns() -> String {
    "void".to_string()
}
