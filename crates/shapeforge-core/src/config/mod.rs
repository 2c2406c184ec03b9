//! Contract definition files
//!
//! A contract file describes one generated type in TOML. Loading it yields a
//! [`ContractConfig`]; [`ContractConfig::open_builder`] replays it onto a
//! fresh [`ContractBuilder`](crate::ContractBuilder).
//!
//! # Example Contract
//!
//! ```toml
//! name = "svc.Greeter"
//! declare = ["svc.Person"]
//!
//! [routing]
//! path = "/greeter"
//! media_types = ["application/json"]
//!
//! [[fields]]
//! type = "int"
//! name = "calls"
//! value = 0
//!
//! [[methods]]
//! name = "sayHello"
//! returns = "string"
//! result_name = "greeting"
//!
//! [[methods.params]]
//! type = "string"
//! name = "name"
//! mode = "IN"
//! ```
//!
//! # Module Structure
//!
//! - `types`: contract file structures
//! - `load`: reading and parsing files
//! - `apply`: validation and replay onto a builder

mod apply;
mod load;
mod types;

#[cfg(test)]
mod tests_loading;

pub use load::{load_contract_file, parse_contract};
pub use types::{BindingConfig, ContractConfig, FieldConfig, MethodConfig, ParamConfig, RoutingConfig};
