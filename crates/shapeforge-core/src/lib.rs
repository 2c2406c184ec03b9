//! Shapeforge-core - runtime contract builder and proxy materializer
//!
//! This crate provides:
//! - A caller-owned type registry with built-in, declared and generated types
//! - A builder that accumulates fields, methods and contract metadata
//! - Materialization of finished shapes into introspectable type definitions
//! - Instances whose every method forwards to one dispatch handler
//! - TOML contract files that replay onto a builder
//!
//! ## Example
//!
//! ```
//! use serde_json::{json, Value};
//! use shapeforge_core::{
//!     ContractBuilder, DispatchError, MethodDefinition, MethodDescriptor, ParamDescriptor,
//!     ReturnDescriptor, TypeName, TypeRef, TypeRegistry,
//! };
//!
//! # fn main() -> shapeforge_core::Result<()> {
//! let mut registry = TypeRegistry::new();
//! let name = TypeName::parse("svc.Greeter").map_err(|e| shapeforge_core::Error::CannotCompile(e.to_string()))?;
//! let mut builder = ContractBuilder::new(&mut registry, name);
//! builder.add_method(
//!     ReturnDescriptor::new(TypeRef::parse("string")?),
//!     MethodDescriptor::new("sayHello"),
//!     None,
//!     vec![ParamDescriptor::new(TypeRef::parse("string")?, "name")],
//! )?;
//!
//! let greeter = builder.to_instance(|_: &MethodDefinition, args: &[Value]| {
//!     let who = args.first().and_then(Value::as_str).unwrap_or("nobody");
//!     Ok::<_, DispatchError>(json!(format!("Hello, {who}")))
//! })?;
//! assert_eq!(greeter.invoke("sayHello", &[json!("Ada")])?, json!("Hello, Ada"));
//! # Ok(())
//! # }
//! ```

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod descriptors;
mod error;
pub mod identifiers;
pub mod instance;
pub mod materialize;
pub mod metadata;
pub mod registry;
pub mod shape;
pub mod types;

pub use builder::{BuilderState, ContractBuilder};
pub use config::{load_contract_file, parse_contract, ContractConfig};
pub use descriptors::{DataBinding, Direction, FieldValue, MethodDescriptor, ParamDescriptor, ReturnDescriptor};
pub use error::{DispatchError, Error, Result};
pub use identifiers::{IdentifierError, MemberName, TypeName};
pub use instance::{Dispatch, DynamicObject, DELEGATE_SLOT};
pub use materialize::{MethodDefinition, MethodId, TypeDefinition, DYNAMIC_DISPATCH_MARKER};
pub use metadata::{names, MetadataEntry, MetadataKind, MetadataSet, MetadataValue};
pub use registry::TypeRegistry;
pub use shape::{FieldShape, MethodShape, MethodSignature, TypeShape, Visibility, CLONEABLE_MARKER};
pub use types::{Builtin, TypeRef};
