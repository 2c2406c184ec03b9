//! Validating contract files and replaying them onto a builder

use std::collections::HashSet;

use super::types::{ContractConfig, MethodConfig};
use crate::builder::ContractBuilder;
use crate::descriptors::{
    DataBinding, FieldValue, MethodDescriptor, ParamDescriptor, ReturnDescriptor,
};
use crate::identifiers::TypeName;
use crate::registry::TypeRegistry;
use crate::types::TypeRef;
use crate::{Error, Result};

impl ContractConfig {
    /// Validate the contract before any builder sees it
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the name is missing or malformed, a
    /// declared name is malformed, or two fields share a name.
    pub fn validate(&self) -> Result<()> {
        self.type_name()?;

        for declared in &self.declare {
            TypeName::parse(declared).map_err(|e| {
                Error::InvalidConfig(format!("invalid declared type '{declared}': {e}"))
            })?;
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.fields.iter().find(|f| !seen.insert(f.name.trim())) {
            return Err(Error::InvalidConfig(format!(
                "field '{}' is declared more than once",
                dup.name
            )));
        }
        Ok(())
    }

    /// The generated type's name
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the name is empty or malformed.
    pub fn type_name(&self) -> Result<TypeName> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "contract name cannot be empty".to_string(),
            ));
        }
        TypeName::parse(&self.name)
            .map_err(|e| Error::InvalidConfig(format!("invalid contract name '{}': {e}", self.name)))
    }

    /// Validate, declare external types, and replay onto a fresh builder
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) and [`apply`](Self::apply) return.
    pub fn open_builder<'r>(&self, registry: &'r mut TypeRegistry) -> Result<ContractBuilder<'r>> {
        self.validate()?;
        for declared in &self.declare {
            let name = TypeName::parse(declared)
                .map_err(|e| Error::InvalidConfig(e.to_string()))?;
            registry.declare(name);
        }
        let mut builder = ContractBuilder::new(registry, self.type_name()?);
        self.apply(&mut builder)?;
        Ok(builder)
    }

    /// Replay routing, binding, fields and methods onto a builder
    ///
    /// Declared external types must already be known to the builder's
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns the first builder error; earlier steps stay applied.
    pub fn apply(&self, builder: &mut ContractBuilder<'_>) -> Result<()> {
        if let Some(routing) = &self.routing {
            let media: Vec<&str> = routing.media_types.iter().map(String::as_str).collect();
            builder.annotate_type(&routing.path, &media)?;
        }
        if let Some(binding) = &self.binding {
            builder.bind_data(&binding.uid, &binding.payload)?;
        }
        for field in &self.fields {
            builder.add_field(
                TypeRef::parse(&field.type_ref)?,
                &field.name,
                field.value.clone().unwrap_or(FieldValue::Null),
            )?;
        }
        for method in &self.methods {
            let (ret, descriptor, binding, params) = method_parts(method)?;
            builder.add_method(ret, descriptor, binding, params)?;
        }
        tracing::debug!(
            contract = %self.name,
            fields = self.fields.len(),
            methods = self.methods.len(),
            "Applied contract"
        );
        Ok(())
    }
}

type MethodParts = (
    ReturnDescriptor,
    MethodDescriptor,
    Option<DataBinding>,
    Vec<ParamDescriptor>,
);

fn method_parts(method: &MethodConfig) -> Result<MethodParts> {
    let ret = ReturnDescriptor::new(TypeRef::parse(&method.returns)?)
        .name(method.result_name.as_str())
        .part_name(method.result_part.as_str())
        .target_namespace(method.result_namespace.as_str())
        .header(method.result_header);

    let descriptor = MethodDescriptor::new(method.name.as_str())
        .operation_name(method.operation.as_str())
        .action(method.action.as_str())
        .excluded(method.exclude);

    let binding = method
        .binding
        .as_ref()
        .map(|b| DataBinding::new(b.uid.as_str(), b.payload.as_str()));

    let params = method
        .params
        .iter()
        .map(|p| {
            let mut param = ParamDescriptor::new(TypeRef::parse(&p.type_ref)?, p.name.as_str())
                .target_namespace(p.namespace.as_str())
                .direction(p.mode)
                .header(p.header);
            if let Some(part) = &p.part {
                param = param.part_name(part.as_str());
            }
            Ok(param)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((ret, descriptor, binding, params))
}
