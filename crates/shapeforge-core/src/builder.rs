//! The contract builder
//!
//! A [`ContractBuilder`] is the mutable workspace for one generated type. It
//! works on a draft [`TypeShape`] parked in the [`TypeRegistry`] under the
//! builder's name, so a builder dropped while open leaves its draft behind for
//! the next builder of that name to resume.
//!
//! # Lifecycle
//!
//! ```text
//! Open ──to_type()/to_instance()──▶ Materialized (terminal)
//! ```
//!
//! Every mutation validates first and mutates last: a failed call leaves the
//! shape exactly as it was. Once materialized, every operation fails with
//! [`Error::AlreadyMaterialized`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use strum::Display;

use crate::descriptors::{
    DataBinding, FieldValue, MethodDescriptor, ParamDescriptor, ReturnDescriptor,
};
use crate::identifiers::{MemberName, TypeName};
use crate::instance::{Dispatch, DynamicObject, DELEGATE_SLOT};
use crate::materialize::{self, TypeDefinition, DYNAMIC_DISPATCH_MARKER};
use crate::metadata::{names, EnumInterner, MetadataEntry, MetadataSet, MetadataValue};
use crate::registry::TypeRegistry;
use crate::shape::{FieldShape, MethodShape, MethodSignature, TypeShape, Visibility};
use crate::types::{Builtin, TypeRef};
use crate::{Error, Result};

/// Builder lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum BuilderState {
    /// Accepting mutations
    Open,
    /// The type has been produced; terminal
    Materialized,
}

/// Mutable workspace accumulating one type's contract.
#[derive(Debug)]
pub struct ContractBuilder<'r> {
    registry: &'r mut TypeRegistry,
    name: TypeName,
}

impl<'r> ContractBuilder<'r> {
    /// Open a builder, resuming the registry's draft of this name if present
    pub fn new(registry: &'r mut TypeRegistry, name: TypeName) -> Self {
        let resumed = registry.open_draft(&name);
        tracing::debug!(type_name = %name, resumed, "Opened contract builder");
        Self { registry, name }
    }

    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    #[must_use]
    pub fn state(&self) -> BuilderState {
        if self.registry.draft(&self.name).is_some() {
            BuilderState::Open
        } else {
            BuilderState::Materialized
        }
    }

    /// The in-progress shape, or `None` once materialized
    #[must_use]
    pub fn shape(&self) -> Option<&TypeShape> {
        self.registry.draft(&self.name)
    }

    /// Snapshot of the in-progress shape without materializing
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyMaterialized` after materialization.
    pub fn build(&self) -> Result<TypeShape> {
        self.shape().cloned().ok_or_else(|| self.materialized_error())
    }

    /// The registry this builder resolves against
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &*self.registry
    }

    // ========================================================================
    // TYPE-LEVEL METADATA
    // ========================================================================

    /// Attach a routing path and the produced media types to the type
    ///
    /// Attaching again merges: the later path and media-type list win.
    ///
    /// # Errors
    ///
    /// Returns `Error::Composition` if existing entries hold incompatible values.
    pub fn annotate_type(&mut self, path: &str, media_types: &[&str]) -> Result<&mut Self> {
        let path_entry = MetadataEntry::new(names::ROUTING_PATH).with(names::VALUE, path);
        let produces_entry = MetadataEntry::new(names::PRODUCES).with(
            names::VALUE,
            MetadataValue::List(media_types.iter().map(|m| MetadataValue::from(*m)).collect()),
        );

        let shape = self.open_shape_mut()?;
        // Stage on a copy so both entries land or neither does
        let mut staged = shape.type_metadata.clone();
        staged.attach(path_entry)?;
        staged.attach(produces_entry)?;
        shape.type_metadata = staged;

        tracing::debug!(type_name = %self.name, path, ?media_types, "Annotated type");
        Ok(self)
    }

    /// Attach a data binding to the type, replacing any previous one
    pub fn bind_data(&mut self, uid: &str, payload: &str) -> Result<&mut Self> {
        self.open_shape_mut()?.data_binding = Some(DataBinding::new(uid, payload));
        tracing::debug!(type_name = %self.name, uid, "Bound data to type");
        Ok(self)
    }

    // ========================================================================
    // FIELDS
    // ========================================================================

    /// Declare a private field with a literal initializer
    ///
    /// A no-op if a field of this name already exists.
    ///
    /// # Errors
    ///
    /// - `Error::TypeResolution` if the field type is unknown
    /// - `Error::CannotCompile` if the name is illegal, the type is `void`,
    ///   or the literal does not fit the type
    pub fn add_field(&mut self, type_ref: TypeRef, name: &str, initial: FieldValue) -> Result<&mut Self> {
        let shape = self.open_shape()?;
        if shape.field(name.trim()).is_some() {
            tracing::debug!(type_name = %self.name, field = name, "Field already present");
            return Ok(self);
        }

        let member = self.member_name(name, "field")?;
        self.registry.resolve(&type_ref)?;
        if type_ref.is_void() {
            return Err(Error::CannotCompile(format!(
                "field '{member}' of '{}' cannot have type void",
                self.name
            )));
        }
        check_literal(&type_ref, &initial).map_err(|reason| {
            Error::CannotCompile(format!(
                "field '{member}' of '{}': {reason}",
                self.name
            ))
        })?;

        tracing::debug!(type_name = %self.name, field = %member, %type_ref, "Added field");
        self.open_shape_mut()?.fields.push(FieldShape {
            name: member,
            type_ref,
            initial,
            visibility: Visibility::Private,
        });
        Ok(self)
    }

    /// Remove a field; a no-op if absent
    pub fn remove_field(&mut self, name: &str) -> Result<&mut Self> {
        let shape = self.open_shape_mut()?;
        let before = shape.fields.len();
        shape.fields.retain(|f| f.name.as_str() != name.trim());
        if shape.fields.len() != before {
            tracing::debug!(type_name = %self.name, field = name, "Removed field");
        }
        Ok(self)
    }

    // ========================================================================
    // METHODS
    // ========================================================================

    /// Add a contract-only method
    ///
    /// Attaches, in this order: the operation entry, the result entry (only if
    /// the return descriptor names the result), the data-binding entry (if a
    /// binding is given), and one parameter entry per parameter.
    ///
    /// # Errors
    ///
    /// - `Error::TypeResolution` if the return or a parameter type is unknown
    /// - `Error::CannotCompile` if a name is illegal, a parameter is `void`,
    ///   two parameters share a name, or the signature already exists
    pub fn add_method(
        &mut self,
        return_shape: ReturnDescriptor,
        descriptor: MethodDescriptor,
        binding: Option<DataBinding>,
        parameters: Vec<ParamDescriptor>,
    ) -> Result<&mut Self> {
        self.open_shape()?;
        let method_name = self.member_name(&descriptor.name, "method")?;

        self.registry.resolve(&return_shape.type_ref)?;
        let mut seen = HashSet::new();
        for param in &parameters {
            self.registry.resolve(&param.type_ref)?;
            let param_name = self.member_name(&param.name, "parameter")?;
            if param.type_ref.is_void() {
                return Err(Error::CannotCompile(format!(
                    "parameter '{param_name}' of '{method_name}' cannot have type void"
                )));
            }
            if !seen.insert(param_name.clone()) {
                return Err(Error::CannotCompile(format!(
                    "duplicate parameter '{param_name}' in '{method_name}'"
                )));
            }
        }

        let signature = MethodSignature::new(
            method_name,
            parameters.iter().map(|p| p.type_ref.clone()).collect(),
        );
        if self.open_shape()?.method(&signature).is_some() {
            return Err(Error::CannotCompile(format!(
                "duplicate method '{signature}' in '{}'",
                self.name
            )));
        }

        let mut metadata = MetadataSet::new();
        metadata.attach(descriptor.metadata())?;
        if let Some(result) = return_shape.metadata() {
            metadata.attach(result)?;
        }
        if let Some(binding) = &binding {
            metadata.attach(binding.metadata())?;
        }

        let mut directions = EnumInterner::default();
        let param_metadata = parameters
            .iter()
            .map(|param| {
                let mut set = MetadataSet::new();
                let mut entry = MetadataEntry::new(names::PARAM)
                    .with(names::NAME, param.name.trim())
                    .with(names::TARGET_NAMESPACE, param.target_namespace.as_str())
                    .with(
                        names::MODE,
                        directions.intern(names::DIRECTION_ENUM, param.direction.as_ref()),
                    )
                    .with(names::HEADER, param.header);
                if let Some(part) = &param.part_name {
                    entry = entry.with(names::PART_NAME, part.as_str());
                }
                set.attach(entry).map(|()| set)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            type_name = %self.name,
            method = %signature,
            operation = descriptor.effective_operation_name(),
            excluded = descriptor.excluded,
            directions = directions.len(),
            "Added method"
        );

        self.open_shape_mut()?.methods.push(MethodShape {
            signature,
            descriptor,
            return_shape,
            parameters,
            data_binding: binding,
            metadata,
            param_metadata,
        });
        Ok(self)
    }

    /// Remove the method matching name and parameter types; a no-op if absent
    pub fn remove_method(&mut self, name: &str, param_types: &[TypeRef]) -> Result<&mut Self> {
        let shape = self.open_shape_mut()?;
        let before = shape.methods.len();
        shape.methods.retain(|m| {
            !(m.signature.name.as_str() == name.trim() && m.signature.param_types == param_types)
        });
        if shape.methods.len() != before {
            tracing::debug!(type_name = %self.name, method = name, "Removed method");
        }
        Ok(self)
    }

    // ========================================================================
    // MATERIALIZATION
    // ========================================================================

    /// Finalize the shape into a loaded type and release the draft
    ///
    /// # Errors
    ///
    /// - `Error::AlreadyMaterialized` on a second call
    /// - `Error::Materialization` on an erased-signature conflict or if the
    ///   name is already loaded; the builder stays open
    pub fn to_type(&mut self) -> Result<Arc<TypeDefinition>> {
        self.materialize(&[])
    }

    /// Finalize the shape and create an instance dispatching to `handler`
    ///
    /// Every declared method of the instance forwards to `handler` with the
    /// method's definition and the call's arguments.
    ///
    /// # Errors
    ///
    /// Everything [`to_type`](Self::to_type) returns, plus
    /// `Error::Instantiation` if a declared field occupies the delegate slot.
    pub fn to_instance<D>(&mut self, handler: D) -> Result<DynamicObject>
    where
        D: Dispatch + 'static,
    {
        if self.open_shape()?.field(DELEGATE_SLOT).is_some() {
            return Err(Error::Instantiation(format!(
                "field '{DELEGATE_SLOT}' of '{}' collides with the dispatch delegate",
                self.name
            )));
        }
        let definition = self.materialize(&[DYNAMIC_DISPATCH_MARKER])?;
        Ok(DynamicObject::construct(definition, Box::new(handler)))
    }

    fn materialize(&mut self, extra_markers: &[&str]) -> Result<Arc<TypeDefinition>> {
        let definition = materialize::compile(self.open_shape()?, extra_markers)?;
        let definition = self.registry.promote(definition)?;
        tracing::info!(
            type_name = %self.name,
            methods = definition.methods().len(),
            fields = definition.fields().len(),
            "Materialized type"
        );
        Ok(definition)
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn open_shape(&self) -> Result<&TypeShape> {
        self.registry
            .draft(&self.name)
            .ok_or_else(|| self.materialized_error())
    }

    fn open_shape_mut(&mut self) -> Result<&mut TypeShape> {
        let error = self.materialized_error();
        self.registry.draft_mut(&self.name).ok_or(error)
    }

    fn materialized_error(&self) -> Error {
        Error::AlreadyMaterialized(format!("'{}' can no longer be modified", self.name))
    }

    fn member_name(&self, name: &str, what: &str) -> Result<MemberName> {
        MemberName::parse(name).map_err(|e| {
            Error::CannotCompile(format!("illegal {what} name '{name}' in '{}': {e}", self.name))
        })
    }
}

/// Check that a literal initializer fits the declared type.
fn check_literal(type_ref: &TypeRef, value: &FieldValue) -> std::result::Result<(), String> {
    let fits = match (type_ref.builtin(), value) {
        (Some(Builtin::Object), _) => true,
        (Some(b), FieldValue::Null) => !b.is_primitive(),
        (None, FieldValue::Null) => true,
        (Some(Builtin::Boolean), FieldValue::Bool(_)) => true,
        (Some(b), FieldValue::Int(i)) => b.fits_integer(*i) || b.is_floating(),
        (Some(b), FieldValue::Float(_)) => b.is_floating(),
        (Some(Builtin::Char), FieldValue::Str(s)) => s.chars().count() == 1,
        (Some(Builtin::String), FieldValue::Str(_)) => true,
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(format!("literal {value} does not fit type {type_ref}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptors::Direction;

    fn type_name(s: &str) -> Result<TypeName> {
        TypeName::parse(s).map_err(|e| Error::CannotCompile(e.to_string()))
    }

    fn t(s: &str) -> Result<TypeRef> {
        TypeRef::parse(s)
    }

    #[test]
    fn test_builder_starts_open_with_cloneable_marker() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let builder = ContractBuilder::new(&mut registry, type_name("svc.Greeter")?);
        assert_eq!(builder.state(), BuilderState::Open);
        let shape = builder.build()?;
        assert_eq!(shape.markers, vec![crate::shape::CLONEABLE_MARKER.to_string()]);
        Ok(())
    }

    #[test]
    fn test_add_field_is_idempotent() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Counter")?);
        builder
            .add_field(t("int")?, "count", FieldValue::Int(0))?
            .add_field(t("string")?, "count", FieldValue::Str("ignored".into()))?;

        let shape = builder.build()?;
        assert_eq!(shape.fields.len(), 1);
        assert_eq!(shape.fields[0].type_ref, t("int")?);
        assert_eq!(shape.fields[0].visibility, Visibility::Private);
        Ok(())
    }

    #[test]
    fn test_add_field_rejects_mismatched_literal() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Counter")?);
        let result = builder.add_field(t("int")?, "count", FieldValue::Str("zero".into()));
        assert!(matches!(result, Err(Error::CannotCompile(_))));
        assert!(builder.build()?.fields.is_empty());

        let result = builder.add_field(t("boolean")?, "flag", FieldValue::Null);
        assert!(matches!(result, Err(Error::CannotCompile(_))));

        let result = builder.add_field(t("byte")?, "small", FieldValue::Int(100_000));
        assert!(matches!(result, Err(Error::CannotCompile(_))));
        builder.add_field(t("short")?, "medium", FieldValue::Int(-32_768))?;
        assert_eq!(builder.build()?.fields.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_field_rejects_void() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Counter")?);
        let result = builder.add_field(t("void")?, "nothing", FieldValue::Null);
        assert!(matches!(result, Err(Error::CannotCompile(msg)) if msg.contains("void")));
        assert!(builder.build()?.fields.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_field_unknown_type() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Counter")?);
        let result = builder.add_field(t("com.example.Missing")?, "x", FieldValue::Null);
        assert!(matches!(result, Err(Error::TypeResolution(_))));
        Ok(())
    }

    #[test]
    fn test_remove_absent_field_is_noop() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Counter")?);
        builder.add_field(t("long")?, "total", FieldValue::Int(1))?;
        let before = builder.build()?;
        builder.remove_field("missing")?;
        assert_eq!(builder.build()?, before);
        builder.remove_field("total")?;
        assert!(builder.build()?.fields.is_empty());
        Ok(())
    }

    #[test]
    fn test_add_method_attaches_metadata_in_order() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Orders")?);
        builder.add_method(
            ReturnDescriptor::new(t("string")?).name("receipt"),
            MethodDescriptor::new("place").operation_name("PlaceOrder").action("urn:place"),
            Some(DataBinding::new("7", "{}")),
            vec![
                ParamDescriptor::new(t("long")?, "id").part_name("idPart"),
                ParamDescriptor::new(t("string")?, "note").direction(Direction::InOut),
                ParamDescriptor::new(t("string")?, "token").header(true),
            ],
        )?;

        let shape = builder.build()?;
        let method = &shape.methods[0];
        let entries: Vec<_> = method.metadata.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(entries, vec![names::OPERATION, names::RESULT, names::DATA_BINDING]);

        let params: Vec<_> = method
            .param_metadata
            .iter()
            .filter_map(|s| s.get(names::PARAM))
            .collect();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].get_str(names::PART_NAME), Some("idPart"));
        assert!(params[1].get(names::PART_NAME).is_none());
        assert_eq!(
            params[1].get(names::MODE).and_then(MetadataValue::as_constant),
            Some("INOUT")
        );
        assert_eq!(params[2].get_bool(names::HEADER), Some(true));
        assert_eq!(params[0].get(names::MODE), params[2].get(names::MODE));

        let result = method.metadata.get(names::RESULT);
        assert_eq!(result.and_then(|e| e.get_str(names::NAME)), Some("receipt"));
        assert!(result.and_then(|e| e.get(names::PART_NAME)).is_none());
        assert!(result.and_then(|e| e.get(names::TARGET_NAMESPACE)).is_none());

        let definition = builder.to_type()?;
        let placed = &definition.methods()[0];
        assert_eq!(placed.action(), Some("urn:place"));
        assert_eq!(placed.operation_name(), "PlaceOrder");
        assert_eq!(placed.data_binding(), Some(DataBinding::new("7", "{}")));
        assert_eq!(registry.loaded_names(), vec![&type_name("svc.Orders")?]);
        Ok(())
    }

    #[test]
    fn test_add_method_rejects_duplicate_signature() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Greeter")?);
        let add = |b: &mut ContractBuilder<'_>| -> Result<()> {
            b.add_method(
                ReturnDescriptor::new(t("string")?),
                MethodDescriptor::new("sayHello"),
                None,
                vec![ParamDescriptor::new(t("string")?, "name")],
            )
            .map(|_| ())
        };
        add(&mut builder)?;
        assert!(matches!(add(&mut builder), Err(Error::CannotCompile(_))));
        assert_eq!(builder.build()?.methods.len(), 1);
        Ok(())
    }

    #[test]
    fn test_add_method_rejects_illegal_names_and_void_params() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Greeter")?);

        let bad_name = builder.add_method(
            ReturnDescriptor::new(t("void")?),
            MethodDescriptor::new("say hello"),
            None,
            vec![],
        );
        assert!(matches!(bad_name, Err(Error::CannotCompile(_))));

        let void_param = builder.add_method(
            ReturnDescriptor::new(t("void")?),
            MethodDescriptor::new("ping"),
            None,
            vec![ParamDescriptor::new(t("void")?, "nothing")],
        );
        assert!(matches!(void_param, Err(Error::CannotCompile(_))));

        let dup_param = builder.add_method(
            ReturnDescriptor::new(t("void")?),
            MethodDescriptor::new("ping"),
            None,
            vec![
                ParamDescriptor::new(t("int")?, "a"),
                ParamDescriptor::new(t("int")?, "a"),
            ],
        );
        assert!(matches!(dup_param, Err(Error::CannotCompile(_))));
        assert!(builder.build()?.methods.is_empty());
        Ok(())
    }

    #[test]
    fn test_method_may_reference_its_own_type() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Node")?);
        builder.add_method(
            ReturnDescriptor::new(t("svc.Node")?),
            MethodDescriptor::new("copy"),
            None,
            vec![],
        )?;
        assert_eq!(builder.build()?.methods.len(), 1);
        Ok(())
    }

    #[test]
    fn test_remove_method_matches_structurally() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Greeter")?);
        builder.add_method(
            ReturnDescriptor::new(t("string")?),
            MethodDescriptor::new("greet"),
            None,
            vec![ParamDescriptor::new(t("list<string>")?, "names")],
        )?;

        builder.remove_method("greet", &[t("list<int>")?])?;
        assert_eq!(builder.build()?.methods.len(), 1);
        builder.remove_method("greet", &[t("list<string>")?])?;
        assert!(builder.build()?.methods.is_empty());
        Ok(())
    }

    #[test]
    fn test_annotate_type_merges_deterministically() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Greeter")?);
        builder
            .annotate_type("/v1", &["text/plain"])?
            .annotate_type("/v2", &["application/json", "application/xml"])?;
        let shape = builder.build()?;
        assert_eq!(shape.type_metadata.len(), 2);
        assert_eq!(
            shape
                .type_metadata
                .get(names::ROUTING_PATH)
                .and_then(|e| e.get_str(names::VALUE)),
            Some("/v2")
        );
        Ok(())
    }

    #[test]
    fn test_erasure_conflict_fails_and_stays_open() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Finder")?);
        for arg in ["list<string>", "list<int>"] {
            builder.add_method(
                ReturnDescriptor::new(t("void")?),
                MethodDescriptor::new("find"),
                None,
                vec![ParamDescriptor::new(t(arg)?, "items")],
            )?;
        }

        assert!(matches!(builder.to_type(), Err(Error::Materialization(_))));
        assert_eq!(builder.state(), BuilderState::Open);

        builder.remove_method("find", &[t("list<int>")?])?;
        builder.to_type()?;
        assert_eq!(builder.state(), BuilderState::Materialized);
        Ok(())
    }

    #[test]
    fn test_second_to_type_fails() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Once")?);
        builder.to_type()?;
        assert!(matches!(builder.to_type(), Err(Error::AlreadyMaterialized(_))));
        assert!(matches!(
            builder.bind_data("1", "x"),
            Err(Error::AlreadyMaterialized(_))
        ));
        assert!(builder.shape().is_none());
        Ok(())
    }

    #[test]
    fn test_delegate_slot_collision_is_instantiation_error() -> Result<()> {
        let mut registry = TypeRegistry::new();
        let mut builder = ContractBuilder::new(&mut registry, type_name("svc.Clash")?);
        builder.add_field(t("object")?, DELEGATE_SLOT, FieldValue::Null)?;

        let handler = |_: &crate::MethodDefinition, _: &[serde_json::Value]| {
            Ok::<_, crate::DispatchError>(serde_json::Value::Null)
        };
        assert!(matches!(
            builder.to_instance(handler),
            Err(Error::Instantiation(_))
        ));
        assert_eq!(builder.state(), BuilderState::Open);
        Ok(())
    }

    #[test]
    fn test_check_literal() -> Result<()> {
        assert!(check_literal(&t("double")?, &FieldValue::Int(3)).is_ok());
        assert!(check_literal(&t("char")?, &FieldValue::Str("x".into())).is_ok());
        assert!(check_literal(&t("list<int>")?, &FieldValue::Null).is_ok());
        assert!(check_literal(&t("list<int>")?, &FieldValue::Int(1)).is_err());
        assert!(check_literal(&t("int")?, &FieldValue::Float(1.5)).is_err());
        Ok(())
    }
}
