//! Materialized, frozen type definitions
//!
//! [`compile`] turns a finished [`TypeShape`] into a [`TypeDefinition`]: the
//! loadable form that annotation-aware consumers introspect. Definitions are
//! immutable and shared through the registry as `Arc`s.

use std::collections::HashMap;

use serde::Serialize;

use crate::descriptors::DataBinding;
use crate::identifiers::TypeName;
use crate::metadata::{names, MetadataEntry, MetadataSet};
use crate::shape::{FieldShape, MethodSignature, TypeShape};
use crate::types::TypeRef;
use crate::{Error, Result};

/// Marker added to types materialized with a dispatch delegate.
pub const DYNAMIC_DISPATCH_MARKER: &str = "dynamic_dispatch";

/// Identity of a method within its definition (declaration index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MethodId(u32);

impl MethodId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for MethodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A method of a materialized type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDefinition {
    id: MethodId,
    signature: MethodSignature,
    return_type: TypeRef,
    metadata: MetadataSet,
    param_metadata: Vec<MetadataSet>,
}

impl MethodDefinition {
    #[must_use]
    pub const fn id(&self) -> MethodId {
        self.id
    }

    #[must_use]
    pub const fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Internal method name
    #[must_use]
    pub fn name(&self) -> &str {
        self.signature.name.as_str()
    }

    #[must_use]
    pub const fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    #[must_use]
    pub const fn metadata(&self) -> &MetadataSet {
        &self.metadata
    }

    /// Per-parameter metadata, in parameter order
    #[must_use]
    pub fn param_metadata(&self) -> &[MetadataSet] {
        &self.param_metadata
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.signature.param_types.len()
    }

    fn operation(&self) -> Option<&MetadataEntry> {
        self.metadata.get(names::OPERATION)
    }

    /// Caller-visible operation name
    #[must_use]
    pub fn operation_name(&self) -> &str {
        self.operation()
            .and_then(|e| e.get_str(names::OPERATION_NAME))
            .unwrap_or_else(|| self.name())
    }

    #[must_use]
    pub fn action(&self) -> Option<&str> {
        self.operation().and_then(|e| e.get_str(names::ACTION))
    }

    /// Whether the method is hidden from contract consumers
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.operation()
            .and_then(|e| e.get_bool(names::EXCLUDE))
            .unwrap_or(false)
    }

    /// External result name, if one was declared
    #[must_use]
    pub fn result_name(&self) -> Option<&str> {
        self.metadata
            .get(names::RESULT)
            .and_then(|e| e.get_str(names::NAME))
    }

    /// External parameter names, in parameter order
    #[must_use]
    pub fn param_names(&self) -> Vec<&str> {
        self.param_metadata
            .iter()
            .map(|set| {
                set.get(names::PARAM)
                    .and_then(|e| e.get_str(names::NAME))
                    .unwrap_or_default()
            })
            .collect()
    }

    #[must_use]
    pub fn data_binding(&self) -> Option<DataBinding> {
        self.metadata
            .get(names::DATA_BINDING)
            .and_then(DataBinding::from_metadata)
    }
}

/// A loadable, introspectable type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDefinition {
    name: TypeName,
    markers: Vec<String>,
    metadata: MetadataSet,
    fields: Vec<FieldShape>,
    methods: Vec<MethodDefinition>,
}

impl TypeDefinition {
    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    #[must_use]
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// Type-level metadata
    #[must_use]
    pub const fn metadata(&self) -> &MetadataSet {
        &self.metadata
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldShape] {
        &self.fields
    }

    #[must_use]
    pub fn methods(&self) -> &[MethodDefinition] {
        &self.methods
    }

    #[must_use]
    pub fn method(&self, id: MethodId) -> Option<&MethodDefinition> {
        self.methods.get(id.index())
    }

    /// Methods with the given internal name, in declaration order
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodDefinition> {
        self.methods.iter().filter(move |m| m.name() == name)
    }

    /// Methods visible to contract consumers
    pub fn contract_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.methods.iter().filter(|m| !m.is_excluded())
    }

    #[must_use]
    pub fn routing_path(&self) -> Option<&str> {
        self.metadata
            .get(names::ROUTING_PATH)
            .and_then(|e| e.get_str(names::VALUE))
    }

    #[must_use]
    pub fn media_types(&self) -> Vec<&str> {
        self.metadata
            .get(names::PRODUCES)
            .and_then(|e| e.get(names::VALUE))
            .and_then(|v| v.as_str_list())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn data_binding(&self) -> Option<DataBinding> {
        self.metadata
            .get(names::DATA_BINDING)
            .and_then(DataBinding::from_metadata)
    }
}

/// Freeze a shape into a definition
///
/// # Errors
///
/// Returns `Error::Materialization` if two methods share an erased signature,
/// or `Error::Composition` if the type binding cannot be merged into the
/// type metadata.
pub(crate) fn compile(shape: &TypeShape, extra_markers: &[&str]) -> Result<TypeDefinition> {
    let mut erased: HashMap<String, &MethodSignature> = HashMap::new();
    for method in &shape.methods {
        if let Some(previous) = erased.insert(method.signature.erased(), &method.signature) {
            return Err(Error::Materialization(format!(
                "methods '{previous}' and '{}' of '{}' share the erased signature '{}'",
                method.signature,
                shape.name,
                method.signature.erased()
            )));
        }
    }

    let mut metadata = shape.type_metadata.clone();
    if let Some(binding) = &shape.data_binding {
        metadata.attach(binding.metadata())?;
    }

    let mut markers = shape.markers.clone();
    markers.extend(
        extra_markers
            .iter()
            .filter(|m| !shape.markers.iter().any(|existing| existing == *m))
            .map(ToString::to_string),
    );

    let methods = shape
        .methods
        .iter()
        .enumerate()
        .map(|(index, method)| {
            let id = u32::try_from(index).map_err(|_| {
                Error::Materialization(format!("too many methods on '{}'", shape.name))
            })?;
            Ok(MethodDefinition {
                id: MethodId(id),
                signature: method.signature.clone(),
                return_type: method.return_shape.type_ref.clone(),
                metadata: method.metadata.clone(),
                param_metadata: method.param_metadata.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeDefinition {
        name: shape.name.clone(),
        markers,
        metadata,
        fields: shape.fields.clone(),
        methods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::CLONEABLE_MARKER;

    fn shape(name: &str) -> Result<TypeShape> {
        TypeName::parse(name)
            .map(TypeShape::new)
            .map_err(|e| Error::CannotCompile(e.to_string()))
    }

    #[test]
    fn test_compile_adds_markers_once() -> Result<()> {
        let shape = shape("svc.Plain")?;
        let definition = compile(&shape, &[DYNAMIC_DISPATCH_MARKER, CLONEABLE_MARKER])?;
        assert_eq!(
            definition.markers(),
            [CLONEABLE_MARKER.to_string(), DYNAMIC_DISPATCH_MARKER.to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_compile_moves_type_binding_into_metadata() -> Result<()> {
        let mut shape = shape("svc.Bound")?;
        shape.data_binding = Some(DataBinding::new("42", "{}"));
        let definition = compile(&shape, &[])?;
        assert_eq!(definition.data_binding(), shape.data_binding);
        assert!(definition.routing_path().is_none());
        assert!(definition.media_types().is_empty());
        Ok(())
    }

    #[test]
    fn test_method_id_display() {
        assert_eq!(MethodId(3).to_string(), "#3");
        assert_eq!(MethodId(3).index(), 3);
    }
}
