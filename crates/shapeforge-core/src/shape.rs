//! The in-progress shape of a generated type
//!
//! A [`TypeShape`] is owned by exactly one open builder (or parked as a draft
//! in the registry). It holds descriptors together with the metadata the
//! builder derived from them, so it can be inspected before materialization.

use serde::{Deserialize, Serialize};

use crate::descriptors::{DataBinding, FieldValue, MethodDescriptor, ParamDescriptor, ReturnDescriptor};
use crate::identifiers::{MemberName, TypeName};
use crate::metadata::MetadataSet;
use crate::types::TypeRef;

/// Marker every freshly created shape carries.
pub const CLONEABLE_MARKER: &str = "cloneable";

/// Method name plus ordered parameter types; unique within a shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: MemberName,
    pub param_types: Vec<TypeRef>,
}

impl MethodSignature {
    #[must_use]
    pub const fn new(name: MemberName, param_types: Vec<TypeRef>) -> Self {
        Self { name, param_types }
    }

    /// Signature with generic arguments dropped from every parameter type
    #[must_use]
    pub fn erased(&self) -> String {
        let params = itertools::join(self.param_types.iter().map(TypeRef::erasure), ", ");
        format!("{}({params})", self.name)
    }
}

impl std::fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = itertools::join(&self.param_types, ", ");
        write!(f, "{}({params})", self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Public,
}

/// A declared field with its literal initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldShape {
    pub name: MemberName,
    pub type_ref: TypeRef,
    pub initial: FieldValue,
    pub visibility: Visibility,
}

/// A contract-only method: no body, behaviour comes from a dispatch handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodShape {
    pub signature: MethodSignature,
    pub descriptor: MethodDescriptor,
    pub return_shape: ReturnDescriptor,
    pub parameters: Vec<ParamDescriptor>,
    pub data_binding: Option<DataBinding>,
    /// Method-level entries (operation, result, binding)
    pub metadata: MetadataSet,
    /// One set per parameter, in parameter order
    pub param_metadata: Vec<MetadataSet>,
}

/// Everything accumulated for one generated type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShape {
    pub name: TypeName,
    pub markers: Vec<String>,
    pub type_metadata: MetadataSet,
    pub fields: Vec<FieldShape>,
    pub methods: Vec<MethodShape>,
    pub data_binding: Option<DataBinding>,
}

impl TypeShape {
    /// A fresh, empty shape carrying the cloneable marker
    #[must_use]
    pub fn new(name: TypeName) -> Self {
        Self {
            name,
            markers: vec![CLONEABLE_MARKER.to_string()],
            type_metadata: MetadataSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            data_binding: None,
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }

    #[must_use]
    pub fn method(&self, signature: &MethodSignature) -> Option<&MethodShape> {
        self.methods.iter().find(|m| &m.signature == signature)
    }

    /// All methods with the given name, in declaration order
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodShape> {
        self.methods
            .iter()
            .filter(move |m| m.signature.name.as_str() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    fn sig(name: &str, params: &[&str]) -> Result<MethodSignature> {
        let name = MemberName::parse(name)
            .map_err(|e| crate::Error::CannotCompile(e.to_string()))?;
        let params = params
            .iter()
            .map(|p| TypeRef::parse(p))
            .collect::<Result<Vec<_>>>()?;
        Ok(MethodSignature::new(name, params))
    }

    #[test]
    fn test_signature_display_and_erasure() -> Result<()> {
        let s = sig("find", &["list<string>", "int"])?;
        assert_eq!(s.to_string(), "find(list<string>, int)");
        assert_eq!(s.erased(), "find(list, int)");
        Ok(())
    }

    #[test]
    fn test_signatures_differ_by_generic_args_but_erase_equal() -> Result<()> {
        let a = sig("find", &["list<string>"])?;
        let b = sig("find", &["list<int>"])?;
        assert_ne!(a, b);
        assert_eq!(a.erased(), b.erased());
        Ok(())
    }

    #[test]
    fn test_new_shape_is_cloneable() -> Result<()> {
        let name = TypeName::parse("svc.Greeter")
            .map_err(|e| crate::Error::TypeResolution(e.to_string()))?;
        let shape = TypeShape::new(name);
        assert_eq!(shape.markers, vec![CLONEABLE_MARKER.to_string()]);
        assert!(shape.fields.is_empty());
        assert!(shape.methods.is_empty());
        Ok(())
    }
}
