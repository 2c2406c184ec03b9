//! The type registry: an explicit, caller-owned host type system
//!
//! The registry knows four kinds of names:
//!
//! 1. Built-in types ([`Builtin`](crate::types::Builtin))
//! 2. Declared external types (opaque names the surrounding framework knows)
//! 3. Draft shapes, one per open [`ContractBuilder`](crate::ContractBuilder)
//! 4. Loaded types, produced by materialization
//!
//! A draft is detached the moment its builder materializes, and the resulting
//! [`TypeDefinition`] is loaded under the same name. Loading a name twice is
//! rejected rather than merged. The registry is not synchronized: callers
//! that share one across threads must serialize access themselves.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::identifiers::TypeName;
use crate::materialize::TypeDefinition;
use crate::shape::TypeShape;
use crate::types::TypeRef;
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct TypeRegistry {
    declared: HashSet<TypeName>,
    drafts: HashMap<TypeName, TypeShape>,
    loaded: HashMap<TypeName, Arc<TypeDefinition>>,
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an opaque external type so references to it resolve
    pub fn declare(&mut self, name: TypeName) -> &mut Self {
        tracing::debug!(type_name = %name, "Declared external type");
        self.declared.insert(name);
        self
    }

    /// Check that a reference (and all of its generic arguments) resolves
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeResolution` if any named type is unknown, if a
    /// generic type gets the wrong number of arguments, or if `void` appears
    /// as a type argument.
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<()> {
        let expected = match type_ref.builtin() {
            Some(builtin) => builtin.arity(),
            None if self.is_known(type_ref.name()) => 0,
            None => {
                return Err(Error::TypeResolution(format!(
                    "unknown type '{}'",
                    type_ref.name()
                )))
            }
        };

        if type_ref.args().len() != expected {
            return Err(Error::TypeResolution(format!(
                "type '{}' takes {expected} type argument(s), got {} in '{type_ref}'",
                type_ref.name(),
                type_ref.args().len()
            )));
        }

        type_ref.args().iter().try_for_each(|arg| {
            if arg.is_void() {
                Err(Error::TypeResolution(format!(
                    "'void' cannot be a type argument in '{type_ref}'"
                )))
            } else {
                self.resolve(arg)
            }
        })
    }

    /// Whether a non-builtin name is declared, drafted or loaded
    #[must_use]
    pub fn is_known(&self, name: &TypeName) -> bool {
        self.declared.contains(name) || self.drafts.contains_key(name) || self.loaded.contains_key(name)
    }

    /// The open draft of the given name, if any
    #[must_use]
    pub fn draft(&self, name: &TypeName) -> Option<&TypeShape> {
        self.drafts.get(name)
    }

    /// The materialized definition of the given name, if any
    #[must_use]
    pub fn loaded(&self, name: &TypeName) -> Option<Arc<TypeDefinition>> {
        self.loaded.get(name).cloned()
    }

    /// Names of all loaded types, sorted
    #[must_use]
    pub fn loaded_names(&self) -> Vec<&TypeName> {
        let mut names: Vec<_> = self.loaded.keys().collect();
        names.sort();
        names
    }

    /// Reuse the draft of this name, or create a fresh one
    pub(crate) fn open_draft(&mut self, name: &TypeName) -> bool {
        if self.drafts.contains_key(name) {
            return true;
        }
        self.drafts.insert(name.clone(), TypeShape::new(name.clone()));
        false
    }

    pub(crate) fn draft_mut(&mut self, name: &TypeName) -> Option<&mut TypeShape> {
        self.drafts.get_mut(name)
    }

    /// Detach a draft and load its definition under the same name
    pub(crate) fn promote(&mut self, definition: TypeDefinition) -> Result<Arc<TypeDefinition>> {
        let name = definition.name().clone();
        if self.loaded.contains_key(&name) {
            return Err(Error::Materialization(format!(
                "a type named '{name}' is already loaded"
            )));
        }
        self.drafts.remove(&name);
        let definition = Arc::new(definition);
        self.loaded.insert(name, Arc::clone(&definition));
        Ok(definition)
    }
}
