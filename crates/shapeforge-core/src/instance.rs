//! Live instances whose every method forwards to one dispatch handler
//!
//! A [`DynamicObject`] pairs a materialized [`TypeDefinition`] with the
//! delegate captured by its synthesized constructor. Invocation checks the
//! method and its arguments against the definition, then hands the call to
//! the delegate. The delegate's result is the call's result; its failure is
//! the call's failure.

use std::sync::Arc;

use serde_json::Value;

use crate::error::DispatchError;
use crate::materialize::{MethodDefinition, MethodId, TypeDefinition};
use crate::{Error, Result};

/// Name of the slot the synthesized constructor stores the delegate in.
pub const DELEGATE_SLOT: &str = "__dispatch";

/// A single handler for every method call on an instance.
pub trait Dispatch {
    /// Handle a call to `method` with already-checked `args`
    fn dispatch(&self, method: &MethodDefinition, args: &[Value]) -> std::result::Result<Value, DispatchError>;
}

impl<F> Dispatch for F
where
    F: Fn(&MethodDefinition, &[Value]) -> std::result::Result<Value, DispatchError>,
{
    fn dispatch(&self, method: &MethodDefinition, args: &[Value]) -> std::result::Result<Value, DispatchError> {
        self(method, args)
    }
}

/// An instance of a materialized type, backed by a dispatch delegate.
pub struct DynamicObject {
    definition: Arc<TypeDefinition>,
    delegate: Box<dyn Dispatch>,
}

impl std::fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicObject")
            .field("type", self.definition.name())
            .finish_non_exhaustive()
    }
}

impl DynamicObject {
    pub(crate) fn construct(definition: Arc<TypeDefinition>, delegate: Box<dyn Dispatch>) -> Self {
        Self {
            definition,
            delegate,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &TypeDefinition {
        &self.definition
    }

    /// Invoke a method by name
    ///
    /// Overloads are narrowed by arity, then by which parameter types accept
    /// the arguments.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownMethod` if no method has this name
    /// - `Error::Invocation` if no overload (or more than one) fits the arguments
    /// - `Error::Dispatch` if the delegate fails
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Value> {
        let candidates: Vec<_> = self.definition.methods_named(name).collect();
        if candidates.is_empty() {
            return Err(Error::UnknownMethod(format!(
                "'{}' has no method '{name}'",
                self.definition.name()
            )));
        }

        let by_arity: Vec<_> = candidates
            .into_iter()
            .filter(|m| m.arity() == args.len())
            .collect();
        if by_arity.is_empty() {
            return Err(Error::Invocation(format!(
                "no overload of '{name}' takes {} argument(s)",
                args.len()
            )));
        }

        let fitting: Vec<_> = by_arity
            .iter()
            .copied()
            .filter(|m| arguments_fit(m, args))
            .collect();
        match fitting.as_slice() {
            [method] => self.call(method, args),
            [] => {
                // Report against the single candidate when there is one
                let method = by_arity[0];
                Err(check_arguments(method, args).err().unwrap_or_else(|| {
                    Error::Invocation(format!("arguments do not fit any overload of '{name}'"))
                }))
            }
            many => Err(Error::Invocation(format!(
                "call to '{name}' is ambiguous between {}",
                itertools::join(many.iter().map(|m| m.signature()), " and ")
            ))),
        }
    }

    /// Invoke a method by identity
    ///
    /// # Errors
    ///
    /// - `Error::UnknownMethod` if the id does not belong to this type
    /// - `Error::Invocation` if the arguments do not fit
    /// - `Error::Dispatch` if the delegate fails
    pub fn invoke_id(&self, id: MethodId, args: &[Value]) -> Result<Value> {
        let method = self.definition.method(id).ok_or_else(|| {
            Error::UnknownMethod(format!("'{}' has no method {id}", self.definition.name()))
        })?;
        check_arguments(method, args)?;
        self.call(method, args)
    }

    fn call(&self, method: &MethodDefinition, args: &[Value]) -> Result<Value> {
        tracing::trace!(
            type_name = %self.definition.name(),
            method = %method.signature(),
            "Dispatching call"
        );
        self.delegate.dispatch(method, args).map_err(|e| {
            tracing::debug!(method = %method.signature(), error = %e, "Dispatch failed");
            Error::from(e)
        })
    }
}

fn arguments_fit(method: &MethodDefinition, args: &[Value]) -> bool {
    check_arguments(method, args).is_ok()
}

fn check_arguments(method: &MethodDefinition, args: &[Value]) -> Result<()> {
    if method.arity() != args.len() {
        return Err(Error::Invocation(format!(
            "'{}' takes {} argument(s), got {}",
            method.signature(),
            method.arity(),
            args.len()
        )));
    }
    method
        .signature()
        .param_types
        .iter()
        .zip(args)
        .enumerate()
        .find(|(_, (ty, arg))| !ty.accepts(arg))
        .map_or(Ok(()), |(index, (ty, arg))| {
            Err(Error::Invocation(format!(
                "argument {index} of '{}' expects {ty}, got {arg}",
                method.signature()
            )))
        })
}
