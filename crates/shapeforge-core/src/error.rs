//! Error types for shapeforge-core
//!
//! Every failure is synchronous and local to the call that raised it. The
//! variants map one-to-one onto the failure kinds of the contract lifecycle:
//!
//! - **Build time**: `TypeResolution`, `Composition`, `CannotCompile`
//! - **Materialization**: `Materialization`, `AlreadyMaterialized`, `Instantiation`
//! - **Invocation**: `UnknownMethod`, `Invocation`, `Dispatch`
//! - **Configuration**: `Io`, `Parse`, `InvalidConfig`

use thiserror::Error;

/// Core error type for contract operations
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced type cannot be found in the registry
    #[error("Type resolution error: {0}")]
    TypeResolution(String),

    /// Metadata conflicts with metadata already attached to the same entity
    #[error("Composition error: {0}")]
    Composition(String),

    /// The requested shape is structurally illegal
    #[error("Cannot compile: {0}")]
    CannotCompile(String),

    /// The finished shape cannot be turned into a loadable type
    #[error("Materialization error: {0}")]
    Materialization(String),

    /// The builder has already produced its type
    #[error("Already materialized: {0}")]
    AlreadyMaterialized(String),

    /// The materialized type cannot be instantiated
    #[error("Instantiation error: {0}")]
    Instantiation(String),

    /// No method matches the invocation
    #[error("Unknown method: {0}")]
    UnknownMethod(String),

    /// Arguments do not fit the invoked method
    #[error("Invocation error: {0}")]
    Invocation(String),

    /// The dispatch handler failed
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Reading a contract file failed
    #[error("IO error: {0}")]
    Io(String),

    /// A contract file is malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A contract file is well-formed but inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns the process exit code for this error.
    ///
    /// - 1: User error (unreadable or invalid contract file)
    /// - 2: Contract rejected (resolution, composition, compile, materialization)
    /// - 3: Not found (unknown method on an instance)
    /// - 4: Runtime failure (bad arguments, handler failure)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) | Self::Parse(_) | Self::InvalidConfig(_) => 1,
            Self::TypeResolution(_)
            | Self::Composition(_)
            | Self::CannotCompile(_)
            | Self::Materialization(_)
            | Self::AlreadyMaterialized(_)
            | Self::Instantiation(_) => 2,
            Self::UnknownMethod(_) => 3,
            Self::Invocation(_) | Self::Dispatch(_) => 4,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(format!("Failed to parse contract: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failure raised by a dispatch handler.
///
/// Propagated to the caller of the invoked method without rewrapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DispatchError {
    message: String,
}

impl DispatchError {
    /// Create a dispatch failure with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for DispatchError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for DispatchError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Result type alias for shapeforge-core operations
pub type Result<T> = std::result::Result<T, Error>;
