//! Semantic newtypes for contract identifiers
//!
//! # Parse-at-Boundaries Pattern
//!
//! Each identifier type trims its input, validates it once on construction,
//! and cannot represent an invalid name afterwards.
//!
//! - [`TypeName`]: qualified, dot-separated (`com.example.Greeter`)
//! - [`MemberName`]: a single segment naming a method, field or parameter

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Words that cannot name a member of a generated type.
const RESERVED: &[&str] = &["class", "new", "this", "super", "null", "true", "false"];

/// Unified error type for identifier validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Identifier is empty or contains only whitespace
    #[error("identifier cannot be empty")]
    Empty,

    /// Identifier exceeds maximum length
    #[error("identifier too long: {actual} characters (max {max})")]
    TooLong {
        /// The maximum allowed length
        max: usize,
        /// The actual length provided
        actual: usize,
    },

    /// A segment starts with something other than a letter or underscore
    #[error("identifier segment must start with a letter or '_': {value}")]
    InvalidStart {
        /// The offending segment
        value: String,
    },

    /// Identifier contains invalid characters
    #[error("identifier contains invalid characters: {value}")]
    InvalidCharacters {
        /// The value that failed validation
        value: String,
    },

    /// Identifier is a reserved word
    #[error("identifier is reserved: {value}")]
    Reserved {
        /// The reserved word
        value: String,
    },
}

fn validate_segment(segment: &str) -> Result<(), IdentifierError> {
    let mut chars = segment.chars();
    match chars.next() {
        None => return Err(IdentifierError::Empty),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => {
            return Err(IdentifierError::InvalidStart {
                value: segment.to_string(),
            })
        }
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(IdentifierError::InvalidCharacters {
            value: segment.to_string(),
        })
    }
}

fn check_length(value: &str, max: usize) -> Result<(), IdentifierError> {
    if value.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if value.len() > max {
        return Err(IdentifierError::TooLong {
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

// ============================================================================
// TYPE NAME
// ============================================================================

/// A qualified type name, unique per registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeName(pub(crate) String);

impl TypeName {
    /// Maximum allowed length for a qualified name
    pub const MAX_LENGTH: usize = 255;

    /// Parse and validate a qualified type name (trims whitespace first)
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if any segment is invalid.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = s.into();
        let trimmed = s.trim();
        check_length(trimmed, Self::MAX_LENGTH)?;
        trimmed.split('.').try_for_each(validate_segment)?;
        Ok(Self(trimmed.to_string()))
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment of the qualified name
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl TryFrom<String> for TypeName {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for TypeName {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TypeName {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// MEMBER NAME
// ============================================================================

/// The name of a method, field or parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberName(String);

impl MemberName {
    /// Maximum allowed length for a member name
    pub const MAX_LENGTH: usize = 128;

    /// Parse and validate a member name (trims whitespace first)
    ///
    /// # Errors
    ///
    /// Returns `IdentifierError` if the name is invalid or reserved.
    pub fn parse(s: impl Into<String>) -> Result<Self, IdentifierError> {
        let s = s.into();
        let trimmed = s.trim();
        check_length(trimmed, Self::MAX_LENGTH)?;
        validate_segment(trimmed)?;
        if RESERVED.contains(&trimmed) {
            return Err(IdentifierError::Reserved {
                value: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the name as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MemberName {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MemberName {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<MemberName> for String {
    fn from(name: MemberName) -> Self {
        name.0
    }
}

impl std::fmt::Display for MemberName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
