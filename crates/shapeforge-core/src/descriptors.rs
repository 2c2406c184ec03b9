//! Value objects describing the pieces of a contract
//!
//! Descriptors carry external naming and placement information. They are
//! plain data: resolution and validation happen when the builder consumes
//! them.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::metadata::{names, MetadataEntry};
use crate::types::TypeRef;

/// Parameter flow classification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    In,
    Out,
    #[strum(serialize = "INOUT")]
    #[serde(rename = "INOUT")]
    InOut,
}

/// Describes one method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub type_ref: TypeRef,
    pub name: String,
    pub part_name: Option<String>,
    pub target_namespace: String,
    pub direction: Direction,
    pub header: bool,
}

impl ParamDescriptor {
    #[must_use]
    pub fn new(type_ref: TypeRef, name: impl Into<String>) -> Self {
        Self {
            type_ref,
            name: name.into(),
            part_name: None,
            target_namespace: String::new(),
            direction: Direction::In,
            header: false,
        }
    }

    #[must_use]
    pub fn part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = Some(part_name.into());
        self
    }

    #[must_use]
    pub fn target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = namespace.into();
        self
    }

    #[must_use]
    pub const fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub const fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

/// Describes a method's return value.
///
/// An empty `name` means "use the framework default": no result entry is
/// attached to the method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDescriptor {
    pub type_ref: TypeRef,
    pub name: String,
    pub part_name: String,
    pub target_namespace: String,
    pub header: bool,
}

impl ReturnDescriptor {
    #[must_use]
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            name: String::new(),
            part_name: String::new(),
            target_namespace: String::new(),
            header: false,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = part_name.into();
        self
    }

    #[must_use]
    pub fn target_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.target_namespace = namespace.into();
        self
    }

    #[must_use]
    pub const fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub(crate) fn metadata(&self) -> Option<MetadataEntry> {
        if self.name.is_empty() {
            return None;
        }
        let mut entry = MetadataEntry::new(names::RESULT).with(names::NAME, self.name.as_str());
        if !self.part_name.is_empty() {
            entry = entry.with(names::PART_NAME, self.part_name.as_str());
        }
        if !self.target_namespace.is_empty() {
            entry = entry.with(names::TARGET_NAMESPACE, self.target_namespace.as_str());
        }
        Some(entry.with(names::HEADER, self.header))
    }
}

/// Describes an operation: internal name plus external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub operation_name: String,
    pub action: String,
    pub excluded: bool,
}

impl MethodDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operation_name: String::new(),
            action: String::new(),
            excluded: false,
        }
    }

    #[must_use]
    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = operation_name.into();
        self
    }

    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    #[must_use]
    pub const fn excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    /// External operation name, falling back to the internal name
    #[must_use]
    pub fn effective_operation_name(&self) -> &str {
        if self.operation_name.is_empty() {
            &self.name
        } else {
            &self.operation_name
        }
    }

    pub(crate) fn metadata(&self) -> MetadataEntry {
        let entry = MetadataEntry::new(names::OPERATION)
            .with(names::OPERATION_NAME, self.effective_operation_name())
            .with(names::EXCLUDE, self.excluded);
        if self.action.is_empty() {
            entry
        } else {
            entry.with(names::ACTION, self.action.as_str())
        }
    }
}

/// An identifier plus an opaque payload, attachable to a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataBinding {
    pub uid: String,
    pub payload: String,
}

impl DataBinding {
    #[must_use]
    pub fn new(uid: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            payload: payload.into(),
        }
    }

    /// An empty payload is left off the entry
    pub(crate) fn metadata(&self) -> MetadataEntry {
        let entry = MetadataEntry::new(names::DATA_BINDING).with(names::UID, self.uid.as_str());
        if self.payload.is_empty() {
            entry
        } else {
            entry.with(names::PAYLOAD, self.payload.as_str())
        }
    }

    pub(crate) fn from_metadata(entry: &MetadataEntry) -> Option<Self> {
        Some(Self::new(
            entry.get_str(names::UID)?,
            entry.get_str(names::PAYLOAD).unwrap_or_default(),
        ))
    }
}

/// Literal initial value of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}
