//! Structured metadata attached to types, methods and parameters
//!
//! A [`MetadataEntry`] is a named bag of attributes; a [`MetadataSet`] keeps
//! entries in insertion order, keyed by entry name. Consumers of a
//! materialized type read these entries the way an annotation-aware framework
//! reads annotations.
//!
//! # Attach Policy
//!
//! Attaching an entry whose name is already present merges attributes into
//! the existing entry; for each attribute key the later value wins. If a key
//! is present on both sides with values of different kinds, the attach fails
//! with [`Error::Composition`] and the set is left untouched.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants};

use crate::{Error, Result};

/// Well-known entry and attribute names.
pub mod names {
    /// Routing path of the generated type (`value`)
    pub const ROUTING_PATH: &str = "routing.path";
    /// Produced media types of the generated type (`value`, a list)
    pub const PRODUCES: &str = "routing.produces";
    /// Operation identity of a method
    pub const OPERATION: &str = "contract.operation";
    /// External naming of a method's result
    pub const RESULT: &str = "contract.result";
    /// External naming and placement of a parameter
    pub const PARAM: &str = "contract.param";
    /// Data binding of a type or method
    pub const DATA_BINDING: &str = "contract.data_binding";

    /// Enumeration type used for parameter directions
    pub const DIRECTION_ENUM: &str = "contract.Direction";

    pub const VALUE: &str = "value";
    pub const OPERATION_NAME: &str = "operation_name";
    pub const ACTION: &str = "action";
    pub const EXCLUDE: &str = "exclude";
    pub const NAME: &str = "name";
    pub const PART_NAME: &str = "part_name";
    pub const TARGET_NAMESPACE: &str = "target_namespace";
    pub const HEADER: &str = "header";
    pub const MODE: &str = "mode";
    pub const UID: &str = "uid";
    pub const PAYLOAD: &str = "payload";
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(MetadataKind), derive(Display))]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetadataValue {
    Str(String),
    Bool(bool),
    Int(i64),
    List(Vec<MetadataValue>),
    Enum { enum_type: String, constant: String },
}

impl MetadataValue {
    /// The kind of value, used to detect incompatible merges
    #[must_use]
    pub fn kind(&self) -> MetadataKind {
        MetadataKind::from(self)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Enum constant name, e.g. `IN` for a direction
    #[must_use]
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Self::Enum { constant, .. } => Some(constant),
            _ => None,
        }
    }

    /// List of strings; `None` if this is not a list or holds non-strings
    #[must_use]
    pub fn as_str_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::List(items) => items.iter().map(Self::as_str).collect(),
            _ => None,
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for MetadataValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// A named entry with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub attributes: OrdMap<String, MetadataValue>,
}

impl MetadataEntry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: OrdMap::new(),
        }
    }

    /// Add or replace an attribute
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetadataValue::as_str)
    }

    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(MetadataValue::as_bool)
    }
}

/// Insertion-ordered set of entries, unique by entry name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataSet {
    entries: Vec<MetadataEntry>,
}

impl MetadataSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an entry, merging into an existing entry of the same name
    ///
    /// # Errors
    ///
    /// Returns `Error::Composition` if an attribute present on both sides
    /// changes kind. The set is unchanged on error.
    pub fn attach(&mut self, entry: MetadataEntry) -> Result<()> {
        let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) else {
            self.entries.push(entry);
            return Ok(());
        };

        let conflict = entry.attributes.iter().find_map(|(key, value)| {
            existing
                .attributes
                .get(key)
                .filter(|old| old.kind() != value.kind())
                .map(|old| (key.clone(), old.kind(), value.kind()))
        });
        if let Some((key, old, new)) = conflict {
            return Err(Error::Composition(format!(
                "attribute '{key}' of '{}' is {old}, cannot attach {new}",
                entry.name
            )));
        }

        existing.attributes = entry.attributes.union(existing.attributes.clone());
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetadataEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetadataEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Interns enum constants so repeated values share one representation.
#[derive(Debug, Default)]
pub(crate) struct EnumInterner {
    seen: Vec<MetadataValue>,
}

impl EnumInterner {
    pub(crate) fn intern(&mut self, enum_type: &str, constant: &str) -> MetadataValue {
        let found = self.seen.iter().find(|v| {
            matches!(v, MetadataValue::Enum { enum_type: t, constant: c } if t == enum_type && c == constant)
        });
        if let Some(value) = found {
            return value.clone();
        }
        let value = MetadataValue::Enum {
            enum_type: enum_type.to_string(),
            constant: constant.to_string(),
        };
        self.seen.push(value.clone());
        value
    }

    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_preserves_insertion_order() -> Result<()> {
        let mut set = MetadataSet::new();
        set.attach(MetadataEntry::new("b"))?;
        set.attach(MetadataEntry::new("a"))?;
        let names: Vec<_> = set.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
        Ok(())
    }

    #[test]
    fn test_attach_merges_and_overwrites() -> Result<()> {
        let mut set = MetadataSet::new();
        set.attach(MetadataEntry::new("e").with("x", "1").with("y", "keep"))?;
        set.attach(MetadataEntry::new("e").with("x", "2").with("z", true))?;

        assert_eq!(set.len(), 1);
        let entry = set.get("e").ok_or_else(|| Error::Composition("missing".into()))?;
        assert_eq!(entry.get_str("x"), Some("2"));
        assert_eq!(entry.get_str("y"), Some("keep"));
        assert_eq!(entry.get_bool("z"), Some(true));
        Ok(())
    }

    #[test]
    fn test_attach_kind_conflict_leaves_set_unchanged() -> Result<()> {
        let mut set = MetadataSet::new();
        set.attach(MetadataEntry::new("e").with("x", "text"))?;
        let before = set.clone();

        let result = set.attach(MetadataEntry::new("e").with("x", true).with("w", "new"));

        assert!(matches!(result, Err(Error::Composition(_))));
        assert_eq!(set, before);
        Ok(())
    }

    #[test]
    fn test_interner_reuses_values() {
        let mut interner = EnumInterner::default();
        let a = interner.intern(names::DIRECTION_ENUM, "IN");
        let b = interner.intern(names::DIRECTION_ENUM, "OUT");
        let c = interner.intern(names::DIRECTION_ENUM, "IN");
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_str_list() {
        let list = MetadataValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.as_str_list(), Some(vec!["a", "b"]));
        let mixed = MetadataValue::List(vec!["a".into(), true.into()]);
        assert_eq!(mixed.as_str_list(), None);
    }
}
