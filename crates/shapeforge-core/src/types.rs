//! Type references and built-in types
//!
//! A [`TypeRef`] is written `name` or `name<arg, ...>`; generic arguments nest.
//! Resolution against a registry happens in [`crate::registry`]; this module
//! only deals with syntax, erasure and the value kinds of built-in types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use crate::identifiers::TypeName;
use crate::{Error, Result};

/// Built-in types every registry resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Builtin {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Bytes,
    Object,
    List,
    Map,
    Optional,
}

impl Builtin {
    /// Number of generic arguments the type takes
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::List | Self::Optional => 1,
            Self::Map => 2,
            _ => 0,
        }
    }

    /// Primitive types cannot hold `null`
    #[must_use]
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::Char
        )
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Int | Self::Long)
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Whether an integer lies within this integral type's range
    #[must_use]
    pub fn fits_integer(self, value: i64) -> bool {
        match self {
            Self::Byte => i8::try_from(value).is_ok(),
            Self::Short => i16::try_from(value).is_ok(),
            Self::Int => i32::try_from(value).is_ok(),
            Self::Long => true,
            _ => false,
        }
    }
}

/// A reference to a type, possibly with generic arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    name: TypeName,
    args: Vec<TypeRef>,
}

impl TypeRef {
    /// Parse a type reference such as `map<string, list<int>>`
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeResolution` if the reference is malformed.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parser = RefParser {
            input: s,
            pos: 0,
            depth: 0,
        };
        let parsed = parser.type_ref()?;
        parser.skip_ws();
        if parser.pos == s.len() {
            Ok(parsed)
        } else {
            Err(Error::TypeResolution(format!(
                "unexpected trailing input in type reference '{s}'"
            )))
        }
    }

    /// A non-generic reference to a named type
    #[must_use]
    pub const fn named(name: TypeName) -> Self {
        Self {
            name,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &TypeName {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[Self] {
        &self.args
    }

    /// The reference with all generic arguments dropped
    #[must_use]
    pub fn erasure(&self) -> &str {
        self.name.as_str()
    }

    /// The built-in type this reference names, if any
    #[must_use]
    pub fn builtin(&self) -> Option<Builtin> {
        self.name.as_str().parse().ok()
    }

    #[must_use]
    pub fn is_void(&self) -> bool {
        self.builtin() == Some(Builtin::Void)
    }

    /// Whether a runtime argument fits this type
    ///
    /// Declared and generated types are opaque and accept any value.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        let Some(builtin) = self.builtin() else {
            return true;
        };
        let arg = |i: usize, v: &Value| self.args.get(i).map_or(true, |t| t.accepts(v));

        match (builtin, value) {
            (Builtin::Object, _) | (Builtin::Void, Value::Null) => true,
            (b, Value::Null) => !b.is_primitive(),
            (Builtin::Boolean, Value::Bool(_)) => true,
            (b, Value::Number(n)) if b.is_integral() => {
                n.as_i64().is_some_and(|i| b.fits_integer(i))
            }
            (b, Value::Number(_)) => b.is_floating(),
            (Builtin::Char, Value::String(s)) => s.chars().count() == 1,
            (Builtin::String | Builtin::Bytes, Value::String(_)) => true,
            (Builtin::Bytes, Value::Array(items)) => {
                items.iter().all(|v| v.as_u64().is_some_and(|b| b <= 255))
            }
            (Builtin::List, Value::Array(items)) => items.iter().all(|v| arg(0, v)),
            (Builtin::Map, Value::Object(entries)) => entries.values().all(|v| arg(1, v)),
            (Builtin::Optional, v) => arg(0, v),
            _ => false,
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            let args = itertools::join(&self.args, ", ");
            write!(f, "<{args}>")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<TypeRef> for String {
    fn from(type_ref: TypeRef) -> Self {
        type_ref.to_string()
    }
}

impl From<Builtin> for TypeRef {
    fn from(builtin: Builtin) -> Self {
        // Builtin names are always valid identifiers
        Self {
            name: TypeName(builtin.as_ref().to_string()),
            args: Vec::new(),
        }
    }
}

/// Deepest generic nesting a reference may have.
const MAX_NESTING: usize = 64;

struct RefParser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl RefParser<'_> {
    fn skip_ws(&mut self) {
        self.pos += self.rest().len() - self.rest().trim_start().len();
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn type_ref(&mut self) -> Result<TypeRef> {
        self.skip_ws();
        let len = self
            .rest()
            .find(|c: char| c == '<' || c == '>' || c == ',' || c.is_whitespace())
            .unwrap_or_else(|| self.rest().len());
        let raw = &self.rest()[..len];
        let name = TypeName::parse(raw).map_err(|e| {
            Error::TypeResolution(format!("invalid type name '{raw}' in '{}': {e}", self.input))
        })?;
        self.pos += len;

        let mut args = Vec::new();
        if self.eat('<') {
            if self.depth == MAX_NESTING {
                return Err(Error::TypeResolution(format!(
                    "generic nesting too deep (max {MAX_NESTING} levels)"
                )));
            }
            self.depth += 1;
            loop {
                args.push(self.type_ref()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    self.depth -= 1;
                    break;
                }
                return Err(Error::TypeResolution(format!(
                    "unterminated generic arguments in '{}'",
                    self.input
                )));
            }
        }
        Ok(TypeRef { name, args })
    }
}
