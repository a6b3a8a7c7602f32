//! Target type descriptors for step argument conversion

use std::fmt;

use crate::value::Value;

/// Describes the declared type a step argument must be converted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Plain text.
    String,
    /// A signed integer.
    Integer,
    /// A floating point number.
    Float,
    /// A boolean.
    Boolean,
    /// Raw bytes.
    Bytes,
    /// Any value; the resolved value is accepted as is.
    Any,
    /// A list whose elements are converted to the inner type.
    List(Box<Self>),
    /// A map of named values.
    Map,
    /// An optional value of the inner type; blank text means absent.
    Optional(Box<Self>),
    /// A pipe-delimited table.
    Table,
    /// A nested block of steps; never resolved, only converted.
    SubSteps,
}

impl TypeDescriptor {
    /// Creates a list descriptor.
    #[must_use]
    pub fn list_of(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Creates an optional descriptor.
    #[must_use]
    pub fn optional_of(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Returns true if a value of this runtime type can be used for this
    /// descriptor without a text round trip.
    ///
    /// Lists and maps are matched by their raw type: element types are not
    /// inspected.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::String, Value::String(_))
            | (Self::Integer, Value::Integer(_))
            | (Self::Float, Value::Float(_))
            | (Self::Boolean, Value::Bool(_))
            | (Self::Bytes, Value::Bytes(_))
            | (Self::List(_), Value::List(_))
            | (Self::Map, Value::Map(_))
            | (Self::Table, Value::Table(_))
            | (Self::Optional(_), Value::Null) => true,
            (Self::Optional(inner), other) => inner.is_satisfied_by(other),
            _ => false,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::Bytes => f.write_str("bytes"),
            Self::Any => f.write_str("any"),
            Self::List(inner) => write!(f, "list<{inner}>"),
            Self::Map => f.write_str("map"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Table => f.write_str("table"),
            Self::SubSteps => f.write_str("sub-steps"),
        }
    }
}
