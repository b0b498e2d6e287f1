use serde::{Deserialize, Serialize};

/// Dynamic value tree mirroring a [`super::Schema`].
///
/// Struct values are positional: entry `i` belongs to field `i` of the
/// declaring schema. `List` is used for both lists and fixed arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Boolean(bool),
    Text(String),
    List(Vec<Value>),
    Struct(Vec<Value>),
    Optional(Option<Box<Value>>),
    Enum(String),
    /// Active variant of a union, named by its registered type.
    Variant { type_name: String, value: Box<Value> },
}

impl Value {
    /// Short name of the value shape used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Byte(_) => "Byte",
            Value::Short(_) => "Short",
            Value::Int(_) => "Int",
            Value::Long(_) => "Long",
            Value::Boolean(_) => "Boolean",
            Value::Text(_) => "Text",
            Value::List(_) => "List",
            Value::Struct(_) => "Struct",
            Value::Optional(_) => "Optional",
            Value::Enum(_) => "Enum",
            Value::Variant { .. } => "Variant",
        }
    }

    /// Wraps `value` as the active variant `type_name`.
    pub fn variant(type_name: impl Into<String>, value: Value) -> Value {
        Value::Variant {
            type_name: type_name.into(),
            value: Box::new(value),
        }
    }

    pub fn some(value: Value) -> Value {
        Value::Optional(Some(Box::new(value)))
    }

    pub fn none() -> Value {
        Value::Optional(None)
    }

    pub fn text(text: impl Into<String>) -> Value {
        Value::Text(text.into())
    }

    pub fn enumeration(variant: impl Into<String>) -> Value {
        Value::Enum(variant.into())
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}
