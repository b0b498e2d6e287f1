use super::types::Schema;
use super::value::Value;
use crate::error::DecodingError;

/// Rust type with a declared witness schema.
///
/// Implementors describe their layout once through [`Witness::schema`] and
/// convert to and from the dynamic [`Value`] tree. The conversion must be
/// lossless for every value that satisfies the schema's capacities.
pub trait Witness: Sized {
    /// Name the type is registered under.
    const TYPE_NAME: &'static str;

    /// Capacity-annotated schema of the type.
    fn schema() -> Schema;

    /// Converts the value into its dynamic form.
    fn to_value(&self) -> Value;

    /// Rebuilds the value from its dynamic form.
    fn from_value(value: Value) -> Result<Self, DecodingError>;
}

/// Builds the mismatch error returned by [`Witness::from_value`].
pub fn mismatch(path: &str, expected: &'static str, found: &Value) -> DecodingError {
    DecodingError::TypeMismatch {
        path: path.to_owned(),
        expected,
        found: found.kind_name(),
    }
}

macro_rules! primitive_witness {
    ($ty:ty, $name:literal, $ctor:ident, $variant:ident) => {
        impl Witness for $ty {
            const TYPE_NAME: &'static str = $name;

            fn schema() -> Schema {
                Schema::$ctor()
            }

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self, DecodingError> {
                match value {
                    Value::$variant(inner) => Ok(inner),
                    other => Err(mismatch($name, $name, &other)),
                }
            }
        }
    };
}

primitive_witness!(i8, "Byte", byte, Byte);
primitive_witness!(i16, "Short", short, Short);
primitive_witness!(i32, "Int", int, Int);
primitive_witness!(i64, "Long", long, Long);
primitive_witness!(bool, "Boolean", boolean, Boolean);
