use super::defaults::default_units;
use crate::descriptor::layout::{Layout, LayoutKind};
use crate::error::EncodingError;
use crate::schema::{Primitive, Value};
use crate::ser::{self, FieldPath, UnitWriter};

fn mismatch(path: &FieldPath<'_>, expected: &'static str, found: &Value) -> EncodingError {
    EncodingError::TypeMismatch {
        path: path.render(),
        expected,
        found: found.kind_name(),
    }
}

/// Writes `value` laid out as `layout`.
///
/// Every branch writes exactly `layout.size(repr)` units on success.
pub(crate) fn encode_value(
    layout: &Layout,
    value: &Value,
    out: &mut UnitWriter,
    path: &FieldPath<'_>,
) -> Result<(), EncodingError> {
    match (&layout.kind, value) {
        (LayoutKind::Primitive(primitive), value) => encode_primitive(*primitive, value, out, path),
        (LayoutKind::Struct { fields, .. }, Value::Struct(values)) => {
            if fields.len() != values.len() {
                return Err(EncodingError::FieldCount {
                    path: path.render(),
                    expected: fields.len(),
                    actual: values.len(),
                });
            }
            for ((name, field), value) in fields.iter().zip(values) {
                encode_value(field, value, out, &path.field(name))?;
            }
            Ok(())
        }
        (LayoutKind::List { capacity, element }, Value::List(items)) => {
            let slot = default_units(element, out.representation());
            ser::write_fixed_list(out, items, *capacity, &slot, path, |out, item, path| {
                encode_value(element, item, out, path)
            })
        }
        (LayoutKind::Array { len, element }, Value::List(items)) => {
            ser::write_fixed_array(out, items, *len, path, |out, item, path| {
                encode_value(element, item, out, path)
            })
        }
        (LayoutKind::Text { charset, capacity }, Value::Text(text)) => {
            ser::write_text(out, text, *charset, *capacity, path)
        }
        (LayoutKind::Optional(inner), Value::Optional(value)) => {
            let slot = default_units(inner, out.representation());
            ser::write_option(out, value.as_deref(), &slot, path, |out, value, path| {
                encode_value(inner, value, out, path)
            })
        }
        (LayoutKind::Enum { variants, .. }, Value::Enum(variant)) => {
            let ordinal = variants
                .iter()
                .position(|candidate| candidate == variant)
                .ok_or_else(|| EncodingError::UnknownEnumVariant {
                    path: path.render(),
                    variant: variant.clone(),
                })?;
            ser::write_i32(out, ordinal as i32);
            Ok(())
        }
        (LayoutKind::Union { variants, .. }, Value::Variant { type_name, value }) => {
            let variant = variants
                .iter()
                .find(|variant| &variant.name == type_name)
                .ok_or_else(|| EncodingError::NotAVariant {
                    path: path.render(),
                    name: type_name.clone(),
                })?;
            let repr = out.representation();
            ser::write_u32(out, variant.tag.0);
            encode_value(&variant.layout, value, out, &path.field(&variant.name))?;
            out.write_zero_units(layout.union_payload_size(repr) - variant.layout.size(repr));
            Ok(())
        }
        (kind, value) => Err(mismatch(path, expected_kind(kind), value)),
    }
}

fn encode_primitive(
    primitive: Primitive,
    value: &Value,
    out: &mut UnitWriter,
    path: &FieldPath<'_>,
) -> Result<(), EncodingError> {
    match (primitive, value) {
        (Primitive::Byte, Value::Byte(v)) => ser::write_i8(out, *v),
        (Primitive::Short, Value::Short(v)) => ser::write_i16(out, *v),
        (Primitive::Int, Value::Int(v)) => ser::write_i32(out, *v),
        (Primitive::Long, Value::Long(v)) => ser::write_i64(out, *v),
        (Primitive::Boolean, Value::Boolean(v)) => ser::write_bool(out, *v),
        (primitive, value) => return Err(mismatch(path, primitive.name(), value)),
    }
    Ok(())
}

/// Value shape accepted by a layout node, as reported in mismatch errors.
pub(crate) fn expected_kind(kind: &LayoutKind) -> &'static str {
    match kind {
        LayoutKind::Primitive(primitive) => primitive.name(),
        LayoutKind::Struct { .. } => "Struct",
        LayoutKind::List { .. } | LayoutKind::Array { .. } => "List",
        LayoutKind::Text { .. } => "Text",
        LayoutKind::Optional(_) => "Optional",
        LayoutKind::Enum { .. } => "Enum",
        LayoutKind::Union { .. } => "Variant",
    }
}
