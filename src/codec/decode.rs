use super::defaults::default_units;
use crate::descriptor::layout::{Layout, LayoutKind};
use crate::error::DecodingError;
use crate::schema::{Primitive, Value};
use crate::ser::{self, FieldPath, UnitReader};

/// Reads one value laid out as `layout`.
///
/// Padding is compared against the canonical default encoding, so every
/// accepted input re-encodes to exactly the same units.
pub(crate) fn decode_value(
    layout: &Layout,
    cursor: &mut UnitReader<'_>,
    path: &FieldPath<'_>,
) -> Result<Value, DecodingError> {
    let repr = cursor.representation();
    match &layout.kind {
        LayoutKind::Primitive(primitive) => decode_primitive(*primitive, cursor, path),
        LayoutKind::Struct { fields, .. } => {
            let mut values = Vec::with_capacity(fields.len());
            for (name, field) in fields {
                values.push(decode_value(field, cursor, &path.field(name))?);
            }
            Ok(Value::Struct(values))
        }
        LayoutKind::List { capacity, element } => {
            let slot = default_units(element, repr);
            ser::read_fixed_list(cursor, *capacity, &slot, path, |cursor, path| {
                decode_value(element, cursor, path)
            })
            .map(Value::List)
        }
        LayoutKind::Array { len, element } => {
            ser::read_fixed_array(cursor, *len, path, |cursor, path| {
                decode_value(element, cursor, path)
            })
            .map(Value::List)
        }
        LayoutKind::Text { charset, capacity } => {
            ser::read_text(cursor, *charset, *capacity, path).map(Value::Text)
        }
        LayoutKind::Optional(inner) => {
            let slot = default_units(inner, repr);
            ser::read_option(cursor, &slot, path, |cursor, path| {
                decode_value(inner, cursor, path)
            })
            .map(|value| Value::Optional(value.map(Box::new)))
        }
        LayoutKind::Enum { variants, .. } => {
            let ordinal = ser::read_i32(cursor, path)?;
            usize::try_from(ordinal)
                .ok()
                .and_then(|index| variants.get(index))
                .map(|variant| Value::Enum(variant.clone()))
                .ok_or_else(|| DecodingError::InvalidOrdinal {
                    path: path.render(),
                    ordinal,
                })
        }
        LayoutKind::Union { variants, .. } => {
            let tag = ser::read_u32(cursor, path)?;
            let variant = variants
                .iter()
                .find(|variant| variant.tag.0 == tag)
                .ok_or_else(|| DecodingError::UnknownTag {
                    path: path.render(),
                    tag,
                })?;
            let variant_path = path.field(&variant.name);
            let value = decode_value(&variant.layout, cursor, &variant_path)?;
            let padding = layout.union_payload_size(repr) - variant.layout.size(repr);
            cursor.expect_zero_units(padding, &variant_path)?;
            Ok(Value::variant(variant.name.clone(), value))
        }
    }
}

fn decode_primitive(
    primitive: Primitive,
    cursor: &mut UnitReader<'_>,
    path: &FieldPath<'_>,
) -> Result<Value, DecodingError> {
    Ok(match primitive {
        Primitive::Byte => Value::Byte(ser::read_i8(cursor, path)?),
        Primitive::Short => Value::Short(ser::read_i16(cursor, path)?),
        Primitive::Int => Value::Int(ser::read_i32(cursor, path)?),
        Primitive::Long => Value::Long(ser::read_i64(cursor, path)?),
        Primitive::Boolean => Value::Boolean(ser::read_bool(cursor, path)?),
    })
}
