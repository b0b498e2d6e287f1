use crate::descriptor::layout::{Layout, LayoutKind};
use crate::repr::Representation;
use crate::schema::{Primitive, Value};
use crate::ser::{self, UnitWriter};

/// Default value of a layout: zero numbers, `false`, empty text and lists,
/// absent optionals, the first enum constant and the default of the first
/// union variant.
pub(crate) fn default_value(layout: &Layout) -> Value {
    match &layout.kind {
        LayoutKind::Primitive(primitive) => match primitive {
            Primitive::Byte => Value::Byte(0),
            Primitive::Short => Value::Short(0),
            Primitive::Int => Value::Int(0),
            Primitive::Long => Value::Long(0),
            Primitive::Boolean => Value::Boolean(false),
        },
        LayoutKind::Struct { fields, .. } => {
            Value::Struct(fields.iter().map(|(_, field)| default_value(field)).collect())
        }
        LayoutKind::List { .. } => Value::List(Vec::new()),
        LayoutKind::Array { len, element } => {
            Value::List((0..*len).map(|_| default_value(element)).collect())
        }
        LayoutKind::Text { .. } => Value::Text(String::new()),
        LayoutKind::Optional(_) => Value::none(),
        LayoutKind::Enum { variants, .. } => {
            Value::Enum(variants.first().cloned().unwrap_or_default())
        }
        LayoutKind::Union { variants, .. } => match variants.first() {
            Some(first) => Value::variant(first.name.clone(), default_value(&first.layout)),
            None => Value::Struct(Vec::new()),
        },
    }
}

/// Writes the encoding of [`default_value`] without building the value.
///
/// Cannot fail: a default always fits its own layout.
pub(crate) fn write_default(layout: &Layout, out: &mut UnitWriter) {
    match &layout.kind {
        LayoutKind::Primitive(Primitive::Boolean) => ser::write_bool(out, false),
        LayoutKind::Primitive(primitive) => out.write_uint(0, primitive.byte_width()),
        LayoutKind::Struct { fields, .. } => {
            for (_, field) in fields {
                write_default(field, out);
            }
        }
        LayoutKind::List { capacity, element } => {
            ser::write_u32(out, 0);
            let slot = default_units(element, out.representation());
            for _ in 0..*capacity {
                out.write_units(&slot);
            }
        }
        LayoutKind::Array { len, element } => {
            let slot = default_units(element, out.representation());
            for _ in 0..*len {
                out.write_units(&slot);
            }
        }
        LayoutKind::Text { charset, capacity } => ser::write_empty_text(out, *charset, *capacity),
        LayoutKind::Optional(inner) => {
            ser::write_bool(out, false);
            write_default(inner, out);
        }
        LayoutKind::Enum { .. } => ser::write_i32(out, 0),
        LayoutKind::Union { variants, .. } => {
            let repr = out.representation();
            let start = out.len();
            if let Some(first) = variants.first() {
                ser::write_u32(out, first.tag.0);
                write_default(&first.layout, out);
            }
            let written = out.len() - start;
            out.write_zero_units(layout.size(repr).saturating_sub(written));
        }
    }
}

/// Encoded default of `layout` in `repr`.
pub(crate) fn default_units(layout: &Layout, repr: Representation) -> Vec<u8> {
    let mut out = UnitWriter::with_capacity(repr, layout.size(repr));
    write_default(layout, &mut out);
    out.into_bytes()
}
