//! Builder API replacing annotation-driven schema discovery.
//!
//! ```
//! use rpp_witness::schema::{Charset, Schema};
//!
//! let payment = Schema::structure("Payment")
//!     .field("amount", Schema::long())
//!     .field("memo", Schema::text(Charset::Utf8, 16))
//!     .field("tags", Schema::list(Schema::int(), 3))
//!     .build();
//! assert!(payment.validate("Payment").is_ok());
//! ```

use super::types::{
    ArraySchema, Charset, EnumSchema, Field, ListSchema, Primitive, Schema, StructSchema,
    TextSchema, UnionSchema,
};

impl Schema {
    pub fn byte() -> Schema {
        Schema::Primitive(Primitive::Byte)
    }

    pub fn short() -> Schema {
        Schema::Primitive(Primitive::Short)
    }

    pub fn int() -> Schema {
        Schema::Primitive(Primitive::Int)
    }

    pub fn long() -> Schema {
        Schema::Primitive(Primitive::Long)
    }

    pub fn boolean() -> Schema {
        Schema::Primitive(Primitive::Boolean)
    }

    /// List of at most `capacity` elements.
    pub fn list(element: Schema, capacity: u32) -> Schema {
        Schema::List(ListSchema {
            element: Box::new(element),
            capacity: Some(capacity),
        })
    }

    /// List without a capacity annotation, as delivered by incomplete tooling.
    pub fn unbounded_list(element: Schema) -> Schema {
        Schema::List(ListSchema {
            element: Box::new(element),
            capacity: None,
        })
    }

    /// Byte string of at most `capacity` bytes.
    pub fn bytes(capacity: u32) -> Schema {
        Schema::list(Schema::byte(), capacity)
    }

    /// Array of exactly `len` elements.
    pub fn array(element: Schema, len: u32) -> Schema {
        Schema::Array(ArraySchema {
            element: Box::new(element),
            len,
        })
    }

    /// Text in `charset` bounded by `capacity`.
    pub fn text(charset: Charset, capacity: u32) -> Schema {
        Schema::Text(TextSchema {
            charset,
            capacity: Some(capacity),
        })
    }

    /// Text without a capacity annotation.
    pub fn unbounded_text(charset: Charset) -> Schema {
        Schema::Text(TextSchema {
            charset,
            capacity: None,
        })
    }

    pub fn optional(inner: Schema) -> Schema {
        Schema::Optional(Box::new(inner))
    }

    /// Unit-only enumeration with variants in ordinal order.
    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Enum(EnumSchema {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        })
    }

    /// Polymorphic field over registered type names.
    pub fn union<I, S>(family: impl Into<String>, variants: I) -> Schema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Schema::Union(UnionSchema {
            family: family.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        })
    }

    /// Starts a struct declaration.
    pub fn structure(name: impl Into<String>) -> StructBuilder {
        StructBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }
}

/// Accumulates struct fields in canonical order.
#[derive(Debug, Clone)]
pub struct StructBuilder {
    name: String,
    fields: Vec<Field>,
}

impl StructBuilder {
    /// Appends a field. Field order is the wire order.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(Field {
            name: name.into(),
            schema,
        });
        self
    }

    pub fn build(self) -> Schema {
        Schema::Struct(StructSchema {
            name: self.name,
            fields: self.fields,
        })
    }
}
