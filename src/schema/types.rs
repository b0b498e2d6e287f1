use core::fmt;
use serde::{Deserialize, Serialize};

/// Fixed-width scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// Signed 64-bit integer.
    Long,
    /// Single flag.
    Boolean,
}

impl Primitive {
    /// Width of the primitive in the byte representation.
    pub const fn byte_width(self) -> usize {
        match self {
            Primitive::Byte | Primitive::Boolean => 1,
            Primitive::Short => 2,
            Primitive::Int => 4,
            Primitive::Long => 8,
        }
    }

    /// Canonical name used in descriptors and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Int",
            Primitive::Long => "Long",
            Primitive::Boolean => "Boolean",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Character sets supported by text fields.
///
/// `Ascii`, `Latin1` and `Utf32` are fixed-width and count their capacity
/// in characters. `Utf8` and `Utf16` are variable-width and count it in
/// encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    Ascii,
    Latin1,
    Utf8,
    Utf16,
    Utf32,
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Charset::Ascii => "ASCII",
            Charset::Latin1 => "Latin-1",
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Utf32 => "UTF-32",
        };
        f.write_str(name)
    }
}

/// Declarative description of a witness type.
///
/// Capacity-bearing nodes keep the annotation optional so that schemas
/// produced by external tooling can be represented as delivered and rejected
/// with a precise path when an annotation is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Schema {
    Primitive(Primitive),
    Struct(StructSchema),
    List(ListSchema),
    Array(ArraySchema),
    Text(TextSchema),
    Optional(Box<Schema>),
    Enum(EnumSchema),
    Union(UnionSchema),
}

/// Named field of a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
}

/// Product type with fields in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructSchema {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Variable-length list bounded by `capacity` elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchema {
    pub element: Box<Schema>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Array holding exactly `len` elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArraySchema {
    pub element: Box<Schema>,
    pub len: u32,
}

/// Text bounded by `capacity` characters or bytes depending on the charset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSchema {
    pub charset: Charset,
    #[serde(default)]
    pub capacity: Option<u32>,
}

/// Unit-only enumeration encoded by ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSchema {
    pub name: String,
    pub variants: Vec<String>,
}

/// Polymorphic field whose variants are registered types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionSchema {
    pub family: String,
    pub variants: Vec<String>,
}
