//! Error taxonomy of the witness codec.
//!
//! Three families are kept apart because they are handled differently by
//! callers:
//!
//! | Family | Raised when | Handling |
//! |--------|-------------|----------|
//! | [`SchemaError`] | a schema is incomplete or the registry is inconsistent | fatal during start-up |
//! | [`EncodingError`] | a value does not fit its declared schema | reject the input |
//! | [`DecodingError`] | bytes are not a canonical encoding | reject the input, never coerce |
//!
//! Every variant that concerns a particular location carries the dotted
//! field path of that location (`payment.memo`, `outputs[2].amount`, ...).

use crate::repr::Representation;
use crate::schema::Charset;

/// Failures detected while validating, resolving or registering a schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A list or text field lacks the capacity annotation.
    #[error("missing capacity annotation at `{path}`")]
    MissingCapacity { path: String },
    /// A capacity annotation is present but unusable.
    #[error("invalid capacity {capacity} at `{path}`: {reason}")]
    InvalidCapacity {
        path: String,
        capacity: u32,
        reason: &'static str,
    },
    /// A union declares no variants.
    #[error("union at `{path}` declares no variants")]
    EmptyUnion { path: String },
    /// An enumeration declares no variants.
    #[error("enum at `{path}` declares no variants")]
    EmptyEnum { path: String },
    /// Two struct fields share the same name.
    #[error("duplicate field `{field}` in `{path}`")]
    DuplicateField { path: String, field: String },
    /// A union or enum lists the same variant twice.
    #[error("duplicate variant `{variant}` in `{path}`")]
    DuplicateVariant { path: String, variant: String },
    /// A union variant names a type that was never registered.
    #[error("type `{name}` referenced at `{path}` is not registered")]
    UnknownType { path: String, name: String },
    /// A type reaches itself through union variants.
    #[error("type `{name}` is recursive through `{path}`")]
    RecursiveType { path: String, name: String },
    /// The static size of a layout does not fit in `usize`.
    #[error("static size overflows at `{path}`")]
    SizeOverflow { path: String },
    /// The type name is already present in the registry.
    #[error("type `{name}` is already registered")]
    DuplicateType { name: String },
    /// The numeric tag is already assigned to another type.
    #[error("type tag {tag} requested by `{name}` is already assigned to `{existing}`")]
    DuplicateTag {
        tag: u32,
        name: String,
        existing: String,
    },
}

/// Failures raised while encoding a value against its layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A list holds more elements than its capacity.
    #[error("`{path}` holds {actual} elements but its capacity is {allowed}")]
    CapacityExceeded {
        path: String,
        actual: usize,
        allowed: u32,
    },
    /// A text value does not fit its capacity once encoded.
    #[error("`{path}` needs {actual} {unit} in {charset} but only {allowed} are allowed")]
    TextTooLong {
        path: String,
        charset: Charset,
        unit: &'static str,
        actual: usize,
        allowed: u32,
    },
    /// A character has no representation in the declared charset.
    #[error("character {ch:?} at `{path}` cannot be encoded in {charset}")]
    UnencodableChar {
        path: String,
        charset: Charset,
        ch: char,
    },
    /// A fixed array was given the wrong number of elements.
    #[error("`{path}` requires exactly {expected} elements, got {actual}")]
    ArrayLength {
        path: String,
        expected: u32,
        actual: usize,
    },
    /// A struct value does not have one entry per declared field.
    #[error("`{path}` declares {expected} fields, value has {actual}")]
    FieldCount {
        path: String,
        expected: usize,
        actual: usize,
    },
    /// The value shape does not match the layout.
    #[error("`{path}` expects {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// An enum value names a variant that the enum does not declare.
    #[error("`{path}` has no enum variant `{variant}`")]
    UnknownEnumVariant { path: String, variant: String },
    /// A union value carries a type that is not one of the declared variants.
    #[error("type `{name}` is not a variant of the union at `{path}`")]
    NotAVariant { path: String, name: String },
    /// The type name is not known to the registry.
    #[error("type `{name}` is not registered")]
    UnregisteredType { name: String },
    /// The output buffer counts units of a different representation.
    #[error("`{path}` encodes to {expected:?} but the writer holds {actual:?}")]
    RepresentationMismatch {
        path: String,
        expected: Representation,
        actual: Representation,
    },
}

/// Failures raised while decoding untrusted bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodingError {
    /// The input is not exactly as long as the static size.
    #[error("expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// The input ended in the middle of a value.
    #[error("input ended while reading `{path}`")]
    UnexpectedEnd { path: String },
    /// A bit unit held something other than `0` or `1`.
    #[error("invalid bit unit {value:#04x} at `{path}`")]
    InvalidBit { path: String, value: u8 },
    /// A boolean held something other than `0` or `1`.
    #[error("invalid boolean {value} at `{path}`")]
    InvalidBoolean { path: String, value: u8 },
    /// A length prefix exceeds the declared capacity.
    #[error("length prefix {length} at `{path}` exceeds capacity {capacity}")]
    PrefixExceedsCapacity {
        path: String,
        length: u32,
        capacity: u32,
    },
    /// Padding differs from the canonical filler.
    #[error("non-canonical padding at `{path}`")]
    CorruptPadding { path: String },
    /// Text content is not valid in its charset.
    #[error("invalid {charset} content at `{path}`")]
    InvalidText { path: String, charset: Charset },
    /// An enum ordinal is out of range.
    #[error("enum ordinal {ordinal} at `{path}` is out of range")]
    InvalidOrdinal { path: String, ordinal: i32 },
    /// A union or envelope tag is not known.
    #[error("unknown type tag {tag} at `{path}`")]
    UnknownTag { path: String, tag: u32 },
    /// The envelope metadata carries an unsupported version.
    #[error("unsupported envelope version {version}")]
    UnsupportedVersion { version: i16 },
    /// A decoded value cannot be converted into the requested Rust type.
    #[error("`{path}` expects {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Umbrella error for APIs that cross the three families.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Decoding(#[from] DecodingError),
}

/// Convenient alias for results carrying the umbrella [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
