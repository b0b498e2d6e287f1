//! Schema model handed to the descriptor deriver and the registry.
//!
//! A [`Schema`] is plain data: it can be assembled with the builder API,
//! produced by the [`Witness`] trait, or deserialized from whatever external
//! tooling discovers the capacities of a type.

mod builder;
mod types;
mod value;
mod witness;

pub use builder::StructBuilder;
pub use types::{
    ArraySchema, Charset, EnumSchema, Field, ListSchema, Primitive, Schema, StructSchema,
    TextSchema, UnionSchema,
};
pub use value::Value;
pub use witness::{mismatch, Witness};
