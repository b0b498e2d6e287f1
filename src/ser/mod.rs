//! Fixed-width serialization helpers shared by all codecs.
//!
//! The helpers implement the big-endian layouts documented in
//! [`crate::config`]. They provide the vocabulary for primitives, padded
//! collections, optional values and charset-specific strings; the
//! schema-driven codec in [`crate::codec`] is a thin interpreter on top.

mod collections;
mod cursor;
mod ints;
mod path;
mod text;
mod writer;

pub use collections::{
    read_fixed_array, read_fixed_list, read_option, write_fixed_array, write_fixed_list,
    write_option,
};
pub use cursor::UnitReader;
pub use ints::{
    length_prefix, read_bool, read_i16, read_i32, read_i64, read_i8, read_u32, write_bool,
    write_i16, write_i32, write_i64, write_i8, write_u32,
};
pub use path::FieldPath;
pub use text::{filler, read_text, write_empty_text, write_text};
pub use writer::UnitWriter;
