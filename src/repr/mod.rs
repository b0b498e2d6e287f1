//! Unit representation of encoded witnesses.
//!
//! A primitive is decomposed either into bytes or into bits before it is
//! handed to a circuit. Both forms are fixed-width:
//!
//! | Primitive | `Bytes` units | `Bits` units |
//! |-----------|---------------|--------------|
//! | `Byte` | 1 | 8 |
//! | `Short` | 2 | 16 |
//! | `Int` | 4 | 32 |
//! | `Long` | 8 | 64 |
//! | `Boolean` | 1 | 1 |
//!
//! In `Bits` every unit is a byte holding `0` or `1`, most significant bit
//! first. Integers are big-endian in both forms.

use crate::schema::Primitive;
use serde::{Deserialize, Serialize};

/// Atomic unit a primitive is decomposed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Representation {
    /// One unit per bit.
    Bits,
    /// One unit per byte.
    #[default]
    Bytes,
}

impl Representation {
    /// Number of units occupied by `byte_count` bytes of integer data.
    pub const fn units(self, byte_count: usize) -> usize {
        match self {
            Representation::Bits => byte_count * 8,
            Representation::Bytes => byte_count,
        }
    }

    /// Number of units occupied by a primitive.
    pub const fn primitive_units(self, primitive: Primitive) -> usize {
        match primitive {
            Primitive::Boolean => 1,
            other => self.units(other.byte_width()),
        }
    }

    /// Human readable unit label used in reports.
    pub const fn unit_label(self) -> &'static str {
        match self {
            Representation::Bits => "bits",
            Representation::Bytes => "bytes",
        }
    }
}
