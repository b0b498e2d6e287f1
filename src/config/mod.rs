//! Canonical wire constants and codec configuration.
//!
//! The constants below fix the witness layout. Changing any of them changes
//! every static size and therefore every circuit compiled against the
//! descriptors, so they are part of the format version.
//!
//! | Item | Encoding |
//! |------|----------|
//! | `Byte` / `Short` / `Int` / `Long` | big-endian two's complement, 1/2/4/8 bytes |
//! | `Boolean` | one unit, `0` or `1` |
//! | list | `u32` count prefix, then `capacity` element slots |
//! | array | `len` element slots, no prefix |
//! | text | `u32` prefix, then the capacity block padded with the charset filler |
//! | optional | `Boolean` presence flag, then the value or its default |
//! | enum | `Int` ordinal in declaration order |
//! | union | `u32` type tag, then the variant padded with zero units to the largest variant |

use crate::repr::Representation;
use serde::{Deserialize, Serialize};

/// Width of every collection and text length prefix.
pub const LENGTH_PREFIX_BYTES: usize = 4;

/// Width of the discriminant tag in front of a union payload.
pub const UNION_TAG_BYTES: usize = 4;

/// Width of an enum ordinal.
pub const ENUM_ORDINAL_BYTES: usize = 4;

/// Filler byte behind ASCII, Latin-1 and UTF-32 content.
pub const FIXED_WIDTH_FILLER: u8 = 0x00;

/// Filler byte behind UTF-8 content. Never part of well-formed UTF-8.
pub const UTF8_FILLER: u8 = 0xff;

/// Filler code unit behind UTF-16 content. An unpaired low surrogate.
pub const UTF16_FILLER: u16 = 0xdc00;

/// Version written into [`crate::envelope::WitnessMetadata`].
pub const ENVELOPE_VERSION: i16 = 1;

/// Domain separator prepended before hashing a descriptor tree.
pub const DESCRIPTOR_DIGEST_DOMAIN_TAG: &[u8; 21] = b"RPP-WITNESS-LAYOUT-V1";

/// Runtime knobs of a [`crate::codec::FixedCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Unit representation used for a whole encode/decode round trip.
    pub representation: Representation,
}

impl CodecConfig {
    /// Byte-oriented profile used by default.
    pub const BYTES: CodecConfig = CodecConfig {
        representation: Representation::Bytes,
    };

    /// Bit-oriented profile for circuits that consume bit decompositions.
    pub const BITS: CodecConfig = CodecConfig {
        representation: Representation::Bits,
    };

    /// Creates a configuration for the given representation.
    pub const fn new(representation: Representation) -> Self {
        Self { representation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_bytes() {
        assert_eq!(CodecConfig::default(), CodecConfig::BYTES);
    }

    #[test]
    fn fillers_are_not_valid_utf() {
        assert!(core::str::from_utf8(&[UTF8_FILLER]).is_err());
        assert!(char::decode_utf16([UTF16_FILLER]).all(|unit| unit.is_err()));
    }
}
