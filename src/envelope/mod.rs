//! Metadata envelope: a fixed-size metadata block followed by a fixed-size
//! payload.
//!
//! Both halves have static sizes, so the envelope carries no length field;
//! the reader splits at the metadata codec's static size and checks that the
//! remainder is exactly the payload size it expects.

use tracing::{debug, warn};

use crate::codec::FixedCodec;
use crate::config::{CodecConfig, ENVELOPE_VERSION};
use crate::error::{DecodingError, EncodingError, Result};
use crate::registry::{RegisteredType, TypeRegistry, TypeTag};
use crate::schema::{mismatch, Schema, Value, Witness};

/// Concatenates the encoded `metadata` and an already encoded `payload`.
pub fn wrap(
    metadata_codec: &FixedCodec,
    metadata: &Value,
    payload: &[u8],
) -> core::result::Result<Vec<u8>, EncodingError> {
    let mut out = metadata_codec.encode(metadata)?;
    out.extend_from_slice(payload);
    Ok(out)
}

/// Splits an envelope into decoded metadata and the raw payload.
///
/// Fails with [`DecodingError::LengthMismatch`] unless `bytes` is exactly
/// the metadata size plus `expected_payload_size`.
pub fn unwrap<'a>(
    metadata_codec: &FixedCodec,
    bytes: &'a [u8],
    expected_payload_size: usize,
) -> core::result::Result<(Value, &'a [u8]), DecodingError> {
    let metadata_size = metadata_codec.static_size();
    let expected = metadata_size.saturating_add(expected_payload_size);
    if bytes.len() != expected {
        return Err(DecodingError::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let (metadata, payload) = bytes.split_at(metadata_size);
    Ok((metadata_codec.decode(metadata)?, payload))
}

/// Standard metadata in front of registered witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WitnessMetadata {
    pub version: i16,
    pub type_tag: TypeTag,
}

impl WitnessMetadata {
    /// Metadata of the current envelope version.
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            type_tag,
        }
    }
}

impl Witness for WitnessMetadata {
    const TYPE_NAME: &'static str = "WitnessMetadata";

    fn schema() -> Schema {
        Schema::structure(Self::TYPE_NAME)
            .field("version", Schema::short())
            .field("type_tag", Schema::int())
            .build()
    }

    fn to_value(&self) -> Value {
        // Tags are unsigned; the Int slot carries the same 32 bits.
        Value::Struct(vec![
            Value::Short(self.version),
            Value::Int(self.type_tag.0 as i32),
        ])
    }

    fn from_value(value: Value) -> core::result::Result<Self, DecodingError> {
        if let Value::Struct(fields) = &value {
            if let [Value::Short(version), Value::Int(tag)] = fields.as_slice() {
                return Ok(Self {
                    version: *version,
                    type_tag: TypeTag(*tag as u32),
                });
            }
        }
        Err(mismatch(Self::TYPE_NAME, "Struct(Short, Int)", &value))
    }
}

impl TypeRegistry {
    /// Encodes `value` as the type `name` behind a [`WitnessMetadata`]
    /// header naming its tag.
    pub fn wrap_witness(&self, name: &str, value: &Value, config: CodecConfig) -> Result<Vec<u8>> {
        let entry = self.lookup(name)?;
        let payload = entry.codec(config).encode(value)?;
        let metadata_codec = FixedCodec::for_witness::<WitnessMetadata>(config)?;
        let metadata = WitnessMetadata::new(entry.tag()).to_value();
        let bytes = wrap(&metadata_codec, &metadata, &payload)?;
        debug!(name, tag = entry.tag().0, units = bytes.len(), "wrapped witness");
        Ok(bytes)
    }

    /// Opens an envelope produced by [`TypeRegistry::wrap_witness`].
    ///
    /// The tag in the header selects the payload layout; the payload must be
    /// exactly that layout's static size.
    pub fn unwrap_witness(
        &self,
        bytes: &[u8],
        config: CodecConfig,
    ) -> Result<(&RegisteredType, Value)> {
        let metadata_codec = FixedCodec::for_witness::<WitnessMetadata>(config)?;
        let metadata_size = metadata_codec.static_size();
        let header = bytes.get(..metadata_size).ok_or(DecodingError::LengthMismatch {
            expected: metadata_size,
            actual: bytes.len(),
        })?;
        let metadata = WitnessMetadata::from_value(metadata_codec.decode(header)?)?;
        if metadata.version != ENVELOPE_VERSION {
            warn!(version = metadata.version, "unsupported witness envelope");
            return Err(DecodingError::UnsupportedVersion {
                version: metadata.version,
            }
            .into());
        }
        let entry = self.lookup_tag(metadata.type_tag)?;
        let codec = entry.codec(config);
        let (_, payload) = unwrap(&metadata_codec, bytes, codec.static_size())?;
        Ok((entry, codec.decode(payload)?))
    }
}
