//! Schema-driven fixed-length codec.
//!
//! A [`FixedCodec`] interprets a resolved layout with the helpers from
//! [`crate::ser`]. It is bound to one [`Representation`] and holds no
//! mutable state, so it can be cloned freely and shared between threads.
//!
//! Every successful [`FixedCodec::encode`] returns exactly
//! [`FixedCodec::static_size`] units, whatever the content, and
//! [`FixedCodec::decode`] accepts exactly the inputs `encode` can produce.

mod decode;
mod defaults;
mod encode;

use std::sync::Arc;

use tracing::{trace, warn};

use crate::config::CodecConfig;
use crate::descriptor::layout::{compile, Compiled, Layout, NoVariants};
use crate::descriptor::Descriptor;
use crate::error::{DecodingError, EncodingError, Result, SchemaError};
use crate::repr::Representation;
use crate::schema::{Schema, Value, Witness};
use crate::ser::{FieldPath, UnitReader, UnitWriter};

/// Encoder and decoder for one witness layout in one representation.
#[derive(Debug, Clone)]
pub struct FixedCodec {
    name: String,
    layout: Arc<Layout>,
    descriptor: Arc<Descriptor>,
    config: CodecConfig,
}

impl FixedCodec {
    pub(crate) fn from_parts(
        name: &str,
        layout: Arc<Layout>,
        descriptor: Arc<Descriptor>,
        config: CodecConfig,
    ) -> Self {
        Self {
            name: name.to_owned(),
            layout,
            descriptor,
            config,
        }
    }

    pub(crate) fn from_compiled(name: &str, compiled: Compiled, config: CodecConfig) -> Self {
        Self::from_parts(name, compiled.layout, compiled.descriptor, config)
    }

    /// Derives a codec for a schema that does not reference registered
    /// types. Unions need a [`crate::TypeRegistry`].
    pub fn standalone(name: &str, schema: &Schema, config: CodecConfig) -> core::result::Result<Self, SchemaError> {
        let compiled = compile(name, schema, &mut NoVariants)?;
        Ok(Self::from_compiled(name, compiled, config))
    }

    /// Codec for the schema of a [`Witness`] type.
    pub fn for_witness<T: Witness>(config: CodecConfig) -> core::result::Result<Self, SchemaError> {
        Self::standalone(T::TYPE_NAME, &T::schema(), config)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> CodecConfig {
        self.config
    }

    pub fn representation(&self) -> Representation {
        self.config.representation
    }

    /// Encoded length of every value of this layout.
    pub fn static_size(&self) -> usize {
        self.layout.size(self.representation())
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Encodes `value` into a fresh buffer of [`Self::static_size`] units.
    pub fn encode(&self, value: &Value) -> core::result::Result<Vec<u8>, EncodingError> {
        let mut out = UnitWriter::with_capacity(self.representation(), self.static_size());
        self.encode_into(value, &mut out)?;
        Ok(out.into_bytes())
    }

    /// Appends the encoding of `value` to `out`.
    ///
    /// `out` must count units of the codec's representation. On error `out`
    /// may hold a partial encoding and should be discarded.
    pub fn encode_into(&self, value: &Value, out: &mut UnitWriter) -> core::result::Result<(), EncodingError> {
        if out.representation() != self.representation() {
            return Err(EncodingError::RepresentationMismatch {
                path: self.name.clone(),
                expected: self.representation(),
                actual: out.representation(),
            });
        }
        let start = out.len();
        encode::encode_value(&self.layout, value, out, &FieldPath::root(&self.name))?;
        debug_assert_eq!(out.len() - start, self.static_size());
        trace!(name = %self.name, units = out.len() - start, "encoded witness");
        Ok(())
    }

    /// Decodes a complete encoding.
    ///
    /// The input must be exactly [`Self::static_size`] units long.
    pub fn decode(&self, bytes: &[u8]) -> core::result::Result<Value, DecodingError> {
        let result = self.decode_exact(bytes);
        match &result {
            Ok(_) => trace!(name = %self.name, units = bytes.len(), "decoded witness"),
            Err(err) => warn!(name = %self.name, %err, "rejected witness encoding"),
        }
        result
    }

    fn decode_exact(&self, bytes: &[u8]) -> core::result::Result<Value, DecodingError> {
        let expected = self.static_size();
        if bytes.len() != expected {
            return Err(DecodingError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let mut cursor = UnitReader::new(self.representation(), bytes);
        let value = decode::decode_value(&self.layout, &mut cursor, &FieldPath::root(&self.name))?;
        debug_assert_eq!(cursor.remaining(), 0);
        Ok(value)
    }

    /// Default value of the layout, the value every padding slot encodes.
    pub fn default_value(&self) -> Value {
        defaults::default_value(&self.layout)
    }

    /// Encoding of [`Self::default_value`].
    pub fn default_encoding(&self) -> Vec<u8> {
        defaults::default_units(&self.layout, self.representation())
    }

    pub fn encode_witness<T: Witness>(&self, value: &T) -> core::result::Result<Vec<u8>, EncodingError> {
        self.encode(&value.to_value())
    }

    pub fn decode_witness<T: Witness>(&self, bytes: &[u8]) -> Result<T> {
        let value = self.decode(bytes)?;
        Ok(T::from_value(value)?)
    }

    /// Encodes many values, in parallel when the `parallel` feature is
    /// enabled and [`crate::utils::parallelism_enabled`] holds.
    ///
    /// The output is identical to encoding each value in order; the first
    /// failing value (by index) is reported.
    pub fn encode_batch(&self, values: &[Value]) -> core::result::Result<Vec<Vec<u8>>, EncodingError> {
        #[cfg(feature = "parallel")]
        let encoded: Vec<_> = if crate::utils::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = crate::utils::batch_chunk_len(values.len());
            values
                .par_iter()
                .with_min_len(chunk)
                .map(|value| self.encode(value))
                .collect()
        } else {
            values.iter().map(|value| self.encode(value)).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let encoded: Vec<_> = values.iter().map(|value| self.encode(value)).collect();

        encoded.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Charset;

    fn codec(schema: &Schema, config: CodecConfig) -> FixedCodec {
        FixedCodec::standalone("Root", schema, config).expect("valid schema")
    }

    #[test]
    fn int_encodes_big_endian() {
        let codec = codec(&Schema::int(), CodecConfig::BYTES);
        assert_eq!(codec.encode(&Value::Int(1024)).unwrap(), vec![0, 0, 4, 0]);
        assert_eq!(codec.decode(&[0, 0, 4, 0]).unwrap(), Value::Int(1024));
    }

    #[test]
    fn bits_representation_uses_one_unit_per_bit() {
        let codec = codec(&Schema::short(), CodecConfig::BITS);
        let bits = codec.encode(&Value::Short(5)).unwrap();
        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[13..], &[1, 0, 1]);
        assert_eq!(codec.decode(&bits).unwrap(), Value::Short(5));

        let mut bad = bits.clone();
        bad[0] = 2;
        assert!(matches!(
            codec.decode(&bad),
            Err(DecodingError::InvalidBit { value: 2, .. })
        ));
    }

    #[test]
    fn wrong_length_is_rejected_before_reading() {
        let codec = codec(&Schema::long(), CodecConfig::BYTES);
        assert_eq!(
            codec.decode(&[0; 7]),
            Err(DecodingError::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn mismatched_values_name_the_field() {
        let schema = Schema::structure("Point")
            .field("x", Schema::int())
            .field("y", Schema::int())
            .build();
        let codec = codec(&schema, CodecConfig::BYTES);
        let err = codec
            .encode(&Value::Struct(vec![Value::Int(1), Value::Long(2)]))
            .expect_err("y is an Int");
        assert_eq!(
            err,
            EncodingError::TypeMismatch {
                path: "Root.y".into(),
                expected: "Int",
                found: "Long"
            }
        );
        let err = codec
            .encode(&Value::Struct(vec![Value::Int(1)]))
            .expect_err("missing field");
        assert!(matches!(err, EncodingError::FieldCount { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn absent_optional_payload_must_be_default() {
        let codec = codec(&Schema::optional(Schema::int()), CodecConfig::BYTES);
        assert_eq!(codec.encode(&Value::none()).unwrap(), vec![0, 0, 0, 0, 0]);
        assert_eq!(
            codec.encode(&Value::some(Value::Int(-1))).unwrap(),
            vec![1, 0xff, 0xff, 0xff, 0xff]
        );
        assert!(matches!(
            codec.decode(&[0, 0, 0, 0, 9]),
            Err(DecodingError::CorruptPadding { .. })
        ));
    }

    #[test]
    fn enums_encode_ordinals() {
        let codec = codec(
            &Schema::enumeration("Side", ["Buy", "Sell"]),
            CodecConfig::BYTES,
        );
        assert_eq!(codec.encode(&Value::enumeration("Sell")).unwrap(), vec![0, 0, 0, 1]);
        assert!(matches!(
            codec.encode(&Value::enumeration("Hold")),
            Err(EncodingError::UnknownEnumVariant { .. })
        ));
        assert_eq!(
            codec.decode(&[0, 0, 0, 2]),
            Err(DecodingError::InvalidOrdinal {
                path: "Root".into(),
                ordinal: 2
            })
        );
        assert!(matches!(
            codec.decode(&[0xff, 0xff, 0xff, 0xff]),
            Err(DecodingError::InvalidOrdinal { ordinal: -1, .. })
        ));
    }

    #[test]
    fn arrays_require_exact_length() {
        let codec = codec(&Schema::array(Schema::byte(), 3), CodecConfig::BYTES);
        assert_eq!(codec.static_size(), 3);
        let err = codec
            .encode(&Value::List(vec![Value::Byte(1)]))
            .expect_err("short array");
        assert!(matches!(err, EncodingError::ArrayLength { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn default_encoding_decodes_to_default_value() {
        let schema = Schema::structure("Memo")
            .field("text", Schema::text(Charset::Utf16, 4))
            .field("tags", Schema::list(Schema::boolean(), 2))
            .build();
        for config in [CodecConfig::BYTES, CodecConfig::BITS] {
            let codec = codec(&schema, config);
            let encoded = codec.default_encoding();
            assert_eq!(encoded.len(), codec.static_size());
            assert_eq!(codec.decode(&encoded).unwrap(), codec.default_value());
            assert_eq!(codec.encode(&codec.default_value()).unwrap(), encoded);
        }
    }

    #[test]
    fn encode_into_appends_after_existing_units() {
        let codec = codec(&Schema::short(), CodecConfig::BYTES);
        let mut out = UnitWriter::new(Representation::Bytes);
        codec.encode_into(&Value::Short(1), &mut out).unwrap();
        codec.encode_into(&Value::Short(-1), &mut out).unwrap();
        assert_eq!(out.into_bytes(), vec![0, 1, 0xff, 0xff]);
    }

    #[test]
    fn encode_into_rejects_a_writer_of_the_other_representation() {
        let codec = codec(&Schema::int(), CodecConfig::BYTES);
        let mut out = UnitWriter::new(Representation::Bits);
        assert_eq!(
            codec.encode_into(&Value::Int(7), &mut out),
            Err(EncodingError::RepresentationMismatch {
                path: "Root".into(),
                expected: Representation::Bytes,
                actual: Representation::Bits,
            })
        );
        assert!(out.is_empty());
    }

    #[test]
    fn batch_matches_sequential_encoding() {
        let codec = codec(&Schema::list(Schema::long(), 4), CodecConfig::BYTES);
        let values: Vec<Value> = (0..100i64)
            .map(|n| Value::List((0..n % 5).map(Value::Long).collect()))
            .collect();
        let sequential: Vec<_> = values.iter().map(|v| codec.encode(v).unwrap()).collect();
        assert_eq!(codec.encode_batch(&values).unwrap(), sequential);
        let single_threaded = crate::utils::with_parallelism(false, || codec.encode_batch(&values));
        assert_eq!(single_threaded.unwrap(), sequential);

        let mut with_overflow = values;
        with_overflow[3] = Value::List(vec![Value::Long(0); 5]);
        assert!(matches!(
            codec.encode_batch(&with_overflow),
            Err(EncodingError::CapacityExceeded { actual: 5, allowed: 4, .. })
        ));
    }
}
