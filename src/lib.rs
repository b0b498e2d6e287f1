//! Fixed-length deterministic serialization of zero-knowledge witnesses.
//!
//! Circuits consume their witnesses as inputs whose size is fixed when the
//! circuit is compiled. This crate turns capacity-annotated schemas into
//! encodings whose length depends on the schema alone, never on the value
//! being encoded, so a witness neither breaks compilation nor leaks the
//! length of private data.
//!
//! The moving parts:
//!
//! * [`schema`] declares witness types, either directly through the builder
//!   API or through the [`Witness`] trait.
//! * [`descriptor`] derives the static size of every node once and renders
//!   the tree handed to the circuit-source generator.
//! * [`registry`] assigns stable tags to types and resolves tagged unions.
//! * [`codec`] encodes and decodes values in the `Bytes` or `Bits`
//!   [`Representation`].
//! * [`envelope`] prefixes payloads with fixed-size metadata.
//!
//! ```
//! use rpp_witness::{CodecConfig, FixedCodec, Schema, Value};
//!
//! let codec = FixedCodec::standalone("Ints", &Schema::list(Schema::int(), 3), CodecConfig::BYTES)?;
//! let bytes = codec.encode(&Value::from(vec![1i32, 2]))?;
//! assert_eq!(bytes.len(), codec.static_size());
//! assert_eq!(bytes, [0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 0]);
//! assert_eq!(codec.decode(&bytes)?, Value::from(vec![1i32, 2]));
//! # Ok::<(), rpp_witness::Error>(())
//! ```

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod envelope;
pub mod error;
pub mod registry;
pub mod repr;
pub mod schema;
pub mod ser;
pub mod utils;

pub use codec::FixedCodec;
pub use config::CodecConfig;
pub use descriptor::{Descriptor, DescriptorCache, DescriptorKind};
pub use envelope::WitnessMetadata;
pub use error::{DecodingError, EncodingError, Error, Result, SchemaError};
pub use registry::{RegisteredType, RegistryBuilder, TypeRegistry, TypeTag};
pub use repr::Representation;
pub use schema::{Charset, Primitive, Schema, Value, Witness};
