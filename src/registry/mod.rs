//! Type registry and polymorphic dispatch.
//!
//! The registry maps type names to stable [`TypeTag`]s and to their derived
//! layouts. It has a two-phase lifecycle: a [`RegistryBuilder`] is populated
//! during start-up and [`RegistryBuilder::seal`] turns it into an immutable
//! [`TypeRegistry`] that can be shared across threads without
//! synchronization. Instances are passed explicitly; there is no global
//! registry.

mod builder;
mod types;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub use builder::RegistryBuilder;
pub use types::{RegisteredType, TypeTag};

use crate::codec::FixedCodec;
use crate::config::CodecConfig;
use crate::descriptor::layout::{Layout, VariantResolver};
use crate::error::{DecodingError, EncodingError, Result, SchemaError};
use crate::schema::{Value, Witness};
use crate::ser::FieldPath;

/// Field that carries a bare tag in witness envelopes.
const TAG_FIELD: &str = "type_tag";

/// Sealed registry of witness types.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<RegisteredType>,
    by_name: HashMap<String, usize>,
    by_tag: BTreeMap<TypeTag, usize>,
}

impl TypeRegistry {
    /// Starts the population phase.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry without any types, for schemas that contain no unions.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredType> {
        self.types.iter()
    }

    /// Registered tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.by_tag.keys().copied()
    }

    /// Looks a type up by name.
    pub fn lookup(&self, name: &str) -> core::result::Result<&RegisteredType, EncodingError> {
        self.by_name
            .get(name)
            .map(|&index| &self.types[index])
            .ok_or_else(|| EncodingError::UnregisteredType {
                name: name.to_owned(),
            })
    }

    /// Looks a type up by tag, as read from untrusted input.
    ///
    /// A miss is reported against the envelope's `type_tag` field, the only
    /// place a bare tag is read from.
    pub fn lookup_tag(&self, tag: TypeTag) -> core::result::Result<&RegisteredType, DecodingError> {
        self.by_tag
            .get(&tag)
            .map(|&index| &self.types[index])
            .ok_or_else(|| DecodingError::UnknownTag {
                path: TAG_FIELD.to_owned(),
                tag: tag.0,
            })
    }

    /// Codec of the type registered as `name`.
    pub fn codec(&self, name: &str, config: CodecConfig) -> core::result::Result<FixedCodec, EncodingError> {
        self.lookup(name).map(|entry| entry.codec(config))
    }

    /// Encodes `value` as the type registered under `name`.
    pub fn encode(
        &self,
        name: &str,
        value: &Value,
        config: CodecConfig,
    ) -> core::result::Result<Vec<u8>, EncodingError> {
        self.codec(name, config)?.encode(value)
    }

    /// Decodes bytes as the type registered under `name`.
    pub fn decode(&self, name: &str, bytes: &[u8], config: CodecConfig) -> Result<Value> {
        Ok(self.codec(name, config)?.decode(bytes)?)
    }

    /// Encodes a typed witness through its registered layout.
    pub fn encode_witness<T: Witness>(
        &self,
        value: &T,
        config: CodecConfig,
    ) -> core::result::Result<Vec<u8>, EncodingError> {
        self.encode(T::TYPE_NAME, &value.to_value(), config)
    }

    /// Decodes a typed witness through its registered layout.
    pub fn decode_witness<T: Witness>(&self, bytes: &[u8], config: CodecConfig) -> Result<T> {
        let value = self.decode(T::TYPE_NAME, bytes, config)?;
        Ok(T::from_value(value)?)
    }
}

/// Resolves union variants against a sealed registry.
pub(crate) struct RegistryResolver<'a>(pub &'a TypeRegistry);

impl VariantResolver for RegistryResolver<'_> {
    fn resolve_variant(
        &mut self,
        name: &str,
        path: &FieldPath<'_>,
    ) -> core::result::Result<(TypeTag, Arc<Layout>), SchemaError> {
        let entry = self
            .0
            .lookup(name)
            .map_err(|_| SchemaError::UnknownType {
                path: path.render(),
                name: name.to_owned(),
            })?;
        Ok((entry.tag, Arc::clone(&entry.layout)))
    }
}
