use core::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::FixedCodec;
use crate::config::CodecConfig;
use crate::descriptor::layout::Layout;
use crate::descriptor::Descriptor;
use crate::repr::Representation;
use crate::schema::Schema;

/// Stable numeric identifier of a registered type. Written as the
/// discriminant of union payloads and witness envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeTag(pub u32);

impl From<u32> for TypeTag {
    fn from(value: u32) -> Self {
        TypeTag(value)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Entry of a sealed [`super::TypeRegistry`].
#[derive(Debug, Clone)]
pub struct RegisteredType {
    pub(crate) name: String,
    pub(crate) tag: TypeTag,
    pub(crate) schema: Schema,
    pub(crate) layout: Arc<Layout>,
    pub(crate) descriptor: Arc<Descriptor>,
}

impl RegisteredType {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Descriptor derived when the registry was sealed.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Static encoded size in units of `repr`.
    pub fn static_size(&self, repr: Representation) -> usize {
        self.layout.size(repr)
    }

    /// Codec for this type in the given configuration.
    pub fn codec(&self, config: CodecConfig) -> FixedCodec {
        FixedCodec::from_parts(
            &self.name,
            Arc::clone(&self.layout),
            Arc::clone(&self.descriptor),
            config,
        )
    }
}
