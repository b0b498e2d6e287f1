use std::collections::HashSet;
use std::sync::Arc;

use super::types::Descriptor;
use crate::config::{ENUM_ORDINAL_BYTES, LENGTH_PREFIX_BYTES, UNION_TAG_BYTES};
use crate::error::SchemaError;
use crate::registry::TypeTag;
use crate::repr::Representation;
use crate::schema::{Charset, Primitive, Schema};
use crate::ser::FieldPath;

/// Resolved schema with both static sizes precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    pub kind: LayoutKind,
    pub bits: usize,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LayoutKind {
    Primitive(Primitive),
    Struct {
        name: String,
        fields: Vec<(String, Layout)>,
    },
    List {
        capacity: u32,
        element: Box<Layout>,
    },
    Array {
        len: u32,
        element: Box<Layout>,
    },
    Text {
        charset: Charset,
        capacity: u32,
    },
    Optional(Box<Layout>),
    Enum {
        name: String,
        variants: Vec<String>,
    },
    Union {
        family: String,
        variants: Vec<UnionVariant>,
    },
}

/// Union member resolved through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnionVariant {
    pub name: String,
    pub tag: TypeTag,
    pub layout: Arc<Layout>,
}

impl Layout {
    /// Static size in units of `repr`.
    pub fn size(&self, repr: Representation) -> usize {
        match repr {
            Representation::Bits => self.bits,
            Representation::Bytes => self.bytes,
        }
    }

    /// Size of the largest union payload, i.e. the size minus the tag.
    pub fn union_payload_size(&self, repr: Representation) -> usize {
        self.size(repr) - repr.units(UNION_TAG_BYTES)
    }

    fn new(kind: LayoutKind, sizes: Sizes) -> Self {
        Self {
            kind,
            bits: sizes.bits,
            bytes: sizes.bytes,
        }
    }

    fn sizes(&self) -> Sizes {
        Sizes {
            bits: self.bits,
            bytes: self.bytes,
        }
    }
}

/// Sizes of one node in both representations.
#[derive(Debug, Clone, Copy, Default)]
struct Sizes {
    bits: usize,
    bytes: usize,
}

impl Sizes {
    const FLAG: Sizes = Sizes { bits: 1, bytes: 1 };

    fn of_bytes(bytes: usize) -> Option<Sizes> {
        Some(Sizes {
            bits: bytes.checked_mul(8)?,
            bytes,
        })
    }

    fn add(self, other: Sizes) -> Option<Sizes> {
        Some(Sizes {
            bits: self.bits.checked_add(other.bits)?,
            bytes: self.bytes.checked_add(other.bytes)?,
        })
    }

    fn times(self, count: u32) -> Option<Sizes> {
        Some(Sizes {
            bits: self.bits.checked_mul(count as usize)?,
            bytes: self.bytes.checked_mul(count as usize)?,
        })
    }

    /// Component-wise maximum; the widest variant may differ per representation.
    fn max(self, other: Sizes) -> Sizes {
        Sizes {
            bits: self.bits.max(other.bits),
            bytes: self.bytes.max(other.bytes),
        }
    }
}

/// Supplies the layouts of registered types named by union variants.
pub(crate) trait VariantResolver {
    fn resolve_variant(
        &mut self,
        name: &str,
        path: &FieldPath<'_>,
    ) -> Result<(TypeTag, Arc<Layout>), SchemaError>;
}

/// Resolver for schemas that must not contain unions.
pub(crate) struct NoVariants;

impl VariantResolver for NoVariants {
    fn resolve_variant(
        &mut self,
        name: &str,
        path: &FieldPath<'_>,
    ) -> Result<(TypeTag, Arc<Layout>), SchemaError> {
        Err(SchemaError::UnknownType {
            path: path.render(),
            name: name.to_owned(),
        })
    }
}

/// Resolver that accepts every variant name, used to check annotations
/// before the registry is complete.
struct AnnotationsOnly;

impl VariantResolver for AnnotationsOnly {
    fn resolve_variant(
        &mut self,
        _name: &str,
        _path: &FieldPath<'_>,
    ) -> Result<(TypeTag, Arc<Layout>), SchemaError> {
        let placeholder = Layout::new(
            LayoutKind::Struct {
                name: String::new(),
                fields: Vec::new(),
            },
            Sizes::default(),
        );
        Ok((TypeTag(0), Arc::new(placeholder)))
    }
}

/// Layout and descriptor derived together from one schema.
#[derive(Debug, Clone)]
pub(crate) struct Compiled {
    pub layout: Arc<Layout>,
    pub descriptor: Arc<Descriptor>,
}

/// Resolves `schema` under the root `name` and derives its descriptor.
pub(crate) fn compile(
    name: &str,
    schema: &Schema,
    resolver: &mut dyn VariantResolver,
) -> Result<Compiled, SchemaError> {
    let layout = resolve(schema, &FieldPath::root(name), resolver)?;
    let descriptor = Descriptor::from_layout(name, &layout);
    Ok(Compiled {
        layout: Arc::new(layout),
        descriptor: Arc::new(descriptor),
    })
}

impl Schema {
    /// Checks every annotation reachable from the schema without resolving
    /// union variants.
    ///
    /// Fails on missing or unusable capacities, empty unions or enums and
    /// duplicate field or variant names, naming the offending path.
    pub fn validate(&self, root: &str) -> Result<(), SchemaError> {
        resolve(self, &FieldPath::root(root), &mut AnnotationsOnly).map(|_| ())
    }
}

fn overflow(path: &FieldPath<'_>) -> SchemaError {
    SchemaError::SizeOverflow {
        path: path.render(),
    }
}

fn ensure_unique<'s>(
    names: impl IntoIterator<Item = &'s str>,
    path: &FieldPath<'_>,
    duplicate: fn(String, String) -> SchemaError,
) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(duplicate(path.render(), name.to_owned()));
        }
    }
    Ok(())
}

/// Recursively resolves a schema into a sized layout.
pub(crate) fn resolve(
    schema: &Schema,
    path: &FieldPath<'_>,
    resolver: &mut dyn VariantResolver,
) -> Result<Layout, SchemaError> {
    match schema {
        Schema::Primitive(primitive) => Ok(Layout::new(
            LayoutKind::Primitive(*primitive),
            Sizes {
                bits: Representation::Bits.primitive_units(*primitive),
                bytes: Representation::Bytes.primitive_units(*primitive),
            },
        )),
        Schema::Struct(structure) => {
            ensure_unique(
                structure.fields.iter().map(|field| field.name.as_str()),
                path,
                |path, field| SchemaError::DuplicateField { path, field },
            )?;
            let mut sizes = Sizes::default();
            let mut fields = Vec::with_capacity(structure.fields.len());
            for field in &structure.fields {
                let field_path = path.field(&field.name);
                let layout = resolve(&field.schema, &field_path, resolver)?;
                sizes = sizes.add(layout.sizes()).ok_or_else(|| overflow(&field_path))?;
                fields.push((field.name.clone(), layout));
            }
            Ok(Layout::new(
                LayoutKind::Struct {
                    name: structure.name.clone(),
                    fields,
                },
                sizes,
            ))
        }
        Schema::List(list) => {
            let capacity = list.capacity.ok_or_else(|| SchemaError::MissingCapacity {
                path: path.render(),
            })?;
            let element = resolve(&list.element, &path.element(), resolver)?;
            let sizes = Sizes::of_bytes(LENGTH_PREFIX_BYTES)
                .zip(element.sizes().times(capacity))
                .and_then(|(prefix, slots)| prefix.add(slots))
                .ok_or_else(|| overflow(path))?;
            Ok(Layout::new(
                LayoutKind::List {
                    capacity,
                    element: Box::new(element),
                },
                sizes,
            ))
        }
        Schema::Array(array) => {
            let element = resolve(&array.element, &path.element(), resolver)?;
            let sizes = element.sizes().times(array.len).ok_or_else(|| overflow(path))?;
            Ok(Layout::new(
                LayoutKind::Array {
                    len: array.len,
                    element: Box::new(element),
                },
                sizes,
            ))
        }
        Schema::Text(text) => {
            let capacity = text.capacity.ok_or_else(|| SchemaError::MissingCapacity {
                path: path.render(),
            })?;
            if text.charset == Charset::Utf16 && capacity % 2 != 0 {
                return Err(SchemaError::InvalidCapacity {
                    path: path.render(),
                    capacity,
                    reason: "UTF-16 capacity must be an even number of bytes",
                });
            }
            let sizes = text
                .charset
                .capacity_bytes(capacity)
                .and_then(|block| block.checked_add(LENGTH_PREFIX_BYTES))
                .and_then(Sizes::of_bytes)
                .ok_or_else(|| overflow(path))?;
            Ok(Layout::new(
                LayoutKind::Text {
                    charset: text.charset,
                    capacity,
                },
                sizes,
            ))
        }
        Schema::Optional(inner) => {
            let inner = resolve(inner, path, resolver)?;
            let sizes = Sizes::FLAG
                .add(inner.sizes())
                .ok_or_else(|| overflow(path))?;
            Ok(Layout::new(LayoutKind::Optional(Box::new(inner)), sizes))
        }
        Schema::Enum(enumeration) => {
            if enumeration.variants.is_empty() {
                return Err(SchemaError::EmptyEnum {
                    path: path.render(),
                });
            }
            ensure_unique(
                enumeration.variants.iter().map(String::as_str),
                path,
                |path, variant| SchemaError::DuplicateVariant { path, variant },
            )?;
            let sizes = Sizes::of_bytes(ENUM_ORDINAL_BYTES).ok_or_else(|| overflow(path))?;
            Ok(Layout::new(
                LayoutKind::Enum {
                    name: enumeration.name.clone(),
                    variants: enumeration.variants.clone(),
                },
                sizes,
            ))
        }
        Schema::Union(union) => {
            if union.variants.is_empty() {
                return Err(SchemaError::EmptyUnion {
                    path: path.render(),
                });
            }
            ensure_unique(
                union.variants.iter().map(String::as_str),
                path,
                |path, variant| SchemaError::DuplicateVariant { path, variant },
            )?;
            let mut payload = Sizes::default();
            let mut variants = Vec::with_capacity(union.variants.len());
            for name in &union.variants {
                let (tag, layout) = resolver.resolve_variant(name, &path.field(name))?;
                payload = payload.max(layout.sizes());
                variants.push(UnionVariant {
                    name: name.clone(),
                    tag,
                    layout,
                });
            }
            let sizes = Sizes::of_bytes(UNION_TAG_BYTES)
                .and_then(|tag| tag.add(payload))
                .ok_or_else(|| overflow(path))?;
            Ok(Layout::new(
                LayoutKind::Union {
                    family: union.family.clone(),
                    variants,
                },
                sizes,
            ))
        }
    }
}
