use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use super::types::{RegisteredType, TypeTag};
use super::TypeRegistry;
use crate::descriptor::layout::{resolve, Layout, VariantResolver};
use crate::descriptor::Descriptor;
use crate::error::SchemaError;
use crate::schema::{Schema, Witness};
use crate::ser::FieldPath;

#[derive(Debug, Clone)]
struct PendingType {
    name: String,
    tag: TypeTag,
    schema: Schema,
}

/// Population phase of a [`TypeRegistry`].
///
/// Registration is single-writer (`&mut self`) and validated immediately:
/// duplicate names, colliding tags and incomplete annotations are reported
/// by [`RegistryBuilder::register`] itself rather than at first use.
/// [`RegistryBuilder::seal`] consumes the builder, so nothing can be
/// registered once the registry is in use.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    pending: Vec<PendingType>,
    by_name: HashMap<String, usize>,
    by_tag: HashMap<TypeTag, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `name` with the stable `tag`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        tag: TypeTag,
        schema: Schema,
    ) -> Result<&mut Self, SchemaError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(SchemaError::DuplicateType { name });
        }
        if let Some(&existing) = self.by_tag.get(&tag) {
            return Err(SchemaError::DuplicateTag {
                tag: tag.0,
                name,
                existing: self.pending[existing].name.clone(),
            });
        }
        schema.validate(&name)?;
        debug!(name = %name, tag = tag.0, "registered witness type");
        let index = self.pending.len();
        self.by_name.insert(name.clone(), index);
        self.by_tag.insert(tag, index);
        self.pending.push(PendingType { name, tag, schema });
        Ok(self)
    }

    /// Registers the Rust type `T` under its [`Witness::TYPE_NAME`].
    pub fn register_witness<T: Witness>(&mut self, tag: TypeTag) -> Result<&mut Self, SchemaError> {
        self.register(T::TYPE_NAME, tag, T::schema())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Resolves every union, derives every descriptor and freezes the
    /// registry.
    pub fn seal(self) -> Result<TypeRegistry, SchemaError> {
        let mut resolver = SealResolver {
            pending: &self.pending,
            by_name: &self.by_name,
            compiled: HashMap::new(),
            stack: Vec::new(),
        };
        let mut types = Vec::with_capacity(self.pending.len());
        for entry in &self.pending {
            let (tag, layout) = resolver.resolve_variant(&entry.name, &FieldPath::root(&entry.name))?;
            let descriptor = Descriptor::from_layout(&entry.name, &layout);
            debug!(
                name = %entry.name,
                tag = tag.0,
                bytes = descriptor.byte_size,
                bits = descriptor.bit_size,
                "derived witness layout"
            );
            types.push(RegisteredType {
                name: entry.name.clone(),
                tag,
                schema: entry.schema.clone(),
                layout,
                descriptor: Arc::new(descriptor),
            });
        }
        let by_tag: BTreeMap<TypeTag, usize> = self
            .by_tag
            .iter()
            .map(|(&tag, &index)| (tag, index))
            .collect();
        debug!(types = types.len(), "sealed type registry");
        Ok(TypeRegistry {
            types,
            by_name: self.by_name,
            by_tag,
        })
    }
}

/// Resolves registered types on demand while sealing, in dependency order.
struct SealResolver<'a> {
    pending: &'a [PendingType],
    by_name: &'a HashMap<String, usize>,
    compiled: HashMap<String, Arc<Layout>>,
    stack: Vec<String>,
}

impl VariantResolver for SealResolver<'_> {
    fn resolve_variant(
        &mut self,
        name: &str,
        path: &FieldPath<'_>,
    ) -> Result<(TypeTag, Arc<Layout>), SchemaError> {
        let pending = self.pending;
        let entry = self
            .by_name
            .get(name)
            .map(|&index| &pending[index])
            .ok_or_else(|| SchemaError::UnknownType {
                path: path.render(),
                name: name.to_owned(),
            })?;
        if let Some(layout) = self.compiled.get(name) {
            return Ok((entry.tag, Arc::clone(layout)));
        }
        if self.stack.iter().any(|open| open == name) {
            return Err(SchemaError::RecursiveType {
                path: path.render(),
                name: name.to_owned(),
            });
        }
        self.stack.push(entry.name.clone());
        let layout = resolve(&entry.schema, &FieldPath::root(&entry.name), self);
        self.stack.pop();
        let layout = Arc::new(layout?);
        self.compiled.insert(entry.name.clone(), Arc::clone(&layout));
        Ok((entry.tag, layout))
    }
}
