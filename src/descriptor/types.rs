use serde::{Deserialize, Serialize};

use super::layout::{Layout, LayoutKind};
use crate::config::DESCRIPTOR_DIGEST_DOMAIN_TAG;
use crate::repr::Representation;
use crate::schema::{Charset, Primitive};

/// Shape of a descriptor node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptorKind {
    Primitive(Primitive),
    Struct { type_name: String },
    List,
    Array,
    Text(Charset),
    Optional,
    /// Constants in ordinal order.
    Enum { type_name: String, variants: Vec<String> },
    Union { family: String },
}

/// Static structure of a witness type.
///
/// This tree is the contract with the circuit-source generator: field
/// order, names, capacities and sizes must be reproduced exactly on the
/// other side. `byte_size` is the encoded length in the `Bytes`
/// representation and `bit_size` the encoded length in `Bits`.
///
/// | Kind | Children | Size |
/// |------|----------|------|
/// | primitive | none | primitive width |
/// | struct | one per field | sum of fields |
/// | list | `element` | prefix + capacity × element |
/// | array | `element` | len × element |
/// | text | none | prefix + capacity block |
/// | optional | `value` | flag + value |
/// | enum | none | ordinal |
/// | union | one per variant, carrying its `tag` | tag + largest variant |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    pub name: String,
    pub kind: DescriptorKind,
    /// Capacity of lists and text, length of arrays.
    pub capacity: Option<u32>,
    /// Wire tag of a union variant.
    pub tag: Option<u32>,
    pub bit_size: usize,
    pub byte_size: usize,
    pub children: Vec<Descriptor>,
}

impl Descriptor {
    pub(crate) fn from_layout(name: &str, layout: &Layout) -> Self {
        let (kind, capacity, children) = match &layout.kind {
            LayoutKind::Primitive(primitive) => (DescriptorKind::Primitive(*primitive), None, Vec::new()),
            LayoutKind::Struct { name, fields } => (
                DescriptorKind::Struct {
                    type_name: name.clone(),
                },
                None,
                fields
                    .iter()
                    .map(|(field, layout)| Descriptor::from_layout(field, layout))
                    .collect(),
            ),
            LayoutKind::List { capacity, element } => (
                DescriptorKind::List,
                Some(*capacity),
                vec![Descriptor::from_layout("element", element)],
            ),
            LayoutKind::Array { len, element } => (
                DescriptorKind::Array,
                Some(*len),
                vec![Descriptor::from_layout("element", element)],
            ),
            LayoutKind::Text { charset, capacity } => {
                (DescriptorKind::Text(*charset), Some(*capacity), Vec::new())
            }
            LayoutKind::Optional(inner) => (
                DescriptorKind::Optional,
                None,
                vec![Descriptor::from_layout("value", inner)],
            ),
            LayoutKind::Enum { name, variants } => (
                DescriptorKind::Enum {
                    type_name: name.clone(),
                    variants: variants.clone(),
                },
                None,
                Vec::new(),
            ),
            LayoutKind::Union { family, variants } => (
                DescriptorKind::Union {
                    family: family.clone(),
                },
                None,
                variants
                    .iter()
                    .map(|variant| Descriptor {
                        tag: Some(variant.tag.0),
                        ..Descriptor::from_layout(&variant.name, &variant.layout)
                    })
                    .collect(),
            ),
        };
        Descriptor {
            name: name.to_owned(),
            kind,
            capacity,
            tag: None,
            bit_size: layout.bits,
            byte_size: layout.bytes,
            children,
        }
    }

    /// Static size in units of `repr`.
    pub fn size(&self, repr: Representation) -> usize {
        match repr {
            Representation::Bits => self.bit_size,
            Representation::Bytes => self.byte_size,
        }
    }

    /// Looks up a descendant by dotted child names, e.g. `outputs.element.amount`.
    pub fn find(&self, path: &str) -> Option<&Descriptor> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| {
            node.children.iter().find(|child| child.name == segment)
        })
    }

    /// BLAKE3 digest of the canonical tree encoding.
    ///
    /// Two descriptors have equal digests exactly when names, kinds, enum
    /// constants, capacities, variant tags, sizes and child order agree, which lets a generated
    /// circuit pin the layout it was compiled against.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(DESCRIPTOR_DIGEST_DOMAIN_TAG);
        self.hash_into(&mut hasher);
        *hasher.finalize().as_bytes()
    }

    fn hash_into(&self, hasher: &mut blake3::Hasher) {
        hash_str(hasher, &self.name);
        match &self.kind {
            DescriptorKind::Primitive(primitive) => {
                hasher.update(&[0, *primitive as u8]);
            }
            DescriptorKind::Struct { type_name } => {
                hasher.update(&[1]);
                hash_str(hasher, type_name);
            }
            DescriptorKind::List => {
                hasher.update(&[2]);
            }
            DescriptorKind::Array => {
                hasher.update(&[3]);
            }
            DescriptorKind::Text(charset) => {
                hasher.update(&[4, *charset as u8]);
            }
            DescriptorKind::Optional => {
                hasher.update(&[5]);
            }
            DescriptorKind::Enum { type_name, variants } => {
                hasher.update(&[6]);
                hash_str(hasher, type_name);
                hasher.update(&(variants.len() as u64).to_be_bytes());
                for variant in variants {
                    hash_str(hasher, variant);
                }
            }
            DescriptorKind::Union { family } => {
                hasher.update(&[7]);
                hash_str(hasher, family);
            }
        }
        hash_opt_u32(hasher, self.capacity);
        hash_opt_u32(hasher, self.tag);
        hasher.update(&(self.byte_size as u64).to_be_bytes());
        hasher.update(&(self.bit_size as u64).to_be_bytes());
        hasher.update(&(self.children.len() as u64).to_be_bytes());
        for child in &self.children {
            child.hash_into(hasher);
        }
    }
}

fn hash_opt_u32(hasher: &mut blake3::Hasher, value: Option<u32>) {
    match value {
        Some(value) => {
            hasher.update(&[1]);
            hasher.update(&value.to_be_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}
