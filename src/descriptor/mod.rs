//! Structural descriptor derivation.
//!
//! A schema is resolved once into an internal layout carrying the static
//! size of every node in both representations, and the public
//! [`Descriptor`] tree is derived from that layout. Derivation aborts on the
//! first incomplete annotation with a [`crate::SchemaError`] naming the
//! field path.

mod cache;
pub(crate) mod layout;
mod report;
mod types;

pub use cache::DescriptorCache;
pub use types::{Descriptor, DescriptorKind};
