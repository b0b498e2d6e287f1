use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use super::layout::{compile, Compiled};
use super::types::Descriptor;
use crate::codec::FixedCodec;
use crate::config::CodecConfig;
use crate::error::SchemaError;
use crate::registry::{RegistryResolver, TypeRegistry};
use crate::schema::Schema;

type Slot = Arc<OnceLock<Result<Compiled, SchemaError>>>;

/// Memoized descriptor derivation keyed by schema identity.
///
/// Each key is derived at most once, also when several threads ask for it
/// at the same time: the map lock only hands out the per-key cell and the
/// derivation itself runs inside that cell's initializer, so late arrivals
/// wait for the first result instead of deriving again. Failures are cached
/// as well, a broken schema stays broken.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    slots: Mutex<HashMap<String, Slot>>,
    derivations: AtomicUsize,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor of `schema`, deriving it on first access.
    ///
    /// `key` identifies the schema; a second call with the same key returns
    /// the cached result regardless of the schema passed.
    pub fn descriptor(
        &self,
        key: &str,
        schema: &Schema,
        registry: &TypeRegistry,
    ) -> Result<Arc<Descriptor>, SchemaError> {
        self.compiled(key, schema, registry)
            .map(|compiled| compiled.descriptor)
    }

    /// Returns a codec for `schema` backed by the cached layout.
    pub fn codec(
        &self,
        key: &str,
        schema: &Schema,
        registry: &TypeRegistry,
        config: CodecConfig,
    ) -> Result<FixedCodec, SchemaError> {
        self.compiled(key, schema, registry)
            .map(|compiled| FixedCodec::from_compiled(key, compiled, config))
    }

    /// Number of derivations that actually ran.
    pub fn derivations(&self) -> usize {
        self.derivations.load(Ordering::Acquire)
    }

    /// Number of keys seen so far.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compiled(
        &self,
        key: &str,
        schema: &Schema,
        registry: &TypeRegistry,
    ) -> Result<Compiled, SchemaError> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(key.to_owned()).or_default())
        };
        slot.get_or_init(|| {
            self.derivations.fetch_add(1, Ordering::AcqRel);
            let result = compile(key, schema, &mut RegistryResolver(registry));
            match &result {
                Ok(compiled) => debug!(
                    key,
                    bytes = compiled.descriptor.byte_size,
                    bits = compiled.descriptor.bit_size,
                    "derived descriptor"
                ),
                Err(err) => debug!(key, %err, "descriptor derivation failed"),
            }
            result
        })
        .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_first_access_derives_once() {
        let cache = Arc::new(DescriptorCache::new());
        let registry = Arc::new(TypeRegistry::empty());
        let schema = Schema::list(Schema::long(), 64);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let registry = Arc::clone(&registry);
                let schema = schema.clone();
                thread::spawn(move || {
                    cache
                        .descriptor("Longs", &schema, &registry)
                        .expect("valid schema")
                        .byte_size
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread"), 4 + 64 * 8);
        }
        assert_eq!(cache.derivations(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failures_are_cached_too() {
        let cache = DescriptorCache::new();
        let registry = TypeRegistry::empty();
        let schema = Schema::unbounded_list(Schema::int());
        for _ in 0..3 {
            let err = cache
                .descriptor("Ints", &schema, &registry)
                .expect_err("missing capacity");
            assert_eq!(err, SchemaError::MissingCapacity { path: "Ints".into() });
        }
        assert_eq!(cache.derivations(), 1);
    }
}
