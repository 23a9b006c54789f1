// Type-keyed fake registry

use crate::logging::{debug, trace};
use crate::{Error, FakeEngine, FakeError, Instance, Result, TypeKey};
use std::collections::HashMap;

/// Mapping from a requested type to the one instance currently used for it.
///
/// Every stored instance has exactly the runtime type of its key, so typed
/// reads never fail to downcast.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    entries: HashMap<TypeKey, Instance>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        debug!("Creating new fake registry");
        Self::default()
    }

    /// Return the instance for `key`, creating and storing a fake on first use.
    ///
    /// Failures of the engine propagate unchanged.
    pub fn resolve(&mut self, key: &TypeKey, engine: &dyn FakeEngine) -> Result<Instance> {
        if let Some(existing) = self.entries.get(key) {
            trace!(dependency = key.type_name(), "Resolved existing instance");
            return Ok(existing.clone());
        }

        let fake = engine.create_fake(key)?;
        if !fake.is_assignable_to(key) {
            return Err(FakeError::TypeMismatch {
                expected: key.type_name(),
                actual: fake.type_name(),
            }
            .into());
        }

        self.entries.insert(*key, fake.clone());
        debug!(dependency = key.type_name(), "Fake created and registered");

        Ok(fake)
    }

    /// Set the instance used for `key`, replacing any previous one.
    ///
    /// Fails with [`Error::InvalidArgument`] and leaves the registry untouched
    /// when `instance` is not a value of `key`.
    pub fn provide(&mut self, key: TypeKey, instance: Instance) -> Result<()> {
        if !instance.is_assignable_to(&key) {
            debug!(
                dependency = key.type_name(),
                actual = instance.type_name(),
                "Rejected dependency of another type"
            );
            return Err(Error::InvalidArgument {
                register_type: key.type_name(),
                actual_type: instance.type_name(),
            });
        }

        let replaced = self.entries.insert(key, instance).is_some();
        debug!(
            dependency = key.type_name(),
            replaced = replaced,
            "Dependency provided"
        );
        Ok(())
    }

    /// Typed form of [`provide`](Self::provide); cannot fail.
    pub fn provide_value<T: Clone + Send + Sync + 'static>(&mut self, value: T) {
        let key = TypeKey::of::<T>();
        let replaced = self.entries.insert(key, Instance::new(value)).is_some();
        debug!(
            dependency = key.type_name(),
            replaced = replaced,
            "Dependency provided"
        );
    }

    /// Insert every entry whose key is not yet present. Returns how many were added.
    pub(crate) fn commit_missing(&mut self, candidates: HashMap<TypeKey, Instance>) -> usize {
        let mut added = 0;
        for (key, instance) in candidates {
            if !self.entries.contains_key(&key) {
                trace!(dependency = key.type_name(), "Committing candidate fake");
                self.entries.insert(key, instance);
                added += 1;
            }
        }
        added
    }

    /// The instance for `key`, without creating one.
    pub fn get(&self, key: &TypeKey) -> Option<&Instance> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        let exists = self.entries.contains_key(key);
        trace!(dependency = key.type_name(), exists = exists, "Checked registry entry");
        exists
    }

    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fakes;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Repo;

    fn engine() -> Fakes {
        Fakes::new().with_default_arc::<Repo>()
    }

    #[test]
    fn test_resolve_creates_once() {
        let engine = engine();
        let mut registry = FakeRegistry::new();
        let key = TypeKey::of::<Arc<Repo>>();

        let first = registry.resolve(&key, &engine).unwrap();
        let second = registry.resolve(&key, &engine).unwrap();

        let first = first.downcast::<Arc<Repo>>().unwrap();
        let second = second.downcast::<Arc<Repo>>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_resolve_propagates_engine_failure() {
        let mut registry = FakeRegistry::new();
        let err = registry
            .resolve(&TypeKey::of::<u64>(), &engine())
            .unwrap_err();

        assert!(matches!(err, Error::Fake(FakeError::NotFakeable("u64"))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_provide_overwrites() {
        let mut registry = FakeRegistry::new();
        registry.provide_value(1u8);
        registry.provide(TypeKey::of::<u8>(), Instance::new(2u8)).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&TypeKey::of::<u8>()).unwrap().downcast_ref::<u8>(),
            Some(&2)
        );
    }

    #[test]
    fn test_provide_rejects_other_type() {
        let mut registry = FakeRegistry::new();
        registry.provide_value(1u8);

        let err = registry
            .provide(TypeKey::of::<u8>(), Instance::new(9u16))
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            registry.get(&TypeKey::of::<u8>()).unwrap().downcast_ref::<u8>(),
            Some(&1)
        );
    }

    #[test]
    fn test_commit_missing_keeps_existing_entries() {
        let mut registry = FakeRegistry::new();
        registry.provide_value(1u8);

        let mut candidates = HashMap::new();
        candidates.insert(TypeKey::of::<u8>(), Instance::new(5u8));
        candidates.insert(TypeKey::of::<u16>(), Instance::new(6u16));

        assert_eq!(registry.commit_missing(candidates), 1);
        assert_eq!(
            registry.get(&TypeKey::of::<u8>()).unwrap().downcast_ref::<u8>(),
            Some(&1)
        );
        assert!(registry.contains(&TypeKey::of::<u16>()));
    }
}
