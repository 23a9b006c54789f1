// Fake creation capability
//
// The container never builds test doubles itself; it asks a FakeEngine for a
// stand-in of a given type. `Fakes` is a factory-table engine where each
// fakeable type registers how its double is made.

use crate::logging::trace;
use crate::{FakeError, Instance, TypeKey};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Produces a usable test double for an arbitrary type.
pub trait FakeEngine: Send + Sync {
    /// Create a fresh fake of `key`, or report why the type cannot be faked.
    fn create_fake(&self, key: &TypeKey) -> Result<Instance, FakeError>;
}

impl<E: FakeEngine + ?Sized> FakeEngine for &E {
    fn create_fake(&self, key: &TypeKey) -> Result<Instance, FakeError> {
        (**self).create_fake(key)
    }
}

impl<E: FakeEngine + ?Sized> FakeEngine for Arc<E> {
    fn create_fake(&self, key: &TypeKey) -> Result<Instance, FakeError> {
        (**self).create_fake(key)
    }
}

impl<E: FakeEngine + ?Sized> FakeEngine for Box<E> {
    fn create_fake(&self, key: &TypeKey) -> Result<Instance, FakeError> {
        (**self).create_fake(key)
    }
}

type FakeFactory = dyn Fn(&Fakes) -> Result<Instance, FakeError> + Send + Sync;

/// Factory-table [`FakeEngine`].
///
/// Factories receive the table itself so a fake can be assembled from other
/// fakes:
///
/// ```
/// use autofake_core::Fakes;
/// use std::sync::Arc;
///
/// #[derive(Clone, Default)]
/// struct Leaf;
///
/// #[derive(Clone)]
/// struct Inner {
///     leaf: Arc<Leaf>,
/// }
///
/// let fakes = Fakes::new()
///     .with(|_| Ok(Arc::new(Leaf)))
///     .with(|fakes| Ok(Arc::new(Inner { leaf: fakes.create()? })));
///
/// let inner: Arc<Inner> = fakes.create().unwrap();
/// ```
#[derive(Clone, Default)]
pub struct Fakes {
    factories: HashMap<TypeKey, Arc<FakeFactory>>,
}

impl Fakes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the factory used to fake `T`, replacing any previous one.
    pub fn insert<T, F>(&mut self, factory: F) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&Fakes) -> Result<T, FakeError> + Send + Sync + 'static,
    {
        let factory: Arc<FakeFactory> =
            Arc::new(move |fakes: &Fakes| factory(fakes).map(Instance::new));
        self.factories.insert(TypeKey::of::<T>(), factory);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with<T, F>(mut self, factory: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&Fakes) -> Result<T, FakeError> + Send + Sync + 'static,
    {
        self.insert(factory);
        self
    }

    /// Fake `T` with its `Default` value.
    pub fn with_default<T>(self) -> Self
    where
        T: Default + Clone + Send + Sync + 'static,
    {
        self.with(|_| Ok(T::default()))
    }

    /// Fake `Arc<T>` with a freshly allocated `Arc::new(T::default())`.
    pub fn with_default_arc<T>(self) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.with(|_| Ok(Arc::new(T::default())))
    }

    /// Create a fake of `T`.
    pub fn create<T: 'static>(&self) -> Result<T, FakeError> {
        let key = TypeKey::of::<T>();
        let instance = self.create_fake(&key)?;
        let actual = instance.type_name();
        instance.downcast::<T>().map_err(|_| FakeError::TypeMismatch {
            expected: key.type_name(),
            actual,
        })
    }

    /// Whether a factory is registered for `key`.
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.factories.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl FakeEngine for Fakes {
    fn create_fake(&self, key: &TypeKey) -> Result<Instance, FakeError> {
        let factory = self
            .factories
            .get(key)
            .ok_or(FakeError::NotFakeable(key.type_name()))?;

        trace!(fake_type = key.type_name(), "Creating fake from factory");
        let instance = factory(self)?;

        if !instance.is_assignable_to(key) {
            return Err(FakeError::TypeMismatch {
                expected: key.type_name(),
                actual: instance.type_name(),
            });
        }

        Ok(instance)
    }
}

impl fmt::Debug for Fakes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.factories.keys().map(TypeKey::type_name).collect();
        types.sort_unstable();
        f.debug_struct("Fakes").field("types", &types).finish()
    }
}
