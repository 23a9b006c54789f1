// Auto-faking container

use crate::logging::debug;
use crate::{
    Constructible, ConstructError, ConstructorResolver, FakeEngine, FakeError,
    FakeRegistry, Instance, Result, TypeCatalog, TypeKey,
};
use std::fmt;
use std::sync::Arc;

/// Builds systems under test with fakes for every dependency.
///
/// Fakes come from a [`FakeEngine`]; the instance used for each dependency
/// type is remembered so tests can retrieve it with [`resolve`](Self::resolve)
/// or replace it with [`provide`](Self::provide).
///
/// The container is single-threaded: writes take `&mut self` and there is no
/// internal locking.
///
/// ```
/// use autofake_core::{AutoFake, Constructible, Constructor, Fakes};
/// use std::sync::Arc;
///
/// #[derive(Clone, Default)]
/// struct Mailer;
///
/// #[derive(Clone)]
/// struct SignupService {
///     mailer: Arc<Mailer>,
/// }
///
/// impl Constructible for SignupService {
///     fn constructors() -> Vec<Constructor> {
///         vec![Constructor::new(|mailer: Arc<Mailer>| SignupService { mailer })]
///     }
/// }
///
/// let mut autofake = AutoFake::new(Fakes::new().with_default_arc::<Mailer>());
/// let sut: SignupService = autofake.generate().unwrap();
/// let mailer: Arc<Mailer> = autofake.resolve().unwrap();
/// assert!(Arc::ptr_eq(&sut.mailer, &mailer));
/// ```
pub struct AutoFake {
    registry: FakeRegistry,
    catalog: TypeCatalog,
    engine: Arc<dyn FakeEngine>,
}

impl AutoFake {
    pub fn new<E: FakeEngine + 'static>(engine: E) -> Self {
        Self::with_engine(Arc::new(engine))
    }

    /// Container backed by a shared engine, e.g. one fake table per test suite.
    pub fn with_engine(engine: Arc<dyn FakeEngine>) -> Self {
        debug!("Creating new auto-fake container");
        Self {
            registry: FakeRegistry::new(),
            catalog: TypeCatalog::new(),
            engine,
        }
    }

    /// Use `catalog` for the type-erased [`generate_erased`](Self::generate_erased).
    pub fn with_catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Build a `T` with the richest constructor whose parameters can be supplied.
    pub fn generate<T: Constructible>(&mut self) -> Result<T> {
        let key = TypeKey::of::<T>();
        let constructors = T::constructors();

        let instance = ConstructorResolver::new(&mut self.registry, self.engine.as_ref())
            .generate(&key, &constructors)?;

        let actual = instance.type_name();
        instance.downcast::<T>().map_err(|_| {
            ConstructError::WrongTarget {
                expected: key.type_name(),
                actual,
            }
            .into()
        })
    }

    /// Type-erased [`generate`](Self::generate); constructors come from the catalog.
    ///
    /// A type the catalog does not know has no constructors and fails with
    /// [`Error::NoSuitableConstructor`](crate::Error::NoSuitableConstructor).
    pub fn generate_erased(&mut self, key: &TypeKey) -> Result<Instance> {
        let constructors = self.catalog.constructors(key);
        ConstructorResolver::new(&mut self.registry, self.engine.as_ref())
            .generate(key, constructors)
    }

    /// The instance used for `T`, creating a fake on first request.
    pub fn resolve<T: Clone + Send + Sync + 'static>(&mut self) -> Result<T> {
        let key = TypeKey::of::<T>();
        let instance = self.resolve_erased(&key)?;

        let actual = instance.type_name();
        instance.downcast::<T>().map_err(|_| {
            FakeError::TypeMismatch {
                expected: key.type_name(),
                actual,
            }
            .into()
        })
    }

    pub fn resolve_erased(&mut self, key: &TypeKey) -> Result<Instance> {
        self.registry.resolve(key, self.engine.as_ref())
    }

    /// Use `dependency` whenever a `T` is needed, replacing any previous one.
    pub fn provide<T: Clone + Send + Sync + 'static>(&mut self, dependency: T) {
        self.registry.provide_value(dependency);
    }

    /// Type-erased [`provide`](Self::provide).
    ///
    /// Fails with [`Error::InvalidArgument`](crate::Error::InvalidArgument) when `dependency` is not a `key`;
    /// the registry is left unchanged in that case.
    pub fn provide_erased(&mut self, key: TypeKey, dependency: Instance) -> Result<()> {
        self.registry.provide(key, dependency)
    }

    /// Whether an instance for `T` is already known.
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.registry.contains(&TypeKey::of::<T>())
    }

    pub fn registry(&self) -> &FakeRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut TypeCatalog {
        &mut self.catalog
    }

    pub fn engine(&self) -> &Arc<dyn FakeEngine> {
        &self.engine
    }
}

impl fmt::Debug for AutoFake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoFake")
            .field("registry", &self.registry)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}
