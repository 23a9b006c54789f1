// Constructor catalog: the explicit stand-in for runtime reflection

use crate::logging::debug;
use crate::{Constructor, TypeKey};
use std::collections::HashMap;

/// A type that can be built by [`AutoFake::generate`](crate::AutoFake::generate).
///
/// Implementations list the public constructors in declaration order.
/// Constructors with the same number of parameters are tried in that order.
///
/// ```
/// use autofake_core::{Constructible, Constructor};
/// use std::sync::Arc;
///
/// #[derive(Clone)]
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
/// ```
pub trait Constructible: Clone + Send + Sync + 'static {
    fn constructors() -> Vec<Constructor>;
}

/// Constructor table consulted by the type-erased `generate`.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    entries: HashMap<TypeKey, Vec<Constructor>>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructors of a [`Constructible`] type.
    pub fn register<T: Constructible>(&mut self) -> &mut Self {
        self.insert(TypeKey::of::<T>(), T::constructors())
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T: Constructible>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Set the constructor list for `key`, replacing any previous list.
    ///
    /// The list is stored as given. Generating `key` skips every constructor
    /// whose [`target`](Constructor::target) is another type, failing it as
    /// [`ConstructError::WrongTarget`](crate::ConstructError::WrongTarget).
    pub fn insert(&mut self, key: TypeKey, constructors: Vec<Constructor>) -> &mut Self {
        debug!(
            target_type = key.type_name(),
            constructors = constructors.len(),
            "Registered constructors in catalog"
        );
        self.entries.insert(key, constructors);
        self
    }

    /// Constructors of `key`. Unknown types have none.
    pub fn constructors(&self, key: &TypeKey) -> &[Constructor] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
