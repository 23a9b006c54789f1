// Constructor descriptors
//
// Rust has no runtime reflection over constructors, so each constructible
// type describes its public constructors explicitly: the ordered parameter
// types plus a function that builds the value from a positional argument list.

use crate::{ConstructError, Instance, TypeKey};
use std::fmt;
use std::sync::Arc;

/// Positional arguments handed to a constructor.
#[derive(Debug)]
pub struct Arguments {
    slots: Vec<Option<Instance>>,
}

impl Arguments {
    pub fn new(values: Vec<Instance>) -> Self {
        Self {
            slots: values.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Take the argument at `index` as a `T`.
    pub fn take<T: 'static>(&mut self, index: usize) -> Result<T, ConstructError> {
        let expected = TypeKey::of::<T>().type_name();
        let instance = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(ConstructError::MissingArgument { index, expected })?;

        let actual = instance.type_name();
        instance
            .downcast::<T>()
            .map_err(|_| ConstructError::ArgumentMismatch {
                index,
                expected,
                actual,
            })
    }
}

type InvokeFn = dyn Fn(&mut Arguments) -> Result<Instance, ConstructError> + Send + Sync;

/// One public constructor of a target type.
#[derive(Clone)]
pub struct Constructor {
    target: TypeKey,
    params: Vec<TypeKey>,
    invoke: Arc<InvokeFn>,
}

impl Constructor {
    /// Describe an infallible constructor from a closure.
    ///
    /// ```
    /// use autofake_core::Constructor;
    /// use std::sync::Arc;
    ///
    /// #[derive(Clone)]
    /// struct Clock;
    ///
    /// #[derive(Clone)]
    /// struct Scheduler {
    ///     clock: Arc<Clock>,
    /// }
    ///
    /// let ctor = Constructor::new(|clock: Arc<Clock>| Scheduler { clock });
    /// assert_eq!(ctor.arity(), 1);
    /// ```
    pub fn new<Args, F>(f: F) -> Self
    where
        F: IntoConstructor<Args>,
    {
        f.into_constructor()
    }

    /// Describe a constructor that may refuse its arguments.
    pub fn fallible<Args, F>(f: F) -> Self
    where
        F: IntoFallibleConstructor<Args>,
    {
        f.into_fallible_constructor()
    }

    /// Build a descriptor from raw parts.
    pub fn from_parts<F>(target: TypeKey, params: Vec<TypeKey>, invoke: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<Instance, ConstructError> + Send + Sync + 'static,
    {
        Self {
            target,
            params,
            invoke: Arc::new(invoke),
        }
    }

    pub fn target(&self) -> TypeKey {
        self.target
    }

    /// Parameter types in declaration order.
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Invoke the constructor with a positional argument list.
    pub fn invoke(&self, args: Vec<Instance>) -> Result<Instance, ConstructError> {
        if args.len() != self.params.len() {
            return Err(ConstructError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }

        let mut args = Arguments::new(args);
        let instance = (self.invoke)(&mut args)?;

        if instance.type_key() != self.target {
            return Err(ConstructError::WrongTarget {
                expected: self.target.type_name(),
                actual: instance.type_name(),
            });
        }

        Ok(instance)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("target", &self.target)
            .field("params", &self.params)
            .finish()
    }
}

/// Closures usable as infallible constructors.
pub trait IntoConstructor<Args> {
    fn into_constructor(self) -> Constructor;
}

/// Closures usable as fallible constructors.
pub trait IntoFallibleConstructor<Args> {
    fn into_fallible_constructor(self) -> Constructor;
}

macro_rules! impl_constructor_fns {
    ($($arg:ident => $idx:tt),*) => {
        impl<F, T, $($arg,)*> IntoConstructor<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> T + Send + Sync + 'static,
            T: Clone + Send + Sync + 'static,
            $($arg: Clone + Send + Sync + 'static,)*
        {
            #[allow(unused_mut, unused_variables)]
            fn into_constructor(self) -> Constructor {
                Constructor::from_parts(
                    TypeKey::of::<T>(),
                    vec![$(TypeKey::of::<$arg>()),*],
                    move |args: &mut Arguments| {
                        Ok(Instance::new(self($(args.take::<$arg>($idx)?),*)))
                    },
                )
            }
        }

        impl<F, T, $($arg,)*> IntoFallibleConstructor<($($arg,)*)> for F
        where
            F: Fn($($arg),*) -> Result<T, ConstructError> + Send + Sync + 'static,
            T: Clone + Send + Sync + 'static,
            $($arg: Clone + Send + Sync + 'static,)*
        {
            #[allow(unused_mut, unused_variables)]
            fn into_fallible_constructor(self) -> Constructor {
                Constructor::from_parts(
                    TypeKey::of::<T>(),
                    vec![$(TypeKey::of::<$arg>()),*],
                    move |args: &mut Arguments| {
                        self($(args.take::<$arg>($idx)?),*).map(Instance::new)
                    },
                )
            }
        }
    };
}

impl_constructor_fns!();
impl_constructor_fns!(A0 => 0);
impl_constructor_fns!(A0 => 0, A1 => 1);
impl_constructor_fns!(A0 => 0, A1 => 1, A2 => 2);
impl_constructor_fns!(A0 => 0, A1 => 1, A2 => 2, A3 => 3);
impl_constructor_fns!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4);
impl_constructor_fns!(A0 => 0, A1 => 1, A2 => 2, A3 => 3, A4 => 4, A5 => 5);
