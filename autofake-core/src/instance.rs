// Type-erased values stored in the registry and passed to constructors

use crate::TypeKey;
use std::any::Any;
use std::fmt;

trait ErasedValue: Any + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn ErasedValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: Clone + Send + Sync + 'static> ErasedValue for T {
    fn clone_boxed(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// An owned value of some registered type.
///
/// Cloning an `Instance` clones the payload, so shared identity is expressed
/// by storing an `Arc<T>`: every clone then points at the same allocation.
pub struct Instance {
    key: TypeKey,
    value: Box<dyn ErasedValue>,
}

impl Instance {
    pub fn new<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Runtime type of the payload.
    #[inline]
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.key.type_name()
    }

    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.key.is::<T>()
    }

    /// Whether this value may be stored under `key`.
    #[inline]
    pub fn is_assignable_to(&self, key: &TypeKey) -> bool {
        self.key == *key
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.as_any().downcast_ref::<T>()
    }

    /// Consume the instance, returning the payload if it is a `T`.
    ///
    /// Any other payload is handed back unchanged.
    pub fn downcast<T: 'static>(self) -> Result<T, Instance> {
        if !self.value.as_any().is::<T>() {
            return Err(self);
        }
        let value = self
            .value
            .into_any()
            .downcast::<T>()
            .expect("payload type checked above");
        Ok(*value)
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            value: self.value.clone_boxed(),
        }
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.key.type_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[test]
    fn test_downcast_matching_type() {
        let instance = Instance::new(Point { x: 3 });
        assert!(instance.is::<Point>());
        assert_eq!(instance.downcast_ref::<Point>(), Some(&Point { x: 3 }));
        assert_eq!(instance.downcast::<Point>().ok(), Some(Point { x: 3 }));
    }

    #[test]
    fn test_downcast_other_type_fails() {
        let instance = Instance::new(7u32);
        assert!(instance.downcast_ref::<i64>().is_none());
        let instance = instance.downcast::<i64>().unwrap_err();
        assert_eq!(instance.downcast::<u32>().ok(), Some(7));
    }

    #[test]
    fn test_clone_shares_arc_payload() {
        let shared = Arc::new(Point { x: 1 });
        let instance = Instance::new(Arc::clone(&shared));
        let copy = instance.clone();

        let a = instance.downcast::<Arc<Point>>().unwrap();
        let b = copy.downcast::<Arc<Point>>().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &shared));
    }

    #[test]
    fn test_assignability_is_exact_type() {
        let instance = Instance::new(Arc::new(Point { x: 0 }));
        assert!(instance.is_assignable_to(&TypeKey::of::<Arc<Point>>()));
        assert!(!instance.is_assignable_to(&TypeKey::of::<Point>()));
    }
}
