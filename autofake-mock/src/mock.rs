// Call-recording test doubles

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Shared handle recording calls and holding a configured return value.
///
/// Clones share state, so a fake stored in the container and the copy a test
/// resolves observe the same calls.
pub struct Mock<R> {
    calls: Arc<Mutex<Vec<String>>>,
    return_value: Arc<Mutex<Option<R>>>,
}

impl<R> Mock<R> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            return_value: Arc::new(Mutex::new(None)),
        }
    }

    /// Configure the value returned by subsequent calls.
    pub fn returns(&self, value: R) {
        *self.return_value.lock() = Some(value);
    }

    /// Builder form of [`returns`](Self::returns).
    pub fn with_return(self, value: R) -> Self {
        self.returns(value);
        self
    }

    pub fn record_call(&self, method: &str) {
        self.calls.lock().push(method.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Number of calls to `method`.
    pub fn calls_to(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|m| *m == method).count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.calls.lock().iter().any(|m| m == method)
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Record `method` and return the configured value, if any.
    pub fn call(&self, method: &str) -> Option<R>
    where
        R: Clone,
    {
        self.record_call(method);
        self.get_return()
    }

    pub fn get_return(&self) -> Option<R>
    where
        R: Clone,
    {
        self.return_value.lock().clone()
    }

    /// Whether `other` is a handle to the same mock.
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.calls, &other.calls)
    }
}

impl<R> Clone for Mock<R> {
    fn clone(&self) -> Self {
        Self {
            calls: Arc::clone(&self.calls),
            return_value: Arc::clone(&self.return_value),
        }
    }
}

impl<R> Default for Mock<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Mock<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mock")
            .field("calls", &*self.calls.lock())
            .finish_non_exhaustive()
    }
}

/// Wraps a real value and records the calls made through it.
#[derive(Clone)]
pub struct Spy<T> {
    inner: T,
    calls: Arc<Mutex<Vec<String>>>,
}

impl<T> Spy<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record(&self, method: &str) {
        self.calls.lock().push(method.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.calls.lock().iter().any(|m| m == method)
    }

    /// Record `method` and hand out the wrapped value.
    pub fn through(&self, method: &str) -> &T {
        self.record(method);
        &self.inner
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}
