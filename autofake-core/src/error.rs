// Error types for autofake

use thiserror::Error;

/// Errors surfaced by the container to test code.
#[derive(Error, Debug)]
pub enum Error {
    /// No candidate constructor of the target could be satisfied and invoked.
    ///
    /// `cause` carries the failure of the last constructor that was tried.
    #[error("No suitable constructor found for type '{type_name}'.")]
    NoSuitableConstructor {
        type_name: &'static str,
        attempts: usize,
        #[source]
        cause: Option<Box<Error>>,
    },

    /// A value was provided under a type key it does not belong to.
    #[error("Dependency of type '{actual_type}' is not assignable to '{register_type}'.")]
    InvalidArgument {
        register_type: &'static str,
        actual_type: &'static str,
    },

    #[error("Fake creation error: {0}")]
    Fake(#[from] FakeError),

    #[error("Construction error: {0}")]
    Construct(#[from] ConstructError),
}

impl Error {
    /// The last underlying failure behind a `NoSuitableConstructor`, if any.
    pub fn cause(&self) -> Option<&Error> {
        match self {
            Error::NoSuitableConstructor { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    pub fn is_no_suitable_constructor(&self) -> bool {
        matches!(self, Error::NoSuitableConstructor { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

/// Failures reported by a [`FakeEngine`](crate::FakeEngine).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FakeError {
    #[error("Type '{0}' cannot be faked")]
    NotFakeable(&'static str),

    #[error("Fake factory for '{expected}' produced a '{actual}'")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to create fake of '{type_name}': {reason}")]
    Failed {
        type_name: &'static str,
        reason: String,
    },
}

impl FakeError {
    pub fn failed(type_name: &'static str, reason: impl Into<String>) -> Self {
        FakeError::Failed {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Failures raised while invoking a [`Constructor`](crate::Constructor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructError {
    #[error("Constructor expects {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("Argument {index} ({expected}) is missing")]
    MissingArgument {
        index: usize,
        expected: &'static str,
    },

    #[error("Argument {index} expected '{expected}', got '{actual}'")]
    ArgumentMismatch {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Constructor for '{expected}' returned a '{actual}'")]
    WrongTarget {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Constructor failed: {0}")]
    Failed(String),
}

impl ConstructError {
    pub fn failed(reason: impl Into<String>) -> Self {
        ConstructError::Failed(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
