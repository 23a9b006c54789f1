//! Core of the autofake test container.
//!
//! [`AutoFake`] builds a system under test by picking the richest
//! constructor it can satisfy, filling every unknown parameter with a fake
//! from a [`FakeEngine`], and remembering which instance was used for each
//! dependency type so tests can [`resolve`](AutoFake::resolve) or
//! [`provide`](AutoFake::provide) it.
//!
//! Types describe their constructors explicitly through [`Constructible`];
//! the type-erased entry points read them from a [`TypeCatalog`].

pub mod catalog;
pub mod constructor;
pub mod container;
pub mod engine;
pub mod error;
pub mod instance;
pub mod key;
pub mod logging;
pub mod registry;
pub mod resolver;

// Re-export commonly used types
pub use catalog::*;
pub use constructor::*;
pub use container::*;
pub use engine::*;
pub use error::*;
pub use instance::*;
pub use key::*;
pub use registry::*;
pub use resolver::*;
