// autofake - build systems under test with every dependency faked
//
// This library re-exports the container core and, with the `mock` feature,
// the call-recording doubles used to give fakes behavior.

// Re-export core functionality
pub use autofake_core::*;

#[cfg(feature = "mock")]
pub use autofake_mock::{Mock, Spy};

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        AutoFake, Constructible, ConstructError, Constructor, Error, FakeEngine, FakeError,
        Fakes, Instance, TypeCatalog, TypeKey,
    };

    #[cfg(feature = "mock")]
    pub use crate::{Mock, Spy};
}
