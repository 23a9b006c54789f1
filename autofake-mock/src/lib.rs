//! Call-recording test doubles for autofake.
//!
//! Fakes registered with an autofake engine are ordinary Rust values. Giving
//! them a [`Mock`] handle lets a test configure what they return and verify
//! how they were called:
//!
//! ```
//! use autofake_mock::Mock;
//!
//! #[derive(Clone, Default)]
//! struct FakeMailer {
//!     send: Mock<bool>,
//! }
//!
//! impl FakeMailer {
//!     fn send(&self) -> bool {
//!         self.send.call("send").unwrap_or(true)
//!     }
//! }
//!
//! let mailer = FakeMailer::default();
//! mailer.send.returns(false);
//! assert!(!mailer.send());
//! assert_eq!(mailer.send.call_count(), 1);
//! ```

mod mock;

pub use mock::{Mock, Spy};
