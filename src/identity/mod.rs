//! Identity service collaborator
//!
//! The form core never talks to a backend directly. It calls through the
//! [`IdentityService`] trait; production wiring supplies a real client and
//! the console front-end and tests use [`InMemoryIdentityService`].

mod memory;
mod traits;
mod types;

pub use memory::InMemoryIdentityService;
pub use traits::IdentityService;
pub use types::{
    AccountIdentity, AuthError, Credentials, RegistrationError, SessionIdentity, SignUpProfile,
    DATE_FORMAT,
};

#[cfg(test)]
pub use traits::MockIdentityService;
