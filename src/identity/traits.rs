//! Trait abstraction for the identity service to enable mocking in tests

use async_trait::async_trait;

use super::types::{
    AccountIdentity, AuthError, Credentials, RegistrationError, SessionIdentity, SignUpProfile,
};

/// Operations the auth form delegates to the identity service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verify credentials and open a session
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError>;

    /// Create a new account from a complete sign-up profile
    async fn register(&self, profile: &SignUpProfile) -> Result<AccountIdentity, RegistrationError>;
}
