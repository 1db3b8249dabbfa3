//! Process-local identity service
//!
//! Keeps accounts in memory for the console front-end and tests. Nothing is
//! persisted; dropping the service forgets every account.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::IdentityService;
use super::types::{
    AccountIdentity, AuthError, Credentials, RegistrationError, SessionIdentity, SignUpProfile,
};

struct StoredAccount {
    identity: AccountIdentity,
    password: String,
}

/// Identity service backed by a map keyed on normalized email
pub struct InMemoryIdentityService {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    available: AtomicBool,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate an outage (`false`) or recovery (`true`)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Number of registered accounts
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl Default for InMemoryIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn authenticate(&self, credentials: &Credentials) -> Result<SessionIdentity, AuthError> {
        if !self.is_available() {
            return Err(AuthError::ServiceUnavailable);
        }

        let accounts = self.accounts.read().await;
        match accounts.get(&normalize_email(&credentials.email)) {
            Some(account) if account.password == credentials.password => {
                tracing::debug!(user_id = %account.identity.id, "session opened");
                Ok(SessionIdentity {
                    id: account.identity.id.clone(),
                    email: account.identity.email.clone(),
                })
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn register(
        &self,
        profile: &SignUpProfile,
    ) -> Result<AccountIdentity, RegistrationError> {
        if !self.is_available() {
            return Err(RegistrationError::ServiceUnavailable);
        }

        let birth_date = profile
            .birth_date()
            .ok_or_else(|| RegistrationError::InvalidProfile("unreadable date of birth".into()))?;
        if birth_date > Utc::now().date_naive() {
            return Err(RegistrationError::InvalidProfile(
                "date of birth is in the future".into(),
            ));
        }

        let key = normalize_email(&profile.email);
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(RegistrationError::DuplicateAccount);
        }

        let identity = AccountIdentity {
            id: Uuid::new_v4().to_string(),
            email: key.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
        };
        accounts.insert(
            key,
            StoredAccount {
                identity: identity.clone(),
                password: profile.password.clone(),
            },
        );
        tracing::debug!(user_id = %identity.id, "account registered");
        Ok(identity)
    }
}
