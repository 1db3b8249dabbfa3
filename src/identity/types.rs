//! Payloads exchanged with the identity service

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO date format used for the date of birth field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const REDACTED: &str = "<redacted>";

/// Email/password pair sent on sign-in
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Every field collected by the sign-up form
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpProfile {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub ssn: String,
    pub email: String,
    pub password: String,
}

impl SignUpProfile {
    /// Parsed date of birth, `None` if the stored text is not a calendar date
    pub fn birth_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date_of_birth, DATE_FORMAT).ok()
    }

    /// The credentials this profile will sign in with
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

impl fmt::Debug for SignUpProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpProfile")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("address1", &self.address1)
            .field("city", &self.city)
            .field("state", &self.state)
            .field("postal_code", &self.postal_code)
            .field("date_of_birth", &self.date_of_birth)
            .field("ssn", &REDACTED)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Signed-in user returned by `authenticate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: String,
    pub email: String,
}

/// Newly created account returned by `register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Failures reported by `authenticate`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("service unavailable, please try again later")]
    ServiceUnavailable,
}

/// Failures reported by `register`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("service unavailable, please try again later")]
    ServiceUnavailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile() -> SignUpProfile {
        SignUpProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address1: "12 St James's Square".to_string(),
            city: "London".to_string(),
            state: "LN".to_string(),
            postal_code: "11101".to_string(),
            date_of_birth: "1990-12-10".to_string(),
            ssn: "1234".to_string(),
            email: "ada@example.com".to_string(),
            password: "analytical".to_string(),
        }
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("a@b.com", "hunter22");
        let debug_str = format!("{credentials:?}");
        assert!(debug_str.contains("a@b.com"));
        assert!(!debug_str.contains("hunter22"));
    }

    #[test]
    fn test_profile_debug_hides_secrets() {
        let debug_str = format!("{:?}", create_test_profile());
        assert!(debug_str.contains("Lovelace"));
        assert!(!debug_str.contains("analytical"));
        assert!(!debug_str.contains("1234"));
    }

    #[test]
    fn test_profile_birth_date() {
        let mut profile = create_test_profile();
        assert_eq!(profile.birth_date(), NaiveDate::from_ymd_opt(1990, 12, 10));
        profile.date_of_birth = "10/12/1990".to_string();
        assert!(profile.birth_date().is_none());
    }

    #[test]
    fn test_profile_credentials() {
        let credentials = create_test_profile().credentials();
        assert_eq!(credentials, Credentials::new("ada@example.com", "analytical"));
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(create_test_profile()).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["postalCode"], "11101");
        assert_eq!(json["dateOfBirth"], "1990-12-10");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
        assert_eq!(
            RegistrationError::InvalidProfile("bad date".to_string()).to_string(),
            "invalid profile: bad date"
        );
    }
}
