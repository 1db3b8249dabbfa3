//! Submission lifecycle

use serde::Serialize;
use thiserror::Error;

use crate::identity::{
    AccountIdentity, AuthError, Credentials, IdentityService, RegistrationError, SessionIdentity,
    SignUpProfile,
};

/// What a successful submission produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "identity", rename_all = "snake_case")]
pub enum AuthOutcome {
    SignedIn(SessionIdentity),
    Registered(AccountIdentity),
}

/// Where the caller should take the user after success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    Dashboard,
    LinkBankAccount,
}

impl AuthOutcome {
    pub fn next_step(&self) -> NextStep {
        match self {
            Self::SignedIn(_) => NextStep::Dashboard,
            Self::Registered(_) => NextStep::LinkBankAccount,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::SignedIn(session) => &session.id,
            Self::Registered(account) => &account.id,
        }
    }
}

/// Lifecycle of the form's one submission slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Editing,
    Submitting,
    Succeeded(AuthOutcome),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn outcome(&self) -> Option<&AuthOutcome> {
        match self {
            Self::Succeeded(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result of calling `submit()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the identity call is in flight
    Started,
    /// At least one field failed; see the validation result
    Invalid,
    /// A submission is already in flight; nothing was done
    AlreadySubmitting,
    /// The identity call could not be started; the form is now `Failed`
    Failed,
}

/// Why a submission ended in `Failed`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error("something went wrong, please try again")]
    Unexpected,
}

/// The single identity call a submission makes
#[derive(Debug, Clone)]
pub(crate) enum IdentityRequest {
    Authenticate(Credentials),
    Register(SignUpProfile),
}

impl IdentityRequest {
    pub(crate) fn operation(&self) -> &'static str {
        match self {
            Self::Authenticate(_) => "authenticate",
            Self::Register(_) => "register",
        }
    }

    pub(crate) async fn send(
        self,
        service: &dyn IdentityService,
    ) -> Result<AuthOutcome, SubmissionError> {
        match self {
            Self::Authenticate(credentials) => service
                .authenticate(&credentials)
                .await
                .map(AuthOutcome::SignedIn)
                .map_err(SubmissionError::from),
            Self::Register(profile) => service
                .register(&profile)
                .await
                .map(AuthOutcome::Registered)
                .map_err(SubmissionError::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_session() -> SessionIdentity {
        SessionIdentity {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_default_is_editing() {
        assert_eq!(SubmissionState::default(), SubmissionState::Editing);
    }

    #[test]
    fn test_accessors() {
        let succeeded = SubmissionState::Succeeded(AuthOutcome::SignedIn(create_test_session()));
        assert_eq!(succeeded.outcome().map(AuthOutcome::user_id), Some("u1"));
        assert!(succeeded.error_message().is_none());

        let failed = SubmissionState::Failed("invalid credentials".to_string());
        assert_eq!(failed.error_message(), Some("invalid credentials"));
        assert!(failed.outcome().is_none());
        assert!(!failed.is_submitting());
        assert!(SubmissionState::Submitting.is_submitting());
    }

    #[test]
    fn test_next_step() {
        let signed_in = AuthOutcome::SignedIn(create_test_session());
        assert_eq!(signed_in.next_step(), NextStep::Dashboard);

        let registered = AuthOutcome::Registered(AccountIdentity {
            id: "u2".to_string(),
            email: "new@b.com".to_string(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
        });
        assert_eq!(registered.next_step(), NextStep::LinkBankAccount);
    }

    #[test]
    fn test_error_messages_pass_through() {
        assert_eq!(
            SubmissionError::from(AuthError::InvalidCredentials).to_string(),
            "invalid credentials"
        );
        assert_eq!(
            SubmissionError::from(RegistrationError::DuplicateAccount).to_string(),
            "an account with this email already exists"
        );
        assert_eq!(
            SubmissionError::Unexpected.to_string(),
            "something went wrong, please try again"
        );
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_value(SubmissionState::Failed("nope".to_string())).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["detail"], "nope");

        let json = serde_json::to_value(SubmissionState::Editing).unwrap();
        assert_eq!(json["state"], "editing");
    }
}
