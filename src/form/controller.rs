//! Auth form controller
//!
//! Owns the values, validation result and submission state of one form
//! instance. All transitions happen on the caller's task: edits and submits
//! are synchronous, and the result of the identity call is applied when the
//! caller awaits [`FormController::settle`]. The identity call itself runs
//! on a task spawned on the current Tokio runtime; without one, `submit`
//! fails the form instead of starting the call.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::presentation::FormCopy;
use super::submission::{
    AuthOutcome, IdentityRequest, SubmissionError, SubmissionState, SubmitOutcome,
};
use super::values::{FormValues, ValidationResult};
use crate::identity::{Credentials, IdentityService, SignUpProfile};
use crate::schema::{names, resolve_with, FormMode, FormSchema, SchemaRules};

/// Caller defects when driving the controller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field '{name}' is not part of the {mode} form")]
    UnknownField { name: String, mode: FormMode },
}

type PendingSubmission = JoinHandle<Result<AuthOutcome, SubmissionError>>;

/// Read-only view of the form for the presentation layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormSnapshot<'a> {
    pub mode: FormMode,
    pub schema: &'a FormSchema,
    pub values: &'a FormValues,
    pub validation: &'a ValidationResult,
    pub submission: &'a SubmissionState,
}

impl FormSnapshot<'_> {
    pub fn copy(&self) -> FormCopy {
        FormCopy::for_state(self.mode, self.submission)
    }
}

/// State machine behind the sign-in/sign-up form
pub struct FormController {
    rules: SchemaRules,
    schema: FormSchema,
    values: FormValues,
    validation: ValidationResult,
    submission: SubmissionState,
    pending: Option<PendingSubmission>,
    service: Arc<dyn IdentityService>,
}

impl FormController {
    pub fn new(mode: FormMode, service: Arc<dyn IdentityService>) -> Self {
        Self::with_rules(mode, SchemaRules::default(), service)
    }

    pub fn with_rules(
        mode: FormMode,
        rules: SchemaRules,
        service: Arc<dyn IdentityService>,
    ) -> Self {
        let schema = resolve_with(mode, &rules);
        let values = FormValues::for_schema(&schema);
        Self {
            rules,
            schema,
            values,
            validation: ValidationResult::default(),
            submission: SubmissionState::Editing,
            pending: None,
            service,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.schema.mode()
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn snapshot(&self) -> FormSnapshot<'_> {
        FormSnapshot {
            mode: self.mode(),
            schema: &self.schema,
            values: &self.values,
            validation: &self.validation,
            submission: &self.submission,
        }
    }

    /// Switch flows, discarding values and detaching any in-flight call
    pub fn set_mode(&mut self, mode: FormMode) {
        if mode == self.mode() {
            return;
        }
        if self.pending.take().is_some() {
            tracing::warn!(
                from = %self.mode(),
                to = %mode,
                "mode changed mid-submission, result will be ignored"
            );
        }
        tracing::debug!(from = %self.mode(), to = %mode, "switching form mode");

        self.schema = resolve_with(mode, &self.rules);
        self.values = FormValues::for_schema(&self.schema);
        self.validation = ValidationResult::default();
        self.submission = SubmissionState::Editing;
    }

    /// Record an edit
    ///
    /// A field that currently shows an error has it cleared as soon as the new
    /// value passes. Edits never add errors; that is left to `submit` and
    /// `validate_field`.
    pub fn set_field_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let field = self.schema.field(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
            mode: self.schema.mode(),
        })?;

        self.values.set(field.name, value.into());

        if self.validation.error(field.name).is_some()
            && field.validate(self.values.text(field.name)).is_none()
        {
            tracing::debug!(field = field.name, "stale error cleared");
            self.validation = self.validation.with_field(field.name, None);
        }
        Ok(())
    }

    /// Validate one field on demand and record the outcome
    pub fn validate_field(&mut self, name: &str) -> Result<Option<&'static str>, FormError> {
        let field = self.schema.field(name).ok_or_else(|| FormError::UnknownField {
            name: name.to_string(),
            mode: self.schema.mode(),
        })?;

        let message = field.validate(self.values.text(field.name));
        self.validation = self.validation.with_field(field.name, message);
        Ok(message)
    }

    /// Validate every field and, if all pass, start the identity call
    ///
    /// While a call is in flight this is a no-op returning
    /// [`SubmitOutcome::AlreadySubmitting`]. Outside a Tokio runtime the call
    /// cannot be started and the form moves to `Failed`.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.submission.is_submitting() {
            tracing::debug!("submit ignored, submission already in flight");
            return SubmitOutcome::AlreadySubmitting;
        }

        self.validation = ValidationResult::of(&self.schema, &self.values);
        if !self.validation.is_valid() {
            tracing::debug!(
                mode = %self.mode(),
                invalid_fields = self.validation.len(),
                "submit blocked by validation"
            );
            return SubmitOutcome::Invalid;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!(mode = %self.mode(), error = %err, "no runtime to submit on");
                self.submission = SubmissionState::Failed(SubmissionError::Unexpected.to_string());
                return SubmitOutcome::Failed;
            }
        };

        let request = self.request();
        tracing::info!(mode = %self.mode(), operation = request.operation(), "submitting");

        let service = Arc::clone(&self.service);
        self.pending = Some(runtime.spawn(async move {
            request.send(service.as_ref()).await
        }));
        self.submission = SubmissionState::Submitting;
        SubmitOutcome::Started
    }

    /// Whether an identity call is waiting to be applied
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the in-flight call and apply its result
    ///
    /// Returns the new state, or `None` when nothing was in flight. Dropping
    /// the returned future before completion leaves the call pending.
    pub async fn settle(&mut self) -> Option<&SubmissionState> {
        let handle = self.pending.as_mut()?;
        let joined = handle.await;
        self.pending = None;

        let result = joined.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "identity call did not complete");
            Err(SubmissionError::Unexpected)
        });

        self.submission = match result {
            Ok(outcome) => {
                tracing::info!(
                    mode = %self.mode(),
                    user_id = outcome.user_id(),
                    "submission succeeded"
                );
                SubmissionState::Succeeded(outcome)
            }
            Err(err) => {
                tracing::warn!(mode = %self.mode(), error = %err, "submission failed");
                SubmissionState::Failed(err.to_string())
            }
        };
        Some(&self.submission)
    }

    fn request(&self) -> IdentityRequest {
        let text = |name: &str| self.values.text(name).trim().to_string();
        let password = self.values.text(names::PASSWORD).to_string();

        match self.mode() {
            FormMode::SignIn => {
                IdentityRequest::Authenticate(Credentials::new(text(names::EMAIL), password))
            }
            FormMode::SignUp => IdentityRequest::Register(SignUpProfile {
                first_name: text(names::FIRST_NAME),
                last_name: text(names::LAST_NAME),
                address1: text(names::ADDRESS1),
                city: text(names::CITY),
                state: text(names::STATE),
                postal_code: text(names::POSTAL_CODE),
                date_of_birth: text(names::DATE_OF_BIRTH),
                ssn: text(names::SSN),
                email: text(names::EMAIL),
                password,
            }),
        }
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        if self.pending.is_some() {
            tracing::debug!(
                mode = %self.mode(),
                "form discarded mid-submission, result will be ignored"
            );
        }
    }
}
