//! NexusOnyx auth form core
//!
//! Schema-driven sign-in/sign-up form for the NexusOnyx banking dashboard:
//! a pure schema resolver, a form controller that validates and submits,
//! and the identity-service contract it submits through.

pub mod config;
pub mod console;
pub mod form;
pub mod identity;
pub mod schema;

pub use form::{
    AuthOutcome, FormController, FormError, FormSnapshot, NextStep, SubmissionState, SubmitOutcome,
    ValidationResult,
};
pub use identity::{IdentityService, InMemoryIdentityService};
pub use schema::{resolve, FormMode, FormSchema, SchemaError};
