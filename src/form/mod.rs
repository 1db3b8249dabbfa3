//! Form controller layer
//!
//! Holds field values for the active schema, runs validation, and drives the
//! single submission slot through `Editing`, `Submitting`, `Succeeded` and
//! `Failed`.

mod controller;
mod presentation;
mod submission;
mod values;

pub use controller::{FormController, FormError, FormSnapshot};
pub use presentation::FormCopy;
pub use submission::{AuthOutcome, NextStep, SubmissionError, SubmissionState, SubmitOutcome};
pub use values::{FormValues, ValidationResult};
