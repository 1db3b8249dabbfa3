//! Copy derived from mode and submission state

use serde::Serialize;

use super::submission::{AuthOutcome, SubmissionState};
use crate::schema::FormMode;

/// Header, button and footer text for the current form state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub footer_prompt: &'static str,
    pub footer_link: &'static str,
    /// Route slug the footer link switches to
    pub footer_target: FormMode,
}

impl FormCopy {
    pub fn for_state(mode: FormMode, submission: &SubmissionState) -> Self {
        let registered = matches!(submission.outcome(), Some(AuthOutcome::Registered(_)));

        let (title, subtitle) = if registered {
            ("Link Account", "Link your account to get started")
        } else {
            (mode_title(mode), "Please enter your details")
        };

        let submit_label = if submission.is_submitting() {
            "Loading..."
        } else {
            mode_title(mode)
        };

        let footer_prompt = match mode {
            FormMode::SignIn => "Don't have an account?",
            FormMode::SignUp => "Already have an account?",
        };

        Self {
            title,
            subtitle,
            submit_label,
            submit_enabled: !submission.is_submitting(),
            footer_prompt,
            footer_link: mode_title(mode.toggled()),
            footer_target: mode.toggled(),
        }
    }
}

fn mode_title(mode: FormMode) -> &'static str {
    match mode {
        FormMode::SignIn => "Sign In",
        FormMode::SignUp => "Sign Up",
    }
}
