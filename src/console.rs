//! Line-oriented console front-end
//!
//! Reads one command per line, applies it to a [`FormController`] and prints
//! the resulting snapshot. Meant for manual testing of the form flow without
//! the web dashboard.

use std::io::Write;
use std::str::FromStr;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::form::{FormController, FormSnapshot, NextStep, SubmitOutcome};
use crate::schema::FormMode;

const HELP: &str = "\
commands:
  set <field> <value>   edit a field (omit the value to clear it)
  submit                validate and submit the form
  mode <sign-in|sign-up>
  show                  print the form
  help                  print this message
  quit";

/// One console instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, value: String },
    Submit,
    Mode(FormMode),
    Show,
    Help,
    Quit,
}

impl Command {
    /// Command name without arguments, safe to log
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Set { .. } => "set",
            Self::Submit => "submit",
            Self::Mode(_) => "mode",
            Self::Show => "show",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim_start();

        let command = match verb {
            "set" => {
                let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
                if field.is_empty() {
                    bail!("usage: set <field> <value>");
                }
                Self::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "submit" => Self::Submit,
            "mode" => Self::Mode(rest.parse()?),
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{other}', type 'help'"),
        };
        Ok(command)
    }
}

/// Drive `controller` from `input` until EOF or `quit`
pub async fn run<R, W>(mut controller: FormController, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    render(&controller.snapshot(), out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };
        tracing::debug!(command = command.verb(), "console command");

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Show => {}
            Command::Mode(mode) => controller.set_mode(mode),
            Command::Set { field, value } => {
                if let Err(err) = controller.set_field_value(&field, value) {
                    writeln!(out, "error: {err}")?;
                    continue;
                }
            }
            Command::Submit => match controller.submit() {
                SubmitOutcome::Started => {
                    controller.settle().await;
                }
                SubmitOutcome::Invalid => writeln!(out, "please fix the marked fields")?,
                SubmitOutcome::AlreadySubmitting => writeln!(out, "already submitting")?,
                SubmitOutcome::Failed => {}
            },
        }

        render(&controller.snapshot(), out)?;
    }
    Ok(())
}

/// Print a snapshot as plain text
pub fn render<W: Write>(snapshot: &FormSnapshot<'_>, out: &mut W) -> std::io::Result<()> {
    let copy = snapshot.copy();
    writeln!(out, "== {} ==", copy.title)?;
    writeln!(out, "{}", copy.subtitle)?;

    for field in snapshot.schema.fields() {
        let value = snapshot.values.text(field.name);
        let shown = if field.input_kind.is_secret() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        write!(out, "  {} [{}]: {}", field.label, field.name, shown)?;
        if let Some(message) = snapshot.validation.error(field.name) {
            write!(out, "  ! {message}")?;
        }
        writeln!(out)?;
    }

    match snapshot.submission.error_message() {
        Some(message) => writeln!(out, "status: {} ({message})", snapshot.submission.label())?,
        None => writeln!(out, "status: {}", snapshot.submission.label())?,
    }

    if let Some(outcome) = snapshot.submission.outcome() {
        let next = match outcome.next_step() {
            NextStep::Dashboard => "dashboard",
            NextStep::LinkBankAccount => "link bank account",
        };
        writeln!(out, "next: {next} (user {})", outcome.user_id())?;
    }

    writeln!(
        out,
        "[ {} ]  {} {} (mode {})",
        copy.submit_label, copy.footer_prompt, copy.footer_link, copy.footer_target
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InMemoryIdentityService;
    use std::sync::Arc;

    async fn run_script(mode: FormMode, script: &str) -> String {
        let controller = FormController::new(mode, Arc::new(InMemoryIdentityService::new()));
        let mut out = Vec::new();
        run(controller, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    mod parse {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_set_keeps_spaces_in_value() {
            assert_eq!(
                "set address1 Jl. Sudirman 1".parse::<Command>().unwrap(),
                Command::Set {
                    field: "address1".to_string(),
                    value: "Jl. Sudirman 1".to_string(),
                }
            );
        }

        #[test]
        fn test_set_without_value_clears() {
            assert_eq!(
                "set email".parse::<Command>().unwrap(),
                Command::Set {
                    field: "email".to_string(),
                    value: String::new(),
                }
            );
        }

        #[test]
        fn test_set_requires_field() {
            assert!("set".parse::<Command>().is_err());
        }

        #[test]
        fn test_simple_commands() {
            assert_eq!("submit".parse::<Command>().unwrap(), Command::Submit);
            assert_eq!("show".parse::<Command>().unwrap(), Command::Show);
            assert_eq!("?".parse::<Command>().unwrap(), Command::Help);
            assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
        }

        #[test]
        fn test_mode() {
            assert_eq!(
                "mode sign-up".parse::<Command>().unwrap(),
                Command::Mode(FormMode::SignUp)
            );
            let err = "mode sign-out".parse::<Command>().unwrap_err();
            assert!(err.to_string().contains("unknown form mode"));
        }

        #[test]
        fn test_unknown_command() {
            let err = "dance".parse::<Command>().unwrap_err();
            assert_eq!(err.to_string(), "unknown command 'dance', type 'help'");
        }
    }

    mod session {
        use super::*;

        #[tokio::test]
        async fn test_initial_render() {
            let output = run_script(FormMode::SignIn, "").await;
            assert!(output.contains("== Sign In =="));
            assert!(output.contains("Email [email]: "));
            assert!(output.contains("status: editing"));
            assert!(output.contains("Don't have an account? Sign Up (mode sign-up)"));
        }

        #[tokio::test]
        async fn test_invalid_submit_marks_fields() {
            let output = run_script(FormMode::SignIn, "set password secret1\nsubmit\n").await;
            assert!(output.contains("please fix the marked fields"));
            assert!(output.contains("Email [email]:   ! required"));
            assert!(output.contains("Password [password]: *******"));
            assert!(!output.contains("secret1"));
        }

        #[tokio::test]
        async fn test_unknown_account_fails() {
            let output = run_script(
                FormMode::SignIn,
                "set email a@b.com\nset password secret1\nsubmit\n",
            )
            .await;
            assert!(output.contains("status: failed (invalid credentials)"));
        }

        #[tokio::test]
        async fn test_sign_up_then_sign_in() {
            let script = "\
set firstName Siti
set lastName Rahma
set address1 Jl. Sudirman 1
set city Jakarta
set state JK
set postalCode 10220
set dateOfBirth 1994-03-17
set ssn 1234
set email siti@example.com
set password correct-horse
submit
mode sign-in
set email siti@example.com
set password correct-horse
submit
quit
set email ignored@example.com
";
            let output = run_script(FormMode::SignUp, script).await;
            assert!(output.contains("== Link Account =="));
            assert!(output.contains("next: link bank account"));
            assert!(output.contains("next: dashboard"));
            assert!(!output.contains("ignored@example.com"));
        }

        #[tokio::test]
        async fn test_errors_do_not_stop_session() {
            let output = run_script(FormMode::SignIn, "set ssn 1234\nfly\nhelp\n").await;
            assert!(output.contains("error: field 'ssn' is not part of the sign-in form"));
            assert!(output.contains("error: unknown command 'fly'"));
            assert!(output.contains("commands:"));
        }
    }
}
