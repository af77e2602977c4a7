use crate::session::{Session, Step};
use anyhow::{bail, Result};
use colored::Colorize;
use serde::Serialize;
use signup_engine::{
    FieldId, FormConfig, FormSubmission, PendingSubmission, PresenterEvent, RecordingPresenter,
    SignupForm, SubmitAttempt,
};
use std::path::Path;

/// What one step did
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub step: String,
    pub events: Vec<PresenterEvent>,
    pub invalid: Vec<String>,
    pub submit_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<FormSubmission>,
}

/// Run every step through a fresh form, checking after each one that the
/// submit button state matches the set of invalid fields
pub fn run(config: &FormConfig, session: &Session) -> Result<Vec<StepReport>> {
    let mut form = SignupForm::from_config(config, RecordingPresenter::new());
    form.presenter_mut().drain();

    let mut pending: Option<PendingSubmission> = None;
    let mut reports = Vec::with_capacity(session.steps.len());

    for (index, step) in session.steps.iter().enumerate() {
        let mut submitted = None;

        match step {
            Step::Focus { field } => {
                form.focus(field);
            }
            Step::Input { field, value } => {
                form.input(field, value);
            }
            Step::Type { field, text } => {
                type_text(&mut form, field, text, index)?;
            }
            Step::Submit => {
                pending = match form.submit() {
                    SubmitAttempt::Blocked(_) => None,
                    SubmitAttempt::Confirming(p) => Some(p),
                };
            }
            Step::Dismiss => {
                submitted = pending.take().map(PendingSubmission::dismiss);
                if submitted.is_none() {
                    tracing::warn!(step = index + 1, "dismiss without an open confirmation");
                }
            }
            Step::Reset => {
                pending = None;
                form.reset();
            }
        }

        check_gate(&form, index)?;

        let engine = form.engine();
        reports.push(StepReport {
            step: step.to_string(),
            invalid: engine.errors().iter().map(|f| f.to_string()).collect(),
            submit_enabled: engine.submit_enabled(),
            events: form.presenter_mut().drain(),
            submitted,
        });
    }

    Ok(reports)
}

// Feed the growing buffer one keystroke at a time, like a browser input event
fn type_text(
    form: &mut SignupForm<RecordingPresenter>,
    field: &FieldId,
    text: &str,
    index: usize,
) -> Result<()> {
    let mut buffer = form.engine().value(field).to_string();
    for c in text.chars() {
        buffer.push(c);
        buffer = form.input(field, &buffer).value;
        check_gate(form, index)?;
    }
    Ok(())
}

fn check_gate(form: &SignupForm<RecordingPresenter>, index: usize) -> Result<()> {
    let engine = form.engine();
    if engine.errors() != &engine.recompute_errors() {
        bail!("step {}: error set drifted from its recomputation", index + 1);
    }
    if form.presenter().submit_enabled() != Some(engine.errors().is_empty()) {
        bail!("step {}: submit button out of sync with invalid fields", index + 1);
    }
    Ok(())
}

pub fn execute(config: &FormConfig, path: &Path, json: bool) -> Result<()> {
    let session = Session::load(path)?;
    let reports = run(config, &session)?;

    if json {
        for report in &reports {
            println!("{}", serde_json::to_string(report)?);
        }
        return Ok(());
    }

    for (index, report) in reports.iter().enumerate() {
        println!("{} {}", format!("[{}]", index + 1).dimmed(), report.step.bold());
        for event in &report.events {
            print_event(event);
        }
        if let Some(submission) = &report.submitted {
            println!("    {}", "form posted:".green().bold());
            for (field, value) in &submission.fields {
                println!("      {} = {}", field.to_string().cyan(), value);
            }
        }
    }

    if let Some(last) = reports.last() {
        println!();
        if last.submit_enabled {
            println!("{}", "Submit enabled".green());
        } else {
            println!("{} {}", "Submit disabled:".red(), last.invalid.join(", "));
        }
    }

    Ok(())
}

fn print_event(event: &PresenterEvent) {
    match event {
        PresenterEvent::Field { field, message, border } => {
            let line = match message {
                Some(message) => format!("{} {}", field, message).red(),
                None => format!("{} ok", field).green(),
            };
            println!("    {} ({})", line, border);
        }
        PresenterEvent::ClearAll => println!("    {}", "cleared".yellow()),
        PresenterEvent::SubmitEnabled { enabled } => {
            println!("    submit {}", if *enabled { "enabled" } else { "disabled" });
        }
        PresenterEvent::Confirm { title, message } => {
            println!("    {} {} / {}", "confirm:".blue().bold(), title, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_SESSION: &str = r#"
        [[steps]]
        action = "submit"

        [[steps]]
        action = "type"
        field = "nom"
        text = "dupont"

        [[steps]]
        action = "type"
        field = "prenom"
        text = "jean"

        [[steps]]
        action = "type"
        field = "dateNaissance"
        text = "14071989"

        [[steps]]
        action = "input"
        field = "email"
        value = "jean@banque.fr"

        [[steps]]
        action = "input"
        field = "codeConfidentiel"
        value = "FR12345ABCX"

        [[steps]]
        action = "submit"

        [[steps]]
        action = "dismiss"

        [[steps]]
        action = "dismiss"
    "#;

    #[test]
    fn test_full_session() {
        let session = Session::parse(FULL_SESSION).unwrap();
        let reports = run(&FormConfig::default(), &session).unwrap();
        assert_eq!(reports.len(), 9);

        // Empty submit touches everything
        assert_eq!(reports[0].invalid.len(), 5);
        assert!(!reports[0].submit_enabled);

        assert_eq!(reports[3].invalid, vec!["email", "codeConfidentiel"]);

        let submit = &reports[6];
        assert!(submit.submit_enabled);
        assert!(submit
            .events
            .iter()
            .any(|e| matches!(e, PresenterEvent::Confirm { .. })));

        let posted = reports[7].submitted.as_ref().unwrap();
        assert_eq!(posted.get(&FieldId::Nom), Some("DUPONT"));
        assert_eq!(posted.get(&FieldId::DateNaissance), Some("14/07/1989"));

        // The dialog only posts once
        assert!(reports[8].submitted.is_none());
    }

    #[test]
    fn test_reset_drops_pending_confirmation() {
        let session = Session::parse(
            r#"
            [[steps]]
            action = "input"
            field = "nom"
            value = "x"

            [[steps]]
            action = "reset"

            [[steps]]
            action = "dismiss"
            "#,
        )
        .unwrap();
        let reports = run(&FormConfig::default(), &session).unwrap();
        assert_eq!(reports[0].invalid, vec!["nom"]);
        assert!(reports[1].invalid.is_empty());
        assert!(reports[1].events.contains(&PresenterEvent::ClearAll));
        assert!(reports[2].submitted.is_none());
    }
}
