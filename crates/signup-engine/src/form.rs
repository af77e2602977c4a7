// File: signup-engine/src/form.rs
// Purpose: Drive the presenter from engine state and run the submit/confirm flow

use crate::config::FormConfig;
use crate::engine::{ErrorSet, FieldOutcome, RuleEngine};
use crate::field::{FieldId, ValidationResult};
use crate::presenter::{FieldFeedback, Presenter};
use crate::rules::FieldRules;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The two lines of the confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationText {
    pub title: String,
    pub message: String,
}

impl From<&FormConfig> for ConfirmationText {
    fn from(config: &FormConfig) -> Self {
        Self {
            title: config.confirmation.title.clone(),
            message: config.confirmation.message.clone(),
        }
    }
}

/// Values posted once the confirmation dialog is dismissed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub fields: BTreeMap<FieldId, String>,
}

impl FormSubmission {
    pub fn get(&self, field: &FieldId) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// A valid submission waiting for the confirmation dialog to close.
///
/// Dismissing consumes the token, so a submit attempt posts the form at most once.
#[derive(Debug)]
#[must_use = "the form is only posted once the pending submission is dismissed"]
pub struct PendingSubmission {
    submission: FormSubmission,
}

impl PendingSubmission {
    /// Values that will be posted
    pub fn preview(&self) -> &FormSubmission {
        &self.submission
    }

    /// The dialog was closed: hand over the values to post
    pub fn dismiss(self) -> FormSubmission {
        info!(fields = self.submission.fields.len(), "confirmation dismissed, submitting");
        self.submission
    }
}

/// Outcome of pressing the submit button
#[derive(Debug)]
pub enum SubmitAttempt {
    /// At least one field is invalid; nothing is posted
    Blocked(ErrorSet),
    /// Every field is valid and the confirmation dialog is showing
    Confirming(PendingSubmission),
}

impl SubmitAttempt {
    pub fn is_blocked(&self) -> bool {
        matches!(self, SubmitAttempt::Blocked(_))
    }

    pub fn pending(self) -> Option<PendingSubmission> {
        match self {
            SubmitAttempt::Blocked(_) => None,
            SubmitAttempt::Confirming(pending) => Some(pending),
        }
    }
}

/// One signup form: a [`RuleEngine`] plus the presenter reflecting it.
///
/// Every operation leaves the submit gate equal to "no invalid field".
pub struct SignupForm<P: Presenter> {
    engine: RuleEngine,
    presenter: P,
    confirmation: ConfirmationText,
}

impl<P: Presenter> SignupForm<P> {
    /// Build a form and push the initial (enabled) submit state
    pub fn new(engine: RuleEngine, presenter: P, confirmation: ConfirmationText) -> Self {
        let mut form = Self {
            engine,
            presenter,
            confirmation,
        };
        form.sync_submit_gate();
        form
    }

    pub fn from_config(config: &FormConfig, presenter: P) -> Self {
        Self::new(
            RuleEngine::new(FieldRules::from_config(config)),
            presenter,
            ConfirmationText::from(config),
        )
    }

    /// Focus event
    pub fn focus(&mut self, field: &FieldId) -> ValidationResult {
        let result = self.engine.on_focus(field);
        self.present(field, &result);
        self.sync_submit_gate();
        result
    }

    /// Input event: the returned value should be written back into the control
    pub fn input(&mut self, field: &FieldId, raw: &str) -> FieldOutcome {
        let outcome = self.engine.on_value_changed(field, raw);
        self.present(field, &outcome.result);
        self.sync_submit_gate();
        outcome
    }

    /// Submit button: validate everything, then either block or ask for confirmation
    pub fn submit(&mut self) -> SubmitAttempt {
        let errors = self.engine.validate_all();

        let fields: Vec<FieldId> = self.engine.fields().cloned().collect();
        for field in &fields {
            let result = self.engine.result(field);
            self.present(field, &result);
        }
        self.sync_submit_gate();

        if !errors.is_empty() {
            let invalid: Vec<&str> = errors.iter().map(FieldId::as_str).collect();
            info!(?invalid, "submit blocked");
            return SubmitAttempt::Blocked(errors);
        }

        info!("form valid, asking for confirmation");
        self.presenter
            .confirm(&self.confirmation.title, &self.confirmation.message);

        SubmitAttempt::Confirming(PendingSubmission {
            submission: FormSubmission {
                fields: self.engine.values().clone(),
            },
        })
    }

    /// Reset button: clear values, interaction state, errors and visual state
    pub fn reset(&mut self) {
        self.engine.reset();
        self.presenter.clear_all();
        self.sync_submit_gate();
        info!("form reset");
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // Untouched fields get no feedback at all
    fn present(&mut self, field: &FieldId, result: &ValidationResult) {
        if !self.engine.is_touched(field) {
            return;
        }
        self.presenter.show_field(field, &FieldFeedback::from(result));
    }

    fn sync_submit_gate(&mut self) {
        let enabled = self.engine.submit_enabled();
        debug!(enabled, "submit gate");
        self.presenter.set_submit_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{Border, PresenterEvent, RecordingPresenter};

    fn form() -> SignupForm<RecordingPresenter> {
        SignupForm::from_config(&FormConfig::default(), RecordingPresenter::new())
    }

    #[test]
    fn test_new_form_enables_submit() {
        let form = form();
        assert_eq!(form.presenter().submit_enabled(), Some(true));
    }

    #[test]
    fn test_input_pushes_feedback_and_gate() {
        let mut form = form();
        let outcome = form.input(&FieldId::Email, "a@b");
        assert!(outcome.result.is_invalid());
        assert_eq!(form.presenter().submit_enabled(), Some(false));
        assert_eq!(
            form.presenter().feedback_for(&FieldId::Email),
            Some(FieldFeedback {
                message: Some("Adresse email invalide".to_string()),
                border: Border::Invalid,
            })
        );

        form.input(&FieldId::Email, "a@b.c");
        assert_eq!(form.presenter().submit_enabled(), Some(true));
        assert_eq!(
            form.presenter().feedback_for(&FieldId::Email).map(|f| f.border),
            Some(Border::Valid)
        );
    }

    #[test]
    fn test_submit_blocked_shows_every_error() {
        let mut form = form();
        let attempt = form.submit();
        match attempt {
            SubmitAttempt::Blocked(errors) => assert_eq!(errors.len(), 5),
            SubmitAttempt::Confirming(_) => panic!("empty form must not submit"),
        }
        for field in FieldId::KNOWN {
            assert_eq!(
                form.presenter().feedback_for(&field).map(|f| f.border),
                Some(Border::Invalid)
            );
        }
        assert_eq!(form.presenter().confirmations(), 0);
    }

    #[test]
    fn test_reset_clears_presentation() {
        let mut form = form();
        form.input(&FieldId::Nom, "x");
        form.reset();
        let events = form.presenter().events();
        assert_eq!(
            &events[events.len() - 2..],
            &[
                PresenterEvent::ClearAll,
                PresenterEvent::SubmitEnabled { enabled: true }
            ]
        );
        assert!(form.engine().errors().is_empty());
    }
}
