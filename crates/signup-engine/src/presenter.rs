// File: signup-engine/src/presenter.rs
// Purpose: Collaborators that display form state (inline errors, submit button, dialog)

use crate::field::{FieldId, ValidationResult};
use serde::Serialize;

/// Color of a field's outline. The neutral default is restored by
/// [`ErrorPresenter::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Border {
    /// Red
    Invalid,
    /// Green
    Valid,
}

impl Border {
    pub fn css_color(self) -> &'static str {
        match self {
            Border::Invalid => "red",
            Border::Valid => "green",
        }
    }
}

impl std::fmt::Display for Border {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Border::Invalid => write!(f, "invalid"),
            Border::Valid => write!(f, "valid"),
        }
    }
}

/// What to show next to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldFeedback {
    pub message: Option<String>,
    pub border: Border,
}

impl From<&ValidationResult> for FieldFeedback {
    fn from(result: &ValidationResult) -> Self {
        match result {
            ValidationResult::Valid => FieldFeedback {
                message: None,
                border: Border::Valid,
            },
            ValidationResult::Invalid(message) => FieldFeedback {
                message: Some(message.clone()),
                border: Border::Invalid,
            },
        }
    }
}

/// Displays or clears inline messages and recolors field outlines
pub trait ErrorPresenter {
    fn show_field(&mut self, field: &FieldId, feedback: &FieldFeedback);

    /// Drop every message and return outlines to their neutral color (form reset)
    fn clear_all(&mut self);
}

/// Enables or disables the submit control
pub trait SubmitGate {
    fn set_submit_enabled(&mut self, enabled: bool);
}

/// Shows the confirmation dialog before the form is posted
pub trait ConfirmationPrompt {
    fn confirm(&mut self, title: &str, message: &str);
}

/// Everything a [`SignupForm`](crate::SignupForm) talks to
pub trait Presenter: ErrorPresenter + SubmitGate + ConfirmationPrompt {}

impl<T: ErrorPresenter + SubmitGate + ConfirmationPrompt> Presenter for T {}

/// One call made on a presenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresenterEvent {
    Field {
        field: FieldId,
        message: Option<String>,
        border: Border,
    },
    ClearAll,
    SubmitEnabled {
        enabled: bool,
    },
    Confirm {
        title: String,
        message: String,
    },
}

/// Presenter that records every call, for tests and scripted replays
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
    submit_enabled: Option<bool>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Hand over the events recorded so far and start a fresh log
    pub fn drain(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }

    /// Last state pushed to the submit gate, if any. Survives [`drain`](Self::drain).
    pub fn submit_enabled(&self) -> Option<bool> {
        self.submit_enabled
    }

    /// Feedback displayed for a field according to the events since the last drain
    pub fn feedback_for(&self, field: &FieldId) -> Option<FieldFeedback> {
        for event in self.events.iter().rev() {
            match event {
                PresenterEvent::Field { field: f, message, border } if f == field => {
                    return Some(FieldFeedback {
                        message: message.clone(),
                        border: *border,
                    });
                }
                PresenterEvent::ClearAll => return None,
                _ => {}
            }
        }
        None
    }

    pub fn confirmations(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Confirm { .. }))
            .count()
    }
}

impl ErrorPresenter for RecordingPresenter {
    fn show_field(&mut self, field: &FieldId, feedback: &FieldFeedback) {
        self.events.push(PresenterEvent::Field {
            field: field.clone(),
            message: feedback.message.clone(),
            border: feedback.border,
        });
    }

    fn clear_all(&mut self) {
        self.events.push(PresenterEvent::ClearAll);
    }
}

impl SubmitGate for RecordingPresenter {
    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = Some(enabled);
        self.events.push(PresenterEvent::SubmitEnabled { enabled });
    }
}

impl ConfirmationPrompt for RecordingPresenter {
    fn confirm(&mut self, title: &str, message: &str) {
        self.events.push(PresenterEvent::Confirm {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_from_result() {
        let feedback = FieldFeedback::from(&ValidationResult::Invalid("Date invalide".into()));
        assert_eq!(feedback.border, Border::Invalid);
        assert_eq!(feedback.border.css_color(), "red");
        assert_eq!(feedback.message.as_deref(), Some("Date invalide"));

        let feedback = FieldFeedback::from(&ValidationResult::Valid);
        assert_eq!(feedback.border.css_color(), "green");
        assert!(feedback.message.is_none());
    }

    #[test]
    fn test_recording_presenter_tracks_latest_state() {
        let mut presenter = RecordingPresenter::new();
        presenter.set_submit_enabled(false);
        presenter.show_field(
            &FieldId::Email,
            &FieldFeedback::from(&ValidationResult::Invalid("Adresse email invalide".into())),
        );
        presenter.set_submit_enabled(true);

        assert_eq!(presenter.submit_enabled(), Some(true));
        assert_eq!(
            presenter.feedback_for(&FieldId::Email).map(|f| f.border),
            Some(Border::Invalid)
        );

        presenter.clear_all();
        assert!(presenter.feedback_for(&FieldId::Email).is_none());
        assert_eq!(presenter.drain().len(), 4);
        assert!(presenter.events().is_empty());
        assert_eq!(presenter.submit_enabled(), Some(true));
    }

    #[test]
    fn test_events_serialize_with_tags() {
        let event = PresenterEvent::SubmitEnabled { enabled: false };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "submit_enabled");
        assert_eq!(json["enabled"], false);
    }
}
