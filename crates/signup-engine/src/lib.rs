//! Signup Engine
//!
//! State and rules behind the bank-account signup form:
//!
//! - [`InteractionTracker`] remembers which fields the user has touched
//! - [`RuleEngine`] formats and validates values and keeps the set of invalid fields
//! - [`SignupForm`] drives a [`Presenter`] (inline errors, submit button,
//!   confirmation dialog) from the engine's state
//!
//! DOM or terminal wiring lives in the adapter crates; nothing here knows
//! about the page.

pub mod config;
pub mod engine;
pub mod field;
pub mod form;
pub mod presenter;
pub mod rules;
pub mod tracker;

pub use config::FormConfig;
pub use engine::{ErrorSet, FieldOutcome, RuleEngine};
pub use field::{FieldId, FieldState, ValidationResult};
pub use form::{ConfirmationText, FormSubmission, PendingSubmission, SignupForm, SubmitAttempt};
pub use presenter::{
    Border, ConfirmationPrompt, ErrorPresenter, FieldFeedback, Presenter, PresenterEvent,
    RecordingPresenter, SubmitGate,
};
pub use rules::{FieldRule, FieldRules, NameCasing};
pub use signup_validation::CodeSuffix;
pub use tracker::InteractionTracker;
