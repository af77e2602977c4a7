// File: signup-engine/src/engine.rs
// Purpose: Apply field rules on every change and keep the set of invalid fields

use crate::field::{FieldId, FieldState, ValidationResult};
use crate::rules::{FieldRule, FieldRules};
use crate::tracker::InteractionTracker;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Fields currently invalid. Only touched fields can be members.
pub type ErrorSet = BTreeSet<FieldId>;

/// Result of a value change: the formatted value to write back into the
/// input, and the validation outcome for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOutcome {
    pub field: FieldId,
    pub value: String,
    pub result: ValidationResult,
}

/// Owns the values, interaction state and error set of one form instance.
///
/// The error set is updated incrementally but always equals
/// `{ f : touched(f) and validate(f) is Invalid }`; see [`recompute_errors`](Self::recompute_errors).
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: FieldRules,
    values: BTreeMap<FieldId, String>,
    tracker: InteractionTracker,
    errors: ErrorSet,
}

impl RuleEngine {
    /// Create an engine with every ruled field empty and untouched
    pub fn new(rules: FieldRules) -> Self {
        let values = rules.fields().map(|f| (f.clone(), String::new())).collect();
        Self {
            rules,
            values,
            tracker: InteractionTracker::new(),
            errors: ErrorSet::new(),
        }
    }

    /// Handle a new raw value typed or pasted into a field.
    ///
    /// The field becomes touched, its transform runs on the whole raw value,
    /// and the validator runs on the transformed value.
    pub fn on_value_changed(&mut self, field: &FieldId, raw: &str) -> FieldOutcome {
        self.ensure_registered(field);
        self.touch(field);

        let value = self.rules.rule_for(field).transform(raw);
        if value != raw {
            debug!(field = %field, raw, value = %value, "value transformed");
        }
        self.values.insert(field.clone(), value.clone());

        let result = self.refresh(field);
        FieldOutcome {
            field: field.clone(),
            value,
            result,
        }
    }

    /// Handle focus. The field becomes touched and its current value is
    /// re-checked so the error set reflects it immediately.
    pub fn on_focus(&mut self, field: &FieldId) -> ValidationResult {
        self.ensure_registered(field);
        self.touch(field);
        self.refresh(field)
    }

    /// Touch and validate every field; used right before submission so that
    /// never-focused fields are checked too.
    pub fn validate_all(&mut self) -> ErrorSet {
        let fields: Vec<FieldId> = self.values.keys().cloned().collect();
        for field in &fields {
            self.touch(field);
            self.refresh(field);
        }
        debug!(invalid = self.errors.len(), "validated all fields");
        self.errors.clone()
    }

    /// Back to the initial state: empty values, nothing touched, no errors
    pub fn reset(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.tracker.reset();
        self.errors.clear();
        debug!("engine reset");
    }

    /// Current outcome for a field as it would be displayed. Untouched fields are always valid.
    pub fn result(&self, field: &FieldId) -> ValidationResult {
        if !self.tracker.is_touched(field) {
            return ValidationResult::Valid;
        }
        self.rules.rule_for(field).validate(self.value(field))
    }

    pub fn value(&self, field: &FieldId) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn is_touched(&self, field: &FieldId) -> bool {
        self.tracker.is_touched(field)
    }

    pub fn field_state(&self, field: &FieldId) -> Option<FieldState> {
        self.values.get(field).map(|value| FieldState {
            value: value.clone(),
            touched: self.tracker.is_touched(field),
        })
    }

    /// Known fields, in form order
    pub fn fields(&self) -> impl Iterator<Item = &FieldId> {
        self.values.keys()
    }

    pub fn values(&self) -> &BTreeMap<FieldId, String> {
        &self.values
    }

    pub fn rules(&self) -> &FieldRules {
        &self.rules
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    /// Submit is allowed only while no field is invalid
    pub fn submit_enabled(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error set computed from scratch, ignoring the incremental bookkeeping
    pub fn recompute_errors(&self) -> ErrorSet {
        self.values
            .keys()
            .filter(|field| self.result(field).is_invalid())
            .cloned()
            .collect()
    }

    fn ensure_registered(&mut self, field: &FieldId) {
        if !self.values.contains_key(field) {
            debug!(field = %field, "registering field with the required rule");
            if !self.rules.contains(field) {
                self.rules.insert(field.clone(), FieldRule::Required);
            }
            self.values.insert(field.clone(), String::new());
        }
    }

    fn touch(&mut self, field: &FieldId) {
        if self.tracker.mark_touched(field) {
            debug!(field = %field, "field touched");
        }
    }

    // Re-validate one field and bring its error set membership in line
    fn refresh(&mut self, field: &FieldId) -> ValidationResult {
        let result = self.result(field);
        let changed = match &result {
            ValidationResult::Valid => self.errors.remove(field),
            ValidationResult::Invalid(_) => self.errors.insert(field.clone()),
        };
        if changed {
            debug!(
                field = %field,
                valid = result.is_valid(),
                invalid_fields = self.errors.len(),
                "error set changed"
            );
        }
        result
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(FieldRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_pristine() {
        let engine = RuleEngine::default();
        assert_eq!(engine.fields().count(), 5);
        assert!(engine.errors().is_empty());
        assert!(engine.submit_enabled());
        for field in FieldId::KNOWN {
            assert!(engine.result(&field).is_valid());
            assert_eq!(engine.field_state(&field), Some(FieldState::default()));
        }
    }

    #[test]
    fn test_value_change_transforms_then_validates() {
        let mut engine = RuleEngine::default();
        let outcome = engine.on_value_changed(&FieldId::Nom, "du");
        assert_eq!(outcome.value, "DU");
        assert!(outcome.result.is_invalid());
        assert!(engine.errors().contains(&FieldId::Nom));

        let outcome = engine.on_value_changed(&FieldId::Nom, "dup");
        assert_eq!(outcome.value, "DUP");
        assert!(outcome.result.is_valid());
        assert!(engine.errors().is_empty());
        assert_eq!(engine.value(&FieldId::Nom), "DUP");
    }

    #[test]
    fn test_focus_marks_touched_and_checks() {
        let mut engine = RuleEngine::default();
        assert!(!engine.errors().contains(&FieldId::Prenom));
        let result = engine.on_focus(&FieldId::Prenom);
        assert_eq!(result.message(), Some("Ce champ est requis"));
        assert!(engine.is_touched(&FieldId::Prenom));
        assert!(engine.errors().contains(&FieldId::Prenom));
    }

    #[test]
    fn test_unknown_field_is_registered() {
        let mut engine = RuleEngine::default();
        let ville = FieldId::Other("ville".to_string());
        engine.on_value_changed(&ville, "");
        assert!(engine.errors().contains(&ville));
        assert_eq!(engine.fields().count(), 6);
        assert_eq!(engine.rules().rule_for(&ville), &FieldRule::Required);
    }

    #[test]
    fn test_reset() {
        let mut engine = RuleEngine::default();
        engine.on_value_changed(&FieldId::Email, "nope");
        engine.validate_all();
        assert!(!engine.errors().is_empty());

        engine.reset();
        assert!(engine.errors().is_empty());
        assert_eq!(engine.value(&FieldId::Email), "");
        assert!(!engine.is_touched(&FieldId::Email));
        assert_eq!(engine.recompute_errors(), *engine.errors());
    }
}
