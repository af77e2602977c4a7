// File: signup-engine/src/tracker.rs
// Purpose: Remember which fields the user has interacted with

use crate::field::FieldId;
use std::collections::HashSet;

/// Set of fields the user has focused or edited.
///
/// Feedback is suppressed for fields outside this set, so a pristine form
/// does not open covered in red. Membership only ends with [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct InteractionTracker {
    touched: HashSet<FieldId>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a field as touched. Returns true the first time only.
    pub fn mark_touched(&mut self, field: &FieldId) -> bool {
        if self.touched.contains(field) {
            return false;
        }
        self.touched.insert(field.clone())
    }

    pub fn is_touched(&self, field: &FieldId) -> bool {
        self.touched.contains(field)
    }

    pub fn touched_count(&self) -> usize {
        self.touched.len()
    }

    pub fn reset(&mut self) {
        self.touched.clear();
    }
}
