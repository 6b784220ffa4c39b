//! # Tracked Fields — The Composed Assignment Gate
//!
//! [`TrackedField`] is the per-record cache the transition check reads: the
//! value last loaded from or written to storage, plus the new-record flag.
//! The record owns it; it is established on load, refreshed after every
//! successful save, and never shared between records.
//!
//! [`AssignmentValidator`] strings the checks together in the order the
//! save path runs them: hierarchy (when configured), then initial value,
//! then transition. Every failure is collected; the caller gets one
//! [`AssignmentError`] carrying the whole list instead of the first
//! complaint. Validation is read-only: recording a successful save back
//! into the [`TrackedField`] stays the caller's move, after storage
//! actually accepted the write.

use serde::{Deserialize, Serialize};
use tracing::debug;

use choiceflow_core::{ChoiceEnum, ChoiceValue, Member};

use crate::flow::FlowValidator;
use crate::hierarchy::SubChoiceValidator;
use crate::report::{AssignmentError, Violations};

/// Per-record stored-value cache for one enumeration field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedField {
    is_new: bool,
    stored: Option<ChoiceValue>,
}

impl TrackedField {
    /// A record that has never been saved.
    pub fn new_record() -> Self {
        TrackedField {
            is_new: true,
            stored: None,
        }
    }

    /// A record loaded from storage with this field set.
    pub fn loaded(value: impl Into<ChoiceValue>) -> Self {
        TrackedField {
            is_new: false,
            stored: Some(value.into()),
        }
    }

    /// A record loaded from storage with this field empty.
    pub fn loaded_empty() -> Self {
        TrackedField {
            is_new: false,
            stored: None,
        }
    }

    /// True until the first successful save is recorded.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// The value last seen in storage.
    pub fn stored(&self) -> Option<&ChoiceValue> {
        self.stored.as_ref()
    }

    /// Refreshes the cache after a successful save.
    pub fn record_save(&mut self, value: Option<ChoiceValue>) {
        self.stored = value;
        self.is_new = false;
    }

    /// Refreshes the cache after a reload from storage.
    pub fn record_load(&mut self, value: Option<ChoiceValue>) {
        self.stored = value;
        self.is_new = false;
    }
}

impl Default for TrackedField {
    fn default() -> Self {
        TrackedField::new_record()
    }
}

/// The composed save-path gate over one enumeration.
#[derive(Debug, Clone)]
pub struct AssignmentValidator<'e> {
    flow: FlowValidator<'e>,
    hierarchy: Option<SubChoiceValidator<'e>>,
}

impl<'e> AssignmentValidator<'e> {
    /// Gate without a parent field: initial and transition checks only.
    pub fn new(choices: &'e ChoiceEnum) -> Self {
        AssignmentValidator {
            flow: FlowValidator::new(choices),
            hierarchy: None,
        }
    }

    /// Gate for a dependent enumeration: the hierarchy check runs first,
    /// against the parent value handed to [`validate`](Self::validate).
    pub fn with_hierarchy(choices: &'e ChoiceEnum) -> Self {
        AssignmentValidator {
            flow: FlowValidator::new(choices),
            hierarchy: Some(SubChoiceValidator::new(choices)),
        }
    }

    /// The enumeration this gate reads.
    pub fn enumeration(&self) -> &'e ChoiceEnum {
        self.flow.enumeration()
    }

    /// Runs every configured check and accumulates all failures.
    ///
    /// `parent` is the current value of the parent field and only matters
    /// for gates built with [`with_hierarchy`](Self::with_hierarchy). A
    /// stored value that no longer resolves to a member is reported as a
    /// violation of its own.
    pub fn validate(
        &self,
        field: &TrackedField,
        parent: Option<&ChoiceValue>,
        candidate: Option<&Member>,
    ) -> Result<(), AssignmentError> {
        let mut violations = Violations::default();

        if let Some(hierarchy) = &self.hierarchy {
            if let Err(e) = hierarchy.validate(parent, candidate) {
                violations.push(e);
            }
        }

        if let Err(e) = self.flow.validate_initial(candidate, field.is_new()) {
            violations.push(e);
        }

        if let Some(stored) = field.stored() {
            match self.enumeration().from_value(stored) {
                Ok(previous) => {
                    if let Some(candidate) = candidate {
                        if let Err(e) = self.flow.validate_transition(Some(previous), candidate) {
                            violations.push(e);
                        }
                    }
                }
                Err(e) => violations.push(e),
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            debug!(
                enumeration = %self.enumeration().name(),
                violations = violations.len(),
                "assignment rejected"
            );
            Err(AssignmentError {
                enumeration: self.enumeration().name().to_string(),
                violations,
            })
        }
    }
}
