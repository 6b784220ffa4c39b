//! # Hierarchy Checks — Parent-Gated Dependent Choices
//!
//! A dependent enumeration's members declare, through their `parents`
//! metadata, which values of a separate parent field they are legal under.
//! [`SubChoiceValidator`] turns that metadata into the runtime check:
//!
//! - The union of every member's `parents` is computed once at
//!   construction. A parent value outside that union (including an unset
//!   parent) permits no dependent choice at all, so any selection must be
//!   empty.
//! - A parent value inside the union restricts the selection to the
//!   members that declared it; an empty selection is not among them.
//! - An empty allowed set imposes no restriction. While the union is
//!   derived from member `parents` that branch cannot fire, and it is kept
//!   as the no-constraint reading rather than folded into the must-be-empty
//!   rule.

use indexmap::IndexSet;
use thiserror::Error;
use tracing::debug;

use choiceflow_core::{ChoiceEnum, ChoiceValue, Member};

use crate::report::{AllowedLabels, MemberRef};

/// Rejections from the dependent-choice check.
#[derive(Error, Debug)]
pub enum SubChoiceError {
    /// The current parent value permits no dependent choice.
    #[error(
        "value must be empty: enumeration '{enumeration}' permits no choice under the current parent value"
    )]
    MustBeEmpty {
        /// Dependent enumeration being assigned.
        enumeration: String,
        /// Parent value in effect; `None` when the parent field is unset.
        parent: Option<ChoiceValue>,
        /// The selection that should have been empty.
        candidate: MemberRef,
    },

    /// The candidate is not declared under the current parent value.
    #[error(
        "allowed choices under parent value {parent} of enumeration '{enumeration}' are {allowed}"
    )]
    InvalidChoice {
        /// Dependent enumeration being assigned.
        enumeration: String,
        /// Parent value in effect.
        parent: ChoiceValue,
        /// The rejected selection; `None` when nothing was selected.
        candidate: Option<MemberRef>,
        /// Members declared under this parent, declaration order.
        allowed: AllowedLabels,
    },
}

/// Checker for a dependent enumeration, with the parent-value union
/// computed once up front.
#[derive(Debug, Clone)]
pub struct SubChoiceValidator<'e> {
    choices: &'e ChoiceEnum,
    parent_values: IndexSet<ChoiceValue>,
}

impl<'e> SubChoiceValidator<'e> {
    /// Scans the dependent enumeration and caches the union of all
    /// declared parent values.
    pub fn new(choices: &'e ChoiceEnum) -> Self {
        let mut parent_values = IndexSet::new();
        for member in choices.members() {
            if let Some(parents) = member.parents() {
                for value in parents {
                    parent_values.insert(value.clone());
                }
            }
        }
        SubChoiceValidator {
            choices,
            parent_values,
        }
    }

    /// The dependent enumeration this validator reads.
    pub fn enumeration(&self) -> &'e ChoiceEnum {
        self.choices
    }

    /// Every parent value some member declared, in declaration order.
    pub fn parent_values(&self) -> &IndexSet<ChoiceValue> {
        &self.parent_values
    }

    /// Members declared under the given parent value, declaration order.
    pub fn allowed_under(&self, parent: &ChoiceValue) -> Vec<&'e Member> {
        self.choices
            .members()
            .iter()
            .filter(|m| m.parents().is_some_and(|ps| ps.contains(parent)))
            .collect()
    }

    /// Runs the dependent-choice check for one assignment.
    pub fn validate(
        &self,
        parent: Option<&ChoiceValue>,
        candidate: Option<&Member>,
    ) -> Result<(), SubChoiceError> {
        match parent {
            Some(parent) if self.parent_values.contains(parent) => {
                let allowed = self.allowed_under(parent);
                // An empty allowed set imposes no restriction.
                if allowed.is_empty() {
                    return Ok(());
                }
                if candidate.is_some_and(|c| allowed.iter().any(|m| *m == c)) {
                    return Ok(());
                }
                debug!(
                    enumeration = %self.choices.name(),
                    parent = %parent,
                    candidate = candidate.map(Member::name),
                    "dependent choice rejected"
                );
                Err(SubChoiceError::InvalidChoice {
                    enumeration: self.choices.name().to_string(),
                    parent: parent.clone(),
                    candidate: candidate.map(MemberRef::of),
                    allowed: AllowedLabels(allowed.iter().copied().map(MemberRef::of).collect()),
                })
            }
            _ => match candidate {
                Some(candidate) => {
                    debug!(
                        enumeration = %self.choices.name(),
                        candidate = candidate.name(),
                        "dependent choice must be empty"
                    );
                    Err(SubChoiceError::MustBeEmpty {
                        enumeration: self.choices.name().to_string(),
                        parent: parent.cloned(),
                        candidate: MemberRef::of(candidate),
                    })
                }
                None => Ok(()),
            },
        }
    }
}
