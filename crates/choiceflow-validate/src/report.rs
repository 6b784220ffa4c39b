//! # Assignment Reports — Accumulated Validation Failures
//!
//! The composed assignment gate never stops at the first problem: every
//! check runs and every failure lands in a [`Violations`] list, so a caller
//! fixing a form sees the hierarchy, initial, and transition complaints
//! together. [`MemberRef`] is the message-side snapshot of a member (name,
//! value, label rendered at failure time); the allowed-alternative lists
//! wrap it with the presentation each check uses.

use std::fmt;

use thiserror::Error;

use choiceflow_core::{ChoiceValue, LookupError, Member};

use crate::flow::FlowError;
use crate::hierarchy::SubChoiceError;

/// Snapshot of a member for error payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    /// Member name.
    pub name: String,
    /// Member value.
    pub value: ChoiceValue,
    /// Label as rendered when the failure was produced.
    pub label: String,
}

impl MemberRef {
    /// Captures the member at failure time.
    pub fn of(member: &Member) -> Self {
        MemberRef {
            name: member.name().to_string(),
            value: member.value().clone(),
            label: member.label().resolve().into_owned(),
        }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}

/// Allowed alternatives rendered as `NAME (value)`, declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedNames(pub Vec<MemberRef>);

impl fmt::Display for AllowedNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", m.name, m.value)?;
        }
        Ok(())
    }
}

/// Allowed alternatives rendered as `Label (value)`, declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedLabels(pub Vec<MemberRef>);

impl fmt::Display for AllowedLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", m.label, m.value)?;
        }
        Ok(())
    }
}

/// A single failure from one of the composed checks.
#[derive(Error, Debug)]
pub enum Violation {
    /// The parent-gated dependent-choice check failed.
    #[error("{0}")]
    Hierarchy(#[from] SubChoiceError),

    /// The initial-value or transition check failed.
    #[error("{0}")]
    Flow(#[from] FlowError),

    /// The stored value no longer resolves to a member.
    #[error("stored value is stale: {0}")]
    Stored(#[from] LookupError),
}

/// Collection of assignment violations.
#[derive(Debug, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub(crate) fn push(&mut self, violation: impl Into<Violation>) {
        self.violations.push(violation.into());
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {v}")?;
        }
        Ok(())
    }
}

/// The composed gate's error: everything wrong with one assignment.
#[derive(Error, Debug)]
#[error("assignment rejected for enumeration '{enumeration}':\n{violations}")]
pub struct AssignmentError {
    /// Enumeration the assignment targeted.
    pub enumeration: String,
    /// All failures, in check order.
    pub violations: Violations,
}
