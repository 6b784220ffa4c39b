//! # Flow Checks — Initial Values and Transitions
//!
//! [`FlowValidator`] enforces the per-member flow metadata of a built
//! enumeration: the `initial` flag gates what a brand-new record may start
//! as, and the `next` set gates where an existing value may move. Both
//! checks are pure functions of the metadata and their arguments; nothing
//! here touches storage, and nothing ever executes a transition.
//!
//! A declaration like
//!
//! ```text
//!            ┌───────┐        ┌────────────┐        ┌─────┐
//! (new) ────▶│ START │───────▶│ PROCESSING │───────▶│ END │
//!            └───────┘        └────────────┘        └─────┘
//!   initial: only START       next: {END}           next: {} (terminal)
//! ```
//!
//! rejects a new record starting at PROCESSING, rejects START going
//! straight to END, and lets any member re-assign to itself as a no-op.
//! A member with no `next` set at all is unrestricted on the way out; only
//! the source member's set gates a transition, never the target's.

use thiserror::Error;
use tracing::debug;

use choiceflow_core::{ChoiceEnum, Member};

use crate::report::{AllowedNames, MemberRef};

/// Rejections from the flow checks.
#[derive(Error, Debug)]
pub enum FlowError {
    /// A new record tried to start in a member not flagged `initial`.
    #[error(
        "'{candidate}' is not a legal initial choice for enumeration '{enumeration}'; allowed choices are {allowed}"
    )]
    InvalidInitial {
        /// Enumeration being assigned.
        enumeration: String,
        /// The rejected candidate.
        candidate: MemberRef,
        /// Members flagged `initial`, declaration order.
        allowed: AllowedNames,
    },

    /// The previous member's successor set excludes the candidate.
    #[error(
        "transition from current '{from}' choice to '{to}' choice is not allowed in enumeration '{enumeration}'"
    )]
    IllegalTransition {
        /// Enumeration being assigned.
        enumeration: String,
        /// The member the record currently holds.
        from: MemberRef,
        /// The rejected candidate.
        to: MemberRef,
        /// The members `from` does permit, declaration order.
        allowed: AllowedNames,
    },
}

/// Stateless checker over one enumeration's flow metadata.
#[derive(Debug, Clone, Copy)]
pub struct FlowValidator<'e> {
    choices: &'e ChoiceEnum,
}

impl<'e> FlowValidator<'e> {
    /// Checks against the given enumeration.
    pub fn new(choices: &'e ChoiceEnum) -> Self {
        FlowValidator { choices }
    }

    /// The enumeration this validator reads.
    pub fn enumeration(&self) -> &'e ChoiceEnum {
        self.choices
    }

    /// Rejects a non-`initial` candidate on a new record. Existing records
    /// and empty candidates pass untouched.
    pub fn validate_initial(
        &self,
        candidate: Option<&Member>,
        is_new_record: bool,
    ) -> Result<(), FlowError> {
        if !is_new_record {
            return Ok(());
        }
        let Some(candidate) = candidate else {
            return Ok(());
        };
        if candidate.initial() {
            return Ok(());
        }
        debug!(
            enumeration = %self.choices.name(),
            candidate = candidate.name(),
            "initial choice rejected"
        );
        Err(FlowError::InvalidInitial {
            enumeration: self.choices.name().to_string(),
            candidate: MemberRef::of(candidate),
            allowed: AllowedNames(self.choices.initial_members().map(MemberRef::of).collect()),
        })
    }

    /// Rejects a candidate the previous member's `next` set excludes.
    ///
    /// Passes untouched when there is no previous member, when the
    /// assignment is a no-op, or when the previous member carries no
    /// successor set.
    pub fn validate_transition(
        &self,
        previous: Option<&Member>,
        candidate: &Member,
    ) -> Result<(), FlowError> {
        let Some(previous) = previous else {
            return Ok(());
        };
        if previous == candidate {
            return Ok(());
        }
        let Some(next) = previous.next() else {
            return Ok(());
        };
        if next.contains(candidate.name()) {
            return Ok(());
        }
        debug!(
            enumeration = %self.choices.name(),
            from = previous.name(),
            to = candidate.name(),
            "transition rejected"
        );
        Err(FlowError::IllegalTransition {
            enumeration: self.choices.name().to_string(),
            from: MemberRef::of(previous),
            to: MemberRef::of(candidate),
            allowed: AllowedNames(
                self.choices
                    .members()
                    .iter()
                    .filter(|m| next.contains(m.name()))
                    .map(MemberRef::of)
                    .collect(),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use choiceflow_core::{Choice, EnumBuilder};

    fn state_flow() -> ChoiceEnum {
        EnumBuilder::new("StateFlow")
            .member("START", Choice::new(4).next(["PROCESSING"]))
            .member("PROCESSING", Choice::new(5).initial(false).next(["END"]))
            .member("END", Choice::new(6).initial(false).terminal())
            .build()
            .unwrap()
    }

    fn any_first() -> ChoiceEnum {
        EnumBuilder::new("StateFlowAnyFirst")
            .member("START", 0)
            .member("PROCESSING", 1)
            .member("END", 2)
            .build()
            .unwrap()
    }

    // ── Initial values ───────────────────────────────────────────────

    #[test]
    fn test_new_record_may_start_at_an_initial_member() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let start = flow.from_name("START").unwrap();
        assert!(checker.validate_initial(Some(start), true).is_ok());
    }

    #[test]
    fn test_new_record_rejects_non_initial_members() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let processing = flow.from_name("PROCESSING").unwrap();
        let err = checker.validate_initial(Some(processing), true).unwrap_err();
        match err {
            FlowError::InvalidInitial {
                enumeration,
                candidate,
                allowed,
            } => {
                assert_eq!(enumeration, "StateFlow");
                assert_eq!(candidate.name, "PROCESSING");
                let names: Vec<&str> = allowed.0.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, ["START"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_initial_error_message_lists_allowed_choices() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let end = flow.from_name("END").unwrap();
        let msg = checker.validate_initial(Some(end), true).unwrap_err().to_string();
        assert!(msg.contains("allowed choices are START (4)"), "message was: {msg}");
    }

    #[test]
    fn test_existing_records_skip_the_initial_check() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let end = flow.from_name("END").unwrap();
        assert!(checker.validate_initial(Some(end), false).is_ok());
    }

    #[test]
    fn test_empty_candidate_skips_the_initial_check() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        assert!(checker.validate_initial(None, true).is_ok());
    }

    #[test]
    fn test_default_initial_flag_permits_any_start() {
        let flow = any_first();
        let checker = FlowValidator::new(&flow);
        for m in &flow {
            assert!(checker.validate_initial(Some(m), true).is_ok());
        }
    }

    // ── Transitions ──────────────────────────────────────────────────

    #[test]
    fn test_no_previous_value_permits_any_member() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        for m in &flow {
            assert!(checker.validate_transition(None, m).is_ok());
        }
    }

    #[test]
    fn test_declared_successor_is_allowed() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let start = flow.from_name("START").unwrap();
        let processing = flow.from_name("PROCESSING").unwrap();
        let end = flow.from_name("END").unwrap();
        assert!(checker.validate_transition(Some(start), processing).is_ok());
        assert!(checker.validate_transition(Some(processing), end).is_ok());
    }

    #[test]
    fn test_skipping_a_state_is_rejected() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let start = flow.from_name("START").unwrap();
        let end = flow.from_name("END").unwrap();
        let err = checker.validate_transition(Some(start), end).unwrap_err();
        match err {
            FlowError::IllegalTransition {
                from, to, allowed, ..
            } => {
                assert_eq!(from.name, "START");
                assert_eq!(to.name, "END");
                let names: Vec<&str> = allowed.0.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, ["PROCESSING"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_transition_error_message_names_both_members() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let start = flow.from_name("START").unwrap();
        let end = flow.from_name("END").unwrap();
        let msg = checker
            .validate_transition(Some(start), end)
            .unwrap_err()
            .to_string();
        assert!(
            msg.contains("from current 'START (4)' choice to 'END (6)' choice"),
            "message was: {msg}"
        );
    }

    #[test]
    fn test_reassigning_the_same_member_is_a_no_op() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        for m in &flow {
            assert!(checker.validate_transition(Some(m), m).is_ok());
        }
    }

    #[test]
    fn test_terminal_member_permits_only_the_no_op() {
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let end = flow.from_name("END").unwrap();
        assert!(checker.validate_transition(Some(end), end).is_ok());
        for name in ["START", "PROCESSING"] {
            let target = flow.from_name(name).unwrap();
            assert!(checker.validate_transition(Some(end), target).is_err());
        }
    }

    #[test]
    fn test_missing_successor_set_is_unrestricted() {
        let flow = any_first();
        let checker = FlowValidator::new(&flow);
        for from in &flow {
            for to in &flow {
                assert!(checker.validate_transition(Some(from), to).is_ok());
            }
        }
    }

    #[test]
    fn test_only_the_source_gates_a_transition() {
        // END is terminal, but arriving at END from PROCESSING is fine;
        // the target's own metadata never participates.
        let flow = state_flow();
        let checker = FlowValidator::new(&flow);
        let processing = flow.from_name("PROCESSING").unwrap();
        let end = flow.from_name("END").unwrap();
        assert!(checker.validate_transition(Some(processing), end).is_ok());
    }
}
