//! # choiceflow-validate — Runtime Constraint Checks
//!
//! Enforces the flow and hierarchy metadata a `choiceflow_core::ChoiceEnum`
//! carries, at the moment a value is assigned to a persisted field. Nothing
//! here executes transitions or touches storage: validators read immutable
//! enumeration metadata, take the record's previous value as an argument,
//! and say yes or no.
//!
//! ## Checks
//!
//! - **Flow** (`flow.rs`): a new record may only start in a member flagged
//!   `initial`, and an existing value may only move to a member its `next`
//!   set names. Re-assigning the current value is always a no-op.
//!
//! - **Hierarchy** (`hierarchy.rs`): a dependent enumeration's members
//!   declare the parent-field values they are legal under; the validator
//!   caches the union once and gates selections on the parent's current
//!   value, including forcing the selection empty where nothing is legal.
//!
//! - **Composed gate** (`field.rs`): the save path runs hierarchy, then
//!   initial, then transition, and accumulates every failure into one
//!   report instead of stopping at the first.
//!
//! ## Design
//!
//! The checks mirror how the save path uses them: pure, synchronous, and
//! reconstructed cheaply from a `&ChoiceEnum` wherever they are needed.
//! Per-record state lives in `TrackedField`, owned by the record itself;
//! the validators hold none.

pub mod field;
pub mod flow;
pub mod hierarchy;
pub mod report;

// ─── Flow re-exports ────────────────────────────────────────────────

pub use flow::{FlowError, FlowValidator};

// ─── Hierarchy re-exports ───────────────────────────────────────────

pub use hierarchy::{SubChoiceError, SubChoiceValidator};

// ─── Composed-gate re-exports ───────────────────────────────────────

pub use field::{AssignmentValidator, TrackedField};
pub use report::{AllowedLabels, AllowedNames, AssignmentError, MemberRef, Violation, Violations};
