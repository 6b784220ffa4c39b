//! # Error Types — Construction and Lookup Failures
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Build errors are programming errors in the declaration; they fail
//!   loudly at startup and the enumeration type is never produced.
//! - Lookup errors are recoverable: storage can hand back values that no
//!   longer resolve, and callers decide what that means.
//! - Every variant carries the enumeration name plus the offending data, so
//!   messages render without further context.

use thiserror::Error;

use crate::value::ChoiceValue;

/// Rejected enumeration declarations.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Two members resolved to the same value.
    #[error(
        "duplicate value {value} in enumeration '{enumeration}': declared by both '{first}' and '{second}'"
    )]
    DuplicateValue {
        /// Enumeration being built.
        enumeration: String,
        /// The value that resolved twice.
        value: ChoiceValue,
        /// Member that declared the value first.
        first: String,
        /// Member that declared it again.
        second: String,
    },

    /// Two members were declared under one name.
    #[error("duplicate member name '{name}' in enumeration '{enumeration}'")]
    DuplicateName {
        /// Enumeration being built.
        enumeration: String,
        /// The name declared twice.
        name: String,
    },

    /// A successor set references a name no member declares.
    #[error("member '{member}' of enumeration '{enumeration}' lists unknown successor '{successor}'")]
    UnknownSuccessor {
        /// Enumeration being built.
        enumeration: String,
        /// Member whose successor set is broken.
        member: String,
        /// The undeclared name it references.
        successor: String,
    },
}

/// Failed lookups against a built enumeration.
#[derive(Error, Debug)]
pub enum LookupError {
    /// No member carries the queried value.
    #[error("enumeration '{enumeration}' has no member with value {value}")]
    UnknownValue {
        /// Enumeration queried.
        enumeration: String,
        /// The value that did not resolve.
        value: ChoiceValue,
    },

    /// No member carries the queried name.
    #[error("enumeration '{enumeration}' has no member named '{name}'")]
    UnknownName {
        /// Enumeration queried.
        enumeration: String,
        /// The name that did not resolve.
        name: String,
    },
}
