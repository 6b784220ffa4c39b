//! # choiceflow-core — Declarative Choice Enumerations
//!
//! This crate is the foundation of the choiceflow workspace. It turns an
//! ordered list of member declarations into an immutable enumeration type
//! whose members carry a value, a display label, an initial flag, a
//! successor set, and open extra metadata. The validation crate builds its
//! runtime constraint checks on top of these types; this crate depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Declarations are data, checks live in the builder.** A [`Choice`]
//!    descriptor never fails. [`EnumBuilder::build`] is the single place
//!    where duplicate names and values, unknown successors, auto-assigned
//!    ordinals, and derived labels are handled, and a bad declaration fails
//!    loudly at startup rather than producing a half-usable type.
//!
//! 2. **Build once, read forever.** [`ChoiceEnum`] freezes members plus
//!    by-name and by-value indices at construction. Nothing mutates after
//!    `build()`, so instances publish once and serve concurrent readers.
//!
//! 3. **Labels resolve when rendered.** [`Label::Lazy`] stores a resolver
//!    handle, not a snapshot, so locale-keyed catalogs stay live. Members
//!    display as their label, never their name or value.
//!
//! 4. **Values are identity.** [`ChoiceValue`] is what storage persists and
//!    what every lookup and parent reference keys on. Within one
//!    enumeration values are unique, guaranteed at build time.
//!
//! ## Crate Policy
//!
//! - No dependencies on other choiceflow crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public data types derive `Debug` and `Clone`; plain-data types
//!   also implement `Serialize`/`Deserialize`.

pub mod builder;
pub mod choice;
pub mod enumeration;
pub mod error;
pub mod label;
pub mod member;
pub mod snapshot;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use builder::EnumBuilder;
pub use choice::{Choice, Extra, MemberDef, PARENTS_KEY};
pub use enumeration::ChoiceEnum;
pub use error::{BuildError, LookupError};
pub use label::{derive_label, Label, LazyLabel};
pub use member::Member;
pub use snapshot::{EnumSnapshot, MemberSnapshot};
pub use value::{ChoiceValue, ValueSpec};
