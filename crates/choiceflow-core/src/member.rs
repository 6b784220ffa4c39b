//! # Members — Finished Enumeration Entries
//!
//! A [`Member`] is what the builder produces for every declaration: name,
//! resolved value, resolved label, the initial flag, the verified successor
//! set, and extra metadata. Members are immutable and only ever handed out
//! by reference from their owning [`crate::ChoiceEnum`].

use indexmap::{IndexMap, IndexSet};

use crate::choice::{Extra, PARENTS_KEY};
use crate::label::Label;
use crate::value::ChoiceValue;

/// One finished member of a built enumeration.
#[derive(Debug, Clone)]
pub struct Member {
    pub(crate) name: String,
    pub(crate) value: ChoiceValue,
    pub(crate) label: Label,
    pub(crate) initial: bool,
    pub(crate) next: Option<IndexSet<String>>,
    pub(crate) extra: IndexMap<String, Extra>,
}

impl Member {
    /// Declared member name, unique within the enumeration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved value, unique within the enumeration.
    pub fn value(&self) -> &ChoiceValue {
        &self.value
    }

    /// Display label. Deferred labels resolve when rendered, not here.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Whether this member may be the first value of a new record.
    pub fn initial(&self) -> bool {
        self.initial
    }

    /// Legal successor names. `None` means transitions out are
    /// unrestricted; an empty set means the member is terminal.
    pub fn next(&self) -> Option<&IndexSet<String>> {
        self.next.as_ref()
    }

    /// True when the successor set is present and empty.
    pub fn is_terminal(&self) -> bool {
        matches!(&self.next, Some(n) if n.is_empty())
    }

    /// Looks up one extra-metadata entry. Absent keys are `None`.
    pub fn extra(&self, key: &str) -> Option<&Extra> {
        self.extra.get(key)
    }

    /// Extra-metadata keys declared on this member, declaration order.
    pub fn extra_keys(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }

    /// Parent-enumeration values this member is legal under, if declared.
    pub fn parents(&self) -> Option<&[ChoiceValue]> {
        match self.extra.get(PARENTS_KEY) {
            Some(Extra::Values(values)) => Some(values),
            _ => None,
        }
    }
}

/// Members compare by identity (name and value); labels and metadata are
/// excluded since deferred labels have no stable comparison.
impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for Member {}

/// Renders the resolved label, never the name or value.
impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label.resolve())
    }
}
