//! # Definition Snapshots — Serializable Enumeration Descriptions
//!
//! A snapshot captures everything a built enumeration knows about itself in
//! plain data: member names, values, rendered labels, initial flags,
//! successor sets, and extra metadata. Snapshots serialize with serde and
//! can rebuild an equivalent enumeration, which is what schema tooling and
//! migration baselines consume.
//!
//! Deferred labels freeze to their rendering at snapshot time; a rebuilt
//! enumeration carries the frozen text, not the resolver.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::builder::EnumBuilder;
use crate::choice::{Choice, Extra};
use crate::enumeration::ChoiceEnum;
use crate::error::BuildError;
use crate::value::ChoiceValue;

/// Plain-data description of one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    /// Member name.
    pub name: String,
    /// Resolved value.
    pub value: ChoiceValue,
    /// Label as rendered at snapshot time.
    pub label: String,
    /// Whether the member may start a new record.
    pub initial: bool,
    /// Successor names; `None` means unrestricted, empty means terminal.
    pub next: Option<Vec<String>>,
    /// Extra metadata, declaration order.
    pub extra: IndexMap<String, Extra>,
}

/// Plain-data description of a whole enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumSnapshot {
    /// Enumeration name.
    pub name: String,
    /// The "no selection" label, if declared.
    pub empty_label: Option<String>,
    /// Members in declaration order.
    pub members: Vec<MemberSnapshot>,
}

impl ChoiceEnum {
    /// Captures this enumeration as plain data.
    pub fn snapshot(&self) -> EnumSnapshot {
        EnumSnapshot {
            name: self.name.clone(),
            empty_label: self
                .empty_label
                .as_ref()
                .map(|label| label.resolve().into_owned()),
            members: self
                .members
                .iter()
                .map(|m| MemberSnapshot {
                    name: m.name.clone(),
                    value: m.value.clone(),
                    label: m.label.resolve().into_owned(),
                    initial: m.initial,
                    next: m.next.as_ref().map(|n| n.iter().cloned().collect()),
                    extra: m.extra.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds an enumeration from a snapshot. The snapshot goes through
    /// the ordinary build checks, so a tampered one fails the same way a
    /// bad declaration does.
    pub fn from_snapshot(snapshot: EnumSnapshot) -> Result<ChoiceEnum, BuildError> {
        let mut builder = EnumBuilder::new(snapshot.name);
        if let Some(label) = snapshot.empty_label {
            builder = builder.empty_label(label);
        }
        for m in snapshot.members {
            let mut choice = Choice::new(m.value).label(m.label).initial(m.initial);
            if let Some(next) = m.next {
                choice = choice.next(next);
            }
            for (key, value) in m.extra {
                choice = choice.extra(key, value);
            }
            builder = builder.member(m.name, choice);
        }
        builder.build()
    }
}
