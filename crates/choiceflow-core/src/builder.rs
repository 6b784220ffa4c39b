//! # Enumeration Builder — Declarations In, Frozen Type Out
//!
//! [`EnumBuilder`] turns an ordered list of `(name, definition)` pairs into
//! an immutable [`ChoiceEnum`]. All declaration checking lives here, not in
//! the descriptors:
//!
//! ## Build Algorithm
//!
//! 1. Reject duplicate member names.
//! 2. Resolve every definition to value, label, and metadata. `Auto` values
//!    take the next unused ordinal: a cursor starts at 1 and skips ordinals
//!    already taken by previously resolved values in this pass. Missing
//!    labels derive from the member name.
//! 3. Check value uniqueness across the whole resolved set; a collision
//!    names both declaring members and produces no type at all.
//! 4. Second pass over the finished names: verify every declared successor
//!    resolves to a member, so forward references work and typos fail the
//!    build instead of silently never matching.
//! 5. Freeze members, by-name and by-value indices, and the union of extra
//!    keys into the [`ChoiceEnum`].
//!
//! Builds are deterministic: the same declarations produce the same
//! enumeration, and nothing about a build leaks into the next one.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::choice::MemberDef;
use crate::enumeration::ChoiceEnum;
use crate::error::BuildError;
use crate::label::{derive_label, Label};
use crate::member::Member;
use crate::value::{ChoiceValue, ValueSpec};

/// Accumulates member declarations and freezes them into a [`ChoiceEnum`].
///
/// ```
/// use choiceflow_core::{Choice, EnumBuilder};
///
/// let flow = EnumBuilder::new("ShipmentState")
///     .member("START", Choice::new(4).next(["PROCESSING"]))
///     .member("PROCESSING", Choice::new(5).initial(false).next(["END"]))
///     .member("END", Choice::new(6).initial(false).terminal())
///     .build()?;
/// assert_eq!(flow.len(), 3);
/// # Ok::<(), choiceflow_core::BuildError>(())
/// ```
#[derive(Debug)]
pub struct EnumBuilder {
    name: String,
    defs: Vec<(String, MemberDef)>,
    empty_label: Option<Label>,
}

impl EnumBuilder {
    /// Starts an empty declaration under the given enumeration name.
    pub fn new(name: impl Into<String>) -> Self {
        EnumBuilder {
            name: name.into(),
            defs: Vec::new(),
            empty_label: None,
        }
    }

    /// Appends one member declaration. Order is preserved all the way into
    /// the finished enumeration, regardless of value ordering.
    pub fn member(mut self, name: impl Into<String>, def: impl Into<MemberDef>) -> Self {
        self.defs.push((name.into(), def.into()));
        self
    }

    /// Declares the "no selection" label surfaced as a leading
    /// `(None, label)` pair by [`ChoiceEnum::choices`]. It is not a member.
    pub fn empty_label(mut self, label: impl Into<Label>) -> Self {
        self.empty_label = Some(label.into());
        self
    }

    /// Resolves and freezes the declaration.
    pub fn build(self) -> Result<ChoiceEnum, BuildError> {
        let EnumBuilder {
            name,
            defs,
            empty_label,
        } = self;

        let mut seen_names: HashSet<String> = HashSet::with_capacity(defs.len());
        for (member_name, _) in &defs {
            if !seen_names.insert(member_name.clone()) {
                return Err(BuildError::DuplicateName {
                    enumeration: name,
                    name: member_name.clone(),
                });
            }
        }

        // Resolution pass: auto values and derived labels, declaration order.
        let mut members: Vec<Member> = Vec::with_capacity(defs.len());
        let mut used_ordinals: HashSet<i64> = HashSet::new();
        let mut cursor: i64 = 1;
        for (member_name, def) in defs {
            let (spec, label, initial, next, extra) = match def {
                MemberDef::Choice(c) => (c.value, c.label, c.initial, c.next, c.extra),
                MemberDef::Labeled { first, rest, label } => {
                    let value = if rest.is_empty() {
                        first
                    } else {
                        let mut parts = Vec::with_capacity(1 + rest.len());
                        parts.push(first);
                        parts.extend(rest);
                        ChoiceValue::Tuple(parts)
                    };
                    (
                        ValueSpec::Value(value),
                        Some(label),
                        true,
                        None,
                        IndexMap::new(),
                    )
                }
                MemberDef::Plain(spec) => (spec, None, true, None, IndexMap::new()),
            };

            let value = match spec {
                ValueSpec::Value(v) => v,
                ValueSpec::Auto => {
                    while used_ordinals.contains(&cursor) {
                        cursor += 1;
                    }
                    let assigned = ChoiceValue::Int(cursor);
                    cursor += 1;
                    assigned
                }
            };
            if let Some(i) = value.as_int() {
                used_ordinals.insert(i);
            }

            let label = label.unwrap_or_else(|| Label::Text(derive_label(&member_name)));
            members.push(Member {
                name: member_name,
                value,
                label,
                initial,
                next,
                extra,
            });
        }

        // Whole-set value uniqueness, now that auto values are concrete.
        let mut by_value: HashMap<ChoiceValue, usize> = HashMap::with_capacity(members.len());
        for (idx, m) in members.iter().enumerate() {
            if let Some(&first_idx) = by_value.get(&m.value) {
                return Err(BuildError::DuplicateValue {
                    enumeration: name,
                    value: m.value.clone(),
                    first: members[first_idx].name.clone(),
                    second: m.name.clone(),
                });
            }
            by_value.insert(m.value.clone(), idx);
        }

        let by_name: HashMap<String, usize> = members
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.name.clone(), idx))
            .collect();

        // Successor pass against the finished name set.
        for m in &members {
            if let Some(next) = &m.next {
                for successor in next {
                    if !by_name.contains_key(successor) {
                        return Err(BuildError::UnknownSuccessor {
                            enumeration: name,
                            member: m.name.clone(),
                            successor: successor.clone(),
                        });
                    }
                }
            }
        }

        let mut extra_keys: IndexSet<String> = IndexSet::new();
        for m in &members {
            for key in m.extra.keys() {
                extra_keys.insert(key.clone());
            }
        }

        debug!(
            enumeration = %name,
            members = members.len(),
            "choice enumeration built"
        );

        Ok(ChoiceEnum {
            name,
            members,
            by_name,
            by_value,
            extra_keys,
            empty_label,
        })
    }
}
