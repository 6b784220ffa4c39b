//! # Choice Enumerations — The Frozen Registry
//!
//! [`ChoiceEnum`] is the product of a successful build: an ordered,
//! immutable member list plus by-name and by-value indices built once.
//! After construction nothing mutates, so one instance can be published
//! (e.g. in a `std::sync::OnceLock`) and read from any number of threads
//! without synchronization.
//!
//! Lookup by value is the storage-side entry point: adapters load a raw
//! scalar and resolve it with [`ChoiceEnum::from_value`], or run it through
//! [`ChoiceEnum::coerce`] when empty column values should mean "no
//! selection".

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::choice::Extra;
use crate::error::LookupError;
use crate::label::Label;
use crate::member::Member;
use crate::value::ChoiceValue;

/// A built enumeration: ordered members with unique names and values.
#[derive(Debug, Clone)]
pub struct ChoiceEnum {
    pub(crate) name: String,
    pub(crate) members: Vec<Member>,
    pub(crate) by_name: HashMap<String, usize>,
    pub(crate) by_value: HashMap<ChoiceValue, usize>,
    pub(crate) extra_keys: IndexSet<String>,
    pub(crate) empty_label: Option<Label>,
}

impl ChoiceEnum {
    /// The enumeration name used in messages and snapshots.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when no members were declared.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All members in declaration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Iterates members in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    /// Resolves a raw value to its member.
    pub fn from_value(&self, value: impl Into<ChoiceValue>) -> Result<&Member, LookupError> {
        let value = value.into();
        match self.by_value.get(&value) {
            Some(&idx) => Ok(&self.members[idx]),
            None => Err(LookupError::UnknownValue {
                enumeration: self.name.clone(),
                value,
            }),
        }
    }

    /// Resolves a member name.
    pub fn from_name(&self, name: &str) -> Result<&Member, LookupError> {
        match self.by_name.get(name) {
            Some(&idx) => Ok(&self.members[idx]),
            None => Err(LookupError::UnknownName {
                enumeration: self.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    /// Storage-side coercion: `None` and empty text mean "no selection",
    /// anything else must resolve to a member.
    pub fn coerce(&self, value: Option<&ChoiceValue>) -> Result<Option<&Member>, LookupError> {
        match value {
            None => Ok(None),
            Some(v) if v.is_empty_text() => Ok(None),
            Some(v) => self.from_value(v).map(Some),
        }
    }

    /// True when the member (matched by name and value) belongs here.
    pub fn contains(&self, member: &Member) -> bool {
        self.by_name
            .get(member.name())
            .is_some_and(|&idx| self.members[idx] == *member)
    }

    /// True when some member carries this value.
    pub fn contains_value(&self, value: &ChoiceValue) -> bool {
        self.by_value.contains_key(value)
    }

    /// Ordered `(value, label)` pairs for selection UIs. Labels resolve at
    /// call time, and the empty-label pair, when declared, leads with a
    /// `None` value.
    pub fn choices(&self) -> Vec<(Option<ChoiceValue>, String)> {
        let mut out = Vec::with_capacity(self.members.len() + 1);
        if let Some(empty) = &self.empty_label {
            out.push((None, empty.resolve().into_owned()));
        }
        for m in &self.members {
            out.push((Some(m.value.clone()), m.label.resolve().into_owned()));
        }
        out
    }

    /// Resolved labels in declaration order.
    pub fn labels(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| m.label.resolve().into_owned())
            .collect()
    }

    /// Members legal as the first value of a new record, declaration order.
    pub fn initial_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.initial)
    }

    /// The declared "no selection" label, if any.
    pub fn empty_label(&self) -> Option<&Label> {
        self.empty_label.as_ref()
    }

    /// Union of extra-metadata keys across all members, in order of first
    /// appearance.
    pub fn extra_keys(&self) -> impl Iterator<Item = &str> {
        self.extra_keys.iter().map(String::as_str)
    }

    /// Extra metadata under `key` for the member carrying `value`. `None`
    /// both for unknown values and for members without the key.
    pub fn extra(&self, key: &str, value: &ChoiceValue) -> Option<&Extra> {
        let idx = *self.by_value.get(value)?;
        self.members[idx].extra.get(key)
    }
}

impl<'a> IntoIterator for &'a ChoiceEnum {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::EnumBuilder;
    use crate::choice::Choice;
    use std::sync::OnceLock;

    fn colors() -> ChoiceEnum {
        EnumBuilder::new("Color")
            .member("RED", Choice::new('r').label("Reddish"))
            .member("GREEN", 'g')
            .member("BLUE", Choice::new('b').label(Label::lazy_fn(|| "Bluish".to_string())))
            .build()
            .unwrap()
    }

    fn tickets() -> ChoiceEnum {
        EnumBuilder::new("TicketState")
            .member("NEW", Choice::new(0))
            .member("TRIAGED", Choice::new(1).initial(false))
            .member("CLOSED", Choice::new(2).initial(false))
            .build()
            .unwrap()
    }

    // ── Lookups ──────────────────────────────────────────────────────

    #[test]
    fn test_from_value_roundtrips_every_member() {
        let colors = colors();
        for m in &colors {
            assert_eq!(colors.from_value(m.value()).unwrap(), m);
            assert_eq!(colors.from_name(m.name()).unwrap(), m);
        }
    }

    #[test]
    fn test_from_value_accepts_raw_scalars() {
        let colors = colors();
        assert_eq!(colors.from_value('g').unwrap().name(), "GREEN");
        assert_eq!(colors.from_value("g").unwrap().name(), "GREEN");
    }

    #[test]
    fn test_unknown_value_is_an_error() {
        let colors = colors();
        let err = colors.from_value('x').unwrap_err();
        match err {
            LookupError::UnknownValue { enumeration, value } => {
                assert_eq!(enumeration, "Color");
                assert_eq!(value, ChoiceValue::from("x"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let colors = colors();
        assert!(matches!(
            colors.from_name("MAGENTA"),
            Err(LookupError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_contains_requires_name_and_value_match() {
        let colors = colors();
        let red = colors.from_name("RED").unwrap();
        assert!(colors.contains(red));

        let stranger = EnumBuilder::new("Other")
            .member("RED", 'z')
            .build()
            .unwrap();
        let foreign_red = stranger.from_name("RED").unwrap();
        assert!(!colors.contains(foreign_red));

        assert!(colors.contains_value(&ChoiceValue::from("r")));
        assert!(!colors.contains_value(&ChoiceValue::from("z")));
    }

    // ── Coercion ─────────────────────────────────────────────────────

    #[test]
    fn test_coerce_maps_absent_to_none() {
        let colors = colors();
        assert_eq!(colors.coerce(None).unwrap(), None);
        let empty = ChoiceValue::from("");
        assert_eq!(colors.coerce(Some(&empty)).unwrap(), None);
    }

    #[test]
    fn test_coerce_resolves_real_values() {
        let colors = colors();
        let g = ChoiceValue::from("g");
        assert_eq!(colors.coerce(Some(&g)).unwrap().unwrap().name(), "GREEN");
        let bad = ChoiceValue::from("x");
        assert!(colors.coerce(Some(&bad)).is_err());
    }

    // ── Presentation ─────────────────────────────────────────────────

    #[test]
    fn test_choices_preserve_declaration_order() {
        let colors = colors();
        let choices = colors.choices();
        assert_eq!(
            choices,
            vec![
                (Some(ChoiceValue::from("r")), "Reddish".to_string()),
                (Some(ChoiceValue::from("g")), "Green".to_string()),
                (Some(ChoiceValue::from("b")), "Bluish".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_label_leads_the_choices() {
        let sizes = EnumBuilder::new("Size")
            .member("S", 1)
            .member("M", 2)
            .empty_label("(pick one)")
            .build()
            .unwrap();
        let choices = sizes.choices();
        assert_eq!(choices[0], (None, "(pick one)".to_string()));
        assert_eq!(choices.len(), 3);
        assert_eq!(sizes.empty_label().unwrap().resolve(), "(pick one)");
    }

    #[test]
    fn test_labels_in_declaration_order() {
        let colors = colors();
        assert_eq!(colors.labels(), ["Reddish", "Green", "Bluish"]);
    }

    #[test]
    fn test_initial_members_respect_flags() {
        let tickets = tickets();
        let initial: Vec<&str> = tickets.initial_members().map(|m| m.name()).collect();
        assert_eq!(initial, ["NEW"]);
    }

    // ── Extra metadata ───────────────────────────────────────────────

    #[test]
    fn test_extra_lookup_by_value() {
        let annotated = EnumBuilder::new("Annotated")
            .member("A", Choice::new(1).extra("weight", 3))
            .member("B", Choice::new(2))
            .build()
            .unwrap();
        assert_eq!(
            annotated.extra("weight", &ChoiceValue::Int(1)),
            Some(&Extra::Int(3))
        );
        assert_eq!(annotated.extra("weight", &ChoiceValue::Int(2)), None);
        assert_eq!(annotated.extra("weight", &ChoiceValue::Int(9)), None);
    }

    // ── Shared read-only use ─────────────────────────────────────────

    #[test]
    fn test_published_enumeration_reads_from_many_threads() {
        static SHARED: OnceLock<ChoiceEnum> = OnceLock::new();
        let shared = SHARED.get_or_init(colors);
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for m in shared {
                        assert!(shared.contains(m));
                        assert_eq!(shared.from_value(m.value()).unwrap(), m);
                    }
                });
            }
        });
    }
}
