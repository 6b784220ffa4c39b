//! # Choice Values — Underlying Member Scalars
//!
//! Defines [`ChoiceValue`], the raw value that identifies an enumeration
//! member in storage, and [`ValueSpec`], which a declaration uses to either
//! pin a value or request an auto-assigned ordinal.
//!
//! ## Design
//!
//! - Values are integers or text; a declaration may also carry a tuple of
//!   scalars, which stays a single opaque value for identity purposes.
//! - `Eq + Hash` so values key the by-value index and parent-value sets.
//! - Serde is untagged: integers serialize as numbers, text as strings,
//!   tuples as arrays, so stored representations round-trip unchanged.

use serde::{Deserialize, Serialize};

/// The raw scalar identifying an enumeration member.
///
/// Within one enumeration every member's value is unique; the value is what
/// adapters persist and what [`crate::ChoiceEnum::from_value`] resolves back
/// to a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    /// Integer-valued member.
    Int(i64),
    /// Text-valued member.
    Text(String),
    /// Multi-element declared value, kept as one opaque identity.
    Tuple(Vec<ChoiceValue>),
}

impl ChoiceValue {
    /// Returns the integer payload, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for `Text("")`, the representation storage adapters hand over
    /// for an empty column.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for ChoiceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
            Self::Tuple(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
        }
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ChoiceValue {
                fn from(v: $ty) -> Self {
                    ChoiceValue::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<&str> for ChoiceValue {
    fn from(v: &str) -> Self {
        ChoiceValue::Text(v.to_string())
    }
}

impl From<String> for ChoiceValue {
    fn from(v: String) -> Self {
        ChoiceValue::Text(v)
    }
}

impl From<char> for ChoiceValue {
    fn from(v: char) -> Self {
        ChoiceValue::Text(v.to_string())
    }
}

impl From<Vec<ChoiceValue>> for ChoiceValue {
    fn from(v: Vec<ChoiceValue>) -> Self {
        ChoiceValue::Tuple(v)
    }
}

impl From<&ChoiceValue> for ChoiceValue {
    fn from(v: &ChoiceValue) -> Self {
        v.clone()
    }
}

/// Declared value of a member: pinned, or assigned by the builder.
///
/// `Auto` resolves during [`crate::EnumBuilder::build`] to the next unused
/// integer ordinal, starting at 1 and local to that build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSpec {
    /// Ask the builder for the next unused ordinal.
    Auto,
    /// Use exactly this value.
    Value(ChoiceValue),
}

impl From<ChoiceValue> for ValueSpec {
    fn from(v: ChoiceValue) -> Self {
        ValueSpec::Value(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_int() {
        assert_eq!(ChoiceValue::Int(4).to_string(), "4");
        assert_eq!(ChoiceValue::Int(-1).to_string(), "-1");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(ChoiceValue::from("r").to_string(), "r");
        assert_eq!(ChoiceValue::from("").to_string(), "");
    }

    #[test]
    fn test_display_tuple() {
        let v = ChoiceValue::Tuple(vec![ChoiceValue::Int(1), ChoiceValue::from("a")]);
        assert_eq!(v.to_string(), "(1, a)");
    }

    #[test]
    fn test_int_and_text_are_distinct() {
        assert_ne!(ChoiceValue::Int(1), ChoiceValue::from("1"));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(ChoiceValue::Int(7).as_int(), Some(7));
        assert_eq!(ChoiceValue::Int(7).as_text(), None);
        assert_eq!(ChoiceValue::from("g").as_text(), Some("g"));
        assert!(ChoiceValue::from("").is_empty_text());
        assert!(!ChoiceValue::from("x").is_empty_text());
        assert!(!ChoiceValue::Int(0).is_empty_text());
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(ChoiceValue::from(4i32), ChoiceValue::Int(4));
        assert_eq!(ChoiceValue::from(4u8), ChoiceValue::Int(4));
        assert_eq!(ChoiceValue::from('g'), ChoiceValue::from("g"));
        assert_eq!(
            ChoiceValue::from(String::from("ok")),
            ChoiceValue::from("ok")
        );
    }

    #[test]
    fn test_serde_int_is_bare_number() {
        let json = serde_json::to_string(&ChoiceValue::Int(4)).unwrap();
        assert_eq!(json, "4");
        let back: ChoiceValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChoiceValue::Int(4));
    }

    #[test]
    fn test_serde_text_is_bare_string() {
        let json = serde_json::to_string(&ChoiceValue::from("g")).unwrap();
        assert_eq!(json, "\"g\"");
        let back: ChoiceValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChoiceValue::from("g"));
    }

    #[test]
    fn test_serde_tuple_is_array() {
        let v = ChoiceValue::Tuple(vec![ChoiceValue::Int(1), ChoiceValue::Int(2)]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,2]");
        let back: ChoiceValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_value_spec_from_value() {
        let spec: ValueSpec = ChoiceValue::Int(3).into();
        assert_eq!(spec, ValueSpec::Value(ChoiceValue::Int(3)));
        assert_ne!(spec, ValueSpec::Auto);
    }
}
