//! # Choice Descriptors — Declarative Member Definitions
//!
//! A [`Choice`] is the declaration-side data holder for one enumeration
//! member: its value (pinned or auto-assigned), optional label, the initial
//! flag, the successor set, and open extra metadata. Descriptors never
//! validate anything; they are consumed by [`crate::EnumBuilder`], which is
//! where duplicate values, unknown successors, and label derivation are
//! handled.
//!
//! [`MemberDef`] is what the builder actually accepts: a full descriptor, a
//! value sequence with a trailing label, or a bare value. `From` conversions
//! pick the form, so call sites stay declarative:
//!
//! ```
//! use choiceflow_core::{Choice, EnumBuilder};
//!
//! let colors = EnumBuilder::new("Color")
//!     .member("RED", Choice::new('r').label("Reddish"))
//!     .member("GREEN", 'g')
//!     .member("BLUE", ('b', "Deep Blue"))
//!     .build()
//!     .unwrap();
//! assert_eq!(colors.from_name("GREEN").unwrap().to_string(), "Green");
//! ```

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::label::Label;
use crate::value::{ChoiceValue, ValueSpec};

/// Extra-metadata key that links a dependent member to its parent values.
pub const PARENTS_KEY: &str = "parents";

/// One entry of a member's open extra metadata.
///
/// The set of value shapes is closed: flags, counts, text, or a list of
/// [`ChoiceValue`]s (the shape `parents` uses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extra {
    /// Boolean attribute.
    Bool(bool),
    /// Integer attribute.
    Int(i64),
    /// Text attribute.
    Text(String),
    /// A list of choice values, e.g. parent-enumeration members.
    Values(Vec<ChoiceValue>),
}

impl From<bool> for Extra {
    fn from(v: bool) -> Self {
        Extra::Bool(v)
    }
}

impl From<i64> for Extra {
    fn from(v: i64) -> Self {
        Extra::Int(v)
    }
}

impl From<i32> for Extra {
    fn from(v: i32) -> Self {
        Extra::Int(v as i64)
    }
}

impl From<&str> for Extra {
    fn from(v: &str) -> Self {
        Extra::Text(v.to_string())
    }
}

impl From<String> for Extra {
    fn from(v: String) -> Self {
        Extra::Text(v)
    }
}

impl From<Vec<ChoiceValue>> for Extra {
    fn from(v: Vec<ChoiceValue>) -> Self {
        Extra::Values(v)
    }
}

/// Declaration of one enumeration member.
///
/// Construction never fails. Setters consume and return the descriptor so
/// declarations chain; every field defaults to the permissive reading:
/// `initial` is true, `next` is unrestricted, no extra metadata.
#[derive(Debug, Clone)]
pub struct Choice {
    pub(crate) value: ValueSpec,
    pub(crate) label: Option<Label>,
    pub(crate) initial: bool,
    pub(crate) next: Option<IndexSet<String>>,
    pub(crate) extra: IndexMap<String, Extra>,
}

impl Choice {
    /// Descriptor with a pinned value.
    pub fn new(value: impl Into<ChoiceValue>) -> Self {
        Self::with_spec(ValueSpec::Value(value.into()))
    }

    /// Descriptor whose value the builder assigns (next unused ordinal).
    pub fn auto() -> Self {
        Self::with_spec(ValueSpec::Auto)
    }

    fn with_spec(value: ValueSpec) -> Self {
        Choice {
            value,
            label: None,
            initial: true,
            next: None,
            extra: IndexMap::new(),
        }
    }

    /// Sets the display label; omitted labels are derived from the name.
    pub fn label(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks whether this member may be the first value of a new record.
    pub fn initial(mut self, initial: bool) -> Self {
        self.initial = initial;
        self
    }

    /// Restricts transitions out of this member to the named successors.
    ///
    /// Names are resolved against the finished member set when the
    /// enumeration is built, so forward references are fine.
    pub fn next<I, S>(mut self, successors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.next = Some(successors.into_iter().map(Into::into).collect());
        self
    }

    /// Declares this member terminal: no transition out is legal.
    pub fn terminal(mut self) -> Self {
        self.next = Some(IndexSet::new());
        self
    }

    /// Attaches one extra-metadata entry.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Extra>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Declares the parent-enumeration values this member is legal under.
    pub fn parents<I, V>(self, parents: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ChoiceValue>,
    {
        let values: Vec<ChoiceValue> = parents.into_iter().map(Into::into).collect();
        self.extra(PARENTS_KEY, values)
    }
}

/// A member definition in one of its three declaration forms.
#[derive(Debug, Clone)]
pub enum MemberDef {
    /// Full descriptor with metadata.
    Choice(Choice),
    /// Value sequence with a trailing label. More than one leading value
    /// declares a tuple; exactly one stays a scalar.
    Labeled {
        /// First declared value.
        first: ChoiceValue,
        /// Remaining declared values, empty for the scalar form.
        rest: Vec<ChoiceValue>,
        /// The trailing label.
        label: Label,
    },
    /// Bare value; label derived from the member name.
    Plain(ValueSpec),
}

impl MemberDef {
    /// Bare auto-assigned value.
    pub fn auto() -> Self {
        MemberDef::Plain(ValueSpec::Auto)
    }
}

impl From<Choice> for MemberDef {
    fn from(c: Choice) -> Self {
        MemberDef::Choice(c)
    }
}

impl From<ChoiceValue> for MemberDef {
    fn from(v: ChoiceValue) -> Self {
        MemberDef::Plain(ValueSpec::Value(v))
    }
}

impl From<ValueSpec> for MemberDef {
    fn from(spec: ValueSpec) -> Self {
        MemberDef::Plain(spec)
    }
}

macro_rules! impl_memberdef_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MemberDef {
                fn from(v: $ty) -> Self {
                    MemberDef::Plain(ValueSpec::Value(v.into()))
                }
            }
        )*
    };
}

impl_memberdef_from_scalar!(i8, i16, i32, i64, u8, u16, u32, char, &str, String);

impl<V: Into<ChoiceValue>> From<(V, &str)> for MemberDef {
    fn from((value, label): (V, &str)) -> Self {
        MemberDef::Labeled {
            first: value.into(),
            rest: Vec::new(),
            label: label.into(),
        }
    }
}

impl<V: Into<ChoiceValue>> From<(V, Label)> for MemberDef {
    fn from((value, label): (V, Label)) -> Self {
        MemberDef::Labeled {
            first: value.into(),
            rest: Vec::new(),
            label,
        }
    }
}

impl<V1, V2> From<(V1, V2, &str)> for MemberDef
where
    V1: Into<ChoiceValue>,
    V2: Into<ChoiceValue>,
{
    fn from((v1, v2, label): (V1, V2, &str)) -> Self {
        MemberDef::Labeled {
            first: v1.into(),
            rest: vec![v2.into()],
            label: label.into(),
        }
    }
}
