//! # Labels — Literal and Deferred Display Text
//!
//! A member's label is what end users see. It is either a literal string or
//! a deferred resolver invoked every time the label renders, so translation
//! catalogs keyed on the active locale keep working: the handle is stored,
//! never a snapshot taken at declaration time.
//!
//! When a declaration carries no label, the builder derives one from the
//! member name with [`derive_label`].

use std::borrow::Cow;
use std::sync::Arc;

/// A label resolved at render time rather than declaration time.
///
/// Implementors typically close over a message catalog key and look it up
/// against whatever locale is active when the label is displayed.
pub trait LazyLabel: std::fmt::Debug + Send + Sync {
    /// Produce the label text for the current rendering context.
    fn resolve(&self) -> String;
}

struct LazyFn<F>(F);

impl<F> std::fmt::Debug for LazyFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LazyFn")
    }
}

impl<F> LazyLabel for LazyFn<F>
where
    F: Fn() -> String + Send + Sync,
{
    fn resolve(&self) -> String {
        (self.0)()
    }
}

/// Display text for an enumeration member.
#[derive(Debug, Clone)]
pub enum Label {
    /// Fixed text, resolved once at declaration.
    Text(String),
    /// Deferred resolver, invoked on every render.
    Lazy(Arc<dyn LazyLabel>),
}

impl Label {
    /// Wraps a deferred resolver.
    pub fn lazy(resolver: impl LazyLabel + 'static) -> Self {
        Label::Lazy(Arc::new(resolver))
    }

    /// Wraps a plain closure as a deferred resolver.
    pub fn lazy_fn(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Label::Lazy(Arc::new(LazyFn(f)))
    }

    /// Renders the label. Literal text borrows; deferred resolvers run now.
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            Label::Text(s) => Cow::Borrowed(s.as_str()),
            Label::Lazy(r) => Cow::Owned(r.resolve()),
        }
    }

    /// True when rendering defers to a resolver.
    pub fn is_lazy(&self) -> bool {
        matches!(self, Label::Lazy(_))
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.resolve())
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Text(s)
    }
}

/// Derives the default label from a member name: underscores become spaces
/// and each word is title-cased, so `IN_PROGRESS` renders as `In Progress`.
pub fn derive_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch == '_' {
            out.push(' ');
            prev_alpha = false;
        } else if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}
