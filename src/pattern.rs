//! Pattern values and their constructors.
//!
//! A [`Pattern`] is a cheap handle onto an immutable node. Cloning a pattern
//! clones the handle, so composites built from the same child share it
//! instead of copying the subtree. The named patterns in
//! [`named`](crate::named) rely on this: `TCP` is one node reachable from
//! `HTTP`, `WebSockets`, `Reliable` and more.

use std::fmt;
use std::sync::Arc;

/// The closed set of matcher kinds.
#[derive(Debug, PartialEq, Eq)]
pub enum PatternKind {
    /// Exactly one protocol token with this name.
    Base(String),
    /// Children consume the input left to right, each taking a prefix of
    /// what the previous one left.
    And(Vec<Pattern>),
    /// First child (in listed order) that matches a prefix wins.
    Or(Vec<Pattern>),
}

/// An immutable, shareable address pattern.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    node: Arc<PatternKind>,
}

impl Pattern {
    fn from_kind(kind: PatternKind) -> Self {
        Self {
            node: Arc::new(kind),
        }
    }

    /// Matches the single protocol token `name`. Any string is accepted.
    pub fn base(name: impl Into<String>) -> Self {
        Self::from_kind(PatternKind::Base(name.into()))
    }

    /// Ordered concatenation of `children`.
    ///
    /// A single-child sequence is legal and behaves like its child.
    pub fn and(children: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::And(children.into_iter().collect()))
    }

    /// Ordered alternatives; see [`Pattern::partial_match`] for tie-breaking.
    pub fn or(children: impl IntoIterator<Item = Pattern>) -> Self {
        Self::from_kind(PatternKind::Or(children.into_iter().collect()))
    }

    /// The node's matcher kind, for exhaustive inspection.
    pub fn kind(&self) -> &PatternKind {
        &self.node
    }

    /// Child patterns of a composite; empty for a base pattern.
    pub fn children(&self) -> &[Pattern] {
        match self.kind() {
            PatternKind::Base(_) => &[],
            PatternKind::And(children) | PatternKind::Or(children) => children,
        }
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Pattern) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

/// Shorthand for [`Pattern::base`].
pub fn base(name: impl Into<String>) -> Pattern {
    Pattern::base(name)
}

/// Shorthand for [`Pattern::and`].
pub fn and(children: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::and(children)
}

/// Shorthand for [`Pattern::or`].
pub fn or(children: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::or(children)
}

fn write_group(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    children: &[Pattern],
) -> fmt::Result {
    f.write_str(open)?;
    for child in children {
        write!(f, " {child}")?;
    }
    write!(f, " {close}")
}

/// Diagnostic rendering: a base prints its name, an alternative prints
/// `{ a b }` and a sequence prints `( a b )`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PatternKind::Base(name) => f.write_str(name),
            PatternKind::And(children) => write_group(f, "(", ")", children),
            PatternKind::Or(children) => write_group(f, "{", "}", children),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PatternKind::Base(name) => f.debug_tuple("Base").field(name).finish(),
            PatternKind::And(children) => f.debug_tuple("And").field(children).finish(),
            PatternKind::Or(children) => f.debug_tuple("Or").field(children).finish(),
        }
    }
}
