//! Type definitions for structural paths.

use std::borrow::Cow;
use std::fmt;

use crate::util::is_valid_index;

/// A single step in a path.
///
/// Object fields are addressed by `Key`, array slots by `Index`. A numeral
/// key such as `"2"` is also accepted wherever an array index is expected;
/// see [`PathStep::as_index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A path from the document root. The root itself is the empty path.
pub type Path = Vec<PathStep>;

impl PathStep {
    pub fn key(k: impl Into<String>) -> Self {
        PathStep::Key(k.into())
    }

    pub fn index(i: usize) -> Self {
        PathStep::Index(i)
    }

    /// The array index this step denotes, if any.
    ///
    /// Both native indices and numeral keys (`"0"`, `"17"`, no sign or
    /// leading zeros) qualify.
    ///
    /// ```
    /// use jsonc_edit_path::PathStep;
    ///
    /// assert_eq!(PathStep::Index(3).as_index(), Some(3));
    /// assert_eq!(PathStep::key("3").as_index(), Some(3));
    /// assert_eq!(PathStep::key("03").as_index(), None);
    /// assert_eq!(PathStep::key("name").as_index(), None);
    /// ```
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(i) => Some(*i),
            PathStep::Key(k) if is_valid_index(k) => k.parse().ok(),
            PathStep::Key(_) => None,
        }
    }

    /// The object key this step denotes. Indices render as decimal strings.
    pub fn to_key(&self) -> Cow<'_, str> {
        match self {
            PathStep::Key(k) => Cow::Borrowed(k),
            PathStep::Index(i) => Cow::Owned(i.to_string()),
        }
    }

    /// Returns true for native `Index` steps only.
    pub fn is_index(&self) -> bool {
        matches!(self, PathStep::Index(_))
    }

    /// Equality that treats `Index(n)` and `Key("n")` as the same step.
    pub fn same_as(&self, other: &PathStep) -> bool {
        match (self, other) {
            (PathStep::Key(a), PathStep::Key(b)) => a == b,
            (PathStep::Index(a), PathStep::Index(b)) => a == b,
            _ => self.as_index().is_some() && self.as_index() == other.as_index(),
        }
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Key(k) => f.write_str(k),
            PathStep::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<String> for PathStep {
    fn from(s: String) -> Self {
        PathStep::Key(s)
    }
}

impl From<&str> for PathStep {
    fn from(s: &str) -> Self {
        PathStep::Key(s.to_owned())
    }
}

impl From<usize> for PathStep {
    fn from(i: usize) -> Self {
        PathStep::Index(i)
    }
}
