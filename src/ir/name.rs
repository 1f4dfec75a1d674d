//! Qualified names used as metadata keys.
//!
//! A qualified name is one to sixteen dot-separated segments. Each segment
//! starts with a lowercase ASCII letter; the first segment may be followed by
//! up to 63 and the others by up to 62 characters from `[a-z0-9_-]`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_\-]{0,63}(\.[a-z][a-z0-9_\-]{0,62}){0,15}$")
        .expect("qualified name pattern is valid")
});

/// A metadata key.
///
/// Construction does not check the pattern; [`QualifiedName::is_valid`] and
/// manifest validation do.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualifiedName(pub String);

impl QualifiedName {
    /// Creates a new name without checking it.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the name matches the qualified name pattern.
    pub fn is_valid(&self) -> bool {
        is_qualified_name(&self.0)
    }
}

/// Returns true if `text` matches the qualified name pattern.
pub fn is_qualified_name(text: &str) -> bool {
    QUALIFIED_NAME.is_match(text)
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({:?})", self.0)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
