//! Flyer identity.
//!
//! A flyer is identified by an opaque string (typically a UUID). The id is
//! assigned once at construction and never changes.

use std::borrow::Borrow;
use std::fmt;

/// Opaque unique identifier of a flyer.
///
/// Ids are ordered lexicographically, which is what the registry relies on
/// to break ties deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FlyerId(String);

impl FlyerId {
    /// Create an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FlyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FlyerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FlyerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for FlyerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FlyerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
