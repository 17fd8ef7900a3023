//! Domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Locator of a single audio file
///
/// Either a filesystem path or a URI handed out by a tree backend. The
/// locator string is the identity: two refs are equal iff their locators are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackRef(String);

impl TrackRef {
    /// Create a track reference from a locator string
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// Get the locator string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the locator carries a URI scheme (`scheme://...`)
    pub fn is_uri(&self) -> bool {
        has_uri_scheme(&self.0)
    }

    /// Filesystem path of this track, if the locator is a plain path
    pub fn as_path(&self) -> Option<PathBuf> {
        if self.is_uri() {
            None
        } else {
            Some(PathBuf::from(&self.0))
        }
    }

    /// Last segment of the locator
    pub fn file_name(&self) -> Option<&str> {
        self.0
            .rsplit(['/', '\\'])
            .next()
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether `locator` starts with a URI scheme such as `content://`
///
/// The scheme must begin with a letter and contain only letters, digits,
/// `+`, `-` or `.`. A Windows drive prefix (`C:\`) is not a scheme.
pub fn has_uri_scheme(locator: &str) -> bool {
    let Some((scheme, _)) = locator.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
