//! Storage backends
//!
//! Both backends answer the same question, "what are the immediate children
//! of this folder", and report them as [`Entry`] values.

mod fs;
mod tree;

pub use fs::FsBackend;
pub use tree::{DocumentTree, TreeBackend};

#[cfg(test)]
pub(crate) use tree::MockDocumentTree;

use crate::error::Result;

/// One child of a scanned folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name, including extension
    pub name: String,

    /// Locator that becomes the track identity (path or URI)
    pub locator: String,

    /// Whether the entry is a regular file
    pub is_file: bool,
}

impl Entry {
    /// Create a file entry
    pub fn file(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            is_file: true,
        }
    }

    /// Create a directory entry
    pub fn dir(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
            is_file: false,
        }
    }
}

/// Lists the immediate children of a folder
pub trait DirectoryBackend {
    /// Backend name for logging
    fn name(&self) -> &'static str;

    /// List entries directly under `location` (non-recursive)
    fn list_entries(&self, location: &str) -> Result<Vec<Entry>>;
}
