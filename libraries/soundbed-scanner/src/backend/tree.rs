//! Tree-handle backend
//!
//! Some platforms only hand out permission-scoped folder grants identified by
//! a URI (`content://...`). The host implements [`DocumentTree`] over its
//! native API and Soundbed treats the returned locators as opaque.

use super::{DirectoryBackend, Entry};
use crate::error::{Result, ScanError};
use std::sync::Arc;
use url::Url;

/// Host-provided access to a permission-scoped folder tree
#[cfg_attr(test, mockall::automock)]
pub trait DocumentTree: Send + Sync {
    /// List the immediate children of the folder identified by `tree`
    fn list_children(&self, tree: &Url) -> Result<Vec<Entry>>;
}

/// Adapts a [`DocumentTree`] to [`DirectoryBackend`]
#[derive(Clone)]
pub struct TreeBackend {
    tree: Arc<dyn DocumentTree>,
}

impl TreeBackend {
    /// Wrap a host tree implementation
    pub fn new(tree: Arc<dyn DocumentTree>) -> Self {
        Self { tree }
    }

}

impl std::fmt::Debug for TreeBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBackend").finish_non_exhaustive()
    }
}

impl DirectoryBackend for TreeBackend {
    fn name(&self) -> &'static str {
        "document-tree"
    }

    fn list_entries(&self, location: &str) -> Result<Vec<Entry>> {
        let url = Url::parse(location)
            .map_err(|e| ScanError::InvalidLocation(format!("{location}: {e}")))?;
        self.tree.list_children(&url)
    }
}
