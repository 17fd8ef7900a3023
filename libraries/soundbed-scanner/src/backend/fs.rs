//! Plain filesystem backend

use super::{DirectoryBackend, Entry};
use crate::error::{Result, ScanError};
use std::path::Path;
use walkdir::WalkDir;

/// Lists a local directory with `walkdir`, one level deep
///
/// Symbolic links are followed so a link to an audio file counts as a file.
/// Entries come back sorted by file name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBackend;

impl FsBackend {
    /// Create a filesystem backend
    pub fn new() -> Self {
        Self
    }

    /// List entries of `path`
    fn list_path(&self, path: &Path) -> Result<Vec<Entry>> {
        if !path.exists() {
            return Err(ScanError::NotFound(path.to_path_buf()));
        }

        if !path.is_dir() {
            return Err(ScanError::NotADirectory(path.to_path_buf()));
        }

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Failing to open the folder itself fails the scan
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            entries.push(Entry {
                name: entry.file_name().to_string_lossy().into_owned(),
                locator: entry.path().to_string_lossy().into_owned(),
                is_file: entry.file_type().is_file(),
            });
        }

        Ok(entries)
    }
}

impl DirectoryBackend for FsBackend {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    fn list_entries(&self, location: &str) -> Result<Vec<Entry>> {
        self.list_path(Path::new(location))
    }
}
