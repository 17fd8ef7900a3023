//! Folder scanning for audio files

use crate::backend::{DirectoryBackend, DocumentTree, Entry, FsBackend, TreeBackend};
use crate::error::{Result, ScanError};
use soundbed_core::types::has_uri_scheme;
use soundbed_core::TrackRef;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Supported audio file extensions (matched case-insensitively)
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac", "m4a", "aac"];

/// Where a scan should look, decided by the shape of the source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Plain filesystem folder (also used for `file://` URIs)
    Path(PathBuf),

    /// Folder behind a tree handle
    Tree(Url),
}

impl Location {
    /// Interpret a configured source string
    ///
    /// Anything carrying a URI scheme goes to the tree backend, except
    /// `file://` which is resolved to a local path.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ScanError::InvalidLocation("empty location".to_string()));
        }

        if !has_uri_scheme(source) {
            return Ok(Self::Path(PathBuf::from(source)));
        }

        let url = Url::parse(source)
            .map_err(|e| ScanError::InvalidLocation(format!("{source}: {e}")))?;

        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|()| ScanError::InvalidLocation(source.to_string()))?;
            return Ok(Self::Path(path));
        }

        Ok(Self::Tree(url))
    }

    /// Location string handed to [`DirectoryBackend::list_entries`]
    pub fn locator(&self) -> String {
        match self {
            Self::Path(path) => path.to_string_lossy().into_owned(),
            Self::Tree(url) => url.to_string(),
        }
    }
}

/// Scanner for audio files in a single folder
///
/// Only immediate children are considered. The filesystem backend is always
/// available; tree URIs need a [`DocumentTree`] registered with
/// [`TrackScanner::with_tree`].
#[derive(Debug, Default, Clone)]
pub struct TrackScanner {
    fs: FsBackend,
    tree: Option<TreeBackend>,
}

impl TrackScanner {
    /// Create a scanner with only the filesystem backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the host's tree implementation
    pub fn with_tree(mut self, tree: Arc<dyn DocumentTree>) -> Self {
        self.tree = Some(TreeBackend::new(tree));
        self
    }

    /// Scan `source` for audio files
    ///
    /// Never fails: any error is logged and yields an empty list.
    pub fn scan(&self, source: &str) -> Vec<TrackRef> {
        match self.try_scan(source) {
            Ok(tracks) => {
                tracing::debug!("Found {} audio files in {}", tracks.len(), source);
                tracks
            }
            Err(e) => {
                tracing::warn!("Failed to scan {}: {}", source, e);
                Vec::new()
            }
        }
    }

    /// Scan `source`, reporting why it could not be read
    pub fn try_scan(&self, source: &str) -> Result<Vec<TrackRef>> {
        let location = Location::parse(source)?;
        let backend = self.backend_for(&location)?;

        tracing::trace!("Listing {} via {}", source, backend.name());
        let entries = backend.list_entries(&location.locator())?;

        Ok(filter_tracks(entries))
    }

    /// Backend serving `location`
    pub fn backend_for(&self, location: &Location) -> Result<&dyn DirectoryBackend> {
        match location {
            Location::Path(_) => Ok(&self.fs),
            Location::Tree(url) => self
                .tree
                .as_ref()
                .map(|tree| tree as &dyn DirectoryBackend)
                .ok_or_else(|| ScanError::TreeUnavailable(url.to_string())),
        }
    }
}

/// Keep regular files with an audio extension, in listing order
fn filter_tracks(entries: Vec<Entry>) -> Vec<TrackRef> {
    entries
        .into_iter()
        .filter(|entry| entry.is_file && is_audio_file(&entry.name))
        .map(|entry| TrackRef::new(entry.locator))
        .collect()
}

/// Check if a file name has a supported audio extension
///
/// Matches on the suffix after the last dot, so a bare `.mp3` counts.
pub fn is_audio_file(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    })
}
