//! Soundbed - Track Scanner
//!
//! Discovers audio files in a single folder. The folder is either a plain
//! filesystem path or a URI understood by a host-provided [`DocumentTree`]
//! (for example a permission-scoped directory grant).
//!
//! Scanning is best effort: [`TrackScanner::scan`] never fails, it logs and
//! returns an empty list instead. Use [`TrackScanner::try_scan`] to see why a
//! folder could not be read.
//!
//! # Example
//!
//! ```rust,no_run
//! use soundbed_scanner::TrackScanner;
//!
//! let scanner = TrackScanner::new();
//! for track in scanner.scan("/home/me/Music/ambient") {
//!     println!("{track}");
//! }
//! ```

mod backend;
mod error;
mod scanner;

pub use backend::{DirectoryBackend, DocumentTree, Entry, FsBackend, TreeBackend};
pub use error::{Result, ScanError};
pub use scanner::{is_audio_file, Location, TrackScanner, AUDIO_EXTENSIONS};
