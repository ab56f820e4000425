//! Error types surfaced while loading package manifests.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the package manifest.
///
/// Missing or unreadable manifests are not errors; they resolve to an empty package set.
#[derive(Debug, Error)]
pub enum ManifestError {
  /// The manifest file was readable but did not contain valid JSON.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    #[source]
    source: serde_json::Error,
  },
}
