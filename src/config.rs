//! Revision configuration supplying the enabled flag, token and filesystem locations.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// Configuration file names searched for by [`RevisionSettings::discover`].
pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
  "asset-revision.json",
  "asset-revision.yaml",
  "asset-revision.yml",
];

/// Value supplier consumed when building an [`crate::AssetRevision`].
pub trait RevisionConfig {
  /// Whether merged artifacts should replace individual package files.
  fn is_enabled(&self) -> bool;
  /// Revision token embedded into file names, if configured.
  fn revision(&self) -> Option<&str>;
  /// Location of the package manifest JSON, if configured.
  fn manifest_path(&self) -> Option<&Path>;
  /// Public document root containing `js/min/`, if configured.
  fn public_dir(&self) -> Option<&Path>;
}

/// File-backed revision configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RevisionSettings {
  /// Enables merged-artifact lookups.
  pub enabled: bool,
  /// Revision token; `None` falls back to the default revision.
  pub revision: Option<String>,
  /// Path to the package manifest.
  #[serde(alias = "manifestPath", alias = "groupsFile")]
  pub manifest_path: Option<PathBuf>,
  /// Public document root.
  #[serde(alias = "publicDir")]
  pub public_dir: Option<PathBuf>,
}

impl RevisionSettings {
  /// Attempt to load configuration from the provided directory.
  ///
  /// The first readable configuration file wins; when none is found the defaults apply.
  pub fn discover(dir: &Path) -> Self {
    DEFAULT_CONFIG_FILES
      .iter()
      .map(|name| dir.join(name))
      .find_map(|candidate| Self::from_path(&candidate))
      .unwrap_or_default()
  }

  /// Read configuration from a JSON or YAML file, chosen by extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
      Some("yaml" | "yml") => serde_yaml::from_str(&content).map_err(|err| err.to_string()),
      _ => serde_json::from_str(&content).map_err(|err| err.to_string()),
    };

    match parsed {
      Ok(settings) => Some(settings),
      Err(err) => {
        debug!(path = %path.display(), error = %err, "ignoring unparseable revision config");
        None
      }
    }
  }
}

impl RevisionConfig for RevisionSettings {
  fn is_enabled(&self) -> bool {
    self.enabled
  }

  fn revision(&self) -> Option<&str> {
    self.revision.as_deref()
  }

  fn manifest_path(&self) -> Option<&Path> {
    self.manifest_path.as_deref()
  }

  fn public_dir(&self) -> Option<&Path> {
    self.public_dir.as_deref()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    assert_eq!(RevisionSettings::discover(temp.path()), RevisionSettings::default());
  }

  #[test]
  fn reads_json_with_camel_case_keys() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("asset-revision.json");
    fs::write(
      &path,
      r#"{"enabled": true, "revision": "42", "manifestPath": "assets.json", "publicDir": "public"}"#,
    )
    .unwrap();

    let settings = RevisionSettings::discover(temp.path());
    assert!(settings.is_enabled());
    assert_eq!(settings.revision(), Some("42"));
    assert_eq!(settings.manifest_path(), Some(Path::new("assets.json")));
    assert_eq!(settings.public_dir(), Some(Path::new("public")));
  }

  #[test]
  fn reads_yaml() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("asset-revision.yaml");
    fs::write(&path, "enabled: false\nmanifest_path: config/assets.json\n").unwrap();

    let settings = RevisionSettings::discover(temp.path());
    assert!(!settings.is_enabled());
    assert_eq!(settings.revision(), None);
    assert_eq!(settings.manifest_path(), Some(Path::new("config/assets.json")));
  }

  #[test]
  fn unparseable_file_is_ignored() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("asset-revision.json");
    fs::write(&path, "not json").unwrap();

    assert!(RevisionSettings::from_path(&path).is_none());
    assert_eq!(RevisionSettings::discover(temp.path()), RevisionSettings::default());
  }
}
