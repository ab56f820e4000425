//! Loading the package manifest that maps package names to asset groups.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ManifestError;
use crate::models::PackageGroup;

/// Top-level key holding the package-name to group mapping.
const ASSETS_KEY: &str = "assets";

/// Immutable mapping from package name to its declared group.
#[derive(Debug, Clone, Default)]
pub struct PackageManifest {
  groups: BTreeMap<String, PackageGroup>,
}

impl PackageManifest {
  /// Load the manifest from an optional path, yielding an empty manifest when none is configured.
  pub fn load(path: Option<&Path>) -> Result<Self, ManifestError> {
    match path {
      Some(path) => Self::load_from_path(path),
      None => Ok(Self::default()),
    }
  }

  /// Load the manifest from disk.
  ///
  /// A file that cannot be read results in an empty manifest. Content that is not valid JSON
  /// is reported as [`ManifestError::Parse`].
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
    let path = path.as_ref();
    let contents = match fs::read(path) {
      Ok(contents) => contents,
      Err(err) => {
        debug!(path = %path.display(), error = %err, "package manifest unreadable, using empty manifest");
        return Ok(Self::default());
      }
    };

    let manifest = Self::from_slice(&contents).map_err(|source| ManifestError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), packages = manifest.len(), "loaded package manifest");
    Ok(manifest)
  }

  /// Parse manifest JSON from raw bytes.
  pub fn from_slice(contents: &[u8]) -> Result<Self, serde_json::Error> {
    let document: Value = serde_json::from_slice(contents)?;
    Ok(Self::from_document(document))
  }

  /// Interpret an already parsed JSON document.
  ///
  /// Only the object stored under `assets` is considered. Each group field is read on its own,
  /// so a mistyped field is dropped without discarding the rest of the group. Entries that are
  /// not objects are kept as invalid groups so they are still reported as known packages.
  pub fn from_document(document: Value) -> Self {
    let Value::Object(mut root) = document else {
      return Self::default();
    };
    let Some(Value::Object(assets)) = root.remove(ASSETS_KEY) else {
      return Self::default();
    };

    assets
      .into_iter()
      .map(|(name, value)| {
        let group = read_group(&name, &value);
        (name, group)
      })
      .collect()
  }

  /// Look up the group declared for a package.
  pub fn get(&self, name: &str) -> Option<&PackageGroup> {
    self.groups.get(name)
  }

  /// Returns `true` when the package is declared, regardless of whether it is valid.
  pub fn contains(&self, name: &str) -> bool {
    self.groups.contains_key(name)
  }

  /// Declared package names in sorted order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.groups.keys().map(String::as_str)
  }

  /// Number of declared packages.
  pub fn len(&self) -> usize {
    self.groups.len()
  }

  /// Returns `true` when no packages are declared.
  pub fn is_empty(&self) -> bool {
    self.groups.is_empty()
  }
}

fn read_group(name: &str, value: &Value) -> PackageGroup {
  let Value::Object(fields) = value else {
    debug!(package = name, "package group is not an object");
    return PackageGroup::default();
  };

  let file_name = fields.get("fileName").and_then(Value::as_str).map(str::to_string);
  let input = fields.get("input").and_then(Value::as_array).map(|entries| {
    entries
      .iter()
      .filter_map(Value::as_str)
      .map(str::to_string)
      .collect()
  });
  let attr = fields.get("attr").and_then(Value::as_object).map(|entries| {
    entries
      .iter()
      .filter_map(|(key, value)| scalar_to_string(value).map(|value| (key.clone(), value)))
      .collect()
  });

  PackageGroup {
    file_name,
    input,
    attr,
  }
}

fn scalar_to_string(value: &Value) -> Option<String> {
  match value {
    Value::String(value) => Some(value.clone()),
    Value::Number(value) => Some(value.to_string()),
    Value::Bool(value) => Some(value.to_string()),
    _ => None,
  }
}

impl FromIterator<(String, PackageGroup)> for PackageManifest {
  fn from_iter<I: IntoIterator<Item = (String, PackageGroup)>>(iter: I) -> Self {
    Self {
      groups: iter.into_iter().collect(),
    }
  }
}
