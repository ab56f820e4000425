//! Resolution of package names into the concrete list of files to include.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::models::{PackageFiles, PackageGroup};
use crate::packages::PackageManifest;

/// Directory below the public root holding pre-built merged artifacts.
pub const MERGED_ARTIFACT_DIR: &str = "js/min";

/// Resolves package names against an immutable manifest.
///
/// The resolver holds no mutable state: every call to [`PackageResolver::package_files`]
/// tracks visited packages locally, so a single instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct PackageResolver {
  manifest: PackageManifest,
  public_dir: Option<PathBuf>,
  enabled: bool,
}

impl PackageResolver {
  /// Create a resolver over an already loaded manifest.
  pub fn new(manifest: PackageManifest, public_dir: Option<PathBuf>, enabled: bool) -> Self {
    Self {
      manifest,
      public_dir,
      enabled,
    }
  }

  /// Returns `true` when the package is declared, even if its group is invalid.
  pub fn has_package(&self, name: &str) -> bool {
    self.manifest.contains(name)
  }

  /// Whether merged artifacts may replace the individual input files.
  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Public directory merged artifacts are looked up in.
  pub fn public_dir(&self) -> Option<&Path> {
    self.public_dir.as_deref()
  }

  /// Manifest the resolver was built from.
  pub fn manifest(&self) -> &PackageManifest {
    &self.manifest
  }

  /// Resolve a package into its files and attributes.
  ///
  /// Unknown and invalid packages resolve to an empty result. When merging is enabled and the
  /// merged artifact exists below the public directory, only that artifact is returned.
  /// Otherwise the inputs are expanded depth-first, replacing references to other packages
  /// with their own inputs and skipping packages already expanded during this call.
  pub fn package_files(&self, name: &str) -> PackageFiles {
    let Some(group) = self.manifest.get(name).filter(|group| group.is_valid()) else {
      debug!(package = name, "unknown or invalid package");
      return PackageFiles::empty();
    };

    if let Some(merged) = self.merged_artifact(group) {
      debug!(package = name, file = %merged, "using merged artifact");
      return PackageFiles {
        files: vec![merged],
        attr: group.attributes(),
      };
    }

    let mut visited = BTreeSet::from([name]);
    let mut files = Vec::new();
    self.expand_inputs(group.inputs(), &mut visited, &mut files);

    PackageFiles {
      files,
      attr: group.attributes(),
    }
  }

  fn merged_artifact(&self, group: &PackageGroup) -> Option<String> {
    if !self.enabled {
      return None;
    }

    let public_dir = self.public_dir.as_deref()?;
    let file_name = group.file_name.as_deref()?;
    let relative = format!("/{MERGED_ARTIFACT_DIR}/{file_name}");

    // Concatenated rather than joined: an absolute file name must stay below the public dir.
    let mut candidate = public_dir.as_os_str().to_os_string();
    candidate.push(&relative);

    Path::new(&candidate).exists().then_some(relative)
  }

  fn expand_inputs<'a>(
    &'a self,
    inputs: &'a [String],
    visited: &mut BTreeSet<&'a str>,
    files: &mut Vec<String>,
  ) {
    for entry in inputs {
      if visited.contains(entry.as_str()) {
        trace!(package = %entry, "skipping already expanded package");
        continue;
      }

      match self.manifest.get(entry) {
        None => files.push(entry.clone()),
        Some(group) => {
          visited.insert(entry.as_str());
          self.expand_inputs(group.inputs(), visited, files);
        }
      }
    }
  }
}
