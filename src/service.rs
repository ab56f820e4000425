//! The asset revision service handed to the view helpers.

use std::path::{Path, PathBuf};

use crate::config::RevisionConfig;
use crate::error::ManifestError;
use crate::models::PackageFiles;
use crate::packages::{PackageManifest, PackageResolver};
use crate::revision::RevisionRewriter;

/// Operations the helpers rely on for package lookup and cache busting.
pub trait AssetRevisioning {
  /// Returns `true` when the package is declared in the manifest.
  fn has_package(&self, name: &str) -> bool;
  /// Resolve a package into its files and attributes.
  fn package_files(&self, name: &str) -> PackageFiles;
  /// Whether a reference of the given kind should receive a revision marker.
  fn is_eligible(&self, kind: &str, href: &str) -> bool;
  /// Embed the revision marker into a path.
  fn rewrite(&self, path: &str) -> String;
  /// The revision postfix alone.
  fn revision_string(&self) -> &str;
}

/// Package resolver and revision rewriter built from one configuration.
#[derive(Debug, Clone, Default)]
pub struct AssetRevision {
  resolver: PackageResolver,
  rewriter: RevisionRewriter,
}

impl AssetRevision {
  /// Build the service, loading the manifest once.
  ///
  /// Fails only when the manifest exists but does not contain valid JSON.
  pub fn new(
    manifest_path: Option<&Path>,
    public_dir: Option<PathBuf>,
    revision: Option<&str>,
    enabled: bool,
  ) -> Result<Self, ManifestError> {
    let manifest = PackageManifest::load(manifest_path)?;
    Ok(Self::from_parts(
      PackageResolver::new(manifest, public_dir, enabled),
      RevisionRewriter::from_revision(revision),
    ))
  }

  /// Build the service from a configuration supplier.
  pub fn from_config<C: RevisionConfig + ?Sized>(config: &C) -> Result<Self, ManifestError> {
    Self::new(
      config.manifest_path(),
      config.public_dir().map(Path::to_path_buf),
      config.revision(),
      config.is_enabled(),
    )
  }

  /// Assemble the service from already constructed parts.
  pub fn from_parts(resolver: PackageResolver, rewriter: RevisionRewriter) -> Self {
    Self { resolver, rewriter }
  }

  /// Whether merged artifacts may replace package inputs.
  pub fn is_enabled(&self) -> bool {
    self.resolver.is_enabled()
  }

  /// Revision token in use.
  pub fn revision(&self) -> &str {
    self.rewriter.revision()
  }

  /// Underlying package resolver.
  pub fn resolver(&self) -> &PackageResolver {
    &self.resolver
  }

  /// Underlying revision rewriter.
  pub fn rewriter(&self) -> &RevisionRewriter {
    &self.rewriter
  }
}

impl AssetRevisioning for AssetRevision {
  fn has_package(&self, name: &str) -> bool {
    self.resolver.has_package(name)
  }

  fn package_files(&self, name: &str) -> PackageFiles {
    self.resolver.package_files(name)
  }

  fn is_eligible(&self, kind: &str, href: &str) -> bool {
    self.rewriter.is_eligible(kind, href)
  }

  fn rewrite(&self, path: &str) -> String {
    self.rewriter.rewrite(path)
  }

  fn revision_string(&self) -> &str {
    self.rewriter.revision_string()
  }
}
