use std::sync::OnceLock;

use regex::Regex;

use crate::models::ResourceKind;

fn revision_marker() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| Regex::new(r"__[0-9a-f]+").expect("invalid revision marker regex"))
}

/// Returns `true` when the value already carries a `__<hex>` revision marker.
pub fn has_revision_marker(value: &str) -> bool {
  revision_marker().is_match(value)
}

/// Determine whether an asset reference may receive a revision marker.
///
/// Only root-relative references of a supported kind qualify, and references that were
/// already stamped are rejected so a marker is never applied twice.
pub fn is_eligible(kind: &str, href: &str) -> bool {
  if href.is_empty() || has_revision_marker(href) {
    return false;
  }

  ResourceKind::parse(kind).is_some() && href.starts_with('/')
}
