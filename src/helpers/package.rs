//! Resolution shared by every helper: package files turned into revised base URLs.

use crate::helpers::url::UrlBuilder;
use crate::models::{AttributeMap, PackageFiles, ResourceKind};
use crate::service::AssetRevisioning;

/// Revised URLs of a package together with its attributes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct PackageUrls {
  pub urls: Vec<String>,
  pub attr: AttributeMap,
}

/// Resolve a package and turn each file into a base URL carrying the revision marker.
///
/// Empty file entries and URLs that collapse to the site root are dropped.
pub(crate) fn package_urls<R, U>(
  revision: &R,
  urls: &U,
  kind: ResourceKind,
  package: &str,
  clear_query: bool,
) -> PackageUrls
where
  R: AssetRevisioning + ?Sized,
  U: UrlBuilder + ?Sized,
{
  let PackageFiles { files, attr } = revision.package_files(package);

  let urls = files
    .iter()
    .filter(|file| !file.is_empty())
    .filter_map(|file| {
      let uri = urls.base_url(file, false, clear_query);
      if uri.is_empty() || uri == "/" {
        return None;
      }
      Some(stamp(revision, kind, uri))
    })
    .collect();

  PackageUrls { urls, attr }
}

/// Apply the revision marker when the reference qualifies for it.
pub(crate) fn stamp<R: AssetRevisioning + ?Sized>(
  revision: &R,
  kind: ResourceKind,
  href: String,
) -> String {
  if revision.is_eligible(kind.as_str(), &href) {
    revision.rewrite(&href)
  } else {
    href
  }
}

/// Package attributes overlaid with the caller's, the caller winning on conflicts.
pub(crate) fn merge_attributes(package: &AttributeMap, caller: &AttributeMap) -> AttributeMap {
  let mut merged = package.clone();
  merged.extend(caller.iter().map(|(key, value)| (key.clone(), value.clone())));
  merged
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::helpers::url::BaseUrl;
  use crate::revision::RevisionRewriter;

  struct FixedPackage {
    files: Vec<&'static str>,
    rewriter: RevisionRewriter,
  }

  impl AssetRevisioning for FixedPackage {
    fn has_package(&self, name: &str) -> bool {
      name == "fixed"
    }

    fn package_files(&self, name: &str) -> PackageFiles {
      if !self.has_package(name) {
        return PackageFiles::empty();
      }
      PackageFiles {
        files: self.files.iter().map(|file| file.to_string()).collect(),
        attr: [("defer".to_string(), "defer".to_string())].into_iter().collect(),
      }
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

  #[test]
  fn skips_empty_and_root_entries() {
    let revision = FixedPackage {
      files: vec!["", "/", "/js/a.js", "/js/b__1.js"],
      rewriter: RevisionRewriter::new("5"),
    };

    let resolved = package_urls(&revision, &BaseUrl::new(), ResourceKind::Js, "fixed", false);
    assert_eq!(resolved.urls, vec!["/js/a__5.js", "/js/b__1.js"]);
    assert_eq!(resolved.attr.get("defer").map(String::as_str), Some("defer"));
  }

  #[test]
  fn unknown_package_yields_no_urls() {
    let revision = FixedPackage {
      files: vec!["/js/a.js"],
      rewriter: RevisionRewriter::default(),
    };

    let resolved = package_urls(&revision, &BaseUrl::new(), ResourceKind::Js, "other", false);
    assert_eq!(resolved, PackageUrls::default());
  }

  #[test]
  fn caller_attributes_override_package_attributes() {
    let package: AttributeMap = [("defer", "defer"), ("id", "package")]
      .into_iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    let caller: AttributeMap = [("id".to_string(), "caller".to_string())].into_iter().collect();

    let merged = merge_attributes(&package, &caller);
    assert_eq!(merged.get("id").map(String::as_str), Some("caller"));
    assert_eq!(merged.get("defer").map(String::as_str), Some("defer"));
  }
}
