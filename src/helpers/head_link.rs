//! Stylesheet helper adding revised package files to a head link list.

use crate::helpers::ElementList;
use crate::helpers::package::{merge_attributes, package_urls, stamp};
use crate::helpers::url::{UrlBuilder, get_url};
use crate::models::{AttributeMap, ResourceKind};
use crate::service::AssetRevisioning;

/// One stylesheet link queued for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetItem {
  /// Final stylesheet URL.
  pub href: String,
  /// Media query the stylesheet applies to.
  pub media: String,
  /// Optional conditional-comment expression.
  pub conditional: Option<String>,
  /// Additional link attributes.
  pub extras: AttributeMap,
}

/// Options applied to every stylesheet added in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylesheetOptions {
  /// Media attribute, `screen` by default.
  pub media: String,
  /// Optional conditional-comment expression.
  pub conditional: Option<String>,
  /// Extra attributes; `rel` is always dropped.
  pub extras: AttributeMap,
  /// Qualify URLs with the server origin.
  pub absolute: bool,
  /// Prefix inserted in front of every path.
  pub path_prefix: String,
  /// Drop the current request's query string from package URLs.
  pub clear_query: bool,
}

impl Default for StylesheetOptions {
  fn default() -> Self {
    Self {
      media: "screen".into(),
      conditional: None,
      extras: AttributeMap::new(),
      absolute: true,
      path_prefix: String::new(),
      clear_query: false,
    }
  }
}

/// Adds stylesheets and stylesheet packages to a link list, stamping revisions on the way.
pub struct RevisionHeadLink<'a, R: ?Sized, U: ?Sized, L> {
  revision: &'a R,
  urls: &'a U,
  elements: &'a mut L,
}

impl<'a, R, U, L> RevisionHeadLink<'a, R, U, L>
where
  R: AssetRevisioning + ?Sized,
  U: UrlBuilder + ?Sized,
  L: ElementList<StylesheetItem>,
{
  /// Create a helper writing into the given link list.
  pub fn new(revision: &'a R, urls: &'a U, elements: &'a mut L) -> Self {
    Self {
      revision,
      urls,
      elements,
    }
  }

  /// Append every file of a package.
  pub fn append_package(&mut self, package: &str, options: &StylesheetOptions) -> &mut Self {
    for item in self.list_package(package, options) {
      self.elements.append(item);
    }
    self
  }

  /// Prepend every file of a package, keeping the package's own order at the head.
  pub fn prepend_package(&mut self, package: &str, options: &StylesheetOptions) -> &mut Self {
    for item in self.list_package(package, options).into_iter().rev() {
      self.elements.prepend(item);
    }
    self
  }

  /// Items a package would add, without touching the link list.
  pub fn list_package(&self, package: &str, options: &StylesheetOptions) -> Vec<StylesheetItem> {
    let resolved = package_urls(
      self.revision,
      self.urls,
      ResourceKind::Css,
      package,
      options.clear_query,
    );

    resolved
      .urls
      .into_iter()
      .map(|href| self.item(&href, options, &resolved.attr))
      .collect()
  }

  /// Append a single stylesheet, stamping it first when `add_revision` is set.
  pub fn append_stylesheet(
    &mut self,
    href: &str,
    options: &StylesheetOptions,
    add_revision: bool,
  ) -> &mut Self {
    let item = self.single(href, options, add_revision);
    self.elements.append(item);
    self
  }

  /// Prepend a single stylesheet, stamping it first when `add_revision` is set.
  pub fn prepend_stylesheet(
    &mut self,
    href: &str,
    options: &StylesheetOptions,
    add_revision: bool,
  ) -> &mut Self {
    let item = self.single(href, options, add_revision);
    self.elements.prepend(item);
    self
  }

  fn single(&self, href: &str, options: &StylesheetOptions, add_revision: bool) -> StylesheetItem {
    let href = if add_revision {
      stamp(self.revision, ResourceKind::Css, href.to_string())
    } else {
      href.to_string()
    };
    self.item(&href, options, &AttributeMap::new())
  }

  fn item(
    &self,
    href: &str,
    options: &StylesheetOptions,
    package_attr: &AttributeMap,
  ) -> StylesheetItem {
    let mut extras = merge_attributes(package_attr, &options.extras);
    extras.remove("rel");

    StylesheetItem {
      href: get_url(self.urls, href, options.absolute, &options.path_prefix),
      media: options.media.clone(),
      conditional: options.conditional.clone(),
      extras,
    }
  }
}
