//! Script helper adding revised package files to head or inline script lists.

use crate::helpers::ElementList;
use crate::helpers::package::{merge_attributes, package_urls, stamp};
use crate::helpers::url::{UrlBuilder, get_url};
use crate::models::{AttributeMap, ResourceKind};
use crate::service::AssetRevisioning;

/// Where the rendered script tags end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPlacement {
  /// Inside the document head.
  Head,
  /// Inline in the document body.
  Inline,
}

/// One script file queued for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptItem {
  /// Final script URL.
  pub src: String,
  /// Script MIME type.
  pub script_type: String,
  /// Additional script attributes.
  pub attributes: AttributeMap,
  /// List the script belongs to.
  pub placement: ScriptPlacement,
}

/// Options applied to every script added in one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
  /// Script type, `text/javascript` by default.
  pub script_type: String,
  /// Extra attributes, overriding package attributes.
  pub attrs: AttributeMap,
  /// Qualify URLs with the server origin.
  pub absolute: bool,
  /// Prefix inserted in front of every path.
  pub path_prefix: String,
  /// Drop the current request's query string from package URLs.
  pub clear_query: bool,
}

impl Default for ScriptOptions {
  fn default() -> Self {
    Self {
      script_type: "text/javascript".into(),
      attrs: AttributeMap::new(),
      absolute: true,
      path_prefix: String::new(),
      clear_query: false,
    }
  }
}

/// Adds scripts and script packages to a script list, stamping revisions on the way.
///
/// The same adapter serves head scripts and inline scripts; only the target list and the
/// recorded [`ScriptPlacement`] differ.
pub struct RevisionScript<'a, R: ?Sized, U: ?Sized, L> {
  revision: &'a R,
  urls: &'a U,
  elements: &'a mut L,
  placement: ScriptPlacement,
}

impl<'a, R, U, L> RevisionScript<'a, R, U, L>
where
  R: AssetRevisioning + ?Sized,
  U: UrlBuilder + ?Sized,
  L: ElementList<ScriptItem>,
{
  /// Helper writing into the head script list.
  pub fn head(revision: &'a R, urls: &'a U, elements: &'a mut L) -> Self {
    Self::with_placement(revision, urls, elements, ScriptPlacement::Head)
  }

  /// Helper writing into the inline script list.
  pub fn inline(revision: &'a R, urls: &'a U, elements: &'a mut L) -> Self {
    Self::with_placement(revision, urls, elements, ScriptPlacement::Inline)
  }

  fn with_placement(
    revision: &'a R,
    urls: &'a U,
    elements: &'a mut L,
    placement: ScriptPlacement,
  ) -> Self {
    Self {
      revision,
      urls,
      elements,
      placement,
    }
  }

  /// Append every file of a package.
  pub fn append_package(&mut self, package: &str, options: &ScriptOptions) -> &mut Self {
    for item in self.list_package(package, options) {
      self.elements.append(item);
    }
    self
  }

  /// Prepend every file of a package, keeping the package's own order at the head.
  pub fn prepend_package(&mut self, package: &str, options: &ScriptOptions) -> &mut Self {
    for item in self.list_package(package, options).into_iter().rev() {
      self.elements.prepend(item);
    }
    self
  }

  /// Items a package would add, without touching the script list.
  pub fn list_package(&self, package: &str, options: &ScriptOptions) -> Vec<ScriptItem> {
    let resolved = package_urls(
      self.revision,
      self.urls,
      ResourceKind::Js,
      package,
      options.clear_query,
    );
    let attributes = merge_attributes(&resolved.attr, &options.attrs);

    resolved
      .urls
      .into_iter()
      .map(|src| self.item(&src, options, attributes.clone()))
      .collect()
  }

  /// Append a single script, stamping it first when `add_revision` is set.
  pub fn append_file(&mut self, src: &str, options: &ScriptOptions, add_revision: bool) -> &mut Self {
    let item = self.single(src, options, add_revision);
    self.elements.append(item);
    self
  }

  /// Prepend a single script, stamping it first when `add_revision` is set.
  pub fn prepend_file(&mut self, src: &str, options: &ScriptOptions, add_revision: bool) -> &mut Self {
    let item = self.single(src, options, add_revision);
    self.elements.prepend(item);
    self
  }

  fn single(&self, src: &str, options: &ScriptOptions, add_revision: bool) -> ScriptItem {
    let src = if add_revision {
      stamp(self.revision, ResourceKind::Js, src.to_string())
    } else {
      src.to_string()
    };
    self.item(&src, options, options.attrs.clone())
  }

  fn item(&self, src: &str, options: &ScriptOptions, attributes: AttributeMap) -> ScriptItem {
    ScriptItem {
      src: get_url(self.urls, src, options.absolute, &options.path_prefix),
      script_type: options.script_type.clone(),
      attributes,
      placement: self.placement,
    }
  }
}
