//! Data structures shared by the package resolver, the revision rewriter and the helpers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Extra attributes applied to every tag rendered for a package.
pub type AttributeMap = BTreeMap<String, String>;

/// A named group of asset files as declared in the package manifest.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageGroup {
  /// Name of the pre-built merged artifact below `<public dir>/js/min/`.
  #[serde(default)]
  pub file_name: Option<String>,
  /// Literal file paths or names of other packages, expanded in order.
  #[serde(default)]
  pub input: Option<Vec<String>>,
  /// Attributes applied to all files of the package. `null` is treated like an absent map.
  #[serde(default)]
  pub attr: Option<AttributeMap>,
}

impl PackageGroup {
  /// A group is usable only when it names a merged artifact and lists at least one input.
  pub fn is_valid(&self) -> bool {
    let has_file_name = self.file_name.as_deref().is_some_and(|name| !name.is_empty());
    let has_input = self.input.as_ref().is_some_and(|input| !input.is_empty());
    has_file_name && has_input
  }

  /// Inputs of the group, empty when none were declared.
  pub fn inputs(&self) -> &[String] {
    self.input.as_deref().unwrap_or_default()
  }

  /// Attributes of the group, empty when absent or `null`.
  pub fn attributes(&self) -> AttributeMap {
    self.attr.clone().unwrap_or_default()
  }
}

/// Files and attributes resolved for one package.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PackageFiles {
  /// Ordered list of asset paths to include.
  pub files: Vec<String>,
  /// Attributes to apply to each included file.
  pub attr: AttributeMap,
}

impl PackageFiles {
  /// Result returned for unknown or invalid packages.
  pub fn empty() -> Self {
    Self::default()
  }
}

/// Asset kinds that may carry a revision marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
  /// Stylesheets included through link tags.
  Css,
  /// Scripts included through script tags.
  Js,
}

impl ResourceKind {
  /// Parse a kind identifier, returning `None` for unsupported kinds.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "css" => Some(Self::Css),
      "js" => Some(Self::Js),
      _ => None,
    }
  }

  /// Identifier used by callers passing kinds as strings.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Css => "css",
      Self::Js => "js",
    }
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
