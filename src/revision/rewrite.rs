use crate::revision::filters;

/// Revision used when the configuration does not provide one.
pub const DEFAULT_REVISION: &str = "1";

/// Embeds a revision token into asset file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRewriter {
  revision: String,
  postfix: String,
}

impl Default for RevisionRewriter {
  fn default() -> Self {
    Self::new(DEFAULT_REVISION)
  }
}

impl RevisionRewriter {
  /// Create a rewriter for the given revision token.
  pub fn new(revision: impl Into<String>) -> Self {
    let revision = revision.into();
    let postfix = format!("__{revision}");
    Self { revision, postfix }
  }

  /// Create a rewriter from an optional token, falling back to [`DEFAULT_REVISION`].
  pub fn from_revision(revision: Option<&str>) -> Self {
    Self::new(revision.unwrap_or(DEFAULT_REVISION))
  }

  /// Revision token used verbatim in the postfix.
  pub fn revision(&self) -> &str {
    &self.revision
  }

  /// Postfix inserted before the extension, `__<revision>`.
  pub fn revision_string(&self) -> &str {
    &self.postfix
  }

  /// Determine whether a reference of the given kind should be rewritten.
  ///
  /// Besides the generic `__<hex>` check, references whose file stem already ends in this
  /// rewriter's own postfix are rejected, which keeps non-hex tokens from being applied twice.
  pub fn is_eligible(&self, kind: &str, href: &str) -> bool {
    filters::is_eligible(kind, href) && !FileParts::split(href).stem.ends_with(&self.postfix)
  }

  /// Insert the revision postfix between the file stem and its extension.
  ///
  /// Paths without a directory are placed at the root and a missing extension is treated as
  /// empty, leaving a trailing dot. Any query string or fragment is carried over untouched.
  pub fn rewrite(&self, path: &str) -> String {
    let FileParts {
      directory,
      stem,
      extension,
      suffix,
    } = FileParts::split(path);

    format!(
      "{directory}/{stem}{postfix}.{extension}{suffix}",
      postfix = self.postfix,
    )
  }
}

struct FileParts<'a> {
  directory: &'a str,
  stem: &'a str,
  extension: &'a str,
  suffix: &'a str,
}

impl<'a> FileParts<'a> {
  fn split(path: &'a str) -> Self {
    let (resource, suffix) = match path.find(['?', '#']) {
      Some(index) => path.split_at(index),
      None => (path, ""),
    };
    let (directory, file_name) = resource.rsplit_once('/').unwrap_or(("", resource));
    let (stem, extension) = file_name.rsplit_once('.').unwrap_or((file_name, ""));

    Self {
      directory,
      stem,
      extension,
      suffix,
    }
  }
}
