//! Thin adapters connecting the revision service to the host's element lists.
//!
//! Each helper borrows the shared [`crate::AssetRevisioning`] service, a [`UrlBuilder`] for
//! the current request and the list it appends to. Rendering the resulting items is left to
//! the host.

mod head_link;
mod head_script;
mod package;
mod url;

use std::collections::VecDeque;

pub use head_link::{RevisionHeadLink, StylesheetItem, StylesheetOptions};
pub use head_script::{RevisionScript, ScriptItem, ScriptOptions, ScriptPlacement};
pub use url::{BaseUrl, Origin, UrlBuilder, get_url};

/// Ordered collection of head elements a helper writes into.
pub trait ElementList<T> {
  /// Add an element after all existing ones.
  fn append(&mut self, item: T);
  /// Add an element before all existing ones.
  fn prepend(&mut self, item: T);
}

impl<T> ElementList<T> for Vec<T> {
  fn append(&mut self, item: T) {
    self.push(item);
  }

  fn prepend(&mut self, item: T) {
    self.insert(0, item);
  }
}

impl<T> ElementList<T> for VecDeque<T> {
  fn append(&mut self, item: T) {
    self.push_back(item);
  }

  fn prepend(&mut self, item: T) {
    self.push_front(item);
  }
}
