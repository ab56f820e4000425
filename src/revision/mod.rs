//! Cache-busting helpers that embed a revision token into asset file names.
//!
//! Eligibility checks and the file name rewrite are kept apart so the pattern matching can be
//! tested without a configured revision.

mod filters;
mod rewrite;

pub use filters::{has_revision_marker, is_eligible};
pub use rewrite::{DEFAULT_REVISION, RevisionRewriter};
