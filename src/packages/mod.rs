//! Package manifest loading and package-to-file resolution.

mod manifest;
mod resolver;

pub use manifest::PackageManifest;
pub use resolver::{MERGED_ARTIFACT_DIR, PackageResolver};
