#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod helpers;
pub mod models;
pub mod packages;
pub mod revision;
pub mod service;

pub use config::{RevisionConfig, RevisionSettings};
pub use error::ManifestError;
pub use models::{AttributeMap, PackageFiles, PackageGroup, ResourceKind};
pub use packages::{PackageManifest, PackageResolver};
pub use revision::{DEFAULT_REVISION, RevisionRewriter};
pub use service::{AssetRevision, AssetRevisioning};
