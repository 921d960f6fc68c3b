#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod builder;
pub mod config;
pub mod error;
pub mod excludes;
pub mod manifest;
pub mod models;

pub use builder::ManifestBuilder;
pub use config::{MANIFEST_FILE_NAME, ManifestConfig};
pub use error::{ManifestError, ManifestResult};
pub use excludes::{DEFAULT_EXCLUDES, ExcludeSet, PathInclusion};
pub use models::{DiscoveredFile, ManifestSummary};
