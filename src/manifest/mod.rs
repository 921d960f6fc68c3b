//! Manifest generation broken into focused submodules for easier testing.

mod generation;
mod scanning;

pub use generation::{
  FilteredFiles, SelfReference, filter_files, render_manifest, write_manifest,
};
pub use scanning::{collect_files, relative_manifest_path};
