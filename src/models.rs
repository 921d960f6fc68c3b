//! Data structures produced while scanning a mod directory.

use std::path::PathBuf;

/// A regular file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscoveredFile {
  /// Absolute path on disk. Ordering of discovered files follows this field.
  pub path: PathBuf,
  /// Path relative to the scan root, always `/`-separated.
  pub relative_path: String,
}

impl DiscoveredFile {
  /// Manifest line for this file, without the trailing newline.
  pub fn add_line(&self) -> String {
    format!("add {}", self.relative_path)
  }
}

/// Outcome of a completed manifest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSummary {
  /// Where the add-list was written.
  pub output_path: PathBuf,
  /// Regular files found under the root before filtering.
  pub discovered: usize,
  /// Lines written to the manifest.
  pub written: usize,
  /// Files dropped by the exclusion rules.
  pub excluded: usize,
  /// Exclude-file entries that did not match any discovered file.
  pub unmatched_excludes: Vec<String>,
}
