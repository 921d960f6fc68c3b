//! Manifest run orchestrator: load exclusions, scan, filter, write.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::config::ManifestConfig;
use crate::error::ManifestResult;
use crate::excludes::ExcludeSet;
use crate::manifest::{SelfReference, collect_files, filter_files, write_manifest};
use crate::models::{DiscoveredFile, ManifestSummary};

/// High-level helper producing `mod_files.txt` for a configured root.
pub struct ManifestBuilder {
  config: ManifestConfig,
  self_reference: Option<SelfReference>,
}

impl ManifestBuilder {
  /// Create a builder for an already resolved configuration.
  ///
  /// The running executable is excluded from the listing when it lives under the root.
  pub fn new(config: ManifestConfig) -> Self {
    Self {
      config,
      self_reference: SelfReference::current(),
    }
  }

  /// Replace the file treated as the tool itself; `None` disables the check.
  pub fn with_self_reference(mut self, self_reference: Option<SelfReference>) -> Self {
    self.self_reference = self_reference;
    self
  }

  /// Configuration this builder runs with.
  pub fn config(&self) -> &ManifestConfig {
    &self.config
  }

  /// Run one full pass and overwrite the manifest.
  ///
  /// The whole tree is listed and filtered before the output file is opened, so a stale
  /// manifest from an earlier run never shows up in the new one.
  pub fn build(&self) -> ManifestResult<ManifestSummary> {
    let excludes = ExcludeSet::load(self.config.exclude_file.as_deref())?;
    self.build_with(&excludes)
  }

  /// Same as [`ManifestBuilder::build`] with a caller-supplied exclude set.
  pub fn build_with(&self, excludes: &ExcludeSet) -> ManifestResult<ManifestSummary> {
    let root = &self.config.root;
    let output_path = self.config.manifest_path();

    let files = collect_files(root);
    let discovered = files.len();
    let filtered = filter_files(files, excludes, self.self_reference.as_ref());

    let unmatched_excludes = unmatched_user_excludes(excludes, &filtered.excluded);
    for entry in &unmatched_excludes {
      warn!(entry = %entry, "exclude entry matched no file");
    }

    write_manifest(&output_path, &filtered.included)?;

    let summary = ManifestSummary {
      output_path,
      discovered,
      written: filtered.included.len(),
      excluded: filtered.excluded.len(),
      unmatched_excludes,
    };
    info!(
      root = %root.display(),
      discovered = summary.discovered,
      written = summary.written,
      excluded = summary.excluded,
      "manifest written"
    );
    Ok(summary)
  }
}

fn unmatched_user_excludes(
  excludes: &ExcludeSet,
  excluded: &[DiscoveredFile],
) -> Vec<String> {
  let hit: BTreeSet<&str> = excluded
    .iter()
    .map(|file| file.relative_path.as_str())
    .collect();
  excludes
    .user_entries()
    .filter(|entry| !hit.contains(entry))
    .map(str::to_string)
    .collect()
}
