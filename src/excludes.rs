//! Exclusion rules deciding which discovered files make it into the add-list.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ManifestError, ManifestResult};

/// Trait describing which root-relative paths belong in the manifest.
pub trait PathInclusion {
  /// Returns `true` when the file at `relative_path` should be listed.
  fn is_included(&self, relative_path: &str) -> bool;
}

/// Packaging metadata that is never listed, whatever the exclude file says.
pub const DEFAULT_EXCLUDES: [&str; 5] = [
  "changelog.md",
  "generate_tree.py",
  "mod.ini",
  "mod_files.txt",
  "mod_version.ini",
];

/// Lines starting with this prefix are comments in an exclude file.
pub const COMMENT_PREFIX: char = '#';

/// Characters ending a line in an exclude file. `\r\n` splits into a line and an empty one.
const LINE_BREAKS: [char; 10] = [
  '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Set of root-relative paths, `/`-separated, matched exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludeSet {
  builtin: BTreeSet<String>,
  user: BTreeSet<String>,
}

impl Default for ExcludeSet {
  fn default() -> Self {
    Self {
      builtin: DEFAULT_EXCLUDES.iter().map(|name| name.to_string()).collect(),
      user: BTreeSet::new(),
    }
  }
}

impl ExcludeSet {
  /// Built-in exclusions plus the entries of `path`, if it is a regular file.
  pub fn load(path: Option<&Path>) -> ManifestResult<Self> {
    let mut set = Self::default();
    if let Some(path) = path {
      set.extend_from_file(path)?;
    }
    Ok(set)
  }

  /// Merge entries from an exclude file.
  ///
  /// A path that does not exist or is not a regular file contributes nothing.
  pub fn extend_from_file(&mut self, path: &Path) -> ManifestResult<()> {
    if !path.is_file() {
      debug!(path = %path.display(), "exclude file not present, skipping");
      return Ok(());
    }

    let contents = fs::read_to_string(path).map_err(|source| ManifestError::ReadExcludes {
      path: path.to_path_buf(),
      source,
    })?;
    let before = self.user.len();
    self.extend_from_lines(&contents);
    debug!(
      path = %path.display(),
      added = self.user.len() - before,
      "loaded exclude file"
    );
    Ok(())
  }

  /// Merge entries from exclude-file text, one path per line.
  pub fn extend_from_lines(&mut self, contents: &str) {
    self.user.extend(parse_exclude_lines(contents));
  }

  /// Whether `relative_path` is excluded by a built-in or user entry.
  pub fn contains(&self, relative_path: &str) -> bool {
    self.builtin.contains(relative_path) || self.user.contains(relative_path)
  }

  /// Entries supplied by the exclude file, in sorted order.
  pub fn user_entries(&self) -> impl Iterator<Item = &str> {
    self.user.iter().map(String::as_str)
  }
}

impl PathInclusion for ExcludeSet {
  fn is_included(&self, relative_path: &str) -> bool {
    !self.contains(relative_path)
  }
}

/// Trim each line and drop blanks and comments. Entries are otherwise kept verbatim.
fn parse_exclude_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
  contents
    .split(LINE_BREAKS)
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
    .map(str::to_string)
}
