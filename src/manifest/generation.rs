//! Filter discovered files and write the `add` list.

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use same_file::Handle;
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::excludes::PathInclusion;
use crate::models::DiscoveredFile;

/// Identity of the running executable, so a copy of the tool kept inside the mod folder is
/// never listed.
#[derive(Debug)]
pub struct SelfReference {
  file_name: OsString,
  handle: Handle,
}

impl SelfReference {
  /// Identity of the current process executable, when it can be determined.
  pub fn current() -> Option<Self> {
    let exe = env::current_exe().ok()?;
    Self::from_path(&exe).ok()
  }

  /// Identity of the file at `path`.
  pub fn from_path(path: &Path) -> io::Result<Self> {
    let file_name = path
      .file_name()
      .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
      .to_os_string();
    Ok(Self {
      file_name,
      handle: Handle::from_path(path)?,
    })
  }

  /// Whether `path` is the same file on disk. Only same-named files are opened for comparison.
  pub fn matches(&self, path: &Path) -> bool {
    if path.file_name() != Some(self.file_name.as_os_str()) {
      return false;
    }
    Handle::from_path(path).is_ok_and(|handle| handle == self.handle)
  }
}

/// Files split into manifest lines and dropped entries.
#[derive(Debug, Default)]
pub struct FilteredFiles {
  /// Files that will be listed, in scan order.
  pub included: Vec<DiscoveredFile>,
  /// Files removed by an exclusion rule or the self-reference check.
  pub excluded: Vec<DiscoveredFile>,
}

/// Partition the full listing before anything is written.
pub fn filter_files<S: PathInclusion>(
  files: Vec<DiscoveredFile>,
  selection: &S,
  self_reference: Option<&SelfReference>,
) -> FilteredFiles {
  let mut filtered = FilteredFiles::default();

  for file in files {
    let is_self = self_reference.is_some_and(|exe| exe.matches(&file.path));
    if is_self || !selection.is_included(&file.relative_path) {
      debug!(path = %file.relative_path, is_self, "excluding file");
      filtered.excluded.push(file);
    } else {
      filtered.included.push(file);
    }
  }

  filtered
}

/// Render the manifest text: one `add <path>` line per file, each newline-terminated.
pub fn render_manifest(files: &[DiscoveredFile]) -> String {
  let mut output = String::new();
  for file in files {
    output.push_str(&file.add_line());
    output.push('\n');
  }
  output
}

/// Create or truncate `output_path` and write the add-list to it.
pub fn write_manifest(output_path: &Path, files: &[DiscoveredFile]) -> ManifestResult<()> {
  write_lines(output_path, files).map_err(|source| ManifestError::WriteManifest {
    path: output_path.to_path_buf(),
    source,
  })
}

fn write_lines(output_path: &Path, files: &[DiscoveredFile]) -> io::Result<()> {
  let mut writer = BufWriter::new(File::create(output_path)?);
  for file in files {
    writeln!(writer, "{}", file.add_line())?;
  }
  writer.flush()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::excludes::ExcludeSet;
  use std::fs;
  use std::path::PathBuf;
  use tempfile::tempdir;

  fn discovered(relative: &str) -> DiscoveredFile {
    DiscoveredFile {
      path: PathBuf::from("/mods/pack").join(relative),
      relative_path: relative.to_string(),
    }
  }

  #[test]
  fn filters_builtin_and_user_exclusions() {
    let mut excludes = ExcludeSet::default();
    excludes.extend_from_lines("a.txt\n");
    let files = vec![
      discovered("a.txt"),
      discovered("b.txt"),
      discovered("mod.ini"),
      discovered("sub/mod.ini"),
    ];

    let filtered = filter_files(files, &excludes, None);

    let included: Vec<_> = filtered.included.iter().map(|f| f.relative_path.as_str()).collect();
    let excluded: Vec<_> = filtered.excluded.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(included, vec!["b.txt", "sub/mod.ini"]);
    assert_eq!(excluded, vec!["a.txt", "mod.ini"]);
  }

  #[test]
  fn renders_add_lines() {
    let files = vec![discovered("a.txt"), discovered("sub/b.txt")];
    assert_eq!(render_manifest(&files), "add a.txt\nadd sub/b.txt\n");
    assert_eq!(render_manifest(&[]), "");
  }

  #[test]
  fn write_truncates_previous_manifest() -> ManifestResult<()> {
    let dir = tempdir().unwrap();
    let output = dir.path().join("mod_files.txt");
    fs::write(&output, "add stale.txt\nadd other.txt\nadd more.txt\n").unwrap();

    let files = vec![discovered("a.txt")];
    write_manifest(&output, &files)?;

    assert_eq!(fs::read_to_string(&output).unwrap(), render_manifest(&files));
    Ok(())
  }

  #[test]
  fn write_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing/mod_files.txt");

    let err = write_manifest(&output, &[discovered("a.txt")]).unwrap_err();

    match err {
      ManifestError::WriteManifest { path, .. } => assert_eq!(path, output),
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn self_reference_matches_hard_links_with_same_name() -> io::Result<()> {
    let dir = tempdir()?;
    let tool = dir.path().join("tool/mod_files");
    let copy = dir.path().join("pack/mod_files");
    let other = dir.path().join("pack/readme.txt");
    fs::create_dir_all(tool.parent().unwrap())?;
    fs::create_dir_all(copy.parent().unwrap())?;
    fs::write(&tool, b"binary")?;
    fs::hard_link(&tool, &copy)?;
    fs::write(&other, b"text")?;

    let identity = SelfReference::from_path(&tool)?;

    assert!(identity.matches(&tool));
    assert!(identity.matches(&copy));
    assert!(!identity.matches(&other));
    Ok(())
  }

  #[test]
  fn self_reference_excludes_matching_file() -> io::Result<()> {
    let dir = tempdir()?;
    let root = dir.path();
    let tool = root.join("mod_files");
    fs::write(&tool, b"binary")?;
    fs::write(root.join("a.txt"), b"a")?;
    let files = vec![
      DiscoveredFile {
        path: root.join("a.txt"),
        relative_path: "a.txt".into(),
      },
      DiscoveredFile {
        path: tool.clone(),
        relative_path: "mod_files".into(),
      },
    ];

    let identity = SelfReference::from_path(&tool)?;
    let filtered = filter_files(files, &ExcludeSet::default(), Some(&identity));

    assert_eq!(filtered.included.len(), 1);
    assert_eq!(filtered.included[0].relative_path, "a.txt");
    assert_eq!(filtered.excluded[0].relative_path, "mod_files");
    Ok(())
  }
}
