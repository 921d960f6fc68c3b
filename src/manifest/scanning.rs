//! Directory scanning utilities for harvesting every file under the mod root.

use std::io::ErrorKind;
use std::path::{Component, Path};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::models::DiscoveredFile;

/// Walk `root` recursively and return every regular file, sorted by absolute path.
///
/// Symlinked directories are not descended into, while a symlink pointing at a regular file
/// is listed like the file itself. A root that does not exist yields an empty list. Entries
/// that cannot be read are logged and skipped.
pub fn collect_files(root: &Path) -> Vec<DiscoveredFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let root_missing = err.depth() == 0
                    && err.io_error().is_some_and(|io| io.kind() == ErrorKind::NotFound);
                if root_missing {
                    debug!(root = %root.display(), "scan root does not exist");
                } else {
                    warn!(error = %err, "skipping unreadable entry");
                }
                continue;
            }
        };

        if !is_regular_file(&entry) {
            continue;
        }

        let path = entry.into_path();
        match relative_manifest_path(root, &path) {
            Some(relative_path) => files.push(DiscoveredFile {
                path,
                relative_path,
            }),
            None => warn!(
                path = %path.display(),
                "skipping file without a UTF-8 path below the scan root"
            ),
        }
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "scanned files");
    files
}

fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Render `path` relative to `root` with `/` separators on every platform.
///
/// Returns `None` when `path` is not strictly below `root`, or when a component below the
/// root is not valid UTF-8 and so cannot be written to the manifest as-is.
pub fn relative_manifest_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
