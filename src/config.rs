//! Run inputs for a manifest pass: the scan root and an optional exclude list.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{ManifestError, ManifestResult};

/// File name of the generated add-list, written directly under the scan root.
pub const MANIFEST_FILE_NAME: &str = "mod_files.txt";

/// Inputs for one manifest run.
///
/// Nothing here is persisted; the struct is the in-memory form of the two command-line
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestConfig {
    /// Directory to scan. Absolute once [`ManifestConfig::resolve`] has run.
    pub root: PathBuf,
    /// Optional text file of additional root-relative exclusions.
    pub exclude_file: Option<PathBuf>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ManifestConfig {
    /// Configuration scanning `root` with only the built-in exclusions.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_file: None,
        }
    }

    /// Attach an exclude file. A missing or non-regular file contributes nothing.
    pub fn with_exclude_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude_file = Some(path.into());
        self
    }

    /// Make the root absolute, following symlinks where the directory exists.
    ///
    /// A root that does not exist is still accepted: it is made absolute against the
    /// working directory and later scans as empty.
    pub fn resolve(mut self) -> ManifestResult<Self> {
        self.root = resolve_root(&self.root)?;
        Ok(self)
    }

    /// Location of the manifest for this root.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }
}

fn resolve_root(root: &Path) -> ManifestResult<PathBuf> {
    let resolved = match root.canonicalize() {
        Ok(path) => Ok(path),
        Err(err) if err.kind() == ErrorKind::NotFound => std::path::absolute(root),
        Err(err) => Err(err),
    };

    resolved.map_err(|source| ManifestError::ResolveRoot {
        path: root.to_path_buf(),
        source,
    })
}
