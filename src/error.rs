//! Error type shared by every stage of manifest generation.

use std::path::PathBuf;

/// Result alias used across the crate.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Failures that abort a manifest run.
///
/// Unreadable entries met during the directory walk are not represented here; they are
/// logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
  /// The scan root could not be turned into an absolute path.
  #[error("failed to resolve root directory {}: {source}", path.display())]
  ResolveRoot {
    /// Path as supplied by the caller.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The exclude file exists but could not be read as UTF-8 text.
  #[error("failed to read exclude file {}: {source}", path.display())]
  ReadExcludes {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The manifest could not be created, written or flushed.
  #[error("failed to write manifest {}: {source}", path.display())]
  WriteManifest {
    /// Output path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::error::Error;
  use std::io;

  #[test]
  fn display_names_the_offending_path() {
    let err = ManifestError::WriteManifest {
      path: PathBuf::from("/mods/pack/mod_files.txt"),
      source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    let message = err.to_string();
    assert!(message.contains("/mods/pack/mod_files.txt"));
    assert!(message.contains("denied"));
  }

  #[test]
  fn exposes_io_source() {
    let err = ManifestError::ReadExcludes {
      path: PathBuf::from("excludes.txt"),
      source: io::Error::new(io::ErrorKind::InvalidData, "not utf-8"),
    };
    let source = err.source().expect("source should be attached");
    assert_eq!(source.to_string(), "not utf-8");
  }
}
