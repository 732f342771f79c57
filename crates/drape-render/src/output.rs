//! # Document Output
//!
//! Writes finished documents so that a reader never sees a partial file:
//! bytes go to a temporary file in the destination directory, which is then
//! renamed over the destination.
//!
//! ```text
//! write_atomically("out/QT-1.pdf")
//!    │
//!    ├── out/.drape-XXXX.tmp  ◄── write + fsync
//!    │
//!    └── rename ──► out/QT-1.pdf
//! ```
//!
//! On any failure the temporary file is removed and the destination is left
//! as it was.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// Atomically replaces `path` with `bytes`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> RenderResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".drape-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    persist(tmp, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "Wrote document");
    Ok(())
}

fn persist(tmp: NamedTempFile, path: &Path) -> RenderResult<()> {
    tmp.persist(path)
        .map(|_| ())
        .map_err(|e| RenderError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_creates_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QT-1.pdf");

        write_atomically(&path, b"%PDF-1.7 body").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 body");
        assert_eq!(entries(dir.path()), vec!["QT-1.pdf"]);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("QT-1.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("QT-1.pdf");

        let err = write_atomically(&path, b"data").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
        assert!(!path.exists());
        assert_eq!(entries(dir.path()), Vec::<String>::new());
    }

    #[test]
    fn test_destination_is_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();

        let err = write_atomically(&target, b"data").unwrap_err();
        assert!(matches!(err, RenderError::Persist { .. }));
        assert_eq!(entries(dir.path()), vec!["taken"]);
    }
}
