//! Local filesystem adapter using std::fs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use stratum_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StratumError, StratumResult},
};
use tracing::trace;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StratumResult<()> {
        fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StratumResult<()> {
        write_atomic(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> StratumResult<String> {
        fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Write `content` to a `.tmp` sibling, then rename it over `path`.
///
/// Readers see either the old file or the new one, never a torn write. The
/// temp file is removed if the rename fails.
pub(crate) fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let tmp_path = tmp_sibling(path)?;
    trace!(path = %path.display(), tmp = %tmp_path.display(), "atomic write");

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

fn tmp_sibling(path: &Path) -> io::Result<PathBuf> {
    let invalid = || {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid path: {}", path.display()),
        )
    };
    let parent = path.parent().ok_or_else(invalid)?;
    let filename = path.file_name().ok_or_else(invalid)?;
    Ok(parent.join(format!(".{}.tmp", filename.to_string_lossy())))
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StratumError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
