//! Build directory locking.
//!
//! A single invocation owns the build directory exclusively. The lock is a
//! marker file created with `create_new`, so acquisition is atomic on every
//! platform we support; a second invocation against the same directory is
//! rejected rather than serialized.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const LOCK_FILE_NAME: &str = ".slipway-lock";

/// An exclusive lock on a build directory.
///
/// Released on drop. A stale lock (e.g. after a crash) must be removed with
/// `slipway clean`.
#[derive(Debug)]
pub struct BuildDirLock {
    path: PathBuf,
}

impl BuildDirLock {
    /// Acquire the lock for the given build directory.
    pub fn acquire(build_dir: &Path) -> Result<Self> {
        fs::create_dir_all(build_dir)
            .with_context(|| format!("failed to create directory: {}", build_dir.display()))?;

        let path = build_dir.join(LOCK_FILE_NAME);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                anyhow::bail!(
                    "build directory `{}` is locked by another slipway invocation\n\
                     If no other invocation is running, remove the stale lock with `slipway clean`.",
                    build_dir.display()
                );
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to create lock file: {}", path.display())
                });
            }
        };

        writeln!(file, "{}", std::process::id())
            .with_context(|| format!("failed to write lock file: {}", path.display()))?;

        tracing::debug!("acquired build directory lock at {}", path.display());
        Ok(BuildDirLock { path })
    }

    /// The lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BuildDirLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("failed to remove lock file {}: {}", self.path.display(), e);
        }
    }
}
