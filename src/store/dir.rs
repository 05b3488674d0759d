//! Directory-backed artifact store.
//!
//! Entries live at `<root>/<name>/<version>/` with the package layout
//! produced by `slipway create`: `slipway-pkg.toml`, `include/`, `lib/`,
//! `bin/`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use semver::Version;

use crate::core::version::parse_pinned;
use crate::core::PackageId;
use crate::store::entry::{PackageMetadata, StoreEntry, PACKAGE_METADATA_FILE};
use crate::store::ArtifactStore;
use crate::util::fs::{copy_dir_all, ensure_dir, remove_dir_all_if_exists};
use crate::util::InternedString;

/// An artifact store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open (or designate) a store at the given root.
    pub fn new(root: PathBuf) -> Self {
        DirStore { root }
    }

    /// The store root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory an entry would occupy.
    pub fn entry_dir(&self, name: InternedString, version: &Version) -> PathBuf {
        self.root.join(name.as_str()).join(version.to_string())
    }

    /// Deposit a package tree into the store, replacing any existing entry
    /// for the same version.
    pub fn deposit(&self, package_id: PackageId, package_tree: &Path) -> Result<PathBuf> {
        let dst = self.entry_dir(package_id.name(), package_id.version());

        remove_dir_all_if_exists(&dst)?;
        ensure_dir(&dst)?;
        copy_dir_all(package_tree, &dst).with_context(|| {
            format!(
                "failed to deposit `{}` into store at {}",
                package_id,
                self.root.display()
            )
        })?;

        tracing::info!("deposited {} at {}", package_id, dst.display());
        Ok(dst)
    }
}

impl ArtifactStore for DirStore {
    fn name(&self) -> &str {
        "local directory store"
    }

    fn fetch(&self, name: InternedString, version: &Version) -> Result<Option<StoreEntry>> {
        let dir = self.entry_dir(name, version);
        if !dir.is_dir() {
            return Ok(None);
        }

        let metadata_path = dir.join(PACKAGE_METADATA_FILE);
        let metadata = if metadata_path.is_file() {
            PackageMetadata::load(&metadata_path)?
        } else {
            // Entries placed by hand may lack metadata; treat them as
            // leaf packages.
            PackageMetadata::bare(name.as_str(), &version.to_string())
        };

        let package_id = PackageId::new(name, version.clone());
        Ok(Some(StoreEntry::new(package_id, dir, metadata)))
    }

    fn available_versions(&self, name: InternedString) -> Vec<Version> {
        let mut versions = Vec::new();

        let Ok(entries) = std::fs::read_dir(self.root.join(name.as_str())) else {
            return versions;
        };

        for entry in entries.flatten() {
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(dir_name) = entry.file_name().to_str() {
                if let Ok(version) = parse_pinned(dir_name) {
                    versions.push(version);
                }
            }
        }

        versions.sort();
        versions
    }
}
