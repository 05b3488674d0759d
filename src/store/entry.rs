//! Store entries and their metadata.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::requirement::Requirement;
use crate::core::PackageId;
use crate::util::fs::read_to_string;

/// Metadata file name inside a store entry.
pub const PACKAGE_METADATA_FILE: &str = "slipway-pkg.toml";

/// Metadata describing a stored package.
///
/// Written by `slipway create` when depositing a package, read back during
/// resolution to discover the entry's own pinned requirements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub package: PackageSection,

    #[serde(default)]
    pub cmake: CmakeSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageSection {
    pub name: String,

    pub version: String,

    /// The entry's own pinned requirements (`name/version` refs).
    #[serde(default)]
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmakeSection {
    /// Library names consumers link against. Discovered from `lib/` when
    /// absent.
    #[serde(default)]
    pub libs: Vec<String>,
}

impl PackageMetadata {
    /// Metadata for a package with no requirements of its own.
    pub fn bare(name: &str, version: &str) -> Self {
        PackageMetadata {
            package: PackageSection {
                name: name.to_string(),
                version: version.to_string(),
                requires: Vec::new(),
            },
            cmake: CmakeSection::default(),
        }
    }

    /// Load metadata from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        toml::from_str(&contents).with_context(|| format!("invalid metadata: {}", path.display()))
    }

    /// Render the metadata as TOML.
    pub fn render(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize package metadata")
    }

    /// Parse the entry's pinned requirements.
    pub fn requirements(&self) -> Result<Vec<Requirement>> {
        self.package
            .requires
            .iter()
            .map(|r| Requirement::parse(r))
            .collect()
    }
}

/// A located package inside an artifact store.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    package_id: PackageId,
    root: PathBuf,
    metadata: PackageMetadata,
}

impl StoreEntry {
    /// Create an entry for a package rooted at the given directory.
    pub fn new(package_id: PackageId, root: PathBuf, metadata: PackageMetadata) -> Self {
        StoreEntry {
            package_id,
            root,
            metadata,
        }
    }

    /// The package identity.
    pub fn package_id(&self) -> PackageId {
        self.package_id
    }

    /// The entry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The entry's metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.metadata
    }

    /// Header directory, if the package ships headers.
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    /// Library directory.
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// Binary directory.
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// Library names consumers link against.
    ///
    /// Uses declared metadata when present, otherwise discovers them from
    /// `lib/` by stripping platform prefixes and extensions.
    pub fn link_libs(&self) -> Vec<String> {
        if !self.metadata.cmake.libs.is_empty() {
            return self.metadata.cmake.libs.clone();
        }

        let mut libs = Vec::new();
        let lib_dir = self.lib_dir();
        let Ok(entries) = std::fs::read_dir(&lib_dir) else {
            return libs;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let (Some(stem), Some(ext)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|e| e.to_str()),
            ) else {
                continue;
            };

            if matches!(ext, "a" | "so" | "dylib" | "lib") {
                let name = stem.strip_prefix("lib").unwrap_or(stem);
                libs.push(name.to_string());
            }
        }

        libs.sort();
        libs.dedup();
        libs
    }
}
