//! Stub artifact stores for deterministic resolution tests.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use semver::Version;

use crate::core::version::parse_pinned;
use crate::core::PackageId;
use crate::store::{ArtifactStore, PackageMetadata, StoreEntry};
use crate::util::InternedString;

/// An in-memory store. Entries point at synthetic paths and never touch
/// disk, so resolution tests stay hermetic.
#[derive(Debug, Default)]
pub struct StubStore {
    packages: BTreeMap<(String, Version), PackageMetadata>,
}

impl StubStore {
    pub fn new() -> Self {
        StubStore::default()
    }

    /// Add a package with the given pinned requirements (`name/version`).
    pub fn with_package(mut self, name: &str, version: &str, requires: &[&str]) -> Self {
        let version = parse_pinned(version).expect("valid fixture version");

        let mut metadata = PackageMetadata::bare(name, &version.to_string());
        metadata.package.requires = requires.iter().map(|r| r.to_string()).collect();

        self.packages.insert((name.to_string(), version), metadata);
        self
    }
}

impl ArtifactStore for StubStore {
    fn name(&self) -> &str {
        "stub store"
    }

    fn fetch(&self, name: InternedString, version: &Version) -> Result<Option<StoreEntry>> {
        let key = (name.to_string(), version.clone());
        Ok(self.packages.get(&key).map(|metadata| {
            StoreEntry::new(
                PackageId::new(name, version.clone()),
                PathBuf::from(format!("/stub-store/{}/{}", name, version)),
                metadata.clone(),
            )
        }))
    }

    fn available_versions(&self, name: InternedString) -> Vec<Version> {
        self.packages
            .keys()
            .filter(|(n, _)| n == name.as_str())
            .map(|(_, v)| v.clone())
            .collect()
    }
}
