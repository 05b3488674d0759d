//! Artifact store - where pinned package versions live.
//!
//! The store is injected into resolution as a capability (`fetch a name at
//! an exact version`) rather than reached through global state, so tests
//! run against stub stores and never touch the user's cache.

pub mod dir;
pub mod entry;

pub use dir::DirStore;
pub use entry::{PackageMetadata, StoreEntry, PACKAGE_METADATA_FILE};

use anyhow::Result;
use semver::Version;

use crate::util::InternedString;

/// A store of prebuilt package artifacts, addressed by exact version.
pub trait ArtifactStore: Send + Sync {
    /// The store name for display.
    fn name(&self) -> &str;

    /// Locate a package at an exact version.
    ///
    /// Returns `Ok(None)` when the version is absent; `Err` is reserved for
    /// I/O failures and corrupt entries.
    fn fetch(&self, name: InternedString, version: &Version) -> Result<Option<StoreEntry>>;

    /// Versions of a library present in the store, ascending.
    ///
    /// Used for error reporting when a pinned version is missing.
    fn available_versions(&self, name: InternedString) -> Vec<Version>;
}
