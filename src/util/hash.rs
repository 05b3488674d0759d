//! Content hashing helpers.
//!
//! Used for generator fingerprints: a digest over the resolved graph and
//! the active settings decides whether toolchain artifacts are stale.

use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Hash a byte slice to a hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}

/// Hash a file's contents to a hex string.
pub fn hash_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read file for hashing: {}", path.display()))?;
    Ok(hash_bytes(&bytes))
}

/// Incrementally hash a sequence of labelled components.
///
/// Components are framed with their length so `["ab", "c"]` and
/// `["a", "bc"]` hash differently.
pub struct ComponentHasher {
    hasher: Sha256,
}

impl ComponentHasher {
    pub fn new() -> Self {
        ComponentHasher {
            hasher: Sha256::new(),
        }
    }

    /// Feed one component.
    pub fn update(&mut self, component: impl AsRef<[u8]>) {
        let bytes = component.as_ref();
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    /// Finish and return the hex digest.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl Default for ComponentHasher {
    fn default() -> Self {
        Self::new()
    }
}
