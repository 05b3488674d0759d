//! Global context for Slipway operations.
//!
//! Provides centralized access to the working directory, recipe discovery,
//! and the artifact store location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::core::recipe::RECIPE_FILE_NAME;

/// Environment variable overriding the artifact store root.
pub const STORE_ENV_VAR: &str = "SLIPWAY_STORE";

/// Global context shared by all operations.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Artifact store root override (CLI flag or environment)
    store_override: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine working directory")?;
        Ok(GlobalContext {
            cwd,
            store_override: std::env::var_os(STORE_ENV_VAR).map(PathBuf::from),
        })
    }

    /// Create a context rooted at an explicit directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        GlobalContext {
            cwd,
            store_override: None,
        }
    }

    /// Override the artifact store root.
    pub fn with_store(mut self, store: Option<PathBuf>) -> Self {
        if store.is_some() {
            self.store_override = store;
        }
        self
    }

    /// The working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Locate the recipe file, walking up from the working directory.
    pub fn find_recipe(&self) -> Result<PathBuf> {
        let mut dir = self.cwd.as_path();

        loop {
            let candidate = dir.join(RECIPE_FILE_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => anyhow::bail!(
                    "could not find `{}` in `{}` or any parent directory",
                    RECIPE_FILE_NAME,
                    self.cwd.display()
                ),
            }
        }
    }

    /// The artifact store root.
    ///
    /// Resolution order: explicit override, SLIPWAY_STORE, per-user cache
    /// directory.
    pub fn store_dir(&self) -> PathBuf {
        if let Some(ref store) = self.store_override {
            return store.clone();
        }

        ProjectDirs::from("", "", "slipway")
            .map(|dirs| dirs.cache_dir().join("store"))
            .unwrap_or_else(|| self.cwd.join(".slipway-store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_recipe_walks_up() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(RECIPE_FILE_NAME), "").unwrap();
        let nested = tmp.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested);
        let found = ctx.find_recipe().unwrap();

        assert_eq!(found, tmp.path().join(RECIPE_FILE_NAME));
    }

    #[test]
    fn test_find_recipe_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());

        assert!(ctx.find_recipe().is_err());
    }

    #[test]
    fn test_store_override_wins() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .with_store(Some(tmp.path().join("store")));

        assert_eq!(ctx.store_dir(), tmp.path().join("store"));
    }
}
