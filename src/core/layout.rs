//! Build directory layout.
//!
//! One invocation owns one layout. Everything mutable lives under
//! `build/` next to the recipe; the recipe itself stays read-only.
//!
//! ```text
//! <recipe dir>/build/
//!   export/                 staged exports-sources
//!   <build_type>/
//!     generators/           toolchain + dependency files
//!     cmake/                CMake binary dir
//!     install/              package output tree
//! ```

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::settings::BuildType;
use crate::util::fs::ensure_dir;

/// Paths for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildLayout {
    root: PathBuf,
    build_type: BuildType,
}

impl BuildLayout {
    /// Create a layout rooted at the recipe directory.
    pub fn new(recipe_dir: &Path, build_type: BuildType) -> Self {
        BuildLayout {
            root: recipe_dir.join("build"),
            build_type,
        }
    }

    /// The layout root (`<recipe dir>/build`).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The per-build-type directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(self.build_type.dir_name())
    }

    /// Where toolchain artifacts are generated.
    pub fn generators_dir(&self) -> PathBuf {
        self.build_dir().join("generators")
    }

    /// The CMake binary directory.
    pub fn cmake_dir(&self) -> PathBuf {
        self.build_dir().join("cmake")
    }

    /// The install prefix for packaging.
    pub fn install_dir(&self) -> PathBuf {
        self.build_dir().join("install")
    }

    /// Staging area for exported sources.
    pub fn export_dir(&self) -> PathBuf {
        self.root.join("export")
    }

    /// The generated toolchain file.
    pub fn toolchain_file(&self) -> PathBuf {
        self.generators_dir().join("slipway_toolchain.cmake")
    }

    /// The generator fingerprint file.
    pub fn fingerprint_file(&self) -> PathBuf {
        self.generators_dir().join(".slipway-fingerprint")
    }

    /// Create all layout directories.
    pub fn ensure(&self) -> Result<()> {
        ensure_dir(&self.build_dir())?;
        ensure_dir(&self.generators_dir())?;
        ensure_dir(&self.cmake_dir())?;
        Ok(())
    }
}
