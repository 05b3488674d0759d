//! Build context - the inputs shared by generation, build, and packaging.

use std::path::{Path, PathBuf};

use crate::core::{BuildLayout, Options, Settings};

/// Immutable inputs for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Environment-resolved settings axes
    pub settings: Settings,

    /// Binary-shape options
    pub options: Options,

    /// Build directory layout
    pub layout: BuildLayout,

    /// The CMake source directory (the recipe directory)
    source_dir: PathBuf,
}

impl BuildContext {
    /// Create a context for a recipe directory.
    pub fn new(
        settings: Settings,
        options: Options,
        layout: BuildLayout,
        source_dir: PathBuf,
    ) -> Self {
        BuildContext {
            settings,
            options,
            layout,
            source_dir,
        }
    }

    /// The CMake source directory.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Whether this is an optimized build.
    pub fn is_release(&self) -> bool {
        !matches!(
            self.settings.build_type,
            crate::core::settings::BuildType::Debug
        )
    }
}
