//! Packaging - the install tree.
//!
//! Copies build outputs into `install/{include,lib,bin}` plus package
//! metadata, producing a tree that is itself a valid store entry. A build
//! that reports success but yields no artifacts is a build/package
//! mismatch, not a build failure, and gets its own error.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::builder::{ArtifactKind, BuildContext, BuildResult};
use crate::core::Recipe;
use crate::resolver::ResolvedGraph;
use crate::store::{PackageMetadata, PACKAGE_METADATA_FILE};
use crate::util::fs::{copy_dir_all, copy_into, ensure_dir, remove_dir_all_if_exists, write_string};

/// Error while assembling the install tree.
#[derive(Debug, Error, Diagnostic)]
pub enum PackageError {
    #[error("build produced no artifacts to package")]
    #[diagnostic(
        code(slipway::package::no_artifacts),
        help("Check that the CMake project declares library or executable targets")
    )]
    NoArtifacts { build_dir: PathBuf },

    #[error("failed to stage package files: {message}")]
    #[diagnostic(code(slipway::package::stage_failed))]
    Stage { message: String },
}

impl PackageError {
    fn stage(err: impl std::fmt::Display) -> Self {
        PackageError::Stage {
            message: format!("{:#}", err),
        }
    }
}

/// Assemble the install tree from a successful build.
///
/// Returns the install directory.
pub fn package(
    recipe: &Recipe,
    graph: &ResolvedGraph,
    ctx: &BuildContext,
    result: &BuildResult,
) -> Result<PathBuf, PackageError> {
    if result.artifacts.is_empty() {
        return Err(PackageError::NoArtifacts {
            build_dir: ctx.layout.cmake_dir(),
        });
    }

    let install_dir = ctx.layout.install_dir();
    remove_dir_all_if_exists(&install_dir).map_err(PackageError::stage)?;
    ensure_dir(&install_dir).map_err(PackageError::stage)?;

    // Public headers ship as-is from the source tree.
    let headers = ctx.source_dir().join("include");
    if headers.is_dir() {
        copy_dir_all(&headers, &install_dir.join("include")).map_err(PackageError::stage)?;
    }

    let mut lib_names = Vec::new();
    for artifact in &result.artifacts {
        let subdir = match artifact.kind {
            ArtifactKind::StaticLib | ArtifactKind::SharedLib => {
                lib_names.push(artifact.name.clone());
                install_dir.join("lib")
            }
            ArtifactKind::Executable => install_dir.join("bin"),
        };
        copy_into(&artifact.path, &subdir).map_err(PackageError::stage)?;
    }
    lib_names.sort();
    lib_names.dedup();

    let metadata = package_metadata(recipe, graph, lib_names);
    let rendered = metadata.render().map_err(PackageError::stage)?;
    write_string(&install_dir.join(PACKAGE_METADATA_FILE), &rendered)
        .map_err(PackageError::stage)?;

    tracing::info!(
        "packaged {} artifacts into {}",
        result.artifacts.len(),
        install_dir.display()
    );
    Ok(install_dir)
}

/// Metadata for the packaged tree.
///
/// Requirements are recorded at their resolved versions, so overrides
/// applied during this build stay pinned for consumers.
fn package_metadata(recipe: &Recipe, graph: &ResolvedGraph, libs: Vec<String>) -> PackageMetadata {
    let requires = recipe
        .requirements()
        .iter()
        .filter_map(|req| graph.get_by_name(req.name()))
        .map(|id| id.as_ref_str())
        .collect();

    let mut metadata = PackageMetadata::bare(recipe.name().as_str(), &recipe.version().to_string());
    metadata.package.requires = requires;
    metadata.cmake.libs = libs;
    metadata
}
