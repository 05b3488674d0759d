//! Exported source staging.
//!
//! Copies every `exports-sources` match into the export area so a consumer
//! can rebuild the package from source without the original checkout.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::core::{BuildLayout, Recipe};
use crate::util::fs::{copy_dir_all, ensure_dir, glob_paths, remove_dir_all_if_exists};

/// Stage the recipe's exported sources into the layout's export area.
///
/// The area is rebuilt from scratch each time so deleted files do not
/// linger. Returns the staged paths.
pub fn export_sources(recipe: &Recipe, layout: &BuildLayout) -> Result<Vec<PathBuf>> {
    let export_dir = layout.export_dir();
    remove_dir_all_if_exists(&export_dir)?;
    ensure_dir(&export_dir)?;

    let mut staged = Vec::new();

    for pattern in recipe.exports_sources() {
        let matches = glob_paths(recipe.recipe_dir(), std::slice::from_ref(pattern))?;
        if matches.is_empty() {
            bail!(
                "exports-sources pattern `{}` matched nothing in {}",
                pattern,
                recipe.recipe_dir().display()
            );
        }

        for path in matches {
            let rel = path
                .strip_prefix(recipe.recipe_dir())
                .context("exported path escapes the recipe directory")?;
            let dst = export_dir.join(rel);

            if path.is_dir() {
                copy_dir_all(&path, &dst)?;
            } else {
                if let Some(parent) = dst.parent() {
                    ensure_dir(parent)?;
                }
                std::fs::copy(&path, &dst).with_context(|| {
                    format!("failed to copy {} to {}", path.display(), dst.display())
                })?;
            }

            staged.push(dst);
        }
    }

    tracing::info!("staged {} exported paths", staged.len());
    Ok(staged)
}
