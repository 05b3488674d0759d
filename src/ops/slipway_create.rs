//! The create operation: the full pipeline through packaging.
//!
//! resolve -> generate -> export -> build -> package, then the install
//! tree is deposited into the local store so other recipes can require
//! this package.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::ops::export::export_sources;
use crate::ops::package::package;
use crate::ops::slipway_build::run_cmake;
use crate::ops::slipway_install::{install, InstallOptions};
use crate::store::DirStore;
use crate::util::GlobalContext;

/// Result of a create operation.
pub struct CreateOutcome {
    /// The assembled install tree.
    pub install_dir: PathBuf,

    /// The deposited store entry.
    pub store_dir: PathBuf,

    /// Number of packaged artifacts.
    pub artifact_count: usize,
}

/// Run the full pipeline and deposit the package into the store.
pub fn create(
    gctx: &GlobalContext,
    store: &DirStore,
    opts: &InstallOptions,
) -> Result<CreateOutcome> {
    let installation = install(gctx, store, opts)?;

    export_sources(&installation.recipe, &installation.ctx.layout)
        .context("export phase failed")?;

    let result = run_cmake(&installation)?;

    let install_dir = package(
        &installation.recipe,
        &installation.graph,
        &installation.ctx,
        &result,
    )
    .map_err(anyhow::Error::new)
    .context("package phase failed")?;

    let store_dir = store
        .deposit(installation.recipe.package_id(), &install_dir)
        .context("package phase failed")?;

    Ok(CreateOutcome {
        install_dir,
        store_dir,
        artifact_count: result.artifacts.len(),
    })
}
