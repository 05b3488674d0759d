//! `slipway install` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::PipelineArgs;
use slipway::ops;

use super::{global_context, install_options, open_store};

pub fn execute(args: PipelineArgs, store: Option<PathBuf>) -> Result<()> {
    let gctx = global_context(store)?;
    let store = open_store(&gctx);
    let opts = install_options(&args)?;

    let installation = ops::install(&gctx, &store, &opts)?;

    eprintln!(
        "    Generated toolchain for {} ({} dependencies)",
        installation.recipe.package_id(),
        installation.graph.len()
    );
    eprintln!(
        "    Toolchain file: {}",
        installation.ctx.layout.toolchain_file().display()
    );
    Ok(())
}
