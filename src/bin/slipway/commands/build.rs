//! `slipway build` command

use std::path::PathBuf;

use anyhow::Result;

use crate::cli::PipelineArgs;
use slipway::ops;

use super::{global_context, install_options, open_store};

pub fn execute(args: PipelineArgs, store: Option<PathBuf>) -> Result<()> {
    let gctx = global_context(store)?;
    let store = open_store(&gctx);
    let opts = install_options(&args)?;

    let outcome = ops::build(&gctx, &store, &opts)?;

    for artifact in &outcome.artifacts {
        eprintln!(
            "    Finished `{}` -> {}",
            artifact.name,
            artifact.path.display()
        );
    }
    Ok(())
}
