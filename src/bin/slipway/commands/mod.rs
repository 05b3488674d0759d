//! Command implementations.

pub mod build;
pub mod clean;
pub mod completions;
pub mod create;
pub mod graph;
pub mod init;
pub mod install;
pub mod new;

use std::path::PathBuf;

use anyhow::Result;
use slipway::core::settings::BuildType;
use slipway::ops::InstallOptions;
use slipway::util::GlobalContext;
use slipway::DirStore;

use crate::cli::PipelineArgs;

/// Build the global context, honoring a `--store` override.
pub(crate) fn global_context(store: Option<PathBuf>) -> Result<GlobalContext> {
    Ok(GlobalContext::new()?.with_store(store))
}

/// Open the artifact store for a context.
pub(crate) fn open_store(gctx: &GlobalContext) -> DirStore {
    DirStore::new(gctx.store_dir())
}

/// Convert shared pipeline arguments into install options.
pub(crate) fn install_options(args: &PipelineArgs) -> Result<InstallOptions> {
    Ok(InstallOptions {
        build_type: args.build_type.parse::<BuildType>()?,
        option_overrides: args.options.clone(),
    })
}
