//! The build operation: install + configure + compile.

use anyhow::{Context, Result};

use crate::builder::{Artifact, BuildError, BuildResult, CmakeDriver};
use crate::ops::slipway_install::{install, InstallOptions, Installation};
use crate::store::ArtifactStore;
use crate::util::GlobalContext;

/// Result of a build operation.
pub struct BuildOutcome {
    pub artifacts: Vec<Artifact>,
}

/// Run the pipeline through the compile step.
pub fn build(
    gctx: &GlobalContext,
    store: &dyn ArtifactStore,
    opts: &InstallOptions,
) -> Result<BuildOutcome> {
    let installation = install(gctx, store, opts)?;
    let result = run_cmake(&installation)?;

    Ok(BuildOutcome {
        artifacts: result.artifacts,
    })
}

/// Drive cmake for an installed invocation.
///
/// Shared by `build` and `create`; toolchain diagnostics pass through
/// verbatim in the error chain.
pub(crate) fn run_cmake(installation: &Installation) -> Result<BuildResult> {
    let driver = CmakeDriver::new(&installation.ctx)
        .map_err(build_error_to_anyhow)
        .context("build phase failed")?;

    driver
        .build()
        .map_err(build_error_to_anyhow)
        .context("build phase failed")
}

fn build_error_to_anyhow(e: BuildError) -> anyhow::Error {
    match e.diagnostics() {
        Some(diag) if !diag.is_empty() => anyhow::anyhow!("{}\n{}", e, diag),
        _ => anyhow::Error::new(e),
    }
}
