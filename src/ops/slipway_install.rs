//! The install operation: resolve + generate.
//!
//! Everything up to (but not including) the compile step. `build` and
//! `create` layer on top of this.

use anyhow::{Context, Result};

use crate::builder::{self, BuildContext};
use crate::core::settings::BuildType;
use crate::core::{BuildLayout, Recipe, Settings};
use crate::resolver::{self, ResolvedGraph};
use crate::store::ArtifactStore;
use crate::util::{BuildDirLock, GlobalContext};

/// Options shared by install/build/create.
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Build type for this invocation.
    pub build_type: BuildType,

    /// `-o key=value` option overrides, applied over the recipe's defaults.
    pub option_overrides: Vec<String>,
}

/// A resolved and generated (but not yet built) invocation.
///
/// Holds the build directory lock for its lifetime.
#[derive(Debug)]
pub struct Installation {
    pub recipe: Recipe,
    pub ctx: BuildContext,
    pub graph: ResolvedGraph,
    _lock: BuildDirLock,
}

/// Resolve the recipe's requirements and generate toolchain artifacts.
pub fn install(
    gctx: &GlobalContext,
    store: &dyn ArtifactStore,
    opts: &InstallOptions,
) -> Result<Installation> {
    let recipe_path = gctx.find_recipe()?;
    let mut recipe = Recipe::load(&recipe_path)?;

    for spec in &opts.option_overrides {
        recipe.options_mut().apply_override(spec)?;
    }

    let settings = Settings::detect(opts.build_type).context("failed to resolve settings axes")?;
    tracing::info!("settings: {}", settings.summary());
    tracing::info!("options: {}", recipe.options().summary());

    let layout = BuildLayout::new(recipe.recipe_dir(), opts.build_type);
    let lock = BuildDirLock::acquire(layout.root())?;
    layout.ensure()?;

    let graph = resolver::resolve(recipe.package_id(), recipe.requirements(), store)
        .map_err(|e| anyhow::anyhow!("{}", e.to_diagnostic().format(false)))
        .context("resolve phase failed")?;
    tracing::info!("resolved {} dependencies", graph.len());

    let options = *recipe.options();
    let source_dir = recipe.recipe_dir().to_path_buf();
    let ctx = BuildContext::new(settings, options, layout, source_dir);

    builder::generate(&ctx, &graph).context("generate phase failed")?;

    Ok(Installation {
        recipe,
        ctx,
        graph,
        _lock: lock,
    })
}
