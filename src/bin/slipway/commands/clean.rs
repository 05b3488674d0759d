//! `slipway clean` command

use anyhow::Result;

use crate::cli::CleanArgs;
use slipway::core::Recipe;
use slipway::util::fs::remove_dir_all_if_exists;
use slipway::util::GlobalContext;

pub fn execute(_args: CleanArgs) -> Result<()> {
    let gctx = GlobalContext::new()?;
    let recipe = Recipe::load(&gctx.find_recipe()?)?;

    let build_root = recipe.recipe_dir().join("build");
    remove_dir_all_if_exists(&build_root)?;

    eprintln!("    Removed {}", build_root.display());
    Ok(())
}
