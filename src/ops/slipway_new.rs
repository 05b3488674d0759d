//! Project scaffolding for `slipway new` and `slipway init`.

use std::path::Path;

use anyhow::{bail, Result};

use crate::core::RECIPE_FILE_NAME;
use crate::util::fs::{ensure_dir, write_string};

const RECIPE_TEMPLATE: &str = r#"[recipe]
name = "{name}"
version = "0.1"
settings = ["os", "compiler", "build_type", "arch"]
exports-sources = ["CMakeLists.txt", "src/*"]
requires = []

[options]
shared = false
fPIC = true
"#;

const CMAKE_TEMPLATE: &str = r#"cmake_minimum_required(VERSION 3.16)
project({name} CXX)

add_library({name} STATIC src/{name}.cpp)
target_include_directories({name} PUBLIC include)
"#;

const SOURCE_TEMPLATE: &str = r#"int {name}_version() {
    return 1;
}
"#;

/// Create a new project directory with a recipe skeleton.
pub fn new_project(name: &str, path: Option<&Path>) -> Result<()> {
    if name.is_empty() || name.contains('/') {
        bail!("invalid package name `{}`", name);
    }

    let dir = path.map(Path::to_path_buf).unwrap_or_else(|| name.into());
    if dir.join(RECIPE_FILE_NAME).exists() {
        bail!("`{}` already contains a recipe", dir.display());
    }

    ensure_dir(&dir)?;
    scaffold(&dir, name)
}

/// Initialize a recipe in an existing directory.
pub fn init_project(dir: &Path, name: Option<&str>) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("cannot infer package name from directory"))?,
    };

    if dir.join(RECIPE_FILE_NAME).exists() {
        bail!("`{}` already contains a recipe", dir.display());
    }

    scaffold(dir, &name)
}

fn scaffold(dir: &Path, name: &str) -> Result<()> {
    write_string(
        &dir.join(RECIPE_FILE_NAME),
        &RECIPE_TEMPLATE.replace("{name}", name),
    )?;
    write_string(
        &dir.join("CMakeLists.txt"),
        &CMAKE_TEMPLATE.replace("{name}", name),
    )?;
    write_string(
        &dir.join("src").join(format!("{}.cpp", name)),
        &SOURCE_TEMPLATE.replace("{name}", name),
    )?;

    tracing::info!("created package `{}` at {}", name, dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Recipe;
    use tempfile::TempDir;

    #[test]
    fn test_new_project_scaffolds_loadable_recipe() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("engine");

        new_project("engine", Some(&dir)).unwrap();

        let recipe = Recipe::load(&dir.join(RECIPE_FILE_NAME)).unwrap();
        assert_eq!(recipe.name().as_str(), "engine");
        assert!(dir.join("CMakeLists.txt").is_file());
        assert!(dir.join("src/engine.cpp").is_file());
    }

    #[test]
    fn test_new_refuses_existing_recipe() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("engine");

        new_project("engine", Some(&dir)).unwrap();
        let err = new_project("engine", Some(&dir)).unwrap_err();

        assert!(err.to_string().contains("already contains"));
    }

    #[test]
    fn test_init_infers_name_from_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("my-engine");
        std::fs::create_dir_all(&dir).unwrap();

        init_project(&dir, None).unwrap();

        let recipe = Recipe::load(&dir.join(RECIPE_FILE_NAME)).unwrap();
        assert_eq!(recipe.name().as_str(), "my-engine");
    }
}
