//! Recipe.toml parsing and schema.
//!
//! The recipe is the build configuration descriptor: package identity, the
//! settings axes the build varies over, binary-shape options, pinned
//! requirements, and the exported source set.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::Deserialize;

use crate::core::options::Options;
use crate::core::package_id::PackageId;
use crate::core::requirement::{Requirement, RequirementSpec};
use crate::core::settings::SettingsAxis;
use crate::core::version::parse_pinned;
use crate::util::fs::read_to_string;
use crate::util::InternedString;

/// The canonical recipe file name.
pub const RECIPE_FILE_NAME: &str = "Recipe.toml";

/// Raw Recipe.toml schema.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeToml {
    recipe: RecipeSection,

    #[serde(default)]
    options: Options,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecipeSection {
    name: String,

    version: String,

    /// Axis names the build varies over.
    #[serde(default)]
    settings: Vec<String>,

    /// Glob patterns for sources exported alongside the recipe.
    #[serde(default, rename = "exports-sources")]
    exports_sources: Vec<String>,

    /// Pinned requirements, in declaration order.
    #[serde(default)]
    requires: Vec<RequirementSpec>,
}

/// The parsed and validated recipe.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Package name
    name: InternedString,

    /// Package version (exact)
    version: Version,

    /// Validated settings axes
    settings: Vec<SettingsAxis>,

    /// Binary-shape options
    options: Options,

    /// Direct requirements in declaration order
    requirements: Vec<Requirement>,

    /// Exported source patterns
    exports_sources: Vec<String>,

    /// The directory containing the recipe file
    recipe_dir: PathBuf,
}

impl Recipe {
    /// Load and validate a recipe from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        let raw: RecipeToml = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let recipe_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Self::from_raw(raw, recipe_dir)
            .with_context(|| format!("invalid recipe: {}", path.display()))
    }

    /// Parse a recipe from a TOML string (tests and fixtures).
    pub fn parse(contents: &str, recipe_dir: PathBuf) -> Result<Self> {
        let raw: RecipeToml = toml::from_str(contents).context("failed to parse recipe")?;
        Self::from_raw(raw, recipe_dir)
    }

    fn from_raw(raw: RecipeToml, recipe_dir: PathBuf) -> Result<Self> {
        if raw.recipe.name.is_empty() {
            bail!("package name must be non-empty");
        }
        if raw.recipe.name.contains('/') {
            bail!("package name `{}` must not contain `/`", raw.recipe.name);
        }

        let version = parse_pinned(&raw.recipe.version)
            .with_context(|| format!("invalid package version `{}`", raw.recipe.version))?;

        let mut settings = Vec::new();
        for axis in &raw.recipe.settings {
            let axis: SettingsAxis = axis.parse()?;
            if settings.contains(&axis) {
                bail!("settings axis `{}` declared twice", axis);
            }
            settings.push(axis);
        }

        let mut requirements = Vec::new();
        for spec in &raw.recipe.requires {
            let req = spec.to_requirement()?;
            if requirements
                .iter()
                .any(|existing: &Requirement| existing.name() == req.name())
            {
                bail!("duplicate requirement for `{}`", req.name());
            }
            requirements.push(req);
        }

        Ok(Recipe {
            name: InternedString::new(&raw.recipe.name),
            version,
            settings,
            options: raw.options,
            requirements,
            exports_sources: raw.recipe.exports_sources,
            recipe_dir,
        })
    }

    /// Get the package name.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// Get the package version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// The identity of the package this recipe describes.
    pub fn package_id(&self) -> PackageId {
        PackageId::new(self.name, self.version.clone())
    }

    /// The declared settings axes.
    pub fn settings(&self) -> &[SettingsAxis] {
        &self.settings
    }

    /// The binary-shape options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable access for CLI `-o key=value` overrides.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Direct requirements in declaration order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Exported source patterns.
    pub fn exports_sources(&self) -> &[String] {
        &self.exports_sources
    }

    /// The directory containing the recipe file.
    pub fn recipe_dir(&self) -> &Path {
        &self.recipe_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_ENGINE: &str = r#"
[recipe]
name = "GameEngine"
version = "0.1"
settings = ["os", "compiler", "build_type", "arch"]
exports-sources = ["CMakeLists.txt", "src/*"]
requires = [
    "sdl/2.30.4",
    { ref = "sdl_image/2.6.3", override = true },
    { ref = "sdl_mixer/2.8.0", override = true },
    { ref = "sdl_ttf/2.22.0", override = true },
    "imgui/1.90.8",
    "glm/1.0.1",
    "lua/5.4.6",
    "sol2/3.3.1",
    "spdlog/1.14.1",
]

[options]
shared = false
fPIC = true
"#;

    #[test]
    fn test_parse_reference_recipe() {
        let recipe = Recipe::parse(GAME_ENGINE, PathBuf::from(".")).unwrap();

        assert_eq!(recipe.name().as_str(), "GameEngine");
        assert_eq!(recipe.version(), &Version::new(0, 1, 0));
        assert_eq!(recipe.settings().len(), 4);
        assert_eq!(recipe.requirements().len(), 9);
        assert!(!recipe.options().shared);
        assert!(recipe.options().fpic);

        let overrides: Vec<_> = recipe
            .requirements()
            .iter()
            .filter(|r| r.is_override())
            .map(|r| r.name().as_str())
            .collect();
        assert_eq!(overrides, ["sdl_image", "sdl_mixer", "sdl_ttf"]);
    }

    #[test]
    fn test_requirement_order_preserved() {
        let recipe = Recipe::parse(GAME_ENGINE, PathBuf::from(".")).unwrap();

        let names: Vec<_> = recipe
            .requirements()
            .iter()
            .map(|r| r.name().as_str())
            .collect();
        assert_eq!(names[0], "sdl");
        assert_eq!(names[8], "spdlog");
    }

    #[test]
    fn test_empty_name_rejected() {
        let toml = r#"
[recipe]
name = ""
version = "1.0"
"#;
        assert!(Recipe::parse(toml, PathBuf::from(".")).is_err());
    }

    #[test]
    fn test_unknown_settings_axis_rejected() {
        let toml = r#"
[recipe]
name = "x"
version = "1.0"
settings = ["os", "platform"]
"#;
        let err = Recipe::parse(toml, PathBuf::from(".")).unwrap_err();
        assert!(format!("{:#}", err).contains("unrecognized settings axis"));
    }

    #[test]
    fn test_unknown_option_rejected() {
        let toml = r#"
[recipe]
name = "x"
version = "1.0"

[options]
lto = true
"#;
        assert!(Recipe::parse(toml, PathBuf::from(".")).is_err());
    }

    #[test]
    fn test_range_requirement_rejected() {
        let toml = r#"
[recipe]
name = "x"
version = "1.0"
requires = ["sdl/^2.30"]
"#;
        assert!(Recipe::parse(toml, PathBuf::from(".")).is_err());
    }

    #[test]
    fn test_duplicate_requirement_rejected() {
        let toml = r#"
[recipe]
name = "x"
version = "1.0"
requires = ["sdl/2.30.4", "sdl/2.30.5"]
"#;
        let err = Recipe::parse(toml, PathBuf::from(".")).unwrap_err();
        assert!(format!("{:#}", err).contains("duplicate requirement"));
    }
}
