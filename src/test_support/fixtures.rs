//! On-disk project fixtures.

use std::path::Path;

/// A minimal recipe project requiring sdl and glm.
pub const FIXTURE_RECIPE: &str = r#"[recipe]
name = "engine"
version = "0.1"
settings = ["os", "compiler", "build_type", "arch"]
exports-sources = ["CMakeLists.txt", "src/*"]
requires = [
    "sdl/2.30.4",
    "glm/1.0.1",
]

[options]
shared = false
fPIC = true
"#;

/// Write a minimal buildable recipe project into `dir`.
pub fn seed_recipe_project(dir: &Path) {
    std::fs::write(dir.join("Recipe.toml"), FIXTURE_RECIPE).unwrap();
    std::fs::write(
        dir.join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.16)\nproject(engine CXX)\n\
         add_library(engine STATIC src/engine.cpp)\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.join("src")).unwrap();
    std::fs::write(dir.join("src/engine.cpp"), "int engine_version() { return 1; }\n").unwrap();
}
