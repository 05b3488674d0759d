//! CLI integration tests for Slipway.
//!
//! These tests verify the CLI workflow from project creation through
//! resolution and toolchain generation. Compile-and-package flows need a
//! real CMake toolchain and are covered by unit tests against the driver.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the slipway binary command.
fn slipway() -> Command {
    Command::cargo_bin("slipway").unwrap()
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Seed a store entry at `<store>/<name>/<version>/`.
fn seed_store_entry(store: &Path, name: &str, version: &str, requires: &[&str]) {
    let dir = store.join(name).join(version);
    fs::create_dir_all(dir.join("include")).unwrap();
    fs::create_dir_all(dir.join("lib")).unwrap();

    let requires_toml = requires
        .iter()
        .map(|r| format!("\"{}\"", r))
        .collect::<Vec<_>>()
        .join(", ");
    fs::write(
        dir.join("slipway-pkg.toml"),
        format!(
            "[package]\nname = \"{}\"\nversion = \"{}\"\nrequires = [{}]\n",
            name, version, requires_toml
        ),
    )
    .unwrap();
}

/// Write the reference recipe into `dir`.
fn seed_project(dir: &Path) {
    fs::write(
        dir.join("Recipe.toml"),
        r#"[recipe]
name = "GameEngine"
version = "0.1"
settings = ["os", "compiler", "build_type", "arch"]
exports-sources = ["CMakeLists.txt", "src/*"]
requires = [
    "sdl/2.30.4",
    { ref = "sdl_image/2.6.3", override = true },
]

[options]
shared = false
fPIC = true
"#,
    )
    .unwrap();
    fs::write(
        dir.join("CMakeLists.txt"),
        "cmake_minimum_required(VERSION 3.16)\nproject(GameEngine CXX)\n",
    )
    .unwrap();
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("src/main.cpp"), "int main() { return 0; }\n").unwrap();
}

// ============================================================================
// slipway new / init
// ============================================================================

#[test]
fn test_new_creates_recipe_project() {
    let tmp = temp_dir();
    let project_dir = tmp.path().join("engine");

    slipway()
        .args(["new", "engine"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(project_dir.join("Recipe.toml").exists());
    assert!(project_dir.join("CMakeLists.txt").exists());
    assert!(project_dir.join("src/engine.cpp").exists());

    let recipe = fs::read_to_string(project_dir.join("Recipe.toml")).unwrap();
    assert!(recipe.contains("name = \"engine\""));
    assert!(recipe.contains("fPIC = true"));
}

#[test]
fn test_new_fails_if_recipe_exists() {
    let tmp = temp_dir();

    slipway()
        .args(["new", "engine"])
        .current_dir(tmp.path())
        .assert()
        .success();

    slipway()
        .args(["new", "engine"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already contains"));
}

#[test]
fn test_init_in_existing_directory() {
    let tmp = temp_dir();

    slipway()
        .args(["init"])
        .current_dir(tmp.path())
        .assert()
        .success();

    assert!(tmp.path().join("Recipe.toml").exists());
}

// ============================================================================
// slipway graph
// ============================================================================

#[test]
fn test_graph_shows_override_winning() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    // sdl transitively pins sdl_image 2.6.0; the recipe override pins 2.6.3.
    seed_store_entry(&store, "sdl", "2.30.4", &["sdl_image/2.6.0"]);
    seed_store_entry(&store, "sdl_image", "2.6.0", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    slipway()
        .args(["graph", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("sdl_image/2.6.3"))
        .stdout(predicate::str::contains("sdl_image/2.6.0").not());
}

#[test]
fn test_graph_json_output() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    seed_store_entry(&store, "sdl", "2.30.4", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    let output = slipway()
        .args(["graph", "--format", "json", "--store"])
        .arg(&store)
        .current_dir(&project)
        .output()
        .unwrap();

    assert!(output.status.success());
    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["root"], "GameEngine/0.1.0");
    assert_eq!(doc["packages"].as_array().unwrap().len(), 2);
}

#[test]
fn test_graph_reports_missing_dependency() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();
    fs::create_dir_all(&store).unwrap();

    seed_project(&project);

    slipway()
        .args(["graph", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `sdl/2.30.4`"));
}

// ============================================================================
// slipway install
// ============================================================================

#[test]
fn test_install_generates_toolchain_with_pic() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    seed_store_entry(&store, "sdl", "2.30.4", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    slipway()
        .args(["install", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .success();

    let toolchain = project.join("build/release/generators/slipway_toolchain.cmake");
    let contents = fs::read_to_string(&toolchain).unwrap();
    assert!(contents.contains("CMAKE_POSITION_INDEPENDENT_CODE ON"));
    assert!(contents.contains("BUILD_SHARED_LIBS OFF"));
    assert!(project
        .join("build/release/generators/sdl-config.cmake")
        .exists());
}

#[test]
fn test_install_twice_produces_identical_toolchain() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    seed_store_entry(&store, "sdl", "2.30.4", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    let run = || {
        slipway()
            .args(["install", "--store"])
            .arg(&store)
            .current_dir(&project)
            .assert()
            .success();
        fs::read(project.join("build/release/generators/slipway_toolchain.cmake")).unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_install_option_override_from_cli() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    seed_store_entry(&store, "sdl", "2.30.4", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    slipway()
        .args(["install", "-o", "shared=true", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .success();

    let toolchain =
        fs::read_to_string(project.join("build/release/generators/slipway_toolchain.cmake"))
            .unwrap();
    assert!(toolchain.contains("BUILD_SHARED_LIBS ON"));
    assert!(!toolchain.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
}

#[test]
fn test_install_rejects_unknown_option() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();
    seed_project(&project);

    slipway()
        .args(["install", "-o", "lto=true"])
        .current_dir(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized option"));
}

// ============================================================================
// slipway clean
// ============================================================================

#[test]
fn test_clean_removes_build_directory() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();

    seed_project(&project);
    seed_store_entry(&store, "sdl", "2.30.4", &[]);
    seed_store_entry(&store, "sdl_image", "2.6.3", &[]);

    slipway()
        .args(["install", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .success();
    assert!(project.join("build").exists());

    slipway()
        .args(["clean"])
        .current_dir(&project)
        .assert()
        .success();
    assert!(!project.join("build").exists());
}

// ============================================================================
// error surfacing
// ============================================================================

#[test]
fn test_resolve_failure_names_the_phase() {
    let tmp = temp_dir();
    let project = tmp.path().join("project");
    let store = tmp.path().join("store");
    fs::create_dir_all(&project).unwrap();
    fs::create_dir_all(&store).unwrap();

    seed_project(&project);

    slipway()
        .args(["install", "--store"])
        .arg(&store)
        .current_dir(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("resolve phase failed"));
}

#[test]
fn test_missing_recipe_is_reported() {
    let tmp = temp_dir();

    slipway()
        .args(["graph"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recipe.toml"));
}
