//! Per-dependency CMake config generation.
//!
//! Each resolved store entry becomes a `<name>-config.cmake` that
//! find_package() can consume in CONFIG mode, exposing the entry's
//! include/lib directories and an imported interface target.

use crate::store::StoreEntry;

/// Render the config file for one resolved dependency.
pub fn render_dep_config(entry: &StoreEntry) -> String {
    let package_id = entry.package_id();
    let name = package_id.name();
    let version = package_id.version();

    let include_dir = cmake_path(&entry.include_dir().to_string_lossy());
    let lib_dir = cmake_path(&entry.lib_dir().to_string_lossy());

    let mut libs = entry.link_libs();
    libs.sort();

    let mut out = String::from("# Generated by slipway. Do not edit.\n");
    out.push_str(&format!("set({}_FOUND TRUE)\n", name));
    out.push_str(&format!("set({}_VERSION \"{}\")\n", name, version));
    out.push_str(&format!("set({}_INCLUDE_DIRS \"{}\")\n", name, include_dir));
    out.push_str(&format!("set({}_LIBRARY_DIRS \"{}\")\n", name, lib_dir));
    out.push_str(&format!("set({}_LIBRARIES \"{}\")\n", name, libs.join(";")));

    out.push_str(&format!("if(NOT TARGET {name}::{name})\n"));
    out.push_str(&format!("  add_library({name}::{name} INTERFACE IMPORTED)\n"));
    out.push_str(&format!("  set_target_properties({name}::{name} PROPERTIES\n"));
    out.push_str(&format!(
        "    INTERFACE_INCLUDE_DIRECTORIES \"{}\"\n",
        include_dir
    ));
    out.push_str(&format!("    INTERFACE_LINK_DIRECTORIES \"{}\"\n", lib_dir));
    out.push_str(&format!(
        "    INTERFACE_LINK_LIBRARIES \"{}\")\n",
        libs.join(";")
    ));
    out.push_str("endif()\n");

    out
}

/// CMake wants forward slashes even on Windows.
fn cmake_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageId;
    use crate::store::{PackageMetadata, StoreEntry};
    use semver::Version;
    use std::path::PathBuf;

    fn entry_with_libs(libs: &[&str]) -> StoreEntry {
        let mut metadata = PackageMetadata::bare("sdl", "2.30.4");
        metadata.cmake.libs = libs.iter().map(|s| s.to_string()).collect();

        StoreEntry::new(
            PackageId::new("sdl", Version::new(2, 30, 4)),
            PathBuf::from("/store/sdl/2.30.4"),
            metadata,
        )
    }

    #[test]
    fn test_render_sets_package_variables() {
        let rendered = render_dep_config(&entry_with_libs(&["SDL2", "SDL2main"]));

        assert!(rendered.contains("set(sdl_FOUND TRUE)"));
        assert!(rendered.contains("set(sdl_VERSION \"2.30.4\")"));
        assert!(rendered.contains("set(sdl_INCLUDE_DIRS \"/store/sdl/2.30.4/include\")"));
        assert!(rendered.contains("set(sdl_LIBRARIES \"SDL2;SDL2main\")"));
        assert!(rendered.contains("add_library(sdl::sdl INTERFACE IMPORTED)"));
    }

    #[test]
    fn test_render_is_stable() {
        let entry = entry_with_libs(&["SDL2"]);

        assert_eq!(render_dep_config(&entry), render_dep_config(&entry));
    }
}
