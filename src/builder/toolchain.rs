//! Toolchain artifact generation.
//!
//! Emits `slipway_toolchain.cmake` plus one `<name>-config.cmake` per
//! resolved dependency into the generators directory. Output is a pure
//! function of (graph, settings, options): rendering iterates in sorted
//! order and embeds no timestamps, so re-running with unchanged inputs
//! reproduces byte-identical files.

use anyhow::{Context, Result};

use crate::builder::context::BuildContext;
use crate::builder::deps;
use crate::core::settings::Compiler;
use crate::resolver::ResolvedGraph;
use crate::util::fs::write_string;
use crate::util::hash::ComponentHasher;

/// Outcome of toolchain generation.
#[derive(Debug)]
pub struct GenerateResult {
    /// Files written (or confirmed fresh), relative to the generators dir.
    pub files: Vec<String>,

    /// Whether the fingerprint matched and writing was skipped.
    pub fresh: bool,
}

/// Generate toolchain artifacts for a resolved graph.
pub fn generate(ctx: &BuildContext, graph: &ResolvedGraph) -> Result<GenerateResult> {
    let generators_dir = ctx.layout.generators_dir();

    let mut files: Vec<(String, String)> = Vec::new();
    files.push((
        "slipway_toolchain.cmake".to_string(),
        render_toolchain(ctx),
    ));

    let mut entries: Vec<_> = graph.dependencies().collect();
    entries.sort_by_key(|e| e.package_id());
    for entry in entries {
        files.push((
            format!("{}-config.cmake", entry.package_id().name()),
            deps::render_dep_config(entry),
        ));
    }

    let fingerprint = fingerprint(ctx, &files);
    let fingerprint_file = ctx.layout.fingerprint_file();

    let fresh = std::fs::read_to_string(&fingerprint_file)
        .map(|stored| stored == fingerprint)
        .unwrap_or(false)
        && files
            .iter()
            .all(|(name, _)| generators_dir.join(name).is_file());

    if fresh {
        tracing::info!("toolchain artifacts are up to date");
    } else {
        for (name, contents) in &files {
            write_string(&generators_dir.join(name), contents)
                .with_context(|| format!("failed to write generator file `{}`", name))?;
        }
        write_string(&fingerprint_file, &fingerprint)?;
        tracing::info!("generated {} toolchain artifacts", files.len());
    }

    Ok(GenerateResult {
        files: files.into_iter().map(|(name, _)| name).collect(),
        fresh,
    })
}

/// Render the toolchain file for the active settings and options.
fn render_toolchain(ctx: &BuildContext) -> String {
    let mut out = String::from("# Generated by slipway. Do not edit.\n");

    out.push_str(&format!(
        "set(CMAKE_SYSTEM_NAME {} CACHE STRING \"\" FORCE)\n",
        ctx.settings.os.cmake_system_name()
    ));
    out.push_str(&format!(
        "set(CMAKE_BUILD_TYPE {} CACHE STRING \"\" FORCE)\n",
        ctx.settings.build_type.as_cmake_str()
    ));

    out.push_str(&format!(
        "set(BUILD_SHARED_LIBS {} CACHE BOOL \"\" FORCE)\n",
        if ctx.options.shared { "ON" } else { "OFF" }
    ));

    if let Some(fpic) = ctx.options.effective_fpic() {
        out.push_str(&format!(
            "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"\" FORCE)\n",
            if fpic { "ON" } else { "OFF" }
        ));
    }

    if let Some(flag) = runtime_flags(ctx.settings.compiler) {
        out.push_str(&format!(
            "string(APPEND CMAKE_CXX_FLAGS_INIT \" {}\")\n",
            flag
        ));
    }

    // Make the generated <name>-config.cmake files visible to find_package.
    out.push_str("list(PREPEND CMAKE_PREFIX_PATH \"${CMAKE_CURRENT_LIST_DIR}\")\n");

    out
}

/// Extra compiler flags implied by the compiler axis.
fn runtime_flags(compiler: Compiler) -> Option<&'static str> {
    match compiler {
        // MSVC multi-process compilation; harmless under ninja.
        Compiler::Msvc => Some("/MP"),
        _ => None,
    }
}

/// Fingerprint over everything that feeds the rendered output.
fn fingerprint(ctx: &BuildContext, files: &[(String, String)]) -> String {
    let mut hasher = ComponentHasher::new();
    hasher.update(ctx.settings.summary());
    hasher.update(ctx.options.summary());
    for (name, contents) in files {
        hasher.update(name);
        hasher.update(contents);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{Arch, BuildType, Os, Settings};
    use crate::core::{BuildLayout, Options, PackageId};
    use crate::test_support::StubStore;
    use crate::{resolver, store::ArtifactStore};
    use semver::Version;
    use std::path::Path;
    use tempfile::TempDir;

    fn test_settings() -> Settings {
        Settings {
            os: Os::Linux,
            compiler: Compiler::Gcc,
            build_type: BuildType::Release,
            arch: Arch::X86_64,
        }
    }

    fn test_ctx(root: &Path, options: Options) -> BuildContext {
        BuildContext::new(
            test_settings(),
            options,
            BuildLayout::new(root, BuildType::Release),
            root.to_path_buf(),
        )
    }

    fn test_graph(store: &StubStore) -> ResolvedGraph {
        let root = PackageId::new("engine", Version::new(0, 1, 0));
        let reqs = [
            crate::core::Requirement::parse("sdl/2.30.4").unwrap(),
            crate::core::Requirement::parse("glm/1.0.1").unwrap(),
        ];
        resolver::resolve(root, &reqs, store as &dyn ArtifactStore).unwrap()
    }

    #[test]
    fn test_static_fpic_sets_pic_flag() {
        let tmp = TempDir::new().unwrap();
        let ctx = test_ctx(
            tmp.path(),
            Options {
                shared: false,
                fpic: true,
            },
        );

        let rendered = render_toolchain(&ctx);
        assert!(rendered.contains("CMAKE_POSITION_INDEPENDENT_CODE ON"));
        assert!(rendered.contains("BUILD_SHARED_LIBS OFF"));
    }

    #[test]
    fn test_shared_omits_pic_flag() {
        let tmp = TempDir::new().unwrap();
        let ctx = test_ctx(
            tmp.path(),
            Options {
                shared: true,
                fpic: true,
            },
        );

        let rendered = render_toolchain(&ctx);
        assert!(!rendered.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(rendered.contains("BUILD_SHARED_LIBS ON"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = StubStore::new()
            .with_package("sdl", "2.30.4", &[])
            .with_package("glm", "1.0.1", &[]);
        let graph = test_graph(&store);
        let ctx = test_ctx(tmp.path(), Options::default());
        ctx.layout.ensure().unwrap();

        let first = generate(&ctx, &graph).unwrap();
        assert!(!first.fresh);

        let snapshot: Vec<(String, Vec<u8>)> = first
            .files
            .iter()
            .map(|name| {
                let path = ctx.layout.generators_dir().join(name);
                (name.clone(), std::fs::read(path).unwrap())
            })
            .collect();

        let second = generate(&ctx, &graph).unwrap();
        assert!(second.fresh);

        for (name, bytes) in snapshot {
            let path = ctx.layout.generators_dir().join(&name);
            assert_eq!(std::fs::read(path).unwrap(), bytes, "{} changed", name);
        }
    }

    #[test]
    fn test_option_change_invalidates_fingerprint() {
        let tmp = TempDir::new().unwrap();
        let store = StubStore::new()
            .with_package("sdl", "2.30.4", &[])
            .with_package("glm", "1.0.1", &[]);
        let graph = test_graph(&store);

        let ctx = test_ctx(tmp.path(), Options::default());
        ctx.layout.ensure().unwrap();
        generate(&ctx, &graph).unwrap();

        let ctx = test_ctx(
            tmp.path(),
            Options {
                shared: true,
                fpic: true,
            },
        );
        let rerun = generate(&ctx, &graph).unwrap();
        assert!(!rerun.fresh);
    }

    #[test]
    fn test_dep_config_files_written() {
        let tmp = TempDir::new().unwrap();
        let store = StubStore::new()
            .with_package("sdl", "2.30.4", &[])
            .with_package("glm", "1.0.1", &[]);
        let graph = test_graph(&store);
        let ctx = test_ctx(tmp.path(), Options::default());
        ctx.layout.ensure().unwrap();

        generate(&ctx, &graph).unwrap();

        assert!(ctx.layout.generators_dir().join("sdl-config.cmake").is_file());
        assert!(ctx.layout.generators_dir().join("glm-config.cmake").is_file());
        assert!(ctx.layout.toolchain_file().is_file());
    }
}
