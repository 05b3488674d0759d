//! CMake build driver.
//!
//! Runs the configure and compile steps against the generated toolchain
//! file and reports produced artifacts. Compiler diagnostics pass through
//! verbatim inside `BuildError`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use walkdir::WalkDir;

use crate::builder::context::BuildContext;
use crate::util::process::{find_cmake, ProcessBuilder};

/// Error from the underlying CMake toolchain.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("cmake not found in PATH")]
    #[diagnostic(
        code(slipway::build::cmake_missing),
        help("Install CMake and ensure it is in your PATH")
    )]
    CmakeNotFound,

    #[error("CMake configure failed")]
    #[diagnostic(
        code(slipway::build::configure_failed),
        help("Run `slipway build --verbose` for full output")
    )]
    ConfigureFailed {
        /// Verbatim output of the failed configure step.
        diagnostics: String,
    },

    #[error("compilation failed")]
    #[diagnostic(
        code(slipway::build::compile_failed),
        help("Run `slipway build --verbose` for full output")
    )]
    CompileFailed {
        /// Verbatim compiler output.
        diagnostics: String,
    },

    #[error("failed to run cmake: {message}")]
    #[diagnostic(code(slipway::build::spawn_failed))]
    Spawn { message: String },
}

impl BuildError {
    /// The raw toolchain output, if any was captured.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            BuildError::ConfigureFailed { diagnostics } => Some(diagnostics),
            BuildError::CompileFailed { diagnostics } => Some(diagnostics),
            _ => None,
        }
    }
}

/// Kind of a produced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    StaticLib,
    SharedLib,
    Executable,
}

/// A file produced by the build.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub name: String,
    pub kind: ArtifactKind,
}

/// Result of a successful build.
#[derive(Debug, Default)]
pub struct BuildResult {
    pub artifacts: Vec<Artifact>,
}

/// Drives cmake configure + build for one invocation.
pub struct CmakeDriver<'a> {
    ctx: &'a BuildContext,
    cmake: PathBuf,
}

impl<'a> CmakeDriver<'a> {
    /// Create a driver, verifying cmake is available.
    pub fn new(ctx: &'a BuildContext) -> Result<Self, BuildError> {
        let cmake = find_cmake().ok_or(BuildError::CmakeNotFound)?;
        Ok(CmakeDriver { ctx, cmake })
    }

    /// Run configure then compile, returning discovered artifacts.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        self.configure()?;
        self.compile()?;
        Ok(self.find_artifacts())
    }

    /// Run the CMake configure step with the generated toolchain.
    pub fn configure(&self) -> Result<(), BuildError> {
        tracing::info!("configuring {}", self.ctx.source_dir().display());

        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(self.ctx.source_dir())
            .arg("-B")
            .arg(self.ctx.layout.cmake_dir())
            .arg(format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                self.ctx.layout.toolchain_file().display()
            ))
            .arg(format!(
                "-DCMAKE_INSTALL_PREFIX={}",
                self.ctx.layout.install_dir().display()
            ));

        let output = cmd.exec().map_err(|e| BuildError::Spawn {
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(BuildError::ConfigureFailed {
                diagnostics: combine_output(&output.stdout, &output.stderr),
            });
        }

        Ok(())
    }

    /// Run the CMake compile step.
    pub fn compile(&self) -> Result<(), BuildError> {
        tracing::info!("building {}", self.ctx.source_dir().display());

        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(self.ctx.layout.cmake_dir())
            .arg("--parallel")
            .args(["--config", self.ctx.settings.build_type.as_cmake_str()]);

        let output = cmd.exec().map_err(|e| BuildError::Spawn {
            message: format!("{:#}", e),
        })?;

        if !output.status.success() {
            return Err(BuildError::CompileFailed {
                diagnostics: combine_output(&output.stdout, &output.stderr),
            });
        }

        Ok(())
    }

    /// Discover artifacts under the CMake binary directory.
    pub fn find_artifacts(&self) -> BuildResult {
        let mut artifacts = Vec::new();

        for entry in WalkDir::new(self.ctx.layout.cmake_dir())
            .max_depth(4)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(kind) = classify(path) else {
                continue;
            };

            let name = path
                .file_stem()
                .and_then(|n| n.to_str())
                .map(|n| n.strip_prefix("lib").unwrap_or(n).to_string())
                .unwrap_or_default();

            artifacts.push(Artifact {
                path: path.to_path_buf(),
                name,
                kind,
            });
        }

        artifacts.sort_by(|a, b| a.path.cmp(&b.path));
        BuildResult { artifacts }
    }
}

/// Classify a build output file by extension (and exec bit on unix).
fn classify(path: &std::path::Path) -> Option<ArtifactKind> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("a") | Some("lib") => Some(ArtifactKind::StaticLib),
        Some("so") | Some("dylib") | Some("dll") => Some(ArtifactKind::SharedLib),
        Some("exe") => Some(ArtifactKind::Executable),
        None => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let executable = path
                    .metadata()
                    .map(|m| m.permissions().mode() & 0o111 != 0)
                    .unwrap_or(false);
                if executable {
                    return Some(ArtifactKind::Executable);
                }
            }
            None
        }
        _ => None,
    }
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut out = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&err);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_classify_libraries() {
        assert_eq!(
            classify(Path::new("libSDL2.a")),
            Some(ArtifactKind::StaticLib)
        );
        assert_eq!(
            classify(Path::new("libSDL2.so")),
            Some(ArtifactKind::SharedLib)
        );
        assert_eq!(
            classify(Path::new("engine.exe")),
            Some(ArtifactKind::Executable)
        );
        assert_eq!(classify(Path::new("CMakeCache.txt")), None);
    }

    #[test]
    fn test_build_error_diagnostics_passthrough() {
        let err = BuildError::CompileFailed {
            diagnostics: "src/game.cpp:10: error: expected `;`".to_string(),
        };

        assert_eq!(
            err.diagnostics(),
            Some("src/game.cpp:10: error: expected `;`")
        );
    }

    #[test]
    fn test_combine_output_joins_streams() {
        let combined = combine_output(b"configuring", b"warning: foo");
        assert!(combined.contains("configuring"));
        assert!(combined.contains("warning: foo"));
    }
}
