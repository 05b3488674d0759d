//! Resolution error types and diagnostics.

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during dependency resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("version conflict for `{library}`")]
    VersionConflict {
        library: String,
        requirements: Vec<(String, String)>, // (requirer, pinned version)
    },

    #[error("dependency not found: `{library}/{version}`")]
    DependencyNotFound {
        library: String,
        version: String,
        available: Vec<String>,
    },

    #[error("cycle detected in dependency graph")]
    CycleDetected { packages: Vec<String> },

    #[error("store error for `{library}/{version}`: {message}")]
    Store {
        library: String,
        version: String,
        message: String,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::VersionConflict {
                library,
                requirements,
            } => {
                let mut diag = Diagnostic::error(format!("version conflict for `{}`", library));

                for (requirer, version) in requirements {
                    diag = diag
                        .with_context(format!("`{}` pins {} {}", requirer, library, version));
                }

                diag.with_suggestion(format!(
                    "Pin a single version of `{}`, or mark one requirement `override = true`",
                    library
                ))
            }

            ResolveError::DependencyNotFound {
                library,
                version,
                available,
            } => {
                let mut diag = Diagnostic::error(format!(
                    "could not find `{}/{}` in the artifact store",
                    library, version
                ));

                if available.is_empty() {
                    diag = diag.with_context(format!("no versions of `{}` are stored", library));
                } else {
                    diag =
                        diag.with_context(format!("stored versions: {}", available.join(", ")));
                }

                diag.with_suggestion(suggestions::DEPENDENCY_NOT_FOUND.to_string())
            }

            ResolveError::CycleDetected { packages } => {
                Diagnostic::error("cycle detected in dependency graph")
                    .with_context(format!("cycle: {}", packages.join(" -> ")))
                    .with_suggestion(
                        "Break the cycle by removing or restructuring requirements".to_string(),
                    )
            }

            ResolveError::Store {
                library,
                version,
                message,
            } => Diagnostic::error(format!(
                "failed to read `{}/{}` from the artifact store",
                library, version
            ))
            .with_context(message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_diagnostic_lists_requirers() {
        let err = ResolveError::VersionConflict {
            library: "sdl_image".to_string(),
            requirements: vec![
                ("GameEngine".to_string(), "2.6.3".to_string()),
                ("sdl".to_string(), "2.6.0".to_string()),
            ],
        };

        let out = err.to_diagnostic().format(false);
        assert!(out.contains("`GameEngine` pins sdl_image 2.6.3"));
        assert!(out.contains("`sdl` pins sdl_image 2.6.0"));
    }

    #[test]
    fn test_not_found_diagnostic_shows_available() {
        let err = ResolveError::DependencyNotFound {
            library: "lua".to_string(),
            version: "5.4.6".to_string(),
            available: vec!["5.4.4".to_string()],
        };

        let out = err.to_diagnostic().format(false);
        assert!(out.contains("stored versions: 5.4.4"));
    }
}
