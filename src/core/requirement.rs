//! Requirement specification.
//!
//! A Requirement declares what a recipe needs from the artifact store: a
//! library name, an exact pinned version, and whether the pin overrides
//! transitively requested versions of the same library.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::core::package_id::PackageId;
use crate::core::version::parse_pinned;
use crate::util::InternedString;

/// A pinned requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Library name
    name: InternedString,

    /// Exact pinned version
    version: Version,

    /// Whether this pin wins over transitively requested versions
    is_override: bool,
}

impl Requirement {
    /// Create a new requirement.
    pub fn new(name: impl Into<InternedString>, version: Version) -> Self {
        Requirement {
            name: name.into(),
            version,
            is_override: false,
        }
    }

    /// Mark this requirement as an override.
    pub fn with_override(mut self, is_override: bool) -> Self {
        self.is_override = is_override;
        self
    }

    /// Parse a `name/version` reference.
    pub fn parse(reference: &str) -> anyhow::Result<Self> {
        let (name, version) = reference.split_once('/').ok_or_else(|| {
            anyhow::anyhow!(
                "invalid requirement `{}`: expected `name/version`",
                reference
            )
        })?;

        if name.is_empty() {
            anyhow::bail!("invalid requirement `{}`: empty library name", reference);
        }

        let version = parse_pinned(version)
            .map_err(|e| anyhow::anyhow!("invalid requirement `{}`: {}", reference, e))?;

        Ok(Requirement::new(name, version))
    }

    /// Get the library name.
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// Get the pinned version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Check if this requirement overrides transitive pins.
    pub fn is_override(&self) -> bool {
        self.is_override
    }

    /// The package identity this requirement pins.
    pub fn package_id(&self) -> PackageId {
        PackageId::new(self.name, self.version.clone())
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if self.is_override {
            write!(f, " (override)")?;
        }
        Ok(())
    }
}

/// Requirement specification as it appears in Recipe.toml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementSpec {
    /// Compact reference: `"sdl/2.30.4"`
    Simple(String),

    /// Detailed specification: `{ ref = "sdl_image/2.6.3", override = true }`
    Detailed(DetailedRequirementSpec),
}

/// Detailed requirement specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedRequirementSpec {
    /// `name/version` reference
    #[serde(rename = "ref")]
    pub reference: String,

    /// Whether this pin wins all conflicts for the library
    #[serde(rename = "override", default)]
    pub is_override: bool,
}

impl RequirementSpec {
    /// Convert to a Requirement.
    pub fn to_requirement(&self) -> anyhow::Result<Requirement> {
        match self {
            RequirementSpec::Simple(reference) => Requirement::parse(reference),
            RequirementSpec::Detailed(spec) => {
                Ok(Requirement::parse(&spec.reference)?.with_override(spec.is_override))
            }
        }
    }
}
