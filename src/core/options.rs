//! Binary-shape options.
//!
//! The recognized option set is closed: `shared` and `fPIC`. Unknown keys
//! in `[options]` are a load-time error rather than being silently ignored.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Recognized options with their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Build shared libraries instead of static ones.
    #[serde(default)]
    pub shared: bool,

    /// Position-independent code for static libraries. Ignored when
    /// `shared = true`, since shared objects are PIC regardless.
    #[serde(rename = "fPIC", default = "default_fpic")]
    pub fpic: bool,
}

fn default_fpic() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Options {
            shared: false,
            fpic: true,
        }
    }
}

impl Options {
    /// The effective fPIC value: `None` when the option does not apply.
    pub fn effective_fpic(&self) -> Option<bool> {
        if self.shared {
            None
        } else {
            Some(self.fpic)
        }
    }

    /// Apply a `key=value` override from the command line.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid option override `{}`: expected key=value", spec))?;

        let value: bool = match value.trim() {
            "true" | "True" => true,
            "false" | "False" => false,
            other => bail!(
                "invalid value `{}` for option `{}`: expected true or false",
                other,
                key
            ),
        };

        match key.trim() {
            "shared" => self.shared = value,
            "fPIC" => self.fpic = value,
            other => bail!(
                "unrecognized option `{}` (recognized options: shared, fPIC)",
                other
            ),
        }

        Ok(())
    }

    /// A stable textual form used in fingerprints and logs.
    pub fn summary(&self) -> String {
        match self.effective_fpic() {
            Some(fpic) => format!("shared={} fPIC={}", self.shared, fpic),
            None => format!("shared={}", self.shared),
        }
    }
}
