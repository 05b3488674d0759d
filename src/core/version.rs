//! Pinned version parsing.
//!
//! Slipway requires exact versions everywhere: a range would make the
//! resolved graph depend on store contents at resolve time. Short versions
//! like `0.1` or `5.4` are accepted and padded with zero components, since
//! upstream projects rarely use full three-part versions for themselves.

use anyhow::{bail, Result};
use semver::Version;

/// Parse an exact pinned version.
///
/// Rejects anything that looks like a requirement operator or wildcard.
pub fn parse_pinned(s: &str) -> Result<Version> {
    let s = s.trim();

    if s.is_empty() {
        bail!("version must be non-empty");
    }

    if s.starts_with(['^', '~', '>', '<', '=']) || s.contains('*') || s.contains(',') {
        bail!(
            "`{}` is not an exact version: ranges and wildcards are not allowed, pin one version",
            s
        );
    }

    // Split off prerelease/build metadata before counting components.
    let numeric_end = s.find(['-', '+']).unwrap_or(s.len());
    let dots = s[..numeric_end].matches('.').count();

    let padded = match dots {
        0 => format!("{}.0.0{}", &s[..numeric_end], &s[numeric_end..]),
        1 => format!("{}.0{}", &s[..numeric_end], &s[numeric_end..]),
        _ => s.to_string(),
    };

    padded
        .parse::<Version>()
        .map_err(|e| anyhow::anyhow!("invalid version `{}`: {}", s, e))
}
