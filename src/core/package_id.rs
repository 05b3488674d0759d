//! Package identification - WHAT package (name + exact version).
//!
//! PackageId uniquely identifies a pinned package instance.
//! It's interned for cheap comparison and cloning.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{LazyLock, RwLock};

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::util::InternedString;

/// Global package ID interner
static PACKAGE_INTERNER: LazyLock<RwLock<HashMap<PackageIdInner, &'static PackageIdInner>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// A unique identifier for a pinned package (interned).
///
/// PackageIds are cheap to clone and compare (pointer comparison). Because
/// every version in a slipway graph is exact, name + version is a complete
/// identity.
#[derive(Clone, Copy)]
pub struct PackageId {
    inner: &'static PackageIdInner,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PackageIdInner {
    name: InternedString,
    version: Version,
}

impl PackageId {
    /// Create a new package ID.
    pub fn new(name: impl Into<InternedString>, version: Version) -> Self {
        let inner = PackageIdInner {
            name: name.into(),
            version,
        };

        Self::intern(inner)
    }

    fn intern(inner: PackageIdInner) -> Self {
        // Fast path: check if already interned
        {
            let interner = PACKAGE_INTERNER.read().unwrap();
            if let Some(&interned) = interner.get(&inner) {
                return PackageId { inner: interned };
            }
        }

        let mut interner = PACKAGE_INTERNER.write().unwrap();

        // Double-check after acquiring write lock
        if let Some(&interned) = interner.get(&inner) {
            return PackageId { inner: interned };
        }

        let leaked: &'static PackageIdInner = Box::leak(Box::new(inner.clone()));
        interner.insert(inner, leaked);

        PackageId { inner: leaked }
    }

    /// Get the package name.
    pub fn name(&self) -> InternedString {
        self.inner.name
    }

    /// Get the pinned version.
    pub fn version(&self) -> &Version {
        &self.inner.version
    }

    /// Get a display string like "sdl/2.30.4".
    pub fn as_ref_str(&self) -> String {
        format!("{}/{}", self.inner.name, self.inner.version)
    }
}

impl PartialEq for PackageId {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.inner, other.inner)
    }
}

impl Eq for PackageId {}

impl Hash for PackageId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.inner, state)
    }
}

impl PartialOrd for PackageId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner
            .name
            .cmp(&other.inner.name)
            .then_with(|| self.inner.version.cmp(&other.inner.version))
    }
}

impl fmt::Debug for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageId")
            .field("name", &self.inner.name.as_str())
            .field("version", &self.inner.version)
            .finish()
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.inner.name, self.inner.version)
    }
}

impl Serialize for PackageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.as_ref_str())
    }
}

impl<'de> Deserialize<'de> for PackageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let (name, version) = s
            .split_once('/')
            .ok_or_else(|| serde::de::Error::custom("expected `name/version`"))?;
        let version = crate::core::version::parse_pinned(version).map_err(serde::de::Error::custom)?;
        Ok(PackageId::new(name, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_id_interning() {
        let id1 = PackageId::new("sdl", Version::new(2, 30, 4));
        let id2 = PackageId::new("sdl", Version::new(2, 30, 4));

        assert_eq!(id1, id2);
        assert!(std::ptr::eq(id1.inner, id2.inner));
    }

    #[test]
    fn test_package_id_different_versions() {
        let id1 = PackageId::new("sdl_image", Version::new(2, 6, 0));
        let id2 = PackageId::new("sdl_image", Version::new(2, 6, 3));

        assert_ne!(id1, id2);
    }

    #[test]
    fn test_package_id_ordering() {
        let id1 = PackageId::new("glm", Version::new(1, 0, 1));
        let id2 = PackageId::new("lua", Version::new(5, 4, 6));
        let id3 = PackageId::new("glm", Version::new(1, 0, 2));

        assert!(id1 < id2);
        assert!(id1 < id3);
    }

    #[test]
    fn test_display() {
        let id = PackageId::new("spdlog", Version::new(1, 14, 1));

        assert_eq!(id.as_ref_str(), "spdlog/1.14.1");
    }
}
