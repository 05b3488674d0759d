//! Settings axes - the environment-resolved build configuration.
//!
//! A recipe declares WHICH axes it varies over; the concrete values come
//! from the invoking host (and CLI flags for build_type), never from the
//! recipe itself.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::util::process::find_compiler;

/// A recognized settings axis name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsAxis {
    Os,
    Compiler,
    BuildType,
    Arch,
}

impl FromStr for SettingsAxis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "os" => Ok(SettingsAxis::Os),
            "compiler" => Ok(SettingsAxis::Compiler),
            "build_type" => Ok(SettingsAxis::BuildType),
            "arch" => Ok(SettingsAxis::Arch),
            other => bail!(
                "unrecognized settings axis `{}` (expected os, compiler, build_type, or arch)",
                other
            ),
        }
    }
}

impl fmt::Display for SettingsAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SettingsAxis::Os => "os",
            SettingsAxis::Compiler => "compiler",
            SettingsAxis::BuildType => "build_type",
            SettingsAxis::Arch => "arch",
        };
        write!(f, "{}", s)
    }
}

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Macos,
    Windows,
}

impl Os {
    /// Detect the host operating system.
    pub fn detect() -> Result<Self> {
        match std::env::consts::OS {
            "linux" => Ok(Os::Linux),
            "macos" => Ok(Os::Macos),
            "windows" => Ok(Os::Windows),
            other => bail!("unsupported operating system `{}`", other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Macos => "macos",
            Os::Windows => "windows",
        }
    }

    /// The CMAKE_SYSTEM_NAME value for this OS.
    pub fn cmake_system_name(&self) -> &'static str {
        match self {
            Os::Linux => "Linux",
            Os::Macos => "Darwin",
            Os::Windows => "Windows",
        }
    }

}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    AppleClang,
    Msvc,
}

impl Compiler {
    /// Detect the compiler family from CXX/CC or the platform default.
    pub fn detect(os: Os) -> Self {
        if let Some(path) = find_compiler() {
            let name = path
                .file_stem()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();

            if name.contains("clang") {
                return if os == Os::Macos {
                    Compiler::AppleClang
                } else {
                    Compiler::Clang
                };
            }
            if name.contains("g++") || name.contains("gcc") {
                return Compiler::Gcc;
            }
            if name == "cl" {
                return Compiler::Msvc;
            }
        }

        match os {
            Os::Linux => Compiler::Gcc,
            Os::Macos => Compiler::AppleClang,
            Os::Windows => Compiler::Msvc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::AppleClang => "apple-clang",
            Compiler::Msvc => "msvc",
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CMake build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// The CMAKE_BUILD_TYPE value.
    pub fn as_cmake_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }

    /// Directory name for this build type.
    pub fn dir_name(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "relwithdebinfo",
            BuildType::MinSizeRel => "minsizerel",
        }
    }
}

impl FromStr for BuildType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            other => bail!(
                "unrecognized build type `{}` (expected debug, release, relwithdebinfo, or minsizerel)",
                other
            ),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cmake_str())
    }
}

/// Target architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    X86_64,
    Aarch64,
    Arm,
}

impl Arch {
    /// Detect the host architecture.
    pub fn detect() -> Result<Self> {
        match std::env::consts::ARCH {
            "x86" => Ok(Arch::X86),
            "x86_64" => Ok(Arch::X86_64),
            "aarch64" => Ok(Arch::Aarch64),
            "arm" => Ok(Arch::Arm),
            other => bail!("unsupported architecture `{}`", other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::Arm => "arm",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The resolved settings for one build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub compiler: Compiler,
    pub build_type: BuildType,
    pub arch: Arch,
}

impl Settings {
    /// Resolve all axes from the host environment.
    pub fn detect(build_type: BuildType) -> Result<Self> {
        let os = Os::detect()?;
        Ok(Settings {
            os,
            compiler: Compiler::detect(os),
            build_type,
            arch: Arch::detect()?,
        })
    }

    /// A stable textual form used in fingerprints and logs.
    pub fn summary(&self) -> String {
        format!(
            "os={} compiler={} build_type={} arch={}",
            self.os, self.compiler, self.build_type, self.arch
        )
    }
}
