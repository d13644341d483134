// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Platform detection and URL building for kubectl release binaries
//!
//! This module detects the host OS/architecture pair and builds the download
//! URLs used by the official Kubernetes release mirror, which names
//! platforms Go-style (`linux`/`darwin`, `amd64`/`arm64`).

use semver::Version;

use crate::version::format_version;

/// Base URL of the Kubernetes release mirror
pub const RELEASE_HOST: &str = "https://dl.k8s.io";

/// Name of the client binary on the mirror and on disk
pub const BINARY_NAME: &str = "kubectl";

/// Represents a target platform for kubectl binaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Mirror OS name (e.g. "linux")
    pub os: &'static str,
    /// Mirror architecture name (e.g. "amd64")
    pub arch: &'static str,
}

impl Platform {
    /// Linux x86_64 platform configuration
    pub const LINUX_AMD64: Platform = Platform {
        os: "linux",
        arch: "amd64",
    };

    /// Linux ARM64 platform configuration
    pub const LINUX_ARM64: Platform = Platform {
        os: "linux",
        arch: "arm64",
    };

    /// macOS x86_64 platform configuration
    pub const DARWIN_AMD64: Platform = Platform {
        os: "darwin",
        arch: "amd64",
    };

    /// macOS ARM64 platform configuration
    pub const DARWIN_ARM64: Platform = Platform {
        os: "darwin",
        arch: "arm64",
    };

    /// Automatically detect the current platform based on OS and architecture
    ///
    /// Falls back to LINUX_AMD64 for unsupported combinations.
    #[must_use]
    pub fn detect() -> Platform {
        match (std::env::consts::OS, std::env::consts::ARCH) {
            ("linux", "x86_64") => Self::LINUX_AMD64,
            ("linux", "aarch64") => Self::LINUX_ARM64,
            ("macos", "x86_64") => Self::DARWIN_AMD64,
            ("macos", "aarch64") => Self::DARWIN_ARM64,
            // Default fallbacks for known OS with unknown architecture
            ("macos", _) => Self::DARWIN_AMD64,
            _ => Self::LINUX_AMD64,
        }
    }

    /// Build the download URL for the kubectl binary of a specific version
    ///
    /// # Examples
    /// ```
    /// use kubectl_ver::{Platform, parse_version};
    ///
    /// let v = parse_version("1.20.2").unwrap();
    /// assert_eq!(
    ///     Platform::LINUX_AMD64.binary_url(&v),
    ///     "https://dl.k8s.io/release/v1.20.2/bin/linux/amd64/kubectl"
    /// );
    /// ```
    #[must_use]
    pub fn binary_url(&self, version: &Version) -> String {
        format!(
            "{}/release/{}/bin/{}/{}/{}",
            RELEASE_HOST,
            format_version(version),
            self.os,
            self.arch,
            BINARY_NAME
        )
    }

    /// Build the URL of the published SHA-256 checksum for a binary
    ///
    /// Note: the mirror serves checksums without the `/release` path segment.
    #[must_use]
    pub fn checksum_url(&self, version: &Version) -> String {
        format!(
            "{}/{}/bin/{}/{}/{}.sha256",
            RELEASE_HOST,
            format_version(version),
            self.os,
            self.arch,
            BINARY_NAME
        )
    }
}
