// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version parsing and formatting for kubectl release versions
//!
//! Kubernetes publishes versions as `vMAJOR.MINOR.PATCH`. This module parses
//! that form (the leading `v` is optional) into `semver::Version` and formats
//! versions back into it. Pre-release and build metadata survive parsing but
//! play no part in the skew policy.

use semver::Version;

use crate::error::Error;

/// Parse a version string of the form `vMAJOR.MINOR.PATCH`
///
/// Surrounding whitespace is trimmed and a single leading `v` is stripped
/// before parsing, so both `v1.20.2` and `1.20.2` are accepted.
///
/// # Arguments
/// * `input` - Version string to parse
///
/// # Errors
/// Returns `Error::VersionParse` if the remainder is not a valid semantic version
///
/// # Examples
/// ```
/// use kubectl_ver::parse_version;
///
/// let v = parse_version("v1.20.2").unwrap();
/// assert_eq!((v.major, v.minor, v.patch), (1, 20, 2));
/// assert_eq!(parse_version("1.20.2").unwrap(), v);
/// ```
pub fn parse_version(input: &str) -> Result<Version, Error> {
    let trimmed = input.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);

    Version::parse(bare).map_err(|source| Error::VersionParse {
        input: input.to_string(),
        source,
    })
}

/// Format a version as `vMAJOR.MINOR.PATCH`
///
/// Only the numeric components are emitted; pre-release and build metadata
/// are dropped, matching how release artifact URLs name versions.
///
/// # Examples
/// ```
/// use kubectl_ver::{format_version, parse_version};
///
/// let v = parse_version("1.20.2").unwrap();
/// assert_eq!(format_version(&v), "v1.20.2");
/// ```
#[must_use]
pub fn format_version(version: &Version) -> String {
    format!("v{}.{}.{}", version.major, version.minor, version.patch)
}
