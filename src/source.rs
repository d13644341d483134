// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version inspection for the installed kubectl and the connected cluster
//!
//! The installed client and server versions come from running
//! `kubectl version --short` and parsing its two-line output. This is
//! tightly coupled to the kubectl output format, so the parsing is kept in
//! pure functions that can be tested without kubectl installed, and
//! [`Overrides`] can replace either value (or bypass the subprocess
//! entirely) for debugging and tests.
//!
//! The latest published version comes from the release mirror's well-known
//! stable.txt endpoint.

use std::io;
use std::process::Command;
use std::time::Duration;

use semver::Version;

use crate::error::Error;
use crate::platform::BINARY_NAME;
use crate::version::parse_version;

/// Well-known URL whose body is the latest stable release version
pub const STABLE_VERSION_URL: &str = "https://dl.k8s.io/release/stable.txt";

/// Timeout for small metadata fetches (stable.txt, checksum files)
pub const METADATA_TIMEOUT: Duration = Duration::from_secs(30);

/// Installed client and server versions, captured once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSnapshot {
    /// Version of the kubectl binary in PATH
    pub client: Version,
    /// Version of the connected Kubernetes cluster
    pub server: Version,
}

/// Injected version values that replace subprocess inspection
///
/// Set from the hidden `--debug-client` / `--debug-server` flags. When both
/// fields are present the kubectl subprocess is not run at all.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replacement for the inspected client version
    pub client: Option<String>,
    /// Replacement for the inspected server version
    pub server: Option<String>,
}

/// Inspect the currently installed client and server versions
///
/// Runs `kubectl version --short` and parses the result, unless `overrides`
/// supplies both values, in which case no subprocess is spawned.
///
/// # Errors
/// Returns `KubectlInvocation` if kubectl cannot be run or exits non-zero,
/// `UnexpectedOutputFormat` if its output doesn't match the expected shape,
/// or `VersionParse` for a malformed version (including override values)
pub fn inspect_current(overrides: &Overrides) -> Result<VersionSnapshot, Error> {
    if let (Some(client), Some(server)) = (&overrides.client, &overrides.server) {
        return Ok(VersionSnapshot {
            client: parse_version(client)?,
            server: parse_version(server)?,
        });
    }

    let output = Command::new(BINARY_NAME)
        .args(["version", "--short"])
        .output()
        .map_err(|source| Error::KubectlInvocation { source })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::KubectlInvocation {
            source: io::Error::other(format!(
                "kubectl exited with {}: {}",
                output.status,
                stderr.trim()
            )),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut snapshot = parse_version_output(&stdout)?;

    if let Some(client) = &overrides.client {
        snapshot.client = parse_version(client)?;
    }
    if let Some(server) = &overrides.server {
        snapshot.server = parse_version(server)?;
    }

    Ok(snapshot)
}

/// Parse the output of `kubectl version --short`
///
/// The expected shape is exactly two lines:
///
/// ```text
/// Client Version: v1.20.2
/// Server Version: v1.20.0
/// ```
///
/// Any other line count, key, or ordering is an error. This depends on the
/// kubectl output format and may break when kubectl changes it.
///
/// # Errors
/// Returns `UnexpectedOutputFormat` for a wrong shape, `VersionParse` for a
/// malformed version value
pub fn parse_version_output(output: &str) -> Result<VersionSnapshot, Error> {
    let lines: Vec<&str> = output.lines().collect();
    if lines.len() != 2 {
        return Err(Error::UnexpectedOutputFormat {
            reason: format!("expected 2 lines, got {}", lines.len()),
        });
    }

    Ok(VersionSnapshot {
        client: parse_labeled_version(lines[0], "Client Version")?,
        server: parse_labeled_version(lines[1], "Server Version")?,
    })
}

/// Parse one `Key: value` line, checking that the key matches
fn parse_labeled_version(line: &str, expected_key: &str) -> Result<Version, Error> {
    let (key, value) = line.split_once(": ").ok_or_else(|| Error::UnexpectedOutputFormat {
        reason: format!("line {line:?} is not in `Key: value` form"),
    })?;

    if key != expected_key {
        return Err(Error::UnexpectedOutputFormat {
            reason: format!("expected key {expected_key:?}, got {key:?}"),
        });
    }

    parse_version(value)
}

/// Build a blocking HTTP client with the given overall timeout
///
/// Every network call in kubectl-ver goes through a client built here so
/// that a hung remote endpoint cannot stall the command indefinitely.
///
/// # Errors
/// Returns `HttpClient` if the underlying client cannot be constructed
pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client, Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!("kubectl-ver/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|source| Error::HttpClient { source })
}

/// Fetch the latest published stable version from the release mirror
///
/// # Errors
/// Returns a network error for transport/status failures or `VersionParse`
/// if the body is not a version string
pub fn fetch_latest() -> Result<Version, Error> {
    let client = http_client(METADATA_TIMEOUT)?;

    let resp = client
        .get(STABLE_VERSION_URL)
        .send()
        .map_err(|source| Error::Http {
            url: STABLE_VERSION_URL.to_string(),
            source,
        })?;

    if !resp.status().is_success() {
        return Err(Error::HttpStatus {
            url: STABLE_VERSION_URL.to_string(),
            status: resp.status(),
        });
    }

    let body = resp.text().map_err(|source| Error::Http {
        url: STABLE_VERSION_URL.to_string(),
        source,
    })?;

    parse_version(&body)
}
