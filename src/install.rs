// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Download, verify, and atomically install a kubectl binary
//!
//! One install invocation walks through resolve, advisory, download,
//! checksum fetch, verify, replace. No step is retried; any failure aborts
//! the invocation and the binary at the destination stays untouched. The
//! destination is only ever mutated by the final atomic rename, so it holds
//! either the previous binary or the fully verified new one, never a
//! truncated file.
//!
//! Concurrent invocations racing on the same destination path are not
//! coordinated; at most one install per path at a time is assumed.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use semver::Version;
use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::platform::Platform;
use crate::report;
use crate::skew;
use crate::source::{METADATA_TIMEOUT, VersionSnapshot, http_client};
use crate::version::parse_version;

/// Final installation path of the kubectl binary
pub const INSTALL_PATH: &str = "/usr/local/bin/kubectl";

/// Timeout for the binary download (the binary is tens of megabytes)
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Resolve the requested version string to a concrete target version
///
/// An empty string or the literal `"latest"` resolves to `latest`; anything
/// else must parse as a version.
///
/// # Errors
/// Returns `VersionParse` if the string is neither empty, `"latest"`, nor a
/// valid version
pub fn resolve_target(requested: &str, latest: &Version) -> Result<Version, Error> {
    if requested.is_empty() || requested == "latest" {
        Ok(latest.clone())
    } else {
        parse_version(requested)
    }
}

/// Download and install the requested kubectl version to [`INSTALL_PATH`]
///
/// # Arguments
/// * `requested` - Version string from the CLI; empty means latest
/// * `snapshot` - Currently installed client/server versions
/// * `latest` - Latest published version
/// * `verbose` - Whether to print download detail to stderr
///
/// # Returns
/// The resolved version that was installed
///
/// # Errors
/// Returns `AlreadyInstalled` if the target equals the installed client
/// version (before any network I/O), or the error of whichever pipeline
/// step failed
pub fn install(
    requested: &str,
    snapshot: &VersionSnapshot,
    latest: &Version,
    verbose: bool,
) -> Result<Version, Error> {
    install_to(requested, snapshot, latest, Path::new(INSTALL_PATH), verbose)
}

/// Install pipeline with an explicit destination path
///
/// Split out from [`install`] so the atomic-replace behavior is testable
/// against a temporary destination.
///
/// # Errors
/// See [`install`]
pub fn install_to(
    requested: &str,
    snapshot: &VersionSnapshot,
    latest: &Version,
    dest: &Path,
    verbose: bool,
) -> Result<Version, Error> {
    let target = resolve_target(requested, latest)?;

    // Advisory only: a target outside the skew policy is warned about but
    // still installed.
    let verdict = skew::evaluate(latest, &snapshot.server, &target);
    if verdict.client_flagged() {
        eprintln!("{}", report::unsupported_target_warning(&target));
    }

    if target == snapshot.client {
        return Err(Error::AlreadyInstalled { version: target });
    }

    let platform = Platform::detect();

    let binary_url = platform.binary_url(&target);
    if verbose {
        eprintln!("Downloading from: {binary_url}");
    }
    let download_client = http_client(DOWNLOAD_TIMEOUT)?;
    let (body, digest) = download_binary(&download_client, &binary_url)?;

    let checksum_url = platform.checksum_url(&target);
    if verbose {
        eprintln!("Fetching checksum from: {checksum_url}");
    }
    let metadata_client = http_client(METADATA_TIMEOUT)?;
    let expected = fetch_checksum(&metadata_client, &checksum_url)?;

    verify_and_replace(&body, &digest, &expected, &binary_url, dest)?;

    Ok(target)
}

/// Download a binary, hashing it while buffering it in memory
///
/// The body is streamed through the SHA-256 accumulator and into the buffer
/// in a single pass, so no second fetch is needed to write the verified
/// content later.
///
/// # Returns
/// Tuple of (body bytes, lowercase hex digest)
///
/// # Errors
/// Returns a network error on transport failure, non-success status, or a
/// body read failure
pub fn download_binary(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<(Vec<u8>, String), Error> {
    let mut resp = client.get(url).send().map_err(|source| Error::Http {
        url: url.to_string(),
        source,
    })?;

    if !resp.status().is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let mut hasher = Sha256::new();
    let mut body = Vec::new();
    let mut chunk = [0u8; 64 * 1024];
    loop {
        let n = resp.read(&mut chunk).map_err(|source| Error::HttpBody {
            url: url.to_string(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&chunk[..n]);
        body.extend_from_slice(&chunk[..n]);
    }

    Ok((body, hex::encode(hasher.finalize())))
}

/// Fetch the published checksum for a binary as trimmed text
///
/// # Errors
/// Returns a network error on transport failure or non-success status
pub fn fetch_checksum(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<String, Error> {
    let resp = client.get(url).send().map_err(|source| Error::Http {
        url: url.to_string(),
        source,
    })?;

    if !resp.status().is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let text = resp.text().map_err(|source| Error::Http {
        url: url.to_string(),
        source,
    })?;

    Ok(text.trim().to_string())
}

/// Compare the computed digest against the published checksum, then replace
///
/// A mismatch aborts before anything touches the destination. This is the
/// correctness gate that keeps a truncated or tampered download from being
/// installed.
///
/// # Errors
/// Returns `ChecksumMismatch` if the digests differ, `InstallWrite` if the
/// replacement fails
pub fn verify_and_replace(
    body: &[u8],
    digest: &str,
    expected: &str,
    binary_url: &str,
    dest: &Path,
) -> Result<(), Error> {
    let actual = digest.trim();
    let expected = expected.trim();
    if actual != expected {
        return Err(Error::ChecksumMismatch {
            binary_url: binary_url.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    replace_binary(body, dest)
}

/// Atomically replace the binary at `dest` with the given content
///
/// Writes to a temporary file in the destination's directory with 0o755
/// permissions, then renames it onto the destination. Writing next to the
/// destination keeps the rename on a single filesystem so it is atomic.
///
/// # Errors
/// Returns `InstallWrite` if the temporary file cannot be written or the
/// rename fails
pub fn replace_binary(body: &[u8], dest: &Path) -> Result<(), Error> {
    let write_err = |source: std::io::Error| Error::InstallWrite {
        path: dest.to_path_buf(),
        source,
    };

    let dir: &Path = dest.parent().ok_or_else(|| Error::InstallWrite {
        path: dest.to_path_buf(),
        source: std::io::Error::other("destination has no parent directory"),
    })?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".kubectl-ver-")
        .tempfile_in(dir)
        .map_err(write_err)?;

    tmp.write_all(body).map_err(write_err)?;
    set_executable(tmp.path()).map_err(write_err)?;

    tmp.persist(dest).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Set executable permissions on a file
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}
