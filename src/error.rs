// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Error types for kubectl-ver operations
//!
//! Every failure mode of a command invocation maps to one variant here.
//! None of them is retried automatically; a failed command is reported to
//! stderr and the process exits non-zero. `AlreadyInstalled` is the one
//! informational status: the install pipeline stops, but the CLI treats it
//! as a successful no-op.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running kubectl-ver
#[derive(Debug, Error)]
pub enum Error {
    /// A version string from any source could not be parsed
    #[error("invalid version string {input:?}: {source}")]
    VersionParse {
        /// The string that failed to parse
        input: String,
        /// Underlying semver parse error
        source: semver::Error,
    },

    /// `kubectl version --short` output did not match the expected two-line shape
    #[error("unexpected `kubectl version --short` output: {reason}")]
    UnexpectedOutputFormat {
        /// What was wrong with the output
        reason: String,
    },

    /// The kubectl subprocess could not be run or exited with failure
    #[error("failed to run kubectl: {source}")]
    KubectlInvocation {
        /// Underlying IO error
        source: io::Error,
    },

    /// The HTTP client itself could not be constructed
    #[error("failed to build HTTP client: {source}")]
    HttpClient {
        /// Underlying builder error
        source: reqwest::Error,
    },

    /// An HTTP request could not be sent or completed
    #[error("request to {url} failed: {source}")]
    Http {
        /// URL of the failed request
        url: String,
        /// Underlying transport error
        source: reqwest::Error,
    },

    /// An HTTP request completed with a non-success status
    #[error("{url} returned status {status}")]
    HttpStatus {
        /// URL of the request
        url: String,
        /// The non-2xx status code
        status: reqwest::StatusCode,
    },

    /// A response body could not be read
    #[error("failed to read response body from {url}: {source}")]
    HttpBody {
        /// URL of the request
        url: String,
        /// Underlying IO error
        source: io::Error,
    },

    /// The downloaded binary's SHA-256 digest did not match the published checksum
    #[error(
        "binary checksum mismatch (expected {expected}, got {actual}); \
         binary URL: {binary_url}"
    )]
    ChecksumMismatch {
        /// URL the binary was downloaded from
        binary_url: String,
        /// Checksum published on the mirror
        expected: String,
        /// Digest computed from the downloaded bytes
        actual: String,
    },

    /// The verified binary could not be written or moved into place
    #[error("failed to install binary to {path}: {source}")]
    InstallWrite {
        /// Final installation path
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// The requested version is already the installed client version
    #[error("kubectl {version} is already installed")]
    AlreadyInstalled {
        /// The version that was requested
        version: semver::Version,
    },
}
