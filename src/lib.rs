// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! kubectl Version Control Library
//!
//! This library backs the `kubectl-ver` CLI tool, which checks the version
//! skew between kubectl, the connected Kubernetes cluster, and the latest
//! published release, and can download and install a corrected kubectl
//! binary with checksum verification.

// Re-export public API from organized modules
pub mod cli;
pub mod error;
pub mod install;
pub mod platform;
pub mod report;
pub mod skew;
pub mod source;
pub mod version;

// Re-export commonly used items at the crate root for convenience
pub use error::Error;
pub use platform::{BINARY_NAME, Platform, RELEASE_HOST};
pub use skew::{MAX_SERVER_CLIENT_SKEW, MAX_SERVER_LATEST_SKEW, SkewVerdict, evaluate};
pub use source::{Overrides, VersionSnapshot};
pub use version::{format_version, parse_version};
