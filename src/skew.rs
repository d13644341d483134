// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Version skew policy evaluation
//!
//! Classifies the relationship between the latest published version, the
//! cluster (server) version, and the kubectl (client) version. The
//! thresholds mirror the Kubernetes version skew policy: the skew is
//! measured in minor versions only, major and patch are ignored.
//! See https://kubernetes.io/docs/setup/release/version-skew-policy/

use semver::Version;

/// How many minor versions the server may trail the latest release
pub const MAX_SERVER_LATEST_SKEW: i64 = 2;

/// How many minor versions the client may trail the server
pub const MAX_SERVER_CLIENT_SKEW: i64 = 1;

/// Structured verdict of one skew evaluation
///
/// All fields are derived from the two minor-version deltas; recomputing
/// from the same three versions always yields the same verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkewVerdict {
    /// `latest.minor - server.minor`
    pub server_latest_delta: i64,
    /// Server trails the latest release by more than the allowed skew
    pub server_outdated: bool,

    /// `server.minor - client.minor`
    pub server_client_delta: i64,
    /// Client trails the server by more than the allowed skew
    pub client_outdated: bool,

    /// Client is ahead of the server by more than the allowed skew while
    /// the server itself is still within policy; remediation is either
    /// updating the server or downgrading the client
    pub client_too_new_or_server_updatable: bool,
}

/// Evaluate the skew policy for one (latest, server, client) triple
///
/// Pure and total: any three valid versions produce a verdict, never an
/// error. `client_outdated` and `client_too_new_or_server_updatable` are
/// mutually exclusive, one needs a positive server-client delta and the
/// other a negative one.
///
/// # Examples
/// ```
/// use kubectl_ver::{evaluate, parse_version};
///
/// let latest = parse_version("v1.20.2").unwrap();
/// let server = parse_version("v1.18.2").unwrap();
/// let client = parse_version("v1.17.2").unwrap();
///
/// let verdict = evaluate(&latest, &server, &client);
/// assert_eq!(verdict.server_latest_delta, 2);
/// assert!(!verdict.server_outdated);
/// assert!(!verdict.client_outdated);
/// ```
#[must_use]
pub fn evaluate(latest: &Version, server: &Version, client: &Version) -> SkewVerdict {
    let server_latest_delta = latest.minor as i64 - server.minor as i64;
    let server_outdated = server_latest_delta > MAX_SERVER_LATEST_SKEW;

    let server_client_delta = server.minor as i64 - client.minor as i64;
    let client_outdated = server_client_delta > MAX_SERVER_CLIENT_SKEW;

    // Client more than one minor ahead of a server that is otherwise fine.
    // e.g. latest 1.22.0, server 1.20.0, client 1.22.0: the server is within
    // policy but the client is too new for it.
    let client_too_new_or_server_updatable =
        server_client_delta < -MAX_SERVER_CLIENT_SKEW && !server_outdated;

    SkewVerdict {
        server_latest_delta,
        server_outdated,
        server_client_delta,
        client_outdated,
        client_too_new_or_server_updatable,
    }
}

impl SkewVerdict {
    /// Whether the client side needs any remediation at all
    #[must_use]
    pub fn client_flagged(&self) -> bool {
        self.client_outdated || self.client_too_new_or_server_updatable
    }
}
