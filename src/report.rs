// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! Colored, human-readable rendering of verdicts and results
//!
//! All user-facing text lives here so the policy and install code stay free
//! of formatting. Functions return plain `String`s; the command handlers
//! decide where they go.

use colored::Colorize;
use semver::Version;

use crate::skew::{MAX_SERVER_LATEST_SKEW, SkewVerdict};
use crate::source::VersionSnapshot;
use crate::version::format_version;

/// Render the three-version summary printed by the skew command
#[must_use]
pub fn version_summary(latest: &Version, snapshot: &VersionSnapshot) -> String {
    format!(
        "cluster: {}\nkubectl: {}\nlatest:  {}\n",
        format_version(&snapshot.server),
        format_version(&snapshot.client),
        format_version(latest),
    )
}

/// Render the OK/NG check result plus any remediation warnings
#[must_use]
pub fn verdict_report(verdict: &SkewVerdict) -> String {
    let server_result = if verdict.server_outdated {
        "NG".red()
    } else {
        "OK".green()
    };
    let client_result = if verdict.client_flagged() {
        "NG".red()
    } else {
        "OK".green()
    };

    let mut out = format!(
        "Check result\n  Server version: {server_result}\n  Client version: {client_result}\n"
    );

    if verdict.server_outdated {
        let warning = format!(
            "Your kubernetes cluster version is unsupported.\n\
             There are {} minor version skew with the latest which must be within {}.",
            verdict.server_latest_delta, MAX_SERVER_LATEST_SKEW,
        );
        out.push_str(&format!("{}\n", warning.yellow()));
    }

    if verdict.client_outdated {
        let warning = format!(
            "Your kubectl version is unsupported.\n\
             There are {} minor version skew with the server which must be between -1 and 1.",
            verdict.server_client_delta,
        );
        out.push_str(&format!("{}\n", warning.yellow()));
    }

    if verdict.client_too_new_or_server_updatable {
        let warning = format!(
            "Your kubernetes cluster version is supported, but your kubectl version is too new.\n\
             kubectl and kubernetes cluster version skew must be between -1 and 1, but it's {}.\n\
             You can update kubernetes cluster or downgrade kubectl to follow the version skew policy.",
            verdict.server_client_delta,
        );
        out.push_str(&format!("{}\n", warning.yellow()));
    }

    out
}

/// Render the current-vs-latest comparison printed by the check command
#[must_use]
pub fn update_check(client: &Version, latest: &Version) -> String {
    let mut out = format!(
        "current: {}\nlatest:  {}\n",
        format_version(client),
        format_version(latest),
    );

    if latest == client {
        out.push_str(&format!("{}\n", "kubectl is already up-to-date.".green()));
    } else {
        let notice = format!("kubectl update {} is available.", format_version(latest));
        out.push_str(&format!("{}\n", notice.yellow()));
    }

    out
}

/// Render the non-blocking advisory shown when installing a version that
/// violates the skew policy for the connected cluster
#[must_use]
pub fn unsupported_target_warning(target: &Version) -> String {
    format!(
        "WARN: version {} is outside the version skew policy for your cluster.\n\
         For more details, run \"kubectl-ver skew\".",
        format_version(target),
    )
    .yellow()
    .to_string()
}
