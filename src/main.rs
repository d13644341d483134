// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
//! kubectl Version Control (kubectl-ver) - Main Application
//!
//! This is the main entry point for the kubectl-ver CLI tool, which checks
//! the version skew between kubectl, the connected Kubernetes cluster, and
//! the latest published release, and can download and install a corrected
//! kubectl binary.
//!
//! The application supports:
//! - Checking whether a kubectl update is available
//! - Evaluating the Kubernetes version skew policy for the current setup
//! - Installing a specific (or the latest) kubectl version with SHA-256
//!   checksum verification and atomic replacement
//! - Passing arbitrary arguments through to `kubectl version`

use std::process::{Command as Process, exit};

use clap::Parser;

// Import from library
use kubectl_ver::cli::{Cli, Command};
use kubectl_ver::error::Error;
use kubectl_ver::platform::BINARY_NAME;
use kubectl_ver::version::format_version;
use kubectl_ver::{Overrides, install, report, skew, source};

/// Main application entry point
///
/// Parses command line arguments and dispatches to the appropriate command
/// handler. Any command error is printed to stderr and the process exits
/// with status 1.
fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = match cli.command {
        Command::Check { debug } => cmd_check(&debug.into_overrides()),
        Command::Skew { debug } => cmd_skew(&debug.into_overrides()),
        Command::Install { version, debug } => {
            cmd_install(&version, &debug.into_overrides(), verbose)
        }
        Command::Version { args } => cmd_version(&args),
    };

    // Handle errors by printing to stderr and exiting with non-zero status
    if let Err(e) = result {
        eprintln!("{e}");
        exit(1);
    }
}

// =============================================================================
// Command Implementation Functions
// =============================================================================

/// Check whether a kubectl update is available
///
/// Compares the installed client version against the latest published
/// version and reports whether an update exists.
fn cmd_check(overrides: &Overrides) -> Result<(), Error> {
    let snapshot = source::inspect_current(overrides)?;
    let latest = source::fetch_latest()?;

    print!("{}", report::update_check(&snapshot.client, &latest));

    Ok(())
}

/// Evaluate the version skew policy for the current setup
///
/// Prints the three-version summary, the OK/NG verdict per component, and a
/// remediation warning for anything outside the policy.
fn cmd_skew(overrides: &Overrides) -> Result<(), Error> {
    let snapshot = source::inspect_current(overrides)?;
    let latest = source::fetch_latest()?;

    print!("{}", report::version_summary(&latest, &snapshot));

    let verdict = skew::evaluate(&latest, &snapshot.server, &snapshot.client);
    print!("{}", report::verdict_report(&verdict));

    Ok(())
}

/// Download and install the requested kubectl version
///
/// `AlreadyInstalled` is reported as an informational no-op, not a failure.
fn cmd_install(requested: &str, overrides: &Overrides, verbose: bool) -> Result<(), Error> {
    let snapshot = source::inspect_current(overrides)?;
    let latest = source::fetch_latest()?;

    match install::install(requested, &snapshot, &latest, verbose) {
        Ok(installed) => {
            println!(
                "Installed kubectl {} to {}",
                format_version(&installed),
                install::INSTALL_PATH
            );
            Ok(())
        }
        Err(Error::AlreadyInstalled { version }) => {
            println!(
                "kubectl {} is already installed. Installation is over.",
                format_version(&version)
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Pass arbitrary arguments through to `kubectl version`
///
/// Stdio is inherited so the output (and any kubectl error message) is
/// shown unchanged; a non-zero kubectl exit status becomes our own.
fn cmd_version(args: &[String]) -> Result<(), Error> {
    let status = Process::new(BINARY_NAME)
        .arg("version")
        .args(args)
        .status()
        .map_err(|source| Error::KubectlInvocation { source })?;

    if !status.success() {
        exit(status.code().unwrap_or(1));
    }

    Ok(())
}
