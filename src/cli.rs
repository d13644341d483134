// GNU Affero General Public License v3.0 or later (see LICENSE or https://www.gnu.org/licenses/agpl.txt)
// CLI argument definitions for kubectl-ver
//
// Separated from main.rs so the argument surface is reviewable in one
// place. The debug flags are hidden; they inject fake versions so the skew
// policy can be exercised without a cluster or kubectl installed.

use clap::{Args, Parser, Subcommand};

use crate::source::Overrides;

/// CLI argument parser
#[derive(Parser)]
#[command(
    name = "kubectl-ver",
    version,
    about = "kubectl version skew checker that can update kubectl itself"
)]
pub struct Cli {
    /// Make the operation more talkative
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of kubectl-ver
#[derive(Subcommand)]
pub enum Command {
    /// Check whether a kubectl update is available
    Check {
        #[command(flatten)]
        debug: DebugVersions,
    },

    /// Check kubectl and kubernetes cluster version skew
    Skew {
        #[command(flatten)]
        debug: DebugVersions,
    },

    /// Download and install a kubectl version
    Install {
        /// Version to install; "latest" is also acceptable
        #[arg(long = "version", value_name = "VERSION", default_value = "")]
        version: String,

        #[command(flatten)]
        debug: DebugVersions,
    },

    /// Run `kubectl version` with the given arguments
    Version {
        /// Arguments forwarded to kubectl version
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

/// Hidden debug flags injecting fake inspected versions
#[derive(Args)]
pub struct DebugVersions {
    /// Param for debug: inject client version
    #[arg(long = "debug-client", value_name = "VERSION", hide = true)]
    pub client: Option<String>,

    /// Param for debug: inject server version
    #[arg(long = "debug-server", value_name = "VERSION", hide = true)]
    pub server: Option<String>,
}

impl DebugVersions {
    /// Convert the parsed flags into version-source overrides
    #[must_use]
    pub fn into_overrides(self) -> Overrides {
        Overrides {
            client: self.client,
            server: self.server,
        }
    }
}
