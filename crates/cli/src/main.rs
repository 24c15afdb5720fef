use anyhow::Result;
use clap::{Parser, Subcommand};

use hostprep::commands::{
    bootstrap_command, detect_command, init_config_command, provision_command, resolve_command,
    run_command, show_config_command, verify_command,
};
use hostprep::init_tracing;

/// Host provisioning for peer-to-peer integration tests.
///
/// This CLI is a thin wrapper around `hostprep-core` (exposed in code as
/// `hostprep_core`). All substantive logic lives in the library so it can be
/// tested with fake download, archive, and version-control backends.
#[derive(Parser, Debug)]
#[command(
    name = "hostprep",
    version,
    about = "Provision integration-test peers and bootstrap source dependencies",
    long_about = None
)]
struct Cli {
    /// Workspace root. Commands that write to disk must be run from inside it.
    #[arg(long, global = true, default_value = ".")]
    root: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full pipeline: detect, download, stage both peers, bootstrap dependencies.
    ///
    /// Every run starts from scratch: the artifact staging directory is wiped
    /// before downloading.
    Run {
        /// Stop after staging peers; do not clone or register dependencies.
        #[arg(long, default_value_t = false)]
        skip_deps: bool,

        /// Emit a JSON run summary instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the detected platform and its version tag.
    Detect {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the artifact URL that would be downloaded.
    Resolve,

    /// Download the artifact and stage the client and server peers only.
    Provision,

    /// Clone dependencies and register them in the project's build sandbox only.
    Bootstrap,

    /// Check that both staged peers hold identical client trees.
    Verify {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write a default plan file (`hostprep.yaml`) into the workspace root.
    InitConfig {
        /// Write `hostprep.json` instead of YAML.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Overwrite an existing plan file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Show the effective plan after environment overrides.
    ShowConfig {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let root = cli.root.as_str();
    // Default to a full run if no subcommand is provided.
    match cli.command.unwrap_or(Command::Run { skip_deps: false, json: false }) {
        Command::Run { skip_deps, json } => run_command(root, skip_deps, json)?,
        Command::Detect { json } => detect_command(json)?,
        Command::Resolve => resolve_command(root)?,
        Command::Provision => provision_command(root)?,
        Command::Bootstrap => bootstrap_command(root)?,
        Command::Verify { json } => verify_command(root, json)?,
        Command::InitConfig { json, force } => init_config_command(root, json, force)?,
        Command::ShowConfig { json } => show_config_command(root, json)?,
    }

    Ok(())
}
