//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "loam", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "LOAM_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute. Without one, `sync` runs.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synchronize content registries with the content directories.
    Sync {
        /// Commit changed registry files to version control.
        #[arg(long)]
        commit: bool,

        /// Repository directory for --commit (defaults to the base path).
        #[arg(long)]
        repo_dir: Option<String>,
    },

    /// Resolve deployed content over HTTP and print the records.
    Resolve {
        /// Content kind: "projects" or "services".
        kind: String,

        /// Deployed site root (overrides the configured remote.base_url).
        #[arg(long)]
        base_url: Option<String>,

        /// owner/repo for the repository-listing API (overrides config).
        #[arg(long)]
        repo: Option<String>,

        /// Output records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}
