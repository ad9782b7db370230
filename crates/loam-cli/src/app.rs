//! LoamCli application framework.
//!
//! Ties argument parsing, configuration, and logging together and
//! dispatches commands to their handlers.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use loam_core::{ConfigProvider, Result};

use crate::cli::{CliArgs, Command};
use crate::config::LoamConfig;
use crate::resolve_handlers::{self, ResolveOptions};
use crate::sync_handlers::{self, SyncOptions};
use crate::config_handlers;

// ============================================================================
// LoamCli
// ============================================================================

/// The CLI application.
pub struct LoamCli {
    name: String,
    config: Arc<LoamConfig>,
    version: String,
}

impl LoamCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = LoamConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application over an already-loaded config.
    pub fn new(name: impl Into<String>, config: LoamConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &LoamConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Run the CLI with the given arguments.
    ///
    /// Without a subcommand, `sync` runs with defaults: the everyday
    /// invocation is plain `loam` from the site checkout.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            None => sync_handlers::handle_sync(self.config(), &SyncOptions::default()),
            Some(Command::Sync { commit, repo_dir }) => {
                let options = SyncOptions { commit, repo_dir };
                sync_handlers::handle_sync(self.config(), &options)
            }
            Some(Command::Resolve {
                kind,
                base_url,
                repo,
                json,
            }) => {
                let options = ResolveOptions::parse(&kind, json)?;
                let resolver_options = self
                    .config()
                    .resolver_options(base_url.as_deref(), repo.as_deref())?;
                resolve_handlers::handle_resolve(resolver_options, &options).await
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
