//! Configuration for the Loam CLI.
//!
//! Loads from TOML files, environment variables, and defaults using the
//! `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `LOAM_CONFIG` environment variable
//! 3. XDG default: `~/.config/loam/config.toml`
//! 4. Built-in defaults

use std::path::PathBuf;

use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};

use loam_core::{ConfigProvider, ContentKind, Error, Result};
use loam_resolve::ResolverOptions;

/// Main configuration for the Loam CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoamConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Root of the authored site (the directory holding the data dir).
    pub base_path: Option<String>,

    /// Content layout configuration.
    pub content: ContentConfig,

    /// Deployed-site configuration for the resolver.
    pub remote: RemoteConfig,

    /// Resolver tuning.
    pub resolver: ResolverConfig,
}

/// Content layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory under the base path holding per-kind content directories
    /// and registry files.
    pub data_dir: String,
}

/// Deployed-site configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Root URL of the deployed site.
    pub base_url: Option<String>,

    /// `owner/repo` for the repository-contents listing API.
    pub repo: Option<String>,
}

/// Resolver tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Concurrent fetches per batch.
    pub batch_size: usize,

    /// Probe match count that stops further batches.
    pub probe_threshold: usize,

    /// Cap on generated probe candidates.
    pub probe_limit: usize,
}

impl Default for LoamConfig {
    fn default() -> Self {
        Self {
            project_name: "loam".to_string(),
            base_path: None,
            content: ContentConfig::default(),
            remote: RemoteConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_dir: "_data".to_string(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            batch_size: loam_resolve::resolver::DEFAULT_BATCH_SIZE,
            probe_threshold: loam_resolve::resolver::DEFAULT_PROBE_THRESHOLD,
            probe_limit: loam_resolve::resolver::DEFAULT_PROBE_LIMIT,
        }
    }
}

impl LoamConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("LOAM");
        env_opts.add_section("content");
        env_opts.add_section("remote");
        env_opts.add_section("resolver");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("LOAM_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("loam").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Build resolver options, with optional CLI overrides taking priority.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no deployed-site URL is known
    /// from either the override or `remote.base_url`.
    pub fn resolver_options(
        &self,
        base_url_override: Option<&str>,
        repo_override: Option<&str>,
    ) -> Result<ResolverOptions> {
        let base_url = base_url_override
            .map(str::to_string)
            .or_else(|| self.remote.base_url.clone())
            .ok_or_else(|| {
                Error::config("no deployed site URL: set remote.base_url or pass --base-url")
            })?;

        let mut options = ResolverOptions::new(base_url)
            .with_batch_size(self.resolver.batch_size);
        options.data_dir = self.content.data_dir.clone();
        options.probe_threshold = self.resolver.probe_threshold;
        options.probe_limit = self.resolver.probe_limit;

        if let Some(repo) = repo_override.map(str::to_string).or_else(|| self.remote.repo.clone()) {
            options.repo = Some(repo);
        }

        Ok(options)
    }

    fn data_path(&self) -> Result<PathBuf> {
        Ok(self.base_path()?.join(&self.content.data_dir))
    }
}

impl ConfigProvider for LoamConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(PathBuf::from(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn content_dir(&self, kind: ContentKind) -> Result<PathBuf> {
        Ok(self.data_path()?.join(kind.dir_name()))
    }

    fn registry_path(&self, kind: ContentKind) -> Result<PathBuf> {
        Ok(self.data_path()?.join(kind.registry_file_name()))
    }
}
