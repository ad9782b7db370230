//! Core traits for site configuration.
//!
//! [`ConfigProvider`] abstracts where a site keeps its content directories
//! and registry files, so the registry and resolver crates never hardcode
//! paths. The CLI implements it on top of its loaded configuration; tests
//! implement it over a temp directory.

use std::path::PathBuf;

use crate::kind::ContentKind;
use crate::Result;

/// Trait for site-specific configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path of the authored site (the directory holding `_data/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Directory holding content files for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn content_dir(&self, kind: ContentKind) -> Result<PathBuf>;

    /// Path of the persisted registry file for `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved.
    fn registry_path(&self, kind: ContentKind) -> Result<PathBuf>;
}
