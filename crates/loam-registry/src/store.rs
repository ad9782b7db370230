//! Persistence of the registry document.
//!
//! The registry is a YAML file of the shape `{key: [filename, ...]}`. It
//! is written by direct line emission so repeated writes of the same set
//! are byte-identical, and read structurally so either emission style
//! (line-emitted or serializer-produced) parses the same way.

use std::path::Path;

use loam_core::{Error, Result};

/// Reads and writes persisted filename registries.
///
/// Reading never fails: an absent file, an unparsable document, or a
/// missing/ill-typed key all degrade to an empty list, because the
/// registry is a cache of the filesystem, never an authority.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStore;

impl RegistryStore {
    /// Create a store.
    pub fn new() -> Self {
        Self
    }

    /// Read the filename list stored under `key`, sorted.
    pub fn read(&self, path: &Path, key: &str) -> Vec<String> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("registry {} does not exist yet", path.display());
                return Vec::new();
            }
            Err(e) => {
                log::warn!("registry {} not readable: {e}", path.display());
                return Vec::new();
            }
        };

        match parse_registry(&text, key) {
            Ok(mut files) => {
                files.sort();
                files
            }
            Err(e) => {
                log::warn!("registry {} has invalid format, resetting: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Persist `filenames` under `key`, sorted, in a stable serialization.
    ///
    /// Writing the same logical set twice produces byte-identical output,
    /// so repeated sync runs never generate spurious diffs.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be written.
    pub fn write(&self, path: &Path, key: &str, filenames: &[String]) -> Result<()> {
        let mut sorted: Vec<&str> = filenames.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut out = String::new();
        if sorted.is_empty() {
            out.push_str(key);
            out.push_str(": []\n");
        } else {
            out.push_str(key);
            out.push_str(":\n");
            for name in sorted {
                out.push_str("  - ");
                out.push_str(name);
                out.push('\n');
            }
        }

        std::fs::write(path, out).map_err(|e| Error::io_with_path(e, path))
    }
}

/// Parse the sequence of filenames under `key` from registry text.
///
/// This is the single registry-document parser: the filesystem-side store
/// and the HTTP-side resolver both go through it, so a registry written by
/// either emission style reads identically everywhere.
pub fn parse_registry(text: &str, key: &str) -> Result<Vec<String>> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)
        .map_err(|e| Error::serialization(format!("registry document: {e}")))?;

    let entries = doc
        .get(key)
        .and_then(serde_yaml::Value::as_sequence)
        .ok_or_else(|| Error::invalid_data(format!("missing sequence under key '{key}'")))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::invalid_data("registry entry is not a string"))
        })
        .collect()
}
