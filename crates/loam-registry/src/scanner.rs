//! Directory scanning for content files.

use std::path::Path;

use loam_core::kind::CONTENT_EXTENSION;

/// List the content filenames in `dir`, sorted lexicographically.
///
/// Only regular files whose name ends with the content extension are
/// returned, as bare file names. A missing or unreadable directory is not
/// an error: it logs a warning and yields an empty list, so one absent
/// kind never stops the other from processing.
pub fn scan_dir(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("directory {} not scannable: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == CONTENT_EXTENSION)
                .unwrap_or(false)
        })
        .collect();

    files.sort();

    log::debug!("scanned {}: {} content files", dir.display(), files.len());
    files
}
