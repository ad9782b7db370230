//! Remote repository-listing strategy.
//!
//! Queries a hosted repository-contents API (GitHub's shape: a JSON array
//! of entries with `type` and `name`) for a content directory and keeps
//! the `.yml` file names. When this works it is authoritative, the same
//! way a local directory scan is.

use loam_core::kind::CONTENT_EXTENSION;
use loam_core::{Error, Result};

use crate::fetcher::ContentFetcher;

/// Fetch `url` and extract content filenames from the listing payload.
///
/// # Errors
///
/// Returns an error when the fetch fails or the payload is not a JSON
/// array; callers fall through to the next discovery strategy.
pub async fn list_content_files<F: ContentFetcher>(fetcher: &F, url: &str) -> Result<Vec<String>> {
    let body = fetcher.fetch_text(url).await?;

    let entries: serde_json::Value = serde_json::from_str(&body)
        .map_err(|e| Error::serialization(format!("listing payload: {e}")))?;
    let entries = entries
        .as_array()
        .ok_or_else(|| Error::invalid_data("listing payload is not an array"))?;

    let suffix = format!(".{CONTENT_EXTENSION}");
    let mut files: Vec<String> = entries
        .iter()
        .filter(|entry| entry["type"].as_str() == Some("file"))
        .filter_map(|entry| entry["name"].as_str())
        .filter(|name| name.ends_with(&suffix))
        .map(str::to_string)
        .collect();

    files.sort();
    Ok(files)
}
