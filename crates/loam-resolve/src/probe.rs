//! Brute-force filename probing.
//!
//! Last-resort discovery before the hardcoded fallback: synthesize likely
//! filenames and try fetching each one. The candidate set is deliberately
//! bounded — probing exists to recover a handful of files when every
//! better strategy failed, not to enumerate a namespace. Candidates are
//! probed in parallel batches; between batches the prober stops as soon as
//! enough matches have accumulated, which bounds total request count.

use futures::future::join_all;

use loam_content::ContentRecord;
use loam_core::ContentKind;

use crate::fetcher::ContentFetcher;

/// Service-flavored filename stems observed in real content folders.
const SERVICE_STEMS: &[&str] = &[
    "residential",
    "commercial",
    "industrial",
    "solar",
    "generator",
    "emergency",
    "emergency-services",
    "maintenance",
    "lighting",
    "smart-home",
    "underground",
    "electrical",
    "repair",
    "installation",
];

/// Project-flavored filename stems.
const PROJECT_STEMS: &[&str] = &[
    "coastal-commercial",
    "residential-upgrade",
    "solar-installation",
    "commercial",
    "residential",
    "industrial",
    "office",
    "retail",
    "warehouse",
    "home",
];

/// Stems authors use for scratch or placeholder files, any kind.
const GENERIC_STEMS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "test", "new", "temp", "draft", "sample", "example",
    "service", "project", "item", "entry", "content",
];

/// Short words combined pairwise for custom names.
const PAIR_WORDS: &[&str] = &[
    "big", "small", "new", "old", "main", "custom", "pro", "max", "plus", "eco", "green", "blue",
    "red",
];

/// Generate up to `limit` candidate filenames for `kind`.
///
/// Kind-specific stems come first so the likeliest names land in the
/// earliest probe batches. The result contains no duplicates.
pub fn candidates(kind: ContentKind, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |name: String| {
        if !out.contains(&name) {
            out.push(name);
        }
    };

    match kind {
        ContentKind::Services => {
            for stem in SERVICE_STEMS {
                push(format!("{stem}.yml"));
                push(format!("{stem}-service.yml"));
                push(format!("{stem}-services.yml"));
            }
        }
        ContentKind::Projects => {
            for stem in PROJECT_STEMS {
                push(format!("{stem}.yml"));
                push(format!("{stem}-project.yml"));
            }
            for i in 1..=20 {
                push(format!("project{i}.yml"));
                push(format!("project-{i}.yml"));
            }
        }
    }

    for stem in GENERIC_STEMS {
        push(format!("{stem}.yml"));
    }

    for first in PAIR_WORDS {
        for second in PAIR_WORDS {
            if first != second {
                push(format!("{first}-{second}.yml"));
            }
        }
    }

    out.truncate(limit);
    out
}

/// Probe `candidate` filenames in parallel batches of `batch_size`,
/// stopping between batches once `threshold` matches have been found.
///
/// A candidate counts as found only when its fetch succeeds AND the body
/// parses into a record with a non-empty title; anything else is silently
/// a miss, since misses are the expected case here.
pub async fn probe<F, U>(
    fetcher: &F,
    file_url: U,
    candidates: &[String],
    batch_size: usize,
    threshold: usize,
) -> Vec<String>
where
    F: ContentFetcher,
    U: Fn(&str) -> String,
{
    let batch_size = batch_size.max(1);
    let mut found = Vec::new();

    for batch in candidates.chunks(batch_size) {
        let fetches = batch.iter().map(|name| {
            let url = file_url(name);
            async move { (name, fetcher.fetch_text(&url).await) }
        });

        // Each task settles into its own slot; results merge after the
        // whole batch completes.
        for (name, result) in join_all(fetches).await {
            let Ok(body) = result else { continue };
            if ContentRecord::from_yaml(&body).is_ok() {
                log::debug!("probe hit: {name}");
                found.push(name.clone());
            }
        }

        if found.len() >= threshold {
            log::debug!("probe stopping early with {} matches", found.len());
            break;
        }
    }

    found
}
