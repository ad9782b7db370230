//! Reconciliation of scan output against the persisted registry.

use std::path::Path;

use loam_core::{ContentKind, Result};

use crate::scanner::scan_dir;
use crate::store::RegistryStore;

/// The difference between actual directory contents and a recorded list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Files present on disk but missing from the registry.
    pub added: Vec<String>,
    /// Files listed in the registry but gone from disk.
    pub removed: Vec<String>,
}

impl Reconciliation {
    /// Whether the registry disagrees with the filesystem.
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Compute `actual − recorded` and `recorded − actual` as sets.
pub fn diff(actual: &[String], recorded: &[String]) -> Reconciliation {
    let added = actual
        .iter()
        .filter(|f| !recorded.contains(f))
        .cloned()
        .collect();
    let removed = recorded
        .iter()
        .filter(|f| !actual.contains(f))
        .cloned()
        .collect();

    Reconciliation { added, removed }
}

/// Outcome of reconciling one content kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Which kind was processed.
    pub kind: ContentKind,
    /// Total content files currently on disk.
    pub total: usize,
    /// Count of files newly recorded.
    pub added: usize,
    /// Count of stale entries dropped.
    pub removed: usize,
    /// Whether the registry file was rewritten.
    pub wrote: bool,
}

impl SyncReport {
    /// One-line human summary, e.g. `projects: 4 files (1 added, 2 removed)`.
    pub fn summary(&self) -> String {
        let detail = match (self.added, self.removed) {
            (0, 0) => "no changes".to_string(),
            (a, 0) => format!("{a} added"),
            (0, r) => format!("{r} removed"),
            (a, r) => format!("{a} added, {r} removed"),
        };
        format!("{}: {} files ({})", self.kind, self.total, detail)
    }
}

/// Reconcile one content kind: scan `dir`, diff against the registry at
/// `registry_path`, and when they disagree overwrite the registry with
/// exactly the scan result. The filesystem is authoritative; this is a
/// replacement, not a merge. When nothing changed no write is issued, so
/// back-to-back runs are idempotent.
///
/// # Errors
///
/// Returns an error only when a needed registry write fails. Scan and
/// registry-read problems degrade to empty lists upstream.
pub fn reconcile_kind(
    dir: &Path,
    registry_path: &Path,
    kind: ContentKind,
    store: &RegistryStore,
) -> Result<SyncReport> {
    let actual = scan_dir(dir);
    let recorded = store.read(registry_path, kind.key());
    let outcome = diff(&actual, &recorded);

    if !outcome.added.is_empty() {
        log::info!("{kind}: adding {} new files: {:?}", outcome.added.len(), outcome.added);
    }
    if !outcome.removed.is_empty() {
        log::info!(
            "{kind}: removing {} missing files: {:?}",
            outcome.removed.len(),
            outcome.removed
        );
    }

    let wrote = if outcome.changed() {
        store.write(registry_path, kind.key(), &actual)?;
        log::info!("{kind}: registry updated at {}", registry_path.display());
        true
    } else {
        log::debug!("{kind}: registry is up to date");
        false
    };

    Ok(SyncReport {
        kind,
        total: actual.len(),
        added: outcome.added.len(),
        removed: outcome.removed.len(),
        wrote,
    })
}
