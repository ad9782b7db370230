//! Handler for the `sync` command.
//!
//! Reconciles every content kind against its registry, then (optionally)
//! commits the changed registry files as a separate step. A commit that
//! fails never un-does the reconciliation; it degrades to a warning with
//! a printed manual remedy.

use std::path::PathBuf;

use loam_core::{ConfigProvider, ContentKind, Result};
use loam_registry::vcs::{self, AUTO_COMMIT_MESSAGE};
use loam_registry::{reconcile_kind, RegistryStore, SyncReport};

/// Options for one sync run.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Commit changed registry files after reconciliation.
    pub commit: bool,
    /// Repository directory for the commit; defaults to the base path.
    pub repo_dir: Option<String>,
}

/// Reconcile all content kinds and print a per-kind summary.
///
/// Kinds are independent: a failure in one is logged and the others still
/// run. The command as a whole fails only when every kind failed, so a
/// half-broken site still gets its healthy registries synchronized.
pub fn handle_sync<C: ConfigProvider>(config: &C, options: &SyncOptions) -> Result<()> {
    let store = RegistryStore::new();
    let mut reports: Vec<SyncReport> = Vec::new();
    let mut changed_registries: Vec<PathBuf> = Vec::new();
    let mut last_error = None;

    for kind in ContentKind::ALL {
        let result = sync_one(config, kind, &store);
        match result {
            Ok(report) => {
                println!("{}", report.summary());
                if report.wrote {
                    if let Ok(path) = config.registry_path(kind) {
                        changed_registries.push(path);
                    }
                }
                reports.push(report);
            }
            Err(e) => {
                log::error!("{kind}: sync failed: {e}");
                last_error = Some(e);
            }
        }
    }

    if reports.is_empty() {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    let wrote = reports.iter().filter(|r| r.wrote).count();
    if wrote == 0 {
        println!("All registries up to date.");
    } else {
        println!("Updated {wrote} registry file(s).");
    }

    if options.commit && !changed_registries.is_empty() {
        commit_registries(config, options, &changed_registries);
    }

    Ok(())
}

fn sync_one<C: ConfigProvider>(
    config: &C,
    kind: ContentKind,
    store: &RegistryStore,
) -> Result<SyncReport> {
    let dir = config.content_dir(kind)?;
    let registry_path = config.registry_path(kind)?;
    reconcile_kind(&dir, &registry_path, kind, store)
}

/// Commit the changed registries, downgrading any failure to a warning.
fn commit_registries<C: ConfigProvider>(
    config: &C,
    options: &SyncOptions,
    changed: &[PathBuf],
) {
    let repo_dir = match &options.repo_dir {
        Some(dir) => PathBuf::from(dir),
        None => match config.base_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("cannot determine repository directory: {e}");
                return;
            }
        },
    };

    let paths: Vec<&std::path::Path> = changed.iter().map(PathBuf::as_path).collect();
    match vcs::commit_paths(&repo_dir, &paths, AUTO_COMMIT_MESSAGE) {
        Ok(()) => println!("Committed {} registry file(s).", paths.len()),
        Err(e) => {
            log::warn!("automatic commit failed: {e}");
            eprintln!("{}", vcs::manual_remedy(&paths));
        }
    }
}
