//! Committing changed registry files to version control.
//!
//! Kept separate from reconciliation so the core stays testable without a
//! repository: [`reconcile_kind`](crate::reconcile_kind) only reports what
//! changed, and the caller decides whether to commit.

use std::path::Path;
use std::process::Command;

use loam_core::{Error, Result};

/// Commit message used for automatic registry updates.
pub const AUTO_COMMIT_MESSAGE: &str = "Auto-update registries: sync with actual files";

/// Stage `paths` and commit them in the repository at `repo_dir`.
///
/// Invoked as a blocking `git` subprocess. Callers are expected to
/// downgrade a failure to a warning: a commit that did not happen never
/// invalidates the reconciliation result itself.
///
/// # Errors
///
/// Returns [`Error::Vcs`] when `git` cannot be spawned or exits non-zero.
pub fn commit_paths(repo_dir: &Path, paths: &[&Path], message: &str) -> Result<()> {
    if paths.is_empty() {
        return Ok(());
    }

    for path in paths {
        run_git(repo_dir, &["add", &path.display().to_string()])?;
    }
    run_git(repo_dir, &["commit", "-m", message])?;

    log::info!("committed {} registry file(s)", paths.len());
    Ok(())
}

/// A short manual remedy, printed when automatic committing fails.
pub fn manual_remedy(paths: &[&Path]) -> String {
    let list = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!("run manually: git add {list} && git commit -m \"Fix registries\"")
}

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .map_err(|e| Error::vcs(format!("could not run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::vcs(format!(
            "git {} failed: {}",
            args.first().unwrap_or(&""),
            stderr.trim()
        )));
    }

    Ok(())
}
