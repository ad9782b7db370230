//! Registry synchronization for file-based content.
//!
//! The filesystem is the source of truth: content authors add and remove
//! `.yml` files; the registry is a cached index of those filenames. This
//! crate scans content directories, diffs them against the persisted
//! registry, and rewrites the registry when they disagree.
//!
//! # Modules
//!
//! - [`scanner`]: list content files in a directory
//! - [`store`]: read/write the persisted registry document
//! - [`reconciler`]: diff scan output against the registry and resolve it
//! - [`vcs`]: commit changed registries, as a separate orchestration step
//!
//! All of this path is synchronous and single-threaded; its only external
//! resources are the local filesystem and, optionally, a `git` subprocess.

pub mod reconciler;
pub mod scanner;
pub mod store;
pub mod vcs;

pub use reconciler::{diff, reconcile_kind, Reconciliation, SyncReport};
pub use scanner::scan_dir;
pub use store::{parse_registry, RegistryStore};
