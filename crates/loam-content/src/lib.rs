//! Content record model and YAML parsing.
//!
//! One content file holds one [`ContentRecord`]. A record is an open
//! mapping: the fields the site renders are typed, everything else is
//! carried through untouched. A record without a non-empty `title` is
//! never valid.

pub mod record;

pub use record::{sort_by_order, ContentRecord, Feature, DEFAULT_ORDER};
