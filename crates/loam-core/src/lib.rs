//! Loam Core — shared types, traits, and errors.
//!
//! This crate provides the foundational types used across all Loam crates.
//! It has no internal Loam dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`kind`]: Content kinds and their registry conventions
//! - [`traits`]: Core traits for site configuration

pub mod error;
pub mod kind;
pub mod traits;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use kind::ContentKind;
pub use traits::ConfigProvider;
