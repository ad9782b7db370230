//! HTTP-side content resolution.
//!
//! A deployed site has no filesystem access, so the filename list the
//! reconciler maintains must be reconstructed over the network. The
//! [`Resolver`] tries an ordered chain of discovery strategies — remote
//! repository listing, registry fetch, bounded brute-force probing, then a
//! hardcoded fallback — until one of them yields sorted, deduplicated
//! [`ContentRecord`](loam_content::ContentRecord)s.
//!
//! The guiding policy is "never block content rendering": every failure
//! falls through to the next-best source of data.
//!
//! # Modules
//!
//! - [`fetcher`]: the [`ContentFetcher`] seam and its reqwest implementation
//! - [`mock`]: a canned-response fetcher for tests
//! - [`listing`]: repository-contents API strategy
//! - [`probe`]: candidate generation and batched probing
//! - [`resolver`]: the strategy chain and record loading

pub mod fetcher;
pub mod listing;
pub mod mock;
pub mod probe;
pub mod resolver;

pub use fetcher::{ContentFetcher, HttpFetcher};
pub use mock::MockFetcher;
pub use resolver::{DiscoverySource, ResolvedContent, Resolver, ResolverOptions};
