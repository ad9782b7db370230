//! Mock fetcher for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::fetcher::ContentFetcher;
use loam_core::{Error, Result};

/// Fetcher that serves canned bodies by URL.
///
/// Unrouted URLs return an HTTP-style error, which is what the resolver
/// sees for a 404. The mock also counts requests so tests can assert that
/// probing really stopped early.
#[derive(Clone, Default)]
pub struct MockFetcher {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<String, String>,
    requests: Vec<String>,
}

impl MockFetcher {
    /// Create a mock with no routes; every fetch fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for requests to `url`.
    pub async fn route(&self, url: impl Into<String>, body: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.routes.insert(url.into(), body.into());
    }

    /// Remove a route, turning subsequent fetches of `url` into failures.
    pub async fn unroute(&self, url: &str) {
        let mut state = self.state.lock().await;
        state.routes.remove(url);
    }

    /// Number of fetches issued so far.
    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    /// All URLs fetched so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.state.lock().await.requests.clone()
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let mut state = self.state.lock().await;
        state.requests.push(url.to_string());
        state
            .routes
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http(format!("GET {url}: status 404 Not Found")))
    }
}
