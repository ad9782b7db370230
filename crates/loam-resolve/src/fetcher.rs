//! The network seam of the resolver.

use async_trait::async_trait;

use loam_core::{Error, Result};

/// Abstraction over HTTP text fetching.
///
/// This trait is the resolver's only contact with the network, so tests
/// swap in [`MockFetcher`](crate::MockFetcher) and exercise the whole
/// strategy chain without a server.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch `url` and return the response body as text.
    ///
    /// A non-success status is an error; callers decide whether that error
    /// is fatal (it almost never is).
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetcher backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a fresh client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            // The repository-contents API rejects requests without one.
            .header("User-Agent", concat!("loam/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| Error::http(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(format!("GET {url}: status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| Error::http(format!("GET {url}: body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpFetcher>();
    }

    #[test]
    fn test_http_fetcher_is_object_safe_behind_dyn() {
        fn takes_dyn(_: &dyn ContentFetcher) {}
        takes_dyn(&HttpFetcher::new());
    }
}
