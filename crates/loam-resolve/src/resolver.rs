//! The discovery strategy chain and record loading.

use std::collections::HashSet;

use futures::future::join_all;

use loam_content::{sort_by_order, ContentRecord};
use loam_core::ContentKind;
use loam_registry::parse_registry;

use crate::fetcher::ContentFetcher;
use crate::listing::list_content_files;
use crate::probe::{candidates, probe};

/// Fallback projects, used only when every discovery strategy came up empty.
const FALLBACK_PROJECTS: &[&str] = &[
    "coastal-commercial.yml",
    "residential-upgrade.yml",
    "solar-installation.yml",
];

/// Fallback services.
const FALLBACK_SERVICES: &[&str] = &[
    "residential.yml",
    "commercial.yml",
    "industrial.yml",
    "solar.yml",
    "generator.yml",
    "emergency-services.yml",
];

fn fallback_files(kind: ContentKind) -> Vec<String> {
    let list = match kind {
        ContentKind::Projects => FALLBACK_PROJECTS,
        ContentKind::Services => FALLBACK_SERVICES,
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// How concurrently-dispatched fetch batches are sized by default.
pub const DEFAULT_BATCH_SIZE: usize = 24;
/// Default match count at which probing stops early.
pub const DEFAULT_PROBE_THRESHOLD: usize = 12;
/// Default cap on generated probe candidates.
pub const DEFAULT_PROBE_LIMIT: usize = 400;

/// Which strategy produced a filename list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoverySource {
    /// The repository-contents listing API.
    RemoteListing,
    /// The persisted registry fetched over HTTP.
    Registry,
    /// Brute-force filename probing.
    Probe,
    /// The hardcoded per-kind fallback list.
    Fallback,
}

impl DiscoverySource {
    /// Short name for logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoverySource::RemoteListing => "remote-listing",
            DiscoverySource::Registry => "registry",
            DiscoverySource::Probe => "probe",
            DiscoverySource::Fallback => "fallback",
        }
    }
}

/// Where and how the resolver talks to the deployed site.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Root URL of the deployed site, no trailing slash required.
    pub base_url: String,
    /// Data directory under the site root (and the repository root).
    pub data_dir: String,
    /// `owner/repo` for the repository-contents listing API, if any.
    pub repo: Option<String>,
    /// Root of the repository-contents API.
    pub listing_api_base: String,
    /// Concurrent fetches per batch.
    pub batch_size: usize,
    /// Probe match count that stops further batches.
    pub probe_threshold: usize,
    /// Cap on generated probe candidates.
    pub probe_limit: usize,
}

impl ResolverOptions {
    /// Options for a deployed site at `base_url`, with defaults for the rest.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_dir: "_data".to_string(),
            repo: None,
            listing_api_base: "https://api.github.com".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            probe_threshold: DEFAULT_PROBE_THRESHOLD,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }

    /// Set the `owner/repo` used for remote listing.
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Override the batch size (clamped to at least 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    fn content_file_url(&self, kind: ContentKind, name: &str) -> String {
        format!(
            "{}/{}/{}/{name}",
            self.base_url.trim_end_matches('/'),
            self.data_dir,
            kind.dir_name()
        )
    }

    fn registry_url(&self, kind: ContentKind) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.data_dir,
            kind.registry_file_name()
        )
    }

    fn listing_url(&self, kind: ContentKind) -> Option<String> {
        let repo = self.repo.as_deref()?;
        Some(format!(
            "{}/repos/{repo}/contents/{}/{}",
            self.listing_api_base.trim_end_matches('/'),
            self.data_dir,
            kind.dir_name()
        ))
    }
}

/// A resolved set of content records and the strategy that discovered them.
#[derive(Debug, Clone)]
pub struct ResolvedContent {
    /// Which strategy produced the filename list.
    pub source: DiscoverySource,
    /// Valid, deduplicated records sorted by `order`.
    pub records: Vec<ContentRecord>,
}

/// The client-side content resolver.
///
/// One `Resolver` is an explicit context for one load: it owns its fetcher
/// and options and keeps no state between calls, so concurrent or repeated
/// loads never interfere.
pub struct Resolver<F: ContentFetcher> {
    fetcher: F,
    options: ResolverOptions,
}

impl<F: ContentFetcher> Resolver<F> {
    /// Create a resolver over `fetcher` with `options`.
    pub fn new(fetcher: F, options: ResolverOptions) -> Self {
        Self { fetcher, options }
    }

    /// The options this resolver was built with.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Determine which content files exist for `kind`.
    ///
    /// Strategies run strictly in order — remote listing, registry fetch,
    /// probing, hardcoded fallback — and the first one that yields a
    /// non-empty list wins.
    pub async fn discover(&self, kind: ContentKind) -> (Vec<String>, DiscoverySource) {
        for source in Self::CHAIN {
            let files = self.discover_via(source, kind).await;
            if !files.is_empty() {
                return (files, source);
            }
        }

        log::warn!("{kind}: all discovery strategies failed, using fallback list");
        (fallback_files(kind), DiscoverySource::Fallback)
    }

    /// Discover and load all content records for `kind`.
    ///
    /// A strategy only wins once at least one of its files actually
    /// loads: a list whose every file fails to fetch or parse counts as
    /// a failed strategy and the chain moves on. The fallback list is
    /// terminal, so its successfully fetched records are the result even
    /// when there are none.
    pub async fn load(&self, kind: ContentKind) -> ResolvedContent {
        for source in Self::CHAIN {
            let files = self.discover_via(source, kind).await;
            if files.is_empty() {
                continue;
            }
            let records = self.load_files(kind, &files).await;
            if !records.is_empty() {
                return ResolvedContent { source, records };
            }
            log::warn!(
                "{kind}: {} listed {} file(s) but none loaded, trying next strategy",
                source.as_str(),
                files.len()
            );
        }

        log::warn!("{kind}: all discovery strategies failed, using fallback list");
        let records = self.load_files(kind, &fallback_files(kind)).await;
        ResolvedContent {
            source: DiscoverySource::Fallback,
            records,
        }
    }

    /// The non-terminal strategies, in priority order.
    const CHAIN: [DiscoverySource; 3] = [
        DiscoverySource::RemoteListing,
        DiscoverySource::Registry,
        DiscoverySource::Probe,
    ];

    /// Run one discovery strategy; any failure degrades to an empty list.
    async fn discover_via(&self, source: DiscoverySource, kind: ContentKind) -> Vec<String> {
        match source {
            DiscoverySource::RemoteListing => {
                let Some(url) = self.options.listing_url(kind) else {
                    return Vec::new();
                };
                match list_content_files(&self.fetcher, &url).await {
                    Ok(files) if !files.is_empty() => {
                        // The listing reflects the repository directly, the
                        // same authority a local scan has; the sync CLI will
                        // fold it into the registry on its next run.
                        log::info!("{kind}: discovered {} files via remote listing", files.len());
                        files
                    }
                    Ok(files) => {
                        log::debug!("{kind}: remote listing empty");
                        files
                    }
                    Err(e) => {
                        log::warn!("{kind}: remote listing unavailable: {e}");
                        Vec::new()
                    }
                }
            }
            DiscoverySource::Registry => match self.fetch_registry(kind).await {
                Ok(files) if !files.is_empty() => {
                    log::info!("{kind}: discovered {} files via registry", files.len());
                    files
                }
                Ok(files) => {
                    log::debug!("{kind}: registry empty");
                    files
                }
                Err(e) => {
                    log::warn!("{kind}: registry fetch failed: {e}");
                    Vec::new()
                }
            },
            DiscoverySource::Probe => {
                let pool = candidates(kind, self.options.probe_limit);
                let found = probe(
                    &self.fetcher,
                    |name| self.options.content_file_url(kind, name),
                    &pool,
                    self.options.batch_size,
                    self.options.probe_threshold,
                )
                .await;
                if !found.is_empty() {
                    log::info!("{kind}: discovered {} files via probing", found.len());
                }
                found
            }
            DiscoverySource::Fallback => fallback_files(kind),
        }
    }

    /// Fetch `files` in parallel batches and keep the valid records.
    ///
    /// Records without a valid title are discarded; among records sharing
    /// a title only the first encountered survives; the result is sorted
    /// by `order` ascending. A single failed fetch only shrinks the
    /// result.
    async fn load_files(&self, kind: ContentKind, files: &[String]) -> Vec<ContentRecord> {
        let mut records: Vec<ContentRecord> = Vec::new();
        let mut seen_titles: HashSet<String> = HashSet::new();

        for batch in files.chunks(self.options.batch_size.max(1)) {
            let fetches = batch.iter().map(|name| {
                let url = self.options.content_file_url(kind, name);
                async move { (name, self.fetcher.fetch_text(&url).await) }
            });

            for (name, result) in join_all(fetches).await {
                let body = match result {
                    Ok(body) => body,
                    Err(e) => {
                        log::warn!("{kind}: could not load {name}: {e}");
                        continue;
                    }
                };
                match ContentRecord::from_yaml(&body) {
                    Ok(record) => {
                        if seen_titles.insert(record.title.clone()) {
                            records.push(record);
                        } else {
                            log::debug!("{kind}: duplicate title in {name}, skipping");
                        }
                    }
                    Err(e) => log::warn!("{kind}: invalid record in {name}: {e}"),
                }
            }
        }

        sort_by_order(&mut records);
        records
    }

    async fn fetch_registry(&self, kind: ContentKind) -> loam_core::Result<Vec<String>> {
        let url = self.options.registry_url(kind);
        let body = self.fetcher.fetch_text(&url).await?;
        parse_registry(&body, kind.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFetcher;

    const BASE: &str = "https://site.test";

    fn options() -> ResolverOptions {
        // Tiny probe pool so chain tests stay cheap.
        let mut opts = ResolverOptions::new(BASE).with_repo("acme/site");
        opts.listing_api_base = "https://api.test".into();
        opts.probe_limit = 8;
        opts.probe_threshold = 2;
        opts
    }

    fn listing_url() -> String {
        "https://api.test/repos/acme/site/contents/_data/projects".to_string()
    }

    fn registry_url() -> String {
        format!("{BASE}/_data/projects-registry.yml")
    }

    fn file_url(name: &str) -> String {
        format!("{BASE}/_data/projects/{name}")
    }

    #[tokio::test]
    async fn test_discover_prefers_remote_listing() {
        let mock = MockFetcher::new();
        mock.route(
            listing_url(),
            r#"[{"type": "file", "name": "a.yml"}, {"type": "file", "name": "b.yml"}]"#,
        )
        .await;
        // Registry also present but must not be consulted.
        mock.route(registry_url(), "projects:\n  - stale.yml\n").await;

        let resolver = Resolver::new(mock, options());
        let (files, source) = resolver.discover(ContentKind::Projects).await;

        assert_eq!(source, DiscoverySource::RemoteListing);
        assert_eq!(files, vec!["a.yml", "b.yml"]);
    }

    #[tokio::test]
    async fn test_discover_falls_back_to_registry() {
        let mock = MockFetcher::new();
        mock.route(registry_url(), "projects:\n  - a.yml\n  - b.yml\n")
            .await;

        let resolver = Resolver::new(mock, options());
        let (files, source) = resolver.discover(ContentKind::Projects).await;

        assert_eq!(source, DiscoverySource::Registry);
        assert_eq!(files, vec!["a.yml", "b.yml"]);
    }

    #[tokio::test]
    async fn test_discover_probe_after_registry_failure() {
        let mock = MockFetcher::new();
        // coastal-commercial.yml is an early projects candidate.
        mock.route(file_url("coastal-commercial.yml"), "title: Coastal")
            .await;

        let resolver = Resolver::new(mock, options());
        let (files, source) = resolver.discover(ContentKind::Projects).await;

        assert_eq!(source, DiscoverySource::Probe);
        assert_eq!(files, vec!["coastal-commercial.yml"]);
    }

    #[tokio::test]
    async fn test_discover_fallback_when_everything_fails() {
        let mock = MockFetcher::new();
        let resolver = Resolver::new(mock, options());

        let (files, source) = resolver.discover(ContentKind::Projects).await;
        assert_eq!(source, DiscoverySource::Fallback);
        assert_eq!(files, FALLBACK_PROJECTS);
    }

    #[tokio::test]
    async fn test_load_end_to_end_via_registry() {
        // Registry lists a.yml and b.yml with titles Alpha and Beta:
        // result must be [Alpha, Beta] in order-then-encounter order.
        let mock = MockFetcher::new();
        mock.route(registry_url(), "projects:\n  - a.yml\n  - b.yml\n")
            .await;
        mock.route(file_url("a.yml"), "title: Alpha\norder: 1\n").await;
        mock.route(file_url("b.yml"), "title: Beta\norder: 2\n").await;

        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.source, DiscoverySource::Registry);
        let titles: Vec<_> = resolved.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_load_sorts_by_order_with_default() {
        let mock = MockFetcher::new();
        mock.route(
            registry_url(),
            "projects:\n  - five.yml\n  - none.yml\n  - one.yml\n",
        )
        .await;
        mock.route(file_url("five.yml"), "title: Five\norder: 5\n").await;
        mock.route(file_url("none.yml"), "title: None\n").await;
        mock.route(file_url("one.yml"), "title: One\norder: 1\n").await;

        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        let titles: Vec<_> = resolved.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Five", "None"]);
    }

    #[tokio::test]
    async fn test_load_suppresses_duplicate_titles() {
        let mock = MockFetcher::new();
        mock.route(registry_url(), "projects:\n  - a.yml\n  - copy.yml\n")
            .await;
        mock.route(file_url("a.yml"), "title: Same\nimage: first.jpg\n")
            .await;
        mock.route(file_url("copy.yml"), "title: Same\nimage: second.jpg\n")
            .await;

        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.records.len(), 1);
        // First encountered wins
        assert_eq!(resolved.records[0].image.as_deref(), Some("first.jpg"));
    }

    #[tokio::test]
    async fn test_load_drops_invalid_and_failed_files() {
        let mock = MockFetcher::new();
        mock.route(
            registry_url(),
            "projects:\n  - good.yml\n  - untitled.yml\n  - gone.yml\n",
        )
        .await;
        mock.route(file_url("good.yml"), "title: Good\n").await;
        mock.route(file_url("untitled.yml"), "description: nope\n").await;
        // gone.yml is not routed: fetch fails, load continues.

        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.records.len(), 1);
        assert_eq!(resolved.records[0].title, "Good");
    }

    #[tokio::test]
    async fn test_load_registry_dead_list_falls_through_to_probe() {
        // The registry exists and lists x.yml, but x.yml 404s. A dead
        // list is a failed strategy: probing must run, and it finds an
        // early projects candidate.
        let mock = MockFetcher::new();
        mock.route(registry_url(), "projects:\n  - x.yml\n").await;
        mock.route(file_url("coastal-commercial.yml"), "title: Coastal\n")
            .await;

        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.source, DiscoverySource::Probe);
        let titles: Vec<_> = resolved.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Coastal"]);
    }

    #[tokio::test]
    async fn test_load_fallback_keeps_only_fetchable_records() {
        // Listing unreachable, registry lists a file that 404s, probing
        // finds nothing: final result is the fallback list's successfully
        // fetched records only.
        let mock = MockFetcher::new();
        mock.route(registry_url(), "projects:\n  - x.yml\n").await;
        mock.route(
            file_url("coastal-commercial.yml"),
            "title: Coastal Commercial\n",
        )
        .await;

        let mut opts = options();
        opts.probe_limit = 0; // no candidates, so probing finds nothing
        let resolver = Resolver::new(mock, opts);
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.source, DiscoverySource::Fallback);
        let titles: Vec<_> = resolved.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Coastal Commercial"]);
    }

    #[tokio::test]
    async fn test_load_fallback_may_be_empty() {
        // Nothing is reachable at all; the fallback is terminal, so the
        // result is the fallback source with zero records.
        let mock = MockFetcher::new();
        let resolver = Resolver::new(mock, options());
        let resolved = resolver.load(ContentKind::Projects).await;

        assert_eq!(resolved.source, DiscoverySource::Fallback);
        assert!(resolved.records.is_empty());
    }

    #[test]
    fn test_options_url_shapes() {
        let opts = ResolverOptions::new("https://site.test/").with_repo("acme/site");
        assert_eq!(
            opts.content_file_url(ContentKind::Services, "solar.yml"),
            "https://site.test/_data/services/solar.yml"
        );
        assert_eq!(
            opts.registry_url(ContentKind::Services),
            "https://site.test/_data/services-registry.yml"
        );
        assert_eq!(
            opts.listing_url(ContentKind::Services).unwrap(),
            "https://api.github.com/repos/acme/site/contents/_data/services"
        );
    }

    #[test]
    fn test_options_without_repo_skip_listing() {
        let opts = ResolverOptions::new("https://site.test");
        assert!(opts.listing_url(ContentKind::Projects).is_none());
    }
}
