//! Handler for the `resolve` command.
//!
//! Runs the HTTP discovery chain against the configured deployed site and
//! prints whatever records it recovers.

use std::str::FromStr;

use loam_core::{ContentKind, Error, Result};
use loam_resolve::{ContentFetcher, HttpFetcher, Resolver, ResolverOptions};

/// Options for one resolve run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Which content kind to resolve.
    pub kind: ContentKind,
    /// Print records as a JSON array instead of a text listing.
    pub json: bool,
}

impl ResolveOptions {
    /// Parse the kind argument from the command line.
    ///
    /// # Errors
    ///
    /// Returns an invalid-data error for an unknown kind name.
    pub fn parse(kind: &str, json: bool) -> Result<Self> {
        let kind = ContentKind::from_str(kind).map_err(|_| {
            Error::invalid_data(format!(
                "unknown content kind '{kind}' (expected one of: projects, services)"
            ))
        })?;
        Ok(Self { kind, json })
    }
}

/// Resolve deployed content for one kind and print the result.
pub async fn handle_resolve(
    resolver_options: ResolverOptions,
    options: &ResolveOptions,
) -> Result<()> {
    let resolver = Resolver::new(HttpFetcher::new(), resolver_options);
    run_resolve(&resolver, options)
        .await
        .map(|output| print!("{output}"))
}

/// Load the records and render them, generic over the fetcher so tests
/// drive it through a mock.
async fn run_resolve<F: ContentFetcher>(
    resolver: &Resolver<F>,
    options: &ResolveOptions,
) -> Result<String> {
    let resolved = resolver.load(options.kind).await;

    if options.json {
        let json = serde_json::to_string_pretty(&resolved.records)
            .map_err(|e| Error::serialization(e.to_string()))?;
        return Ok(format!("{json}\n"));
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}: {} record(s) via {}\n",
        options.kind,
        resolved.records.len(),
        resolved.source.as_str()
    ));
    for record in &resolved.records {
        out.push_str(&format!("  [{:>3}] {}\n", record.sort_order(), record.title));
    }
    Ok(out)
}
