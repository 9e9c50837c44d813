//! Runs one curation pass: fetch every source in order, parse and filter each,
//! merge without duplicates, write the playlist.
//!
//! Sources are processed strictly one after another. A failed download is
//! logged and recorded in the summary; it never stops the run. Only errors
//! that make the output impossible (writing the file) are returned.

use tracing::{debug, info, warn};

use super::aggregator::ChannelAggregator;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ingestor::parse_and_filter;
use crate::models::{FetchOutcome, RunSummary, SourceReport};
use crate::proxy::{KeywordFilter, M3uGenerator};
use crate::sources::{M3uSourceFetcher, SourceFetcher};
use crate::utils::UrlUtils;

pub struct Orchestrator {
    config: Config,
    filter: KeywordFilter,
    fetcher: Box<dyn SourceFetcher>,
}

impl Orchestrator {
    pub fn new(config: Config, fetcher: Box<dyn SourceFetcher>) -> Self {
        let filter = KeywordFilter::from_config(&config.filter);
        Self {
            config,
            filter,
            fetcher,
        }
    }

    /// Build an orchestrator with the HTTP fetcher described by `config.fetch`.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let fetcher = M3uSourceFetcher::new(&config.fetch)?;
        Ok(Self::new(config, Box::new(fetcher)))
    }

    pub async fn run(&self) -> AppResult<RunSummary> {
        let mut aggregator = ChannelAggregator::new();
        let mut reports = Vec::with_capacity(self.config.sources.urls.len());

        for url in &self.config.sources.urls {
            let safe_url = UrlUtils::obfuscate_credentials(url);
            info!("Downloading: {}", safe_url);

            let outcome = match self.fetcher.fetch_text(url).await {
                Ok(content) => {
                    let filtered = parse_and_filter(&content, &self.filter);
                    let kept = filtered.kept.len();
                    info!(
                        "Filtered {} of {} channels from {}",
                        kept, filtered.parsed, safe_url
                    );
                    let added = aggregator.extend(filtered.kept);
                    debug!("{} new channels merged from {}", added, safe_url);
                    FetchOutcome::Fetched {
                        parsed: filtered.parsed,
                        kept,
                    }
                }
                Err(e) => {
                    warn!("Download failed: {} - skipping source ({})", safe_url, e);
                    FetchOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            reports.push(SourceReport {
                url: safe_url,
                outcome,
            });
        }

        let duplicates_dropped = aggregator.duplicates();
        let entries = aggregator.into_entries();
        let output_path = M3uGenerator::save(&entries, &self.config.output.path).await?;

        let summary = RunSummary {
            output_path,
            total_entries: entries.len(),
            duplicates_dropped,
            sources: reports,
        };

        info!(
            "Generated playlist {} with {} channels ({} duplicates dropped, {} of {} sources failed)",
            summary.output_path.display(),
            summary.total_entries,
            summary.duplicates_dropped,
            summary.failed_sources(),
            summary.sources.len()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{SourceError, SourceResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned playlists by URL and records the request order.
    struct StaticFetcher {
        bodies: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn new(bodies: &[(&str, &str)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SourceFetcher for StaticFetcher {
        async fn fetch_text(&self, url: &str) -> SourceResult<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| SourceError::timeout(url))
        }
    }

    fn config(urls: &[&str], output: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.sources.urls = urls.iter().map(|u| u.to_string()).collect();
        config.filter.include = vec!["CCTV".to_string(), "BBC".to_string()];
        config.filter.exclude = vec!["test".to_string()];
        config.output.path = output.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_failed_source_does_not_stop_run() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/custom.m3u");
        let fetcher = StaticFetcher::new(&[(
            "http://b/list.m3u",
            "#EXTM3U\n#EXTINF:-1,CCTV1\nhttp://x/1\n",
        )]);

        let orchestrator = Orchestrator::new(
            config(&["http://a/list.m3u", "http://b/list.m3u"], &output),
            Box::new(fetcher),
        );
        let summary = orchestrator.run().await.unwrap();

        assert_eq!(summary.total_entries, 1);
        assert_eq!(summary.failed_sources(), 1);
        assert!(matches!(summary.sources[0].outcome, FetchOutcome::Failed { .. }));
        assert_eq!(
            summary.sources[1].outcome,
            FetchOutcome::Fetched { parsed: 1, kept: 1 }
        );
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "#EXTM3U\n#EXTINF:-1,CCTV1\nhttp://x/1\n"
        );
    }

    #[tokio::test]
    async fn test_sources_fetched_in_order_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("custom.m3u");
        let fetcher = StaticFetcher::new(&[
            (
                "http://a/list.m3u",
                "#EXTINF:-1,BBC One\nhttp://x/bbc1\n#EXTINF:-1,CCTV1\nhttp://x/1\n",
            ),
            (
                "http://b/list.m3u",
                "#EXTINF:-1,CCTV1\nhttp://x/1\n#EXTINF:-1,CCTV-test\nhttp://x/t\n#EXTINF:-1,CCTV2\nhttp://x/2\n",
            ),
        ]);

        let orchestrator = Orchestrator::new(
            config(&["http://a/list.m3u", "http://b/list.m3u"], &output),
            Box::new(fetcher),
        );
        let summary = orchestrator.run().await.unwrap();

        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.duplicates_dropped, 1);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "#EXTM3U\n#EXTINF:-1,BBC One\nhttp://x/bbc1\n#EXTINF:-1,CCTV1\nhttp://x/1\n#EXTINF:-1,CCTV2\nhttp://x/2\n"
        );
    }

    #[tokio::test]
    async fn test_request_order_follows_config() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = std::sync::Arc::new(StaticFetcher::new(&[]));

        struct Shared(std::sync::Arc<StaticFetcher>);

        #[async_trait]
        impl SourceFetcher for Shared {
            async fn fetch_text(&self, url: &str) -> SourceResult<String> {
                self.0.fetch_text(url).await
            }
        }

        let orchestrator = Orchestrator::new(
            config(&["http://c/", "http://a/", "http://b/"], &dir.path().join("x.m3u")),
            Box::new(Shared(fetcher.clone())),
        );
        let summary = orchestrator.run().await.unwrap();

        assert_eq!(summary.total_entries, 0);
        assert_eq!(summary.failed_sources(), 3);
        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec!["http://c/", "http://a/", "http://b/"]
        );
    }

    #[tokio::test]
    async fn test_unwritable_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let orchestrator = Orchestrator::new(
            config(&[], &blocker.join("custom.m3u")),
            Box::new(StaticFetcher::new(&[])),
        );
        let err = orchestrator.run().await.unwrap_err();
        assert_eq!(err.exit_code(), crate::errors::EXIT_RUNTIME_FAILURE);
    }
}
