//! Source fetcher trait definitions

use async_trait::async_trait;

use crate::errors::SourceResult;

/// Retrieves raw playlist text for one source URL.
///
/// Implementations must report every failure as a `SourceError` carrying the
/// URL instead of panicking, so the pipeline can move on to the next source.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> SourceResult<String>;
}
