//! HTTP fetcher for M3U playlist sources
//!
//! One GET per source with the client's total timeout. The raw body is decoded
//! by [`decode_body`]: BOM, then the `Content-Type` charset parameter, then
//! UTF-8 if the bytes are valid, otherwise the detected encoding. Chinese
//! lists are often GBK served without any charset.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::traits::SourceFetcher;
use crate::config::FetchConfig;
use crate::errors::{AppResult, SourceError, SourceResult};
use crate::utils::{UrlUtils, build_http_client, decode_body};

pub struct M3uSourceFetcher {
    client: Client,
}

impl M3uSourceFetcher {
    pub fn new(fetch: &FetchConfig) -> AppResult<Self> {
        Ok(Self {
            client: build_http_client(fetch)?,
        })
    }

    fn classify(url: &str, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout(url)
        } else if let Some(status) = error.status() {
            SourceError::http(url, status.as_u16())
        } else if error.is_body() || error.is_decode() {
            SourceError::decode(url, UrlUtils::obfuscate_credentials(&error.to_string()))
        } else {
            SourceError::network(url, UrlUtils::obfuscate_credentials(&error.to_string()))
        }
    }
}

#[async_trait]
impl SourceFetcher for M3uSourceFetcher {
    async fn fetch_text(&self, url: &str) -> SourceResult<String> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        debug!("Sending GET request to {}", safe_url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify(&safe_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::http(&safe_url, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        debug!(
            "Response from {}: status={}, content_type={:?}, content_length={:?}",
            safe_url,
            status,
            content_type,
            response.content_length()
        );

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::classify(&safe_url, e))?;

        let decoded = decode_body(&bytes, content_type.as_deref(), url);
        if decoded.had_errors {
            warn!(
                "Body of {} is not valid {}; invalid bytes were replaced",
                safe_url,
                decoded.encoding.name()
            );
        }
        debug!(
            "Decoded {} characters from {} as {} ({:?})",
            decoded.text.chars().count(),
            safe_url,
            decoded.encoding.name(),
            decoded.source
        );
        Ok(decoded.text)
    }
}
