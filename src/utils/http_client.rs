use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::FetchConfig;
use crate::errors::{AppError, AppResult};

/// Build the HTTP client used for playlist downloads.
///
/// The timeout covers the whole request including the body, so a server that
/// accepts the connection and then stalls still fails within the limit.
pub fn build_http_client(fetch: &FetchConfig) -> AppResult<Client> {
    debug!(
        "Building HTTP client: timeout={}, user_agent={}",
        humantime::format_duration(fetch.timeout),
        fetch.user_agent
    );

    Client::builder()
        .timeout(fetch.timeout)
        .connect_timeout(connect_timeout(fetch.timeout))
        .user_agent(fetch.user_agent.clone())
        .build()
        .map_err(|e| {
            AppError::startup(
                format!("Failed to create HTTP client: {e}"),
                "the TLS backend could not be initialised; check that system certificates \
                 are installed and readable, or rebuild with a working rustls setup",
            )
        })
}

fn connect_timeout(total: Duration) -> Duration {
    total.min(Duration::from_secs(10))
}
