use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

use crate::errors::{AppError, AppResult};
use crate::utils::url::UrlUtils;

/// Complete run configuration.
///
/// Every section has defaults, so a config file only needs the keys it wants
/// to change. The struct is built once at startup and passed by reference into
/// the components; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Playlist URLs, fetched in this order
    #[serde(default = "default_source_urls")]
    pub urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Keywords that keep a channel (case-insensitive substring match)
    #[serde(default = "default_include_keywords")]
    pub include: Vec<String>,
    /// Keywords that drop a channel; checked before `include`
    #[serde(default = "default_exclude_keywords")]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total time allowed for one source download
    #[serde(default = "default_fetch_timeout", with = "duration_serde::duration")]
    pub timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_source_urls() -> Vec<String> {
    to_strings(DEFAULT_SOURCE_URLS)
}

fn default_include_keywords() -> Vec<String> {
    to_strings(DEFAULT_INCLUDE_KEYWORDS)
}

fn default_exclude_keywords() -> Vec<String> {
    to_strings(DEFAULT_EXCLUDE_KEYWORDS)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_fetch_timeout() -> Duration {
    humantime::parse_duration(DEFAULT_FETCH_TIMEOUT).unwrap_or(Duration::from_secs(20))
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            urls: default_source_urls(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include: default_include_keywords(),
            exclude: default_exclude_keywords(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to the built-in
    /// defaults when the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let config_file = config_file.as_ref();
        if config_file.exists() {
            let contents = std::fs::read_to_string(config_file)
                .with_context(|| format!("Failed to read {}", config_file.display()))?;
            let config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", config_file.display()))?;
            info!("Configuration loaded from: {}", config_file.display());
            Ok(config)
        } else {
            info!(
                "No config file at {}, using built-in defaults",
                config_file.display()
            );
            Ok(Self::default())
        }
    }

    /// Check the values that would otherwise only fail halfway through a run
    pub fn validate(&self) -> AppResult<()> {
        if self.sources.urls.is_empty() {
            warn!("No source URLs configured, the output playlist will be empty");
        }

        for url in &self.sources.urls {
            let parsed = UrlUtils::parse_and_validate(url).map_err(|e| {
                AppError::configuration(format!(
                    "Invalid source URL '{}': {e}",
                    UrlUtils::obfuscate_credentials(url)
                ))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::configuration(format!(
                    "Source URL '{}' must use http or https",
                    UrlUtils::obfuscate_credentials(url)
                )));
            }
        }

        if self.fetch.timeout.is_zero() {
            return Err(AppError::configuration("fetch.timeout must be greater than zero"));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(AppError::configuration("output.path must not be empty"));
        }

        if self.filter.include.is_empty() {
            warn!("Inclusion keyword list is empty, no channel can be kept");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_lists() {
        let config = Config::default();
        assert_eq!(config.sources.urls.len(), 2);
        assert!(config.filter.include.contains(&"CCTV".to_string()));
        assert!(config.filter.exclude.contains(&"广告".to_string()));
        assert_eq!(config.output.path, PathBuf::from("output/custom.m3u"));
        assert_eq!(config.fetch.timeout, Duration::from_secs(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [filter]
            include = ["BBC"]

            [fetch]
            timeout = "5s"
            "#,
        )
        .unwrap();

        assert_eq!(config.filter.include, vec!["BBC".to_string()]);
        assert_eq!(config.filter.exclude, default_exclude_keywords());
        assert_eq!(config.fetch.timeout, Duration::from_secs(5));
        assert_eq!(config.sources.urls, default_source_urls());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_file(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.output.path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curator.toml");
        std::fs::write(
            &path,
            "[sources]\nurls = [\"http://example.com/a.m3u\"]\n[output]\npath = \"out/a.m3u\"\n",
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.sources.urls, vec!["http://example.com/a.m3u".to_string()]);
        assert_eq!(config.output.path, PathBuf::from("out/a.m3u"));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[sources\nurls = 1").unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = Config::default();
        config.sources.urls = vec!["not a url".to_string()];
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration { .. })
        ));

        config.sources.urls = vec!["ftp://example.com/list.m3u".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_no_sources() {
        let mut config = Config::default();
        config.sources.urls.clear();
        assert!(config.validate().is_ok());
    }
}
