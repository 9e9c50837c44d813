/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Source defaults
pub const DEFAULT_SOURCE_URLS: &[&str] = &[
    "https://iptv-org.github.io/iptv/countries/cn.m3u",
    "https://iptv-org.github.io/iptv/categories/news.m3u",
];

// Filter defaults
pub const DEFAULT_EXCLUDE_KEYWORDS: &[&str] = &["测试", "广告"];
pub const DEFAULT_INCLUDE_KEYWORDS: &[&str] =
    &["CCTV", "新闻", "台", "视", "频道", "CNN", "BBC", "FOX"];

// Output defaults
pub const DEFAULT_OUTPUT_PATH: &str = "output/custom.m3u";

// Fetch defaults
pub const DEFAULT_FETCH_TIMEOUT: &str = "20s";
pub const DEFAULT_USER_AGENT: &str = concat!("m3u-curator/", env!("CARGO_PKG_VERSION"));

// Process defaults
pub const DEFAULT_CONFIG_FILE: &str = "m3u-curator.toml";
