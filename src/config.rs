//! Configuration types for manga-dl

use crate::error::{Error, Result};
use crate::types::ImageQuality;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Catalog API settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root URL (default: "https://api.mangadex.org")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,

    /// `limit` used for catalog and tag listings (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `limit` used for chapter feeds (default: 500)
    #[serde(default = "default_chapter_page_size")]
    pub chapter_page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            page_size: default_page_size(),
            chapter_page_size: default_chapter_page_size(),
        }
    }
}

/// Retry configuration for transport-level failures
///
/// HTTP error statuses are never retried; only connection errors and timeouts are.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 500 ms)
    #[serde(default = "default_initial_delay", with = "duration_ms_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 10 seconds)
    #[serde(default = "default_max_delay", with = "duration_ms_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Chapter download behavior (directories, concurrency, quality)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory archives are written to (default: "./output")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Parent of per-chapter scratch directories (None = inside `output_dir`)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,

    /// Simultaneous page-image fetches per chapter (default: 5)
    #[serde(default = "default_max_concurrent_pages")]
    pub max_concurrent_pages: usize,

    /// Page image variant to download
    #[serde(default)]
    pub quality: ImageQuality,

    /// Translated language of listed chapters (default: "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Largest tolerated ratio of failed pages before a chapter is failed (default: 1.0)
    ///
    /// A chapter where every page failed is always a failure, regardless of this value.
    #[serde(default = "default_max_failure_ratio")]
    pub max_failure_ratio: f64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            temp_dir: None,
            max_concurrent_pages: default_max_concurrent_pages(),
            quality: ImageQuality::default(),
            language: default_language(),
            max_failure_ratio: default_max_failure_ratio(),
        }
    }
}

impl DownloadConfig {
    /// Directory in which per-chapter scratch directories are created
    pub fn scratch_parent(&self) -> &PathBuf {
        self.temp_dir.as_ref().unwrap_or(&self.output_dir)
    }
}

/// Main configuration for [`MangaClient`](crate::MangaClient)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Catalog API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Transport retry budget
    #[serde(default)]
    pub retry: RetryConfig,

    /// Chapter download settings
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Reject settings that would make the client misbehave
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| Error::config(format!("invalid base URL: {e}"), "api.base_url"))?;

        if self.api.page_size == 0 {
            return Err(Error::config("page size must be positive", "api.page_size"));
        }
        if self.api.chapter_page_size == 0 {
            return Err(Error::config(
                "chapter page size must be positive",
                "api.chapter_page_size",
            ));
        }
        if self.download.max_concurrent_pages == 0 {
            return Err(Error::config(
                "at least one concurrent page fetch is required",
                "download.max_concurrent_pages",
            ));
        }
        if !(0.0..=1.0).contains(&self.download.max_failure_ratio) {
            return Err(Error::config(
                "failure ratio must be between 0.0 and 1.0",
                "download.max_failure_ratio",
            ));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.mangadex.org".to_string()
}

fn default_user_agent() -> String {
    concat!("manga-dl/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_page_size() -> usize {
    100
}

fn default_chapter_page_size() -> usize {
    500
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

fn default_max_concurrent_pages() -> usize {
    5
}

fn default_language() -> String {
    "en".to_string()
}

fn default_max_failure_ratio() -> f64 {
    1.0
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds)
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
