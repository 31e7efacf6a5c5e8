//! Test configuration helpers for creating clients against mock or live catalogs

use std::path::Path;
use std::time::Duration;

use manga_dl::{ApiConfig, Config, DownloadConfig, MangaClient, RetryConfig};
use tempfile::TempDir;

/// Configuration pointing at `base_url`, writing archives to `output_dir`
///
/// Retries are kept short so connection failures surface quickly.
pub fn test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        },
        retry: RetryConfig {
            max_attempts: 2,
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            backoff_multiplier: 2.0,
            jitter: false,
        },
        download: DownloadConfig {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        },
    }
}

/// Client for `base_url` writing into a fresh temporary directory
///
/// The directory lives as long as the returned [`TempDir`].
pub fn create_test_client(base_url: &str) -> (MangaClient, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let client = MangaClient::new(test_config(base_url, &temp_dir.path().join("output"))).unwrap();
    (client, temp_dir)
}

/// Client for the public catalog, with the default retry budget
pub fn create_live_client() -> (MangaClient, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        download: DownloadConfig {
            output_dir: temp_dir.path().join("output"),
            ..Default::default()
        },
        ..Default::default()
    };
    (MangaClient::new(config).unwrap(), temp_dir)
}
