//! Shared fixtures for unit tests

use std::path::Path;
use std::time::Duration;

use crate::config::{ApiConfig, Config, DownloadConfig, RetryConfig};
use crate::transport::Transport;

/// Retry budget of three with millisecond backoff
pub(crate) fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
        backoff_multiplier: 2.0,
        jitter: false,
    }
}

pub(crate) fn test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        api: ApiConfig {
            base_url: base_url.to_string(),
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        },
        retry: fast_retry(),
        download: DownloadConfig {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        },
    }
}

pub(crate) fn test_transport(base_url: &str) -> Transport {
    let config = test_config(base_url, Path::new("unused"));
    Transport::new(&config.api, config.retry).unwrap()
}

pub(crate) fn envelope_json(
    data: Vec<serde_json::Value>,
    limit: usize,
    offset: usize,
    total: usize,
) -> serde_json::Value {
    serde_json::json!({
        "result": "ok",
        "response": "collection",
        "data": data,
        "limit": limit,
        "offset": offset,
        "total": total
    })
}

pub(crate) fn manga_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "manga",
        "attributes": {
            "title": {"en": title},
            "altTitles": [],
            "description": {"en": "A test title"},
            "originalLanguage": "ja",
            "status": "ongoing",
            "contentRating": "safe",
            "tags": [],
            "availableTranslatedLanguages": ["en"]
        },
        "relationships": []
    })
}

pub(crate) fn chapter_json(
    id: &str,
    number: Option<&str>,
    title: Option<&str>,
) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "chapter",
        "attributes": {
            "volume": null,
            "chapter": number,
            "title": title,
            "translatedLanguage": "en",
            "externalUrl": null,
            "pages": 6,
            "version": 1
        },
        "relationships": []
    })
}

pub(crate) fn tag_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "tag",
        "attributes": {
            "name": {"en": name},
            "description": {},
            "group": "genre",
            "version": 1
        },
        "relationships": []
    })
}

pub(crate) fn at_home_json(base_url: &str, hash: &str, files: &[&str]) -> serde_json::Value {
    let saver: Vec<String> = files.iter().map(|f| f.replace(".png", ".jpg")).collect();
    serde_json::json!({
        "result": "ok",
        "baseUrl": base_url,
        "chapter": {
            "hash": hash,
            "data": files,
            "dataSaver": saver
        }
    })
}
