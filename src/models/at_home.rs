use serde::{Deserialize, Serialize};

use crate::types::ImageQuality;

/// Image-server info for one chapter
///
/// Fetched immediately before downloading the chapter; the base URL is short-lived and
/// is never cached.
#[allow(missing_docs)]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    #[serde(default)]
    pub result: String,
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

/// Content hash and page file names of a chapter
#[allow(missing_docs)]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    #[serde(default)]
    pub data: Vec<String>,
    #[serde(default)]
    pub data_saver: Vec<String>,
}

impl AtHomeServer {
    /// Page file names of the requested variant, in server order
    pub fn page_files(&self, quality: ImageQuality) -> &[String] {
        match quality {
            ImageQuality::Data => &self.chapter.data,
            ImageQuality::DataSaver => &self.chapter.data_saver,
        }
    }

    /// `{baseUrl}/{data|data-saver}/{hash}/{file}`
    pub fn page_url(&self, quality: ImageQuality, file_name: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            quality.url_segment(),
            self.chapter.hash,
            file_name
        )
    }
}
