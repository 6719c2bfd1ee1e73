// file: src/integrations/unsplash.rs
// description: topic image search through the Unsplash API
// reference: https://unsplash.com/documentation#search-photos

use crate::config::{HttpConfig, ImagesConfig};
use crate::error::Result;
use crate::models::ImageInfo;
use crate::utils::Validator;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const MAX_IMAGES: u32 = 10;

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    id: String,
    description: Option<String>,
    alt_description: Option<String>,
    urls: Option<PhotoUrls>,
    user: Option<PhotoUser>,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: Option<String>,
}

impl From<Photo> for ImageInfo {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id,
            url: photo.urls.and_then(|urls| urls.regular),
            description: photo.description.or(photo.alt_description),
            author: photo.user.and_then(|user| user.name),
        }
    }
}

#[derive(Clone)]
pub struct UnsplashClient {
    client: Client,
    api_url: String,
    access_key: Option<String>,
    orientation: String,
    timeout: Duration,
}

impl UnsplashClient {
    pub fn new(images: &ImagesConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&http.user_agent).build()?;

        Ok(Self {
            client,
            api_url: images.api_url.clone(),
            access_key: images.access_key.clone().filter(|key| !key.trim().is_empty()),
            orientation: images.orientation.clone(),
            timeout: Duration::from_secs(http.request_timeout_secs),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.access_key.is_some()
    }

    /// Up to `count` images for `topic`. Without an access key, or when the
    /// API answers with an error status, the list is empty.
    pub async fn search_images(&self, topic: &str, count: u32) -> Result<Vec<ImageInfo>> {
        Validator::validate_range("count", count, &(1..=MAX_IMAGES))?;

        let Some(access_key) = &self.access_key else {
            warn!("Unsplash access key not configured, returning no images");
            return Ok(Vec::new());
        };

        debug!("Searching Unsplash for '{}' ({} images)", topic, count);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("query", topic.to_string()),
                ("per_page", count.to_string()),
                ("orientation", self.orientation.clone()),
            ])
            .header("Authorization", format!("Client-ID {}", access_key))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Unsplash search failed with status {}", response.status());
            return Ok(Vec::new());
        }

        let body: PhotoSearchResponse = response.json().await?;

        Ok(body
            .results
            .into_iter()
            .take(count as usize)
            .map(ImageInfo::from)
            .collect())
    }
}
