// file: src/models/article.rs
// description: search hits and raw article payloads returned by wiki sources
// reference: MediaWiki list=search and prop=extracts responses

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Canonical article title
    pub title: String,

    /// Source-assigned page identifier
    pub page_id: u64,

    /// Highlighted search snippet with markup removed, when the source returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchHit {
    pub fn new(title: impl Into<String>, page_id: u64) -> Self {
        Self {
            title: title.into(),
            page_id,
            snippet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub title: String,

    /// Plain-text extract, may still carry wiki markup and `== heading ==` lines
    pub raw_extract: String,

    /// Full URL of the article, empty when the source did not report one
    pub canonical_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<u64>,
}

impl ArticleContent {
    pub fn new(
        title: impl Into<String>,
        raw_extract: impl Into<String>,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            raw_extract: raw_extract.into(),
            canonical_url: canonical_url.into(),
            page_id: None,
        }
    }

    pub fn with_page_id(mut self, page_id: Option<u64>) -> Self {
        self.page_id = page_id;
        self
    }

    pub fn has_extract(&self) -> bool {
        !self.raw_extract.trim().is_empty()
    }
}
