// file: src/wiki/mod.rs
// description: search and fetch seam between the cascade and wiki sources
// reference: https://www.mediawiki.org/wiki/API:Main_page

pub mod client;

pub use client::MediaWikiClient;

use crate::error::Result;
use crate::models::{ArticleContent, SearchHit, WikiSource};
use async_trait::async_trait;

/// Search and fetch operations against one wiki source.
///
/// `Ok(None)` means the source answered but had nothing; `Err` is a
/// transport, timeout or HTTP failure. The cascade treats both as
/// "try the next source".
#[async_trait]
pub trait WikiBackend: Send + Sync {
    async fn search(&self, source: &WikiSource, query: &str) -> Result<Option<SearchHit>>;

    async fn fetch(&self, source: &WikiSource, title: &str) -> Result<Option<ArticleContent>>;
}
