// file: src/wiki/client.rs
// description: MediaWiki action API client for article search and extract retrieval
// reference: https://www.mediawiki.org/wiki/API:Search and https://www.mediawiki.org/wiki/Extension:TextExtracts

use crate::config::HttpConfig;
use crate::error::{MaterialError, Result};
use crate::models::{ArticleContent, SearchHit, WikiSource};
use crate::parser::MarkupCleaner;
use crate::wiki::WikiBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchEntry>,
    searchinfo: Option<SearchInfo>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    title: String,
    pageid: u64,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchInfo {
    #[serde(default)]
    totalhits: u64,
}

#[derive(Debug, Deserialize)]
struct PageResponse {
    query: Option<PageQuery>,
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    #[serde(default)]
    pages: BTreeMap<String, PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    pageid: Option<u64>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: String,
    #[serde(default)]
    fullurl: String,
    missing: Option<serde_json::Value>,
    invalid: Option<serde_json::Value>,
}

/// Every hit of a search request plus the source-reported total.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total_hits: u64,
}

enum PageSelector<'a> {
    Title(&'a str),
    PageId(u64),
}

#[derive(Clone)]
pub struct MediaWikiClient {
    client: Client,
    search_timeout: Duration,
    fetch_timeout: Duration,
    search_limit: u32,
}

impl MediaWikiClient {
    pub fn new(
        user_agent: &str,
        search_timeout: Duration,
        fetch_timeout: Duration,
        search_limit: u32,
    ) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            search_timeout,
            fetch_timeout,
            search_limit: search_limit.max(1),
        })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Self::new(
            &config.user_agent,
            Duration::from_secs(config.search_timeout_secs),
            Duration::from_secs(config.fetch_timeout_secs),
            config.search_limit,
        )
    }

    /// Full-text search returning every hit, snippets cleaned of highlight markup.
    pub async fn search_articles(
        &self,
        source: &WikiSource,
        query: &str,
        limit: u32,
    ) -> Result<SearchResults> {
        let params = [
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("list", "search".to_string()),
            ("srsearch", query.to_string()),
            ("srlimit", limit.max(1).to_string()),
            ("srprop", "snippet".to_string()),
            ("srinfo", "totalhits".to_string()),
            ("utf8", "1".to_string()),
        ];

        let response: SearchResponse = self
            .get_json(&source.api_url, &params, self.search_timeout, "search")
            .await?;

        let Some(query) = response.query else {
            return Ok(SearchResults::default());
        };

        let cleaner = MarkupCleaner::new();
        let hits = query
            .search
            .into_iter()
            .map(|entry| {
                let snippet = cleaner.clean(&entry.snippet);
                SearchHit {
                    title: entry.title,
                    page_id: entry.pageid,
                    snippet: (!snippet.is_empty()).then_some(snippet),
                }
            })
            .collect::<Vec<_>>();

        let total_hits = query
            .searchinfo
            .map(|info| info.totalhits)
            .unwrap_or(hits.len() as u64);

        Ok(SearchResults { hits, total_hits })
    }

    pub async fn fetch_by_page_id(
        &self,
        source: &WikiSource,
        page_id: u64,
    ) -> Result<Option<ArticleContent>> {
        self.fetch_page(source, PageSelector::PageId(page_id)).await
    }

    async fn fetch_page(
        &self,
        source: &WikiSource,
        selector: PageSelector<'_>,
    ) -> Result<Option<ArticleContent>> {
        let mut params = vec![
            ("action", "query".to_string()),
            ("format", "json".to_string()),
            ("prop", "extracts|info".to_string()),
            ("inprop", "url".to_string()),
            ("explaintext", "1".to_string()),
            ("exsectionformat", "wiki".to_string()),
            ("redirects", "1".to_string()),
        ];
        match selector {
            PageSelector::Title(title) => params.push(("titles", title.to_string())),
            PageSelector::PageId(id) => params.push(("pageids", id.to_string())),
        }

        let response: PageResponse = self
            .get_json(&source.api_url, &params, self.fetch_timeout, "fetch")
            .await?;

        let page = response
            .query
            .and_then(|query| query.pages.into_values().next());

        Ok(match page {
            Some(page) if page.missing.is_none() && page.invalid.is_none() => Some(
                ArticleContent::new(page.title, page.extract, page.fullurl)
                    .with_page_id(page.pageid),
            ),
            _ => None,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        timeout: Duration,
        operation: &str,
    ) -> Result<T> {
        debug!("MediaWiki {} request to {}", operation, url);

        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, operation, timeout))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MaterialError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| transport_error(e, operation, timeout))
    }
}

fn transport_error(error: reqwest::Error, operation: &str, timeout: Duration) -> MaterialError {
    if error.is_timeout() {
        MaterialError::Timeout {
            operation: operation.to_string(),
            seconds: timeout.as_secs(),
        }
    } else {
        MaterialError::Http(error)
    }
}

#[async_trait]
impl WikiBackend for MediaWikiClient {
    async fn search(&self, source: &WikiSource, query: &str) -> Result<Option<SearchHit>> {
        let results = self
            .search_articles(source, query, self.search_limit)
            .await?;
        Ok(results.hits.into_iter().next())
    }

    async fn fetch(&self, source: &WikiSource, title: &str) -> Result<Option<ArticleContent>> {
        self.fetch_page(source, PageSelector::Title(title)).await
    }
}
