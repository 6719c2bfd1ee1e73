// file: src/models/source.rs
// description: wiki source descriptors and the per-language priority catalog
// reference: MediaWiki action API endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One candidate origin of article content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiSource {
    pub name: String,
    pub api_url: String,
}

impl WikiSource {
    pub fn new(name: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            api_url: api_url.into(),
        }
    }

    /// Article URL by page id, for pages whose response carries no `fullurl`.
    ///
    /// The site root is the API endpoint without its `/w/api.php` (or
    /// `/api.php`) script path.
    pub fn page_url(&self, page_id: u64) -> String {
        let api_url = self.api_url.trim_end_matches('/');
        let root = api_url
            .strip_suffix("/w/api.php")
            .or_else(|| api_url.strip_suffix("/api.php"))
            .unwrap_or(api_url);
        format!("{}/?curid={}", root, page_id)
    }
}

/// Immutable mapping of language code to an ordered source list.
///
/// Order encodes fallback priority: educational and children-oriented wikis
/// come before general encyclopedias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCatalog {
    languages: BTreeMap<String, Vec<WikiSource>>,
}

impl SourceCatalog {
    pub fn new(languages: BTreeMap<String, Vec<WikiSource>>) -> Self {
        Self { languages }
    }

    pub fn sources_for(&self, language: &str) -> Option<&[WikiSource]> {
        self.languages.get(language).map(Vec::as_slice)
    }

    pub fn supports(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }

    /// The general encyclopedic source for a language, i.e. the last one tried.
    pub fn encyclopedia_for(&self, language: &str) -> Option<&WikiSource> {
        self.sources_for(language).and_then(|sources| sources.last())
    }
}
