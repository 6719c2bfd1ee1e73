// file: src/pipeline/cascade.rs
// description: sequential fallback across wiki sources producing budgeted material
// reference: search -> fetch -> parse -> budget, first usable source wins

use crate::error::{MaterialError, Result};
use crate::models::{MaterialOutcome, MaterialResult, SourceCatalog, WikiSource};
use crate::parser::SectionParser;
use crate::pipeline::budget::BudgetAllocator;
use crate::utils::Validator;
use crate::wiki::WikiBackend;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tries each configured source of a language in priority order and returns
/// the first one that yields a usable document.
///
/// Attempts are strictly sequential. A failed search or fetch is final for
/// that source; the next one is tried without retry. Dropping the returned
/// future aborts the in-flight request and skips the remaining sources.
#[derive(Clone)]
pub struct SourceCascade {
    backend: Arc<dyn WikiBackend>,
    catalog: Arc<SourceCatalog>,
    budget_range: RangeInclusive<usize>,
    parser: Arc<SectionParser>,
    allocator: Arc<BudgetAllocator>,
}

impl SourceCascade {
    pub fn new(
        backend: Arc<dyn WikiBackend>,
        catalog: Arc<SourceCatalog>,
        budget_range: RangeInclusive<usize>,
    ) -> Self {
        Self {
            backend,
            catalog,
            budget_range,
            parser: Arc::new(SectionParser::new()),
            allocator: Arc::new(BudgetAllocator::new()),
        }
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// Rejects unsupported languages, blank topics and out-of-range budgets
    /// before any network activity.
    pub fn validate_request(&self, topic: &str, language: &str, max_chars: usize) -> Result<()> {
        if !self.catalog.supports(language) {
            return Err(MaterialError::UnsupportedLanguage {
                language: language.to_string(),
                supported: self.catalog.languages(),
            });
        }

        Validator::validate_topic(topic)?;
        Validator::validate_range("max_chars", max_chars, &self.budget_range)
    }

    pub async fn fetch_material(
        &self,
        topic: &str,
        language: &str,
        max_chars: usize,
    ) -> Result<MaterialOutcome> {
        self.validate_request(topic, language, max_chars)?;

        let sources = self.catalog.sources_for(language).unwrap_or_default();
        let mut attempted_sources = Vec::with_capacity(sources.len());

        for source in sources {
            attempted_sources.push(source.name.clone());
            debug!("Trying source {} for topic '{}'", source.name, topic);

            match self.try_source(source, topic).await {
                Ok(Some(result)) => {
                    info!(
                        "Material for '{}' found in {} ({})",
                        topic, source.name, result.title
                    );
                    let result = self.allocator.apply_to_result(result, max_chars);
                    return Ok(MaterialOutcome::Found(result));
                }
                Ok(None) => {
                    debug!("Source {} had no usable article for '{}'", source.name, topic);
                }
                Err(e) => {
                    warn!("Source {} failed for '{}': {}", source.name, topic, e);
                }
            }
        }

        warn!(
            "No material for '{}' in any of: {}",
            topic,
            attempted_sources.join(", ")
        );

        Ok(MaterialOutcome::NotFound {
            topic: topic.to_string(),
            attempted_sources,
        })
    }

    async fn try_source(&self, source: &WikiSource, topic: &str) -> Result<Option<MaterialResult>> {
        let Some(hit) = self.backend.search(source, topic).await? else {
            return Ok(None);
        };

        let Some(article) = self.backend.fetch(source, &hit.title).await? else {
            return Ok(None);
        };
        if !article.has_extract() {
            return Ok(None);
        }

        let parsed = self.parser.parse(&article.raw_extract);
        if !parsed.is_usable() {
            return Ok(None);
        }

        let url = if article.canonical_url.is_empty() {
            source.page_url(article.page_id.unwrap_or(hit.page_id))
        } else {
            article.canonical_url
        };

        Ok(Some(MaterialResult {
            title: article.title,
            summary: parsed.summary,
            sections: parsed.sections,
            source_urls: vec![url],
            source_name: source.name.clone(),
        }))
    }
}
