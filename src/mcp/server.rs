// file: src/mcp/server.rs
// description: MCP server exposing wiki material, search, image and quiz tools
// reference: https://docs.rs/rmcp

use crate::config::{Config, MaterialConfig};
use crate::error::MaterialError;
use crate::integrations::{OpenTdbClient, QuizRequest, UnsplashClient};
use crate::models::{MaterialOutcome, WikiSource};
use crate::parser::SectionParser;
use crate::pipeline::SourceCascade;
use crate::utils::Validator;
use crate::wiki::{MediaWikiClient, WikiBackend};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

pub const MAX_SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MaterialRequest {
    /// Topic to find educational material about
    pub topic: String,
    /// Material language: "ru" or "en"
    pub language: Option<String>,
    /// Maximum number of characters in the result (500-20000, default 4000)
    pub max_chars: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchRequest {
    /// Free-text search query
    pub query: String,
    /// Wiki language: "ru" or "en"
    pub language: Option<String>,
    /// Maximum number of results (1-50, default 10)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ArticleRequest {
    /// Article title
    pub title: Option<String>,
    /// Page id, used when no title is given
    pub page_id: Option<u64>,
    /// Wiki language: "ru" or "en"
    pub language: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImagesRequest {
    /// Topic to search images for
    pub topic: String,
    /// Number of images (1-10, default 1)
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QuizToolRequest {
    /// Quiz topic
    pub topic: String,
    /// Number of questions (1-50, default 10)
    pub amount: Option<u32>,
    /// Difficulty: easy, medium or hard
    pub difficulty: Option<String>,
    /// Question type: multiple or boolean
    pub question_type: Option<String>,
}

#[derive(Clone)]
pub struct WikiMaterialMcp {
    material: Arc<MaterialConfig>,
    cascade: SourceCascade,
    wiki: MediaWikiClient,
    images: UnsplashClient,
    quiz: OpenTdbClient,
    parser: Arc<SectionParser>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WikiMaterialMcp {
    pub fn new(config: Config) -> crate::error::Result<Self> {
        let wiki = MediaWikiClient::from_config(&config.http)?;
        let cascade = SourceCascade::new(
            Arc::new(wiki.clone()),
            Arc::new(config.source_catalog()),
            config.material.budget_range(),
        );

        Ok(Self {
            images: UnsplashClient::new(&config.images, &config.http)?,
            quiz: OpenTdbClient::new(&config.quiz, &config.http)?,
            material: Arc::new(config.material),
            cascade,
            wiki,
            parser: Arc::new(SectionParser::new()),
            tool_router: Self::tool_router(),
        })
    }

    pub fn get_tool_router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    fn language_or_default(&self, language: Option<String>) -> String {
        language.unwrap_or_else(|| self.material.default_language.clone())
    }

    fn encyclopedia(&self, language: &str) -> crate::error::Result<WikiSource> {
        self.cascade
            .catalog()
            .encyclopedia_for(language)
            .cloned()
            .ok_or_else(|| MaterialError::UnsupportedLanguage {
                language: language.to_string(),
                supported: self.cascade.catalog().languages(),
            })
    }

    #[tool(
        description = "Get educational material on a topic from wiki projects (Wikibooks, Vikidia, Wikipedia). Children and educational sources are tried first; returns title, summary, sections and source URLs."
    )]
    async fn wiki_get_material(
        &self,
        Parameters(request): Parameters<MaterialRequest>,
    ) -> Result<CallToolResult, McpError> {
        let language = self.language_or_default(request.language);
        let max_chars = request.max_chars.unwrap_or(self.material.default_max_chars);
        info!(
            "MCP: wiki_get_material topic='{}' language={} max_chars={}",
            request.topic, language, max_chars
        );

        match self
            .cascade
            .fetch_material(&request.topic, &language, max_chars)
            .await
        {
            Ok(MaterialOutcome::Found(result)) => json_success(&result),
            Ok(MaterialOutcome::NotFound {
                topic,
                attempted_sources,
            }) => Ok(json_failure(json!({
                "error": format!(
                    "No educational material found for '{}' in any source",
                    topic
                ),
                "topic": topic,
                "searched_sources": attempted_sources,
            }))),
            Err(e) => Ok(input_failure(&e, &request.topic)),
        }
    }

    #[tool(description = "Search wiki articles by free text and list matching titles with page ids and snippets")]
    async fn wiki_search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        let language = self.language_or_default(request.language);
        let limit = request.limit.unwrap_or(10);
        info!("MCP: wiki_search query='{}' language={}", request.query, language);

        if let Err(e) = Validator::validate_topic(&request.query)
            .and_then(|_| Validator::validate_range("limit", limit, &(1..=MAX_SEARCH_RESULTS)))
        {
            return Ok(input_failure(&e, &request.query));
        }

        let source = match self.encyclopedia(&language) {
            Ok(source) => source,
            Err(e) => return Ok(input_failure(&e, &request.query)),
        };

        match self.wiki.search_articles(&source, &request.query, limit).await {
            Ok(results) => json_success(&json!({
                "query": request.query,
                "source": source.name,
                "total_hits": results.total_hits,
                "results": results.hits,
            })),
            Err(e) => {
                error!("MCP: wiki_search failed: {}", e);
                Ok(json_failure(json!({
                    "error": format!("Search failed: {}", e),
                    "query": request.query,
                })))
            }
        }
    }

    #[tool(description = "Get the cleaned plain text of one wiki article by title or page id")]
    async fn wiki_get_text(
        &self,
        Parameters(request): Parameters<ArticleRequest>,
    ) -> Result<CallToolResult, McpError> {
        let language = self.language_or_default(request.language);
        let label = request
            .title
            .clone()
            .or_else(|| request.page_id.map(|id| id.to_string()))
            .unwrap_or_default();
        info!("MCP: wiki_get_text article='{}' language={}", label, language);

        let source = match self.encyclopedia(&language) {
            Ok(source) => source,
            Err(e) => return Ok(input_failure(&e, &label)),
        };

        let fetched = match (request.title.as_deref(), request.page_id) {
            (Some(title), _) if !title.trim().is_empty() => self.wiki.fetch(&source, title).await,
            (_, Some(page_id)) => self.wiki.fetch_by_page_id(&source, page_id).await,
            _ => {
                let e = MaterialError::Validation("Either title or page_id is required".to_string());
                return Ok(input_failure(&e, &label));
            }
        };

        match fetched {
            Ok(Some(article)) => json_success(&json!({
                "title": article.title,
                "url": match (article.canonical_url.is_empty(), article.page_id) {
                    (true, Some(page_id)) => source.page_url(page_id),
                    _ => article.canonical_url.clone(),
                },
                "text": self.parser.plain_text(&article.raw_extract),
                "source": source.name,
            })),
            Ok(None) => Ok(json_failure(json!({
                "error": "Article not found, check the title",
                "topic": label,
            }))),
            Err(e) => {
                error!("MCP: wiki_get_text failed: {}", e);
                Ok(json_failure(json!({
                    "error": format!("Failed to fetch article: {}", e),
                    "topic": label,
                })))
            }
        }
    }

    #[tool(description = "Find illustrative images for a topic via Unsplash (1-10 images)")]
    async fn get_images(
        &self,
        Parameters(request): Parameters<ImagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let count = request.count.unwrap_or(1);
        info!("MCP: get_images topic='{}' count={}", request.topic, count);

        match self.images.search_images(&request.topic, count).await {
            Ok(images) => json_success(&images),
            Err(e) if e.is_invalid_input() => Ok(input_failure(&e, &request.topic)),
            Err(e) => {
                error!("MCP: get_images failed: {}", e);
                Ok(json_failure(json!({
                    "error": format!("Image search failed: {}", e),
                    "topic": request.topic,
                })))
            }
        }
    }

    #[tool(description = "Build a trivia quiz on a topic from the Open Trivia Database")]
    async fn get_quiz(
        &self,
        Parameters(request): Parameters<QuizToolRequest>,
    ) -> Result<CallToolResult, McpError> {
        let quiz_request = QuizRequest {
            topic: request.topic,
            amount: request.amount.unwrap_or(10),
            difficulty: request.difficulty,
            question_type: request.question_type,
        };
        info!(
            "MCP: get_quiz topic='{}' amount={}",
            quiz_request.topic, quiz_request.amount
        );

        match self.quiz.fetch_quiz(&quiz_request).await {
            Ok(outcome) => json_success(&outcome),
            Err(e) if e.is_invalid_input() => Ok(input_failure(&e, &quiz_request.topic)),
            Err(e) => {
                error!("MCP: get_quiz failed: {}", e);
                Ok(json_failure(json!({
                    "success": false,
                    "error": format!("Quiz request failed: {}", e),
                    "topic": quiz_request.topic,
                })))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for WikiMaterialMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Educational content tools. Use wiki_get_material for structured lesson material \
                 on a topic, wiki_search and wiki_get_text for direct article access, get_images \
                 for illustrations and get_quiz for trivia questions."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}

fn json_success<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn json_failure(payload: serde_json::Value) -> CallToolResult {
    CallToolResult::error(vec![Content::text(payload.to_string())])
}

fn input_failure(error: &MaterialError, topic: &str) -> CallToolResult {
    json_failure(json!({
        "error": error.to_string(),
        "topic": topic,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> WikiMaterialMcp {
        WikiMaterialMcp::new(Config::default_config()).unwrap()
    }

    #[test]
    fn test_mcp_server_tools() {
        let mcp = server();
        let mut names: Vec<String> = mcp
            .get_tool_router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["get_images", "get_quiz", "wiki_get_material", "wiki_get_text", "wiki_search"]
        );
    }

    #[tokio::test]
    async fn test_unsupported_language_is_tool_error() {
        let mcp = server();
        let result = mcp
            .wiki_get_material(Parameters(MaterialRequest {
                topic: "Atom".to_string(),
                language: Some("de".to_string()),
                max_chars: None,
            }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_out_of_range_budget_is_tool_error() {
        let mcp = server();
        let result = mcp
            .wiki_get_material(Parameters(MaterialRequest {
                topic: "Atom".to_string(),
                language: None,
                max_chars: Some(50),
            }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_article_request_needs_title_or_id() {
        let mcp = server();
        let result = mcp
            .wiki_get_text(Parameters(ArticleRequest {
                title: None,
                page_id: None,
                language: Some("en".to_string()),
            }))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
