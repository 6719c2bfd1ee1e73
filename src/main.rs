// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rmcp::ServiceExt;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use wiki_material::integrations::{OpenTdbClient, QuizRequest, UnsplashClient};
use wiki_material::mcp::WikiMaterialMcp;
use wiki_material::utils::logging::{format_error, format_info, format_success};
use wiki_material::wiki::{MediaWikiClient, WikiBackend};
use wiki_material::{Config, MaterialOutcome, SectionParser, SourceCascade};

#[derive(Parser)]
#[command(name = "wiki_material")]
#[command(version)]
#[command(about = "Educational material from wiki projects, served over MCP", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server on stdio
    Serve,

    /// Build budgeted material for a topic using the source cascade
    Material {
        topic: String,

        #[arg(short, long)]
        language: Option<String>,

        #[arg(short, long)]
        max_chars: Option<usize>,
    },

    /// Search the encyclopedia of a language
    Search {
        query: String,

        #[arg(short, long)]
        language: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Print the cleaned text of one article
    Article {
        title: String,

        #[arg(short, long)]
        language: Option<String>,
    },

    /// List configured languages and their source priority
    Sources {
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Find images for a topic on Unsplash
    Images {
        topic: String,

        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Fetch a trivia quiz for a topic
    Quiz {
        topic: String,

        #[arg(long, default_value_t = 10)]
        amount: u32,

        #[arg(long)]
        difficulty: Option<String>,

        #[arg(long = "type")]
        question_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    wiki_material::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Serve => cmd_serve(config).await?,
        Commands::Material {
            topic,
            language,
            max_chars,
        } => cmd_material(&config, &topic, language, max_chars).await?,
        Commands::Search {
            query,
            language,
            limit,
        } => cmd_search(&config, &query, language, limit).await?,
        Commands::Article { title, language } => cmd_article(&config, &title, language).await?,
        Commands::Sources { language } => cmd_sources(&config, language.as_deref())?,
        Commands::Images { topic, count } => cmd_images(&config, &topic, count).await?,
        Commands::Quiz {
            topic,
            amount,
            difficulty,
            question_type,
        } => {
            let request = QuizRequest {
                topic,
                amount,
                difficulty,
                question_type,
            };
            cmd_quiz(&config, &request).await?
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

async fn cmd_serve(config: Config) -> Result<()> {
    let mcp_server = WikiMaterialMcp::new(config).context("Failed to create MCP server")?;

    info!("MCP server ready. Available tools:");
    for tool in mcp_server.get_tool_router().list_all() {
        info!(
            "  - {}: {}",
            tool.name,
            tool.description.as_deref().unwrap_or("No description")
        );
    }

    let service = mcp_server
        .serve(rmcp::transport::stdio())
        .await
        .context("Failed to start stdio transport")?;
    service.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}

async fn cmd_material(
    config: &Config,
    topic: &str,
    language: Option<String>,
    max_chars: Option<usize>,
) -> Result<()> {
    let language = language.unwrap_or_else(|| config.material.default_language.clone());
    let max_chars = max_chars.unwrap_or(config.material.default_max_chars);

    let wiki = MediaWikiClient::from_config(&config.http)?;
    let cascade = SourceCascade::new(
        Arc::new(wiki),
        Arc::new(config.source_catalog()),
        config.material.budget_range(),
    );

    match cascade.fetch_material(topic, &language, max_chars).await? {
        MaterialOutcome::Found(result) => {
            eprintln!(
                "{}",
                format_success(&format!("{} ({})", result.title, result.source_name))
            );
            print_json(&result)
        }
        outcome @ MaterialOutcome::NotFound { .. } => {
            eprintln!("{}", format_error(&format!("No material found for '{}'", topic)));
            print_json(&outcome)
        }
    }
}

async fn cmd_search(
    config: &Config,
    query: &str,
    language: Option<String>,
    limit: u32,
) -> Result<()> {
    let language = language.unwrap_or_else(|| config.material.default_language.clone());
    let catalog = config.source_catalog();
    let source = catalog
        .encyclopedia_for(&language)
        .with_context(|| format!("No sources configured for language {}", language))?;

    let wiki = MediaWikiClient::from_config(&config.http)?;
    let results = wiki.search_articles(source, query, limit).await?;

    eprintln!(
        "{}",
        format_info(&format!(
            "{} of {} hits from {}",
            results.hits.len(),
            results.total_hits,
            source.name
        ))
    );
    print_json(&results.hits)
}

async fn cmd_article(config: &Config, title: &str, language: Option<String>) -> Result<()> {
    let language = language.unwrap_or_else(|| config.material.default_language.clone());
    let catalog = config.source_catalog();
    let source = catalog
        .encyclopedia_for(&language)
        .with_context(|| format!("No sources configured for language {}", language))?;

    let wiki = MediaWikiClient::from_config(&config.http)?;
    let Some(article) = wiki.fetch(source, title).await? else {
        eprintln!("{}", format_error(&format!("Article '{}' not found", title)));
        return Ok(());
    };

    let parsed = SectionParser::new().parse(&article.raw_extract);
    print_json(&serde_json::json!({
        "title": article.title,
        "url": article.canonical_url,
        "summary": parsed.summary,
        "sections": parsed.sections,
    }))
}

fn cmd_sources(config: &Config, language: Option<&str>) -> Result<()> {
    match language {
        Some(language) => {
            let sources = config
                .sources
                .get(language)
                .with_context(|| format!("No sources configured for language {}", language))?;
            print_json(sources)
        }
        None => print_json(&config.sources),
    }
}

async fn cmd_images(config: &Config, topic: &str, count: u32) -> Result<()> {
    let client = UnsplashClient::new(&config.images, &config.http)?;
    if !client.is_configured() {
        warn!("No Unsplash access key configured, image search returns nothing");
    }

    let images = client.search_images(topic, count).await?;
    print_json(&images)
}

async fn cmd_quiz(config: &Config, request: &QuizRequest) -> Result<()> {
    let client = OpenTdbClient::new(&config.quiz, &config.http)?;
    let outcome = client.fetch_quiz(request).await?;
    print_json(&outcome)
}
