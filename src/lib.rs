// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod error;
pub mod integrations;
pub mod mcp;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod utils;
pub mod wiki;

pub use config::{Config, HttpConfig, ImagesConfig, MaterialConfig, QuizConfig};
pub use error::{MaterialError, Result};
pub use models::{
    ArticleContent, ImageInfo, MaterialOutcome, MaterialResult, ParsedDocument, Quiz,
    QuizOutcome, QuizQuestion, SearchHit, Section, SourceCatalog, WikiSource,
};
pub use parser::{MarkupCleaner, SectionParser};
pub use pipeline::{BudgetAllocator, SourceCascade};
pub use utils::Validator;
pub use wiki::{MediaWikiClient, WikiBackend};
