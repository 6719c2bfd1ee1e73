// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod article;
pub mod document;
pub mod media;
pub mod source;

pub use article::{ArticleContent, SearchHit};
pub use document::{MaterialOutcome, MaterialResult, ParsedDocument, Section};
pub use media::{ImageInfo, Quiz, QuizOutcome, QuizQuestion};
pub use source::{SourceCatalog, WikiSource};
