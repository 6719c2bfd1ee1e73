// file: src/integrations/mod.rs
// description: third-party educational content APIs exposed as MCP tools
// reference: internal module structure

pub mod opentdb;
pub mod unsplash;

pub use opentdb::{OpenTdbClient, QuizRequest, category_for_topic};
pub use unsplash::UnsplashClient;
