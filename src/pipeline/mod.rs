// file: src/pipeline/mod.rs
// description: material retrieval pipeline module exports
// reference: internal module structure

pub mod budget;
pub mod cascade;

pub use budget::{BudgetAllocator, ELLIPSIS, truncate_at_word};
pub use cascade::SourceCascade;
