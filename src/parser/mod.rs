// file: src/parser/mod.rs
// description: wiki markup parsing module exports
// reference: internal module structure

pub mod cleaner;
pub mod patterns;
pub mod sections;

pub use cleaner::MarkupCleaner;
pub use sections::SectionParser;
