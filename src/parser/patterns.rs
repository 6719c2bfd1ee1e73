// file: src/parser/patterns.rs
// description: compiled regex patterns for wiki markup cleanup and heading detection
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

/// Namespace aliases of embedded media, compared lowercase.
pub const MEDIA_NAMESPACES: &[&str] = &["file", "image", "media", "файл", "изображение"];

/// Namespace aliases of category tags, compared lowercase.
pub const CATEGORY_NAMESPACES: &[&str] = &["category", "категория"];

lazy_static! {
    // Internal links; no brackets inside, so an unclosed [[ never swallows a later link
    pub static ref PIPED_LINK: Regex = Regex::new(
        r"\[\[[^\[\]]*\|([^|\[\]]*)\]\]"
    ).expect("PIPED_LINK regex is valid");

    pub static ref BARE_LINK: Regex = Regex::new(
        r"\[\[([^\[\]]+)\]\]"
    ).expect("BARE_LINK regex is valid");

    // Innermost template only, so nested invocations unwind from the inside
    pub static ref TEMPLATE: Regex = Regex::new(
        r"\{\{[^{}]*\}\}"
    ).expect("TEMPLATE regex is valid");

    pub static ref HTML_TAG: Regex = Regex::new(
        r"<[^>]+>"
    ).expect("HTML_TAG regex is valid");

    // Whitespace
    pub static ref EXCESS_NEWLINES: Regex = Regex::new(
        r"\n{3,}"
    ).expect("EXCESS_NEWLINES regex is valid");

    pub static ref EXCESS_SPACES: Regex = Regex::new(
        r"[ \t]{2,}"
    ).expect("EXCESS_SPACES regex is valid");

    // Section headings of any depth: == Title ==, === Title ===, ...
    pub static ref HEADING: Regex = Regex::new(
        r"^==+\s*([^=]+?)\s*==+$"
    ).expect("HEADING regex is valid");
}

pub fn is_media_namespace(namespace: &str) -> bool {
    MEDIA_NAMESPACES.contains(&namespace.trim().to_lowercase().as_str())
}

pub fn is_category_namespace(namespace: &str) -> bool {
    CATEGORY_NAMESPACES.contains(&namespace.trim().to_lowercase().as_str())
}
