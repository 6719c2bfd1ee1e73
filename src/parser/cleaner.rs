// file: src/parser/cleaner.rs
// description: removal of wiki markup from article extracts
// reference: https://www.mediawiki.org/wiki/Help:Formatting

use crate::parser::patterns::{
    BARE_LINK, EXCESS_NEWLINES, EXCESS_SPACES, HTML_TAG, PIPED_LINK, TEMPLATE,
    is_category_namespace, is_media_namespace,
};
use std::borrow::Cow;

/// Strips links, templates, media, categories and inline tags from wiki text.
///
/// Steps run in a fixed order; later patterns rely on namespaced constructs
/// already being gone. Malformed markup never fails: anything without a
/// matching close passes through as literal text.
pub struct MarkupCleaner;

impl MarkupCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = strip_namespaced(text, is_media_namespace);
        cleaned = strip_namespaced(&cleaned, is_category_namespace);
        cleaned = PIPED_LINK.replace_all(&cleaned, "$1").into_owned();
        cleaned = BARE_LINK.replace_all(&cleaned, "$1").into_owned();
        cleaned = strip_templates(&cleaned);
        cleaned = HTML_TAG.replace_all(&cleaned, "").into_owned();
        cleaned = EXCESS_NEWLINES.replace_all(&cleaned, "\n\n").into_owned();
        cleaned = EXCESS_SPACES.replace_all(&cleaned, " ").into_owned();

        cleaned.trim().to_string()
    }
}

impl Default for MarkupCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes innermost templates until none remain.
fn strip_templates(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        match TEMPLATE.replace_all(&current, "") {
            Cow::Borrowed(_) => return current,
            Cow::Owned(next) => current = next,
        }
    }
}

/// Outcome of scanning one `[[` opener for a namespaced construct.
enum Span {
    /// Matching namespace, construct is this many bytes long
    Closed(usize),
    /// Matching namespace that runs to the end of the input
    Unclosed,
    NotNamespaced,
}

/// Deletes every `[[Namespace:...]]` construct whose namespace satisfies
/// `matches`, including nested `[[...]]` inside it (captions with links).
fn strip_namespaced(text: &str, matches: fn(&str) -> bool) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("[[") {
        result.push_str(&rest[..open]);
        let candidate = &rest[open..];

        match namespaced_span(candidate, matches) {
            Span::Closed(len) => rest = &candidate[len..],
            // Nothing after an unclosed construct can close, keep it literal
            Span::Unclosed => {
                rest = candidate;
                break;
            }
            Span::NotNamespaced => {
                result.push_str("[[");
                rest = &candidate[2..];
            }
        }
    }

    result.push_str(rest);
    result
}

/// Scans the construct starting at `candidate`, which begins with `[[`.
fn namespaced_span(candidate: &str, matches: fn(&str) -> bool) -> Span {
    let inner = &candidate[2..];
    let Some(colon) = inner.find([':', '[', ']', '|', '\n']) else {
        return Span::NotNamespaced;
    };
    if !inner[colon..].starts_with(':') || !matches(&inner[..colon]) {
        return Span::NotNamespaced;
    }

    let bytes = candidate.as_bytes();
    let mut depth = 0usize;
    let mut pos = 0usize;
    while pos + 1 < bytes.len() {
        match (bytes[pos], bytes[pos + 1]) {
            (b'[', b'[') => {
                depth += 1;
                pos += 2;
            }
            (b']', b']') => {
                depth -= 1;
                pos += 2;
                if depth == 0 {
                    return Span::Closed(pos);
                }
            }
            _ => pos += 1,
        }
    }

    Span::Unclosed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clean(text: &str) -> String {
        MarkupCleaner::new().clean(text)
    }

    #[test]
    fn test_media_and_categories_removed() {
        assert_eq!(clean("Before [[File:Atom.png|thumb|An atom]] after"), "Before after");
        assert_eq!(clean("Текст [[Файл:Атом.png|мини]] конец"), "Текст конец");
        assert_eq!(clean("Body\n[[Category:Physics]]"), "Body");
        assert_eq!(clean("Тело [[Категория:Физика]]"), "Тело");
    }

    #[test]
    fn test_media_with_nested_links_removed_whole() {
        assert_eq!(
            clean("A [[Image:x.jpg|thumb|A [[nucleus]] and [[electron|electrons]]]] B"),
            "A B"
        );
    }

    #[test]
    fn test_links_resolved() {
        assert_eq!(clean("The [[atomic nucleus|nucleus]] is small"), "The nucleus is small");
        assert_eq!(clean("See [[Proton]] too"), "See Proton too");
        assert_eq!(clean("[[a|b|c]]"), "c");
    }

    #[test]
    fn test_templates_and_tags_removed() {
        assert_eq!(clean("Start {{cite web|url=x}} end"), "Start end");
        assert_eq!(clean("Nested {{outer|{{inner}}}} done"), "Nested done");
        assert_eq!(clean("H<sub>2</sub>O and <ref name=\"a\"/>"), "H2O and");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(clean("  a\n\n\n\n\nb  "), "a\n\nb");
        assert_eq!(clean("a    b\t\tc"), "a b c");
        assert_eq!(clean("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_unbalanced_markup_passes_through() {
        assert_eq!(clean("open [[link without close"), "open [[link without close");
        assert_eq!(clean("[[File:broken.png|thumb"), "[[File:broken.png|thumb");
        assert_eq!(clean("{{template never closed"), "{{template never closed");
        assert_eq!(clean("a < b and c > d"), "a d");
        assert_eq!(clean("]] text [["), "]] text [[");
    }

    #[test]
    fn test_unclosed_opener_before_valid_link() {
        assert_eq!(
            clean("open [[link without close and [[a|b]] end"),
            "open [[link without close and b end"
        );
        assert_eq!(
            clean("open [[link without close and [[Proton]] end"),
            "open [[link without close and Proton end"
        );
        // The unclosed media opener stays literal, the complete link inside it still resolves
        assert_eq!(
            clean("x [[File:a.png|cap [[y]] never closed"),
            "x [[File:a.png|cap y never closed"
        );
    }

    #[test]
    fn test_many_unclosed_media_openers_stay_literal() {
        let text = "[[File:".repeat(20000);
        assert_eq!(clean(&text), text);

        let openers = "[[Файл:a ".repeat(500);
        let mixed = format!("{}[[Category:X]] tail", openers);
        assert_eq!(clean(&mixed), format!("{}tail", openers));
    }

    #[test]
    fn test_empty_and_markup_only() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("{{stub}}\n[[Category:X]]\n  "), "");
    }
}
