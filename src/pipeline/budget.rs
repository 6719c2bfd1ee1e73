// file: src/pipeline/budget.rs
// description: character budget enforcement over parsed documents
// reference: soft budget with word-boundary truncation

use crate::models::{MaterialResult, ParsedDocument};

/// Appended to every truncated part.
pub const ELLIPSIS: &str = "...";

/// Share of the budget the summary may occupy.
const SUMMARY_SHARE: f64 = 0.4;

/// A word boundary is only used when it keeps more than this share of the target.
const MIN_BOUNDARY_SHARE: f64 = 0.7;

/// Truncates a document so its text roughly fits a character budget.
///
/// The budget is soft: each truncated part gains an ellipsis and sections
/// are capped independently, so the output can exceed `max_chars` slightly.
/// Lengths are counted in characters, not bytes.
pub struct BudgetAllocator;

impl BudgetAllocator {
    pub fn new() -> Self {
        Self
    }

    pub fn apply(&self, mut doc: ParsedDocument, max_chars: usize) -> ParsedDocument {
        if doc.char_count() <= max_chars {
            return doc;
        }

        let mut remaining = max_chars as i64;

        if !doc.summary.is_empty() {
            let summary_len = doc.summary.chars().count();
            let summary_cap = max_chars as f64 * SUMMARY_SHARE;
            if summary_len as f64 > summary_cap {
                doc.summary = truncate_at_word(&doc.summary, summary_cap as usize);
            }
            remaining -= doc.summary.chars().count() as i64;
        }

        if !doc.sections.is_empty() && remaining > 0 {
            let per_section = remaining as usize / doc.sections.len();
            for section in &mut doc.sections {
                if section.content.chars().count() > per_section {
                    section.content = truncate_at_word(&section.content, per_section);
                }
            }
        }

        doc
    }

    pub fn apply_to_result(&self, result: MaterialResult, max_chars: usize) -> MaterialResult {
        let MaterialResult {
            title,
            summary,
            sections,
            source_urls,
            source_name,
        } = result;

        let doc = self.apply(ParsedDocument { summary, sections }, max_chars);

        MaterialResult {
            title,
            summary: doc.summary,
            sections: doc.sections,
            source_urls,
            source_name,
        }
    }
}

impl Default for BudgetAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Cuts `text` to at most `max_chars` characters plus an ellipsis.
///
/// Prefers the last space or newline inside the kept prefix, but only when it
/// lies past 70% of the target; otherwise cuts mid-word.
pub fn truncate_at_word(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let prefix: Vec<char> = text.chars().take(max_chars).collect();
    let boundary = prefix.iter().rposition(|&c| c == ' ' || c == '\n');

    let keep = match boundary {
        Some(cut) if cut as f64 > max_chars as f64 * MIN_BOUNDARY_SHARE => cut,
        _ => prefix.len(),
    };

    let mut truncated: String = prefix[..keep].iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Section;
    use pretty_assertions::assert_eq;

    fn doc(summary: &str, sections: &[(&str, &str)]) -> ParsedDocument {
        ParsedDocument {
            summary: summary.to_string(),
            sections: sections
                .iter()
                .map(|(title, content)| Section::new(*title, *content))
                .collect(),
        }
    }

    #[test]
    fn test_short_document_unchanged() {
        let input = doc("short intro", &[("A", "body")]);
        let output = BudgetAllocator::new().apply(input.clone(), 500);
        assert_eq!(output, input);
    }

    #[test]
    fn test_exact_budget_unchanged() {
        let input = doc(&"a".repeat(300), &[("A", &"b".repeat(200))]);
        let output = BudgetAllocator::new().apply(input.clone(), 500);
        assert_eq!(output, input);
    }

    #[test]
    fn test_summary_and_sections_reduced() {
        let a = "A".repeat(500);
        let b = "B".repeat(500);
        let c = "C".repeat(500);
        let input = doc(&a, &[("S1", &b), ("S2", &c)]);

        let output = BudgetAllocator::new().apply(input, 800);

        assert_eq!(output.summary.chars().count(), 320 + ELLIPSIS.len());
        assert_eq!(output.sections[0].content.chars().count(), 238 + ELLIPSIS.len());
        assert_eq!(output.sections[1].content.chars().count(), 238 + ELLIPSIS.len());
        let total = output.char_count();
        assert!(total < 1500);
        assert!(total <= 800 + 3 * ELLIPSIS.len());
    }

    #[test]
    fn test_short_summary_left_alone() {
        let input = doc("Intro.", &[("S1", &"x".repeat(1000))]);
        let output = BudgetAllocator::new().apply(input, 500);

        assert_eq!(output.summary, "Intro.");
        assert_eq!(output.sections[0].content.chars().count(), 494 + ELLIPSIS.len());
    }

    #[test]
    fn test_short_sections_not_padded_or_touched() {
        let input = doc(
            &"s".repeat(100),
            &[("Short", "tiny"), ("Long", &"l".repeat(2000))],
        );
        let output = BudgetAllocator::new().apply(input, 600);

        assert_eq!(output.sections[0].content, "tiny");
        // (600 - 100) / 2, no slack moved over from the short section
        assert_eq!(output.sections[1].content.chars().count(), 250 + ELLIPSIS.len());
    }

    #[test]
    fn test_budget_counts_characters() {
        let summary = "ж".repeat(1000);
        let output = BudgetAllocator::new().apply(doc(&summary, &[]), 500);
        assert_eq!(output.summary, format!("{}...", "ж".repeat(200)));
    }

    #[test]
    fn test_truncate_prefers_late_word_boundary() {
        let text = "alpha beta gamma delta epsilon";
        // prefix "alpha beta gamma del", last space at 16 > 14
        assert_eq!(truncate_at_word(text, 20), "alpha beta gamma...");
    }

    #[test]
    fn test_truncate_cuts_mid_word_when_boundary_too_early() {
        let text = "tiny supercalifragilisticexpialidocious";
        // last space at 4, not past 70% of 20
        assert_eq!(truncate_at_word(text, 20), "tiny supercalifragil...");
    }

    #[test]
    fn test_truncate_uses_newline_boundary() {
        let text = "first line here\nsecond line";
        assert_eq!(truncate_at_word(text, 18), "first line here...");
    }

    #[test]
    fn test_truncate_noop_when_short() {
        assert_eq!(truncate_at_word("short", 10), "short");
    }

    #[test]
    fn test_apply_to_result_keeps_metadata() {
        let result = MaterialResult {
            title: "Atom".to_string(),
            summary: "word ".repeat(400),
            sections: vec![],
            source_urls: vec!["https://en.wikipedia.org/wiki/Atom".to_string()],
            source_name: "wikipedia".to_string(),
        };

        let output = BudgetAllocator::new().apply_to_result(result, 500);

        assert_eq!(output.title, "Atom");
        assert_eq!(output.source_name, "wikipedia");
        assert!(output.summary.ends_with(ELLIPSIS));
        assert!(output.summary.chars().count() <= 200 + ELLIPSIS.len());
    }
}
