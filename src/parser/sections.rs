// file: src/parser/sections.rs
// description: splits article extracts into a summary and titled sections
// reference: MediaWiki extracts with exsectionformat=wiki

use crate::models::{ParsedDocument, Section};
use crate::parser::cleaner::MarkupCleaner;
use crate::parser::patterns::HEADING;

/// Splits a raw extract on `== Heading ==` lines of any depth.
pub struct SectionParser {
    cleaner: MarkupCleaner,
}

struct OpenSection<'a> {
    title: String,
    lines: Vec<&'a str>,
}

impl SectionParser {
    pub fn new() -> Self {
        Self {
            cleaner: MarkupCleaner::new(),
        }
    }

    pub fn parse(&self, raw_extract: &str) -> ParsedDocument {
        let mut summary_lines: Vec<&str> = Vec::new();
        let mut sections = Vec::new();
        let mut current: Option<OpenSection<'_>> = None;

        for line in raw_extract.lines() {
            if let Some(title) = heading_title(line) {
                self.close_section(current.take(), &mut sections);
                current = Some(OpenSection {
                    title,
                    lines: Vec::new(),
                });
            } else if let Some(open) = current.as_mut() {
                open.lines.push(line);
            } else {
                summary_lines.push(line);
            }
        }
        self.close_section(current, &mut sections);

        ParsedDocument {
            summary: self.cleaner.clean(&summary_lines.join("\n")),
            sections,
        }
    }

    /// Cleans an extract without splitting it, heading lines included.
    pub fn plain_text(&self, raw_extract: &str) -> String {
        self.cleaner.clean(raw_extract)
    }

    fn close_section(&self, open: Option<OpenSection<'_>>, sections: &mut Vec<Section>) {
        let Some(open) = open else {
            return;
        };

        let content = self.cleaner.clean(&open.lines.join("\n"));
        if !content.is_empty() {
            sections.push(Section::new(open.title, content));
        }
    }
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_title(line: &str) -> Option<String> {
    let captures = HEADING.captures(line)?;
    let title = captures.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
