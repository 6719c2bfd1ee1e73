// file: src/models/document.rs
// description: parsed wiki document and the material payload handed to callers
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Cleaned article split into an introduction and titled sections.
///
/// Every section has non-empty content; sections that clean down to nothing
/// are dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub summary: String,
    pub sections: Vec<Section>,
}

impl ParsedDocument {
    pub fn is_usable(&self) -> bool {
        !self.summary.is_empty() || !self.sections.is_empty()
    }

    /// Character count of the summary plus every section body.
    pub fn char_count(&self) -> usize {
        self.summary.chars().count()
            + self
                .sections
                .iter()
                .map(|s| s.content.chars().count())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialResult {
    pub title: String,
    pub summary: String,
    pub sections: Vec<Section>,
    pub source_urls: Vec<String>,
    #[serde(rename = "source")]
    pub source_name: String,
}

/// Terminal state of one material request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MaterialOutcome {
    Found(MaterialResult),
    NotFound {
        topic: String,
        attempted_sources: Vec<String>,
    },
}

impl MaterialOutcome {
    pub fn into_result(self) -> Option<MaterialResult> {
        match self {
            MaterialOutcome::Found(result) => Some(result),
            MaterialOutcome::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_document() {
        assert!(!ParsedDocument::default().is_usable());

        let summary_only = ParsedDocument {
            summary: "intro".to_string(),
            sections: vec![],
        };
        assert!(summary_only.is_usable());

        let sections_only = ParsedDocument {
            summary: String::new(),
            sections: vec![Section::new("A", "body")],
        };
        assert!(sections_only.is_usable());
    }

    #[test]
    fn test_char_count_uses_characters() {
        let doc = ParsedDocument {
            summary: "Привет".to_string(),
            sections: vec![Section::new("Мир", "мир")],
        };
        assert_eq!(doc.char_count(), 9);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = MaterialOutcome::NotFound {
            topic: "Atoms".to_string(),
            attempted_sources: vec!["wikibooks".to_string()],
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "not_found");
        assert_eq!(value["attempted_sources"][0], "wikibooks");

        let found = MaterialOutcome::Found(MaterialResult {
            title: "Atom".to_string(),
            summary: "s".to_string(),
            sections: vec![],
            source_urls: vec!["https://example.org/Atom".to_string()],
            source_name: "wikipedia".to_string(),
        });
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["status"], "found");
        assert_eq!(value["source"], "wikipedia");
    }
}
