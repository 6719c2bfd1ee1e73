// file: src/models/media.rs
// description: image search and trivia quiz payloads
// reference: Unsplash search/photos and OpenTDB api.php responses

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub all_answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub topic: String,
    pub category_id: u32,
    pub amount: usize,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QuizOutcome {
    Ready(Quiz),
    Failed {
        success: bool,
        error: String,
        topic: String,
        category_id: u32,
    },
}

impl QuizOutcome {
    pub fn failed(error: impl Into<String>, topic: &str, category_id: u32) -> Self {
        QuizOutcome::Failed {
            success: false,
            error: error.into(),
            topic: topic.to_string(),
            category_id,
        }
    }
}
