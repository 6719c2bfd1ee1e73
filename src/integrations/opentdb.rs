// file: src/integrations/opentdb.rs
// description: trivia quiz retrieval from the Open Trivia Database
// reference: https://opentdb.com/api_config.php

use crate::config::{HttpConfig, QuizConfig};
use crate::error::{MaterialError, Result};
use crate::models::{Quiz, QuizOutcome, QuizQuestion};
use crate::utils::Validator;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const GENERAL_KNOWLEDGE: u32 = 9;

/// OpenTDB category names and ids, in matching priority order.
const CATEGORIES: &[(&str, u32)] = &[
    ("general knowledge", 9),
    ("books", 10),
    ("film", 11),
    ("music", 12),
    ("musicals & theatres", 13),
    ("television", 14),
    ("video games", 15),
    ("board games", 16),
    ("science & nature", 17),
    ("science computers", 18),
    ("science mathematics", 19),
    ("mythology", 20),
    ("sports", 21),
    ("geography", 22),
    ("history", 23),
    ("politics", 24),
    ("art", 25),
    ("celebrities", 26),
    ("animals", 27),
    ("vehicles", 28),
    ("comics", 29),
    ("science gadgets", 30),
    ("anime & manga", 31),
    ("cartoon & animations", 32),
];

const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];
const QUESTION_TYPES: &[&str] = &["multiple", "boolean"];

/// Maps a free-text topic onto an OpenTDB category.
///
/// Whole-topic substring match in either direction first, then per-word,
/// falling back to general knowledge.
pub fn category_for_topic(topic: &str) -> u32 {
    let topic = topic.to_lowercase();

    if let Some((_, id)) = CATEGORIES
        .iter()
        .find(|(name, _)| name.contains(topic.as_str()) || topic.contains(*name))
    {
        return *id;
    }

    for (name, id) in CATEGORIES {
        if topic
            .split_whitespace()
            .any(|word| name.contains(word) || word.contains(*name))
        {
            return *id;
        }
    }

    GENERAL_KNOWLEDGE
}

#[derive(Debug, Clone)]
pub struct QuizRequest {
    pub topic: String,
    pub amount: u32,
    pub difficulty: Option<String>,
    pub question_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TriviaResponse {
    response_code: u32,
    #[serde(default)]
    results: Vec<TriviaQuestion>,
}

#[derive(Debug, Deserialize)]
struct TriviaQuestion {
    category: String,
    #[serde(rename = "type")]
    question_type: String,
    difficulty: String,
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

impl TriviaQuestion {
    fn decode(self) -> Result<QuizQuestion> {
        let correct_answer = decode_field(&self.correct_answer)?;
        let incorrect_answers = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_field(answer))
            .collect::<Result<Vec<_>>>()?;

        let mut all_answers = Vec::with_capacity(incorrect_answers.len() + 1);
        all_answers.push(correct_answer.clone());
        all_answers.extend(incorrect_answers.iter().cloned());

        Ok(QuizQuestion {
            category: decode_field(&self.category)?,
            question_type: decode_field(&self.question_type)?,
            difficulty: decode_field(&self.difficulty)?,
            question: decode_field(&self.question)?,
            correct_answer,
            incorrect_answers,
            all_answers,
        })
    }
}

fn decode_field(value: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(value)
        .map_err(|e| MaterialError::Decode(format!("invalid base64 field: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| MaterialError::Decode(format!("invalid UTF-8 field: {}", e)))
}

fn response_code_message(code: u32) -> &'static str {
    match code {
        1 => "Not enough questions for this topic",
        2 => "Invalid quiz parameters",
        3 | 4 => "Session token problem",
        5 => "Rate limited by the quiz service, try again in a few seconds",
        _ => "Unknown error while fetching questions",
    }
}

#[derive(Clone)]
pub struct OpenTdbClient {
    client: Client,
    api_url: String,
    max_amount: u32,
    timeout: Duration,
}

impl OpenTdbClient {
    pub fn new(quiz: &QuizConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&http.user_agent).build()?;

        Ok(Self {
            client,
            api_url: quiz.api_url.clone(),
            max_amount: quiz.max_amount,
            timeout: Duration::from_secs(http.request_timeout_secs),
        })
    }

    pub fn validate(&self, request: &QuizRequest) -> Result<()> {
        Validator::validate_topic(&request.topic)?;
        Validator::validate_range("amount", request.amount, &(1..=self.max_amount))?;

        if let Some(difficulty) = &request.difficulty {
            Validator::validate_one_of("difficulty", difficulty, DIFFICULTIES)?;
        }
        if let Some(question_type) = &request.question_type {
            Validator::validate_one_of("question_type", question_type, QUESTION_TYPES)?;
        }

        Ok(())
    }

    pub async fn fetch_quiz(&self, request: &QuizRequest) -> Result<QuizOutcome> {
        self.validate(request)?;

        let category_id = category_for_topic(&request.topic);
        debug!(
            "Fetching {} questions for '{}' (category {})",
            request.amount, request.topic, category_id
        );

        let mut params = vec![
            ("amount", request.amount.to_string()),
            ("category", category_id.to_string()),
            ("encode", "base64".to_string()),
        ];
        if let Some(difficulty) = &request.difficulty {
            params.push(("difficulty", difficulty.clone()));
        }
        if let Some(question_type) = &request.question_type {
            params.push(("type", question_type.clone()));
        }

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("OpenTDB request failed with status {}", response.status());
            return Ok(QuizOutcome::failed(
                format!("Quiz service returned status {}", response.status().as_u16()),
                &request.topic,
                category_id,
            ));
        }

        let body: TriviaResponse = response.json().await?;

        if body.response_code != 0 {
            return Ok(QuizOutcome::failed(
                response_code_message(body.response_code),
                &request.topic,
                category_id,
            ));
        }

        if body.results.is_empty() {
            return Ok(QuizOutcome::failed(
                "No questions found for this topic",
                &request.topic,
                category_id,
            ));
        }

        let questions = body
            .results
            .into_iter()
            .map(TriviaQuestion::decode)
            .collect::<Result<Vec<_>>>()?;

        Ok(QuizOutcome::Ready(Quiz {
            topic: request.topic.clone(),
            category_id,
            amount: questions.len(),
            questions,
        }))
    }
}
