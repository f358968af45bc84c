use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz needs at least one question")]
    NoQuestions,

    #[error("question {index} has no options")]
    NoOptions { index: usize },

    #[error("question {index} repeats option id {option_id}")]
    DuplicateOption { index: usize, option_id: String },

    #[error("question {index} names correct answer {correct} which is not an option")]
    UnknownCorrectAnswer { index: usize, correct: String },

    #[error("quiz key prefix cannot be empty")]
    EmptyKeyPrefix,

    #[error("invalid question bank: {0}")]
    Bank(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
}

impl QuizOption {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One multiple-choice question as supplied by page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<QuizOption>,
    pub correct_answer: String,
    pub explanation: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_answer == option_id
    }

    #[must_use]
    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }

    fn validate(&self, index: usize) -> Result<(), QuizError> {
        if self.options.is_empty() {
            return Err(QuizError::NoOptions { index });
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(QuizError::DuplicateOption {
                    index,
                    option_id: option.id.clone(),
                });
            }
        }
        if !self.has_option(&self.correct_answer) {
            return Err(QuizError::UnknownCorrectAnswer {
                index,
                correct: self.correct_answer.clone(),
            });
        }
        Ok(())
    }
}

/// Validate an ordered question bank.
///
/// # Errors
///
/// Returns `QuizError` for an empty bank or a malformed question.
pub fn validate_bank(questions: &[QuizQuestion]) -> Result<(), QuizError> {
    if questions.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    questions
        .iter()
        .enumerate()
        .try_for_each(|(index, question)| question.validate(index))
}

/// Parse a question bank from its JSON array form.
///
/// # Errors
///
/// Returns `QuizError::Bank` if the JSON does not match the question shape, or
/// any validation error from [`validate_bank`].
pub fn parse_bank(json: &str) -> Result<Vec<QuizQuestion>, QuizError> {
    let questions: Vec<QuizQuestion> =
        serde_json::from_str(json).map_err(|err| QuizError::Bank(err.to_string()))?;
    validate_bank(&questions)?;
    Ok(questions)
}
