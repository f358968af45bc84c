use std::collections::BTreeSet;

use crate::model::ids::ItemKey;
use crate::model::quiz::{QuizError, QuizQuestion, validate_bank};
use crate::model::snapshot::percentage;

/// When a quiz emits its `<prefix>_completed` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionRule {
    /// Fire when the answered set grows to `N - 1`, or on the first answer
    /// of a one-question quiz.
    #[default]
    SecondToLast,
    /// Fire when the answered set grows to `N`.
    AllAnswered,
}

impl CompletionRule {
    #[must_use]
    pub fn threshold(self, question_count: usize) -> usize {
        match self {
            CompletionRule::SecondToLast => question_count.saturating_sub(1).max(1),
            CompletionRule::AllAnswered => question_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionState {
    Unanswered { selected: Option<String> },
    Submitted { selected: String, correct: bool },
}

impl QuestionState {
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            QuestionState::Unanswered { selected } => selected.as_deref(),
            QuestionState::Submitted { selected, .. } => Some(selected),
        }
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        matches!(self, QuestionState::Submitted { .. })
    }
}

impl Default for QuestionState {
    fn default() -> Self {
        QuestionState::Unanswered { selected: None }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub index: usize,
    pub correct: bool,
    /// False when the question had been answered before and was retried.
    pub first_answer: bool,
    /// Keys to record, in order: the question key, then the completion key if
    /// the threshold was just reached.
    pub completion_keys: Vec<ItemKey>,
    pub quiz_completed: bool,
}

/// Read model of the session at its current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub index: usize,
    pub total: usize,
    pub question: QuizQuestion,
    pub state: QuestionState,
    pub answered_count: usize,
    pub answered_percentage: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// A fixed, ordered question sequence with a cursor and a monotonic answered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    key_prefix: String,
    questions: Vec<QuizQuestion>,
    states: Vec<QuestionState>,
    current: usize,
    answered: BTreeSet<usize>,
    rule: CompletionRule,
}

impl QuizSession {
    /// Start a session at the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the prefix is empty or the bank is invalid.
    pub fn new(key_prefix: impl Into<String>, questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        let key_prefix = key_prefix.into();
        if key_prefix.trim().is_empty() {
            return Err(QuizError::EmptyKeyPrefix);
        }
        validate_bank(&questions)?;
        let states = vec![QuestionState::default(); questions.len()];
        Ok(Self {
            key_prefix,
            questions,
            states,
            current: 0,
            answered: BTreeSet::new(),
            rule: CompletionRule::default(),
        })
    }

    /// Build from a bank that is known to be valid.
    pub(crate) fn from_known(key_prefix: &str, questions: Vec<QuizQuestion>) -> Self {
        let states = vec![QuestionState::default(); questions.len()];
        Self {
            key_prefix: key_prefix.to_string(),
            questions,
            states,
            current: 0,
            answered: BTreeSet::new(),
            rule: CompletionRule::default(),
        }
    }

    #[must_use]
    pub fn with_rule(mut self, rule: CompletionRule) -> Self {
        self.rule = rule;
        self
    }

    /// Choose an option for the current question.
    ///
    /// Rejected once the question is submitted, or for an unknown option id.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if !self.questions[self.current].has_option(option_id) {
            return false;
        }
        match &mut self.states[self.current] {
            QuestionState::Unanswered { selected } => {
                *selected = Some(option_id.to_string());
                true
            }
            QuestionState::Submitted { .. } => false,
        }
    }

    /// Submit the current selection.
    ///
    /// Returns `None` without any change if nothing is selected or the question
    /// is already submitted.
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        let index = self.current;
        let selected = match &self.states[index] {
            QuestionState::Unanswered {
                selected: Some(selected),
            } => selected.clone(),
            _ => return None,
        };

        let correct = self.questions[index].is_correct(&selected);
        self.states[index] = QuestionState::Submitted { selected, correct };

        let first_answer = self.answered.insert(index);
        let mut completion_keys = vec![ItemKey::quiz_question(&self.key_prefix, index)];
        let quiz_completed =
            first_answer && self.answered.len() == self.rule.threshold(self.questions.len());
        if quiz_completed {
            completion_keys.push(ItemKey::quiz_completed(&self.key_prefix));
        }

        Some(SubmitOutcome {
            index,
            correct,
            first_answer,
            completion_keys,
            quiz_completed,
        })
    }

    /// Clear the current question's submission so it can be retried.
    ///
    /// The question stays in the answered set.
    pub fn reset_current(&mut self) -> bool {
        let state = &mut self.states[self.current];
        if !state.is_submitted() {
            return false;
        }
        *state = QuestionState::default();
        true
    }

    pub fn next_question(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn previous_question(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    #[must_use]
    pub fn rule(&self) -> CompletionRule {
        self.rule
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn current_state(&self) -> &QuestionState {
        &self.states[self.current]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.answered.contains(&index)
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        let total = self.questions.len();
        let answered_count = self.answered.len();
        QuizSnapshot {
            index: self.current,
            total,
            question: self.current_question().clone(),
            state: self.current_state().clone(),
            answered_count,
            answered_percentage: percentage(
                u32::try_from(answered_count).unwrap_or(u32::MAX),
                u32::try_from(total).unwrap_or(u32::MAX),
            ),
            has_previous: self.current > 0,
            has_next: self.current + 1 < total,
        }
    }
}
