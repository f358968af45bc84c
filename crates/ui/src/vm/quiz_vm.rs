use tutor_core::model::{QuestionState, QuizSnapshot};

use crate::vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub id: String,
    pub label: String,
    pub text: String,
    pub selected: bool,
    pub disabled: bool,
    /// `correct` / `incorrect` once submitted, empty before.
    pub verdict_class: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub verdict_class: &'static str,
    pub title: &'static str,
    pub explanation_html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub position_label: String,
    pub answered_label: String,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub can_submit: bool,
    pub feedback: Option<FeedbackVm>,
    pub has_previous: bool,
    pub has_next: bool,
}

#[must_use]
pub fn map_quiz(snapshot: &QuizSnapshot) -> QuizVm {
    let selected = snapshot.state.selected();
    let submitted = snapshot.state.is_submitted();
    let correct_answer = snapshot.question.correct_answer.as_str();

    let options = snapshot
        .question
        .options
        .iter()
        .map(|option| {
            let is_selected = selected == Some(option.id.as_str());
            let verdict_class = match (submitted, option.id == correct_answer, is_selected) {
                (false, _, _) => "",
                (true, true, _) => "correct",
                (true, false, true) => "incorrect",
                (true, false, false) => "",
            };
            OptionVm {
                id: option.id.clone(),
                label: option.id.to_uppercase(),
                text: option.text.clone(),
                selected: is_selected,
                disabled: submitted,
                verdict_class,
            }
        })
        .collect();

    let feedback = match &snapshot.state {
        QuestionState::Submitted { correct, .. } => Some(FeedbackVm {
            correct: *correct,
            verdict_class: if *correct { "correct" } else { "incorrect" },
            title: if *correct { "Correct!" } else { "Incorrect!" },
            explanation_html: markdown_to_html(&snapshot.question.explanation),
        }),
        QuestionState::Unanswered { .. } => None,
    };

    QuizVm {
        position_label: format!("Question {} of {}", snapshot.index + 1, snapshot.total),
        answered_label: format!(
            "{} of {} answered ({}%)",
            snapshot.answered_count, snapshot.total, snapshot.answered_percentage
        ),
        question: snapshot.question.question.clone(),
        options,
        can_submit: !submitted && selected.is_some(),
        feedback,
        has_previous: snapshot.has_previous,
        has_next: snapshot.has_next,
    }
}
