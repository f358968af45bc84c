use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};
use tutor_core::model::{QuizSession, QuizSnapshot, SubmitOutcome};

use crate::progress_service::ProgressService;

/// Quiz session bound to the progress store.
///
/// Each submission records `<prefix>_<index>`; reaching the completion
/// threshold also records `<prefix>_completed`.
pub struct QuizFlow {
    session: Mutex<QuizSession>,
    progress: Arc<ProgressService>,
}

impl QuizFlow {
    #[must_use]
    pub fn new(session: QuizSession, progress: Arc<ProgressService>) -> Self {
        Self {
            session: Mutex::new(session),
            progress,
        }
    }

    pub fn select_option(&self, option_id: &str) -> bool {
        self.lock_session().select_option(option_id)
    }

    /// Submit the current selection and record the resulting keys.
    ///
    /// Returns `None` when nothing is selected or the question is already
    /// submitted.
    pub async fn submit(&self) -> Option<SubmitOutcome> {
        let (outcome, prefix) = {
            let mut session = self.lock_session();
            let outcome = session.submit()?;
            (outcome, session.key_prefix().to_string())
        };
        debug!(
            quiz = %prefix,
            index = outcome.index,
            correct = outcome.correct,
            "quiz answer submitted"
        );

        for key in &outcome.completion_keys {
            self.progress.mark_completed(key).await;
        }
        if outcome.quiz_completed {
            info!(quiz = %prefix, "quiz completed");
        }
        Some(outcome)
    }

    /// Clear the current question so it can be answered again.
    pub fn reset_question(&self) -> bool {
        self.lock_session().reset_current()
    }

    pub fn next_question(&self) -> bool {
        self.lock_session().next_question()
    }

    pub fn previous_question(&self) -> bool {
        self.lock_session().previous_question()
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.lock_session().snapshot()
    }

    fn lock_session(&self) -> MutexGuard<'_, QuizSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
