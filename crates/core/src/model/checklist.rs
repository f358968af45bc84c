use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ItemKey, StepId};
use crate::model::snapshot::percentage;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChecklistError {
    #[error("checklist needs at least one step")]
    NoSteps,

    #[error("duplicate step id: {0}")]
    DuplicateStep(String),
}

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// Status of a single checklist step.
///
/// `Completed` and `Skipped` are terminal; only `reset` leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

impl StepStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Completed | StepStatus::Skipped)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in-progress",
            StepStatus::Completed => "completed",
            StepStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepItem {
    id: StepId,
    title: String,
    description: String,
    status: StepStatus,
}

impl StepItem {
    /// A new step in the `Pending` state.
    #[must_use]
    pub fn new(id: StepId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: StepStatus::Pending,
        }
    }

    #[must_use]
    pub fn id(&self) -> &StepId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn status(&self) -> StepStatus {
        self.status
    }
}

/// A status change applied by the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTransition {
    pub step_id: StepId,
    pub from: StepStatus,
    pub to: StepStatus,
    /// Present exactly when the step just entered `Completed`.
    pub completion_key: Option<ItemKey>,
    /// True when this transition made every step complete.
    pub all_completed: bool,
}

//
// ─── CHECKLIST ─────────────────────────────────────────────────────────────────
//

/// Ordered, fixed set of installation steps and their statuses.
///
/// Transitions are requested from outside; unknown ids and transitions out of a
/// terminal state are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationChecklist {
    steps: Vec<StepItem>,
}

impl InstallationChecklist {
    /// Build a checklist; every step starts `Pending`.
    ///
    /// # Errors
    ///
    /// Returns `ChecklistError` if there are no steps or an id repeats.
    pub fn new(steps: Vec<StepItem>) -> Result<Self, ChecklistError> {
        if steps.is_empty() {
            return Err(ChecklistError::NoSteps);
        }
        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.id.as_str()) {
                return Err(ChecklistError::DuplicateStep(step.id.to_string()));
            }
        }
        let mut checklist = Self { steps };
        checklist.reset();
        Ok(checklist)
    }

    /// Build from content whose ids are known to be unique.
    pub(crate) fn from_known(steps: Vec<StepItem>) -> Self {
        Self { steps }
    }

    /// Move a step to `InProgress`.
    pub fn mark_in_progress(&mut self, step_id: &str) -> Option<StepTransition> {
        self.transition(step_id, StepStatus::InProgress)
    }

    /// Move a step straight to `Completed`; `InProgress` is not required first.
    pub fn complete(&mut self, step_id: &str) -> Option<StepTransition> {
        self.transition(step_id, StepStatus::Completed)
    }

    pub fn skip(&mut self, step_id: &str) -> Option<StepTransition> {
        self.transition(step_id, StepStatus::Skipped)
    }

    /// Return every step to `Pending`.
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.status = StepStatus::Pending;
        }
    }

    #[must_use]
    pub fn steps(&self) -> &[StepItem] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, step_id: &str) -> Option<&StepItem> {
        self.steps.iter().find(|step| step.id.as_str() == step_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    #[must_use]
    pub fn is_all_completed(&self) -> bool {
        self.completed_count() == self.steps.len()
    }

    /// Rounded share of completed steps.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let completed = u32::try_from(self.completed_count()).unwrap_or(u32::MAX);
        let total = u32::try_from(self.steps.len()).unwrap_or(u32::MAX);
        percentage(completed, total)
    }

    fn transition(&mut self, step_id: &str, to: StepStatus) -> Option<StepTransition> {
        let was_all_completed = self.is_all_completed();
        let step = self
            .steps
            .iter_mut()
            .find(|step| step.id.as_str() == step_id)?;

        let from = step.status;
        if from == to || from.is_terminal() {
            return None;
        }
        step.status = to;

        let completion_key =
            (to == StepStatus::Completed).then(|| ItemKey::installation_step(&step.id));
        let step_id = step.id.clone();
        let all_completed = !was_all_completed && self.is_all_completed();

        Some(StepTransition {
            step_id,
            from,
            to,
            completion_key,
            all_completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist(ids: &[&str]) -> InstallationChecklist {
        let steps = ids
            .iter()
            .map(|id| StepItem::new(StepId::new(*id).unwrap(), *id, ""))
            .collect();
        InstallationChecklist::new(steps).unwrap()
    }

    #[test]
    fn rejects_empty_and_duplicate_steps() {
        assert_eq!(
            InstallationChecklist::new(Vec::new()),
            Err(ChecklistError::NoSteps)
        );
        let steps = vec![
            StepItem::new(StepId::new("a").unwrap(), "A", ""),
            StepItem::new(StepId::new("a").unwrap(), "A again", ""),
        ];
        assert_eq!(
            InstallationChecklist::new(steps),
            Err(ChecklistError::DuplicateStep("a".into()))
        );
    }

    #[test]
    fn pending_to_in_progress_to_completed() {
        let mut list = checklist(&["django", "drf"]);

        let started = list.mark_in_progress("django").unwrap();
        assert_eq!(started.from, StepStatus::Pending);
        assert_eq!(started.to, StepStatus::InProgress);
        assert_eq!(started.completion_key, None);

        let done = list.complete("django").unwrap();
        assert_eq!(done.from, StepStatus::InProgress);
        assert_eq!(
            done.completion_key.as_ref().map(ItemKey::as_str),
            Some("installation_django")
        );
        assert!(!done.all_completed);
    }

    #[test]
    fn pending_can_complete_directly() {
        let mut list = checklist(&["django"]);
        let done = list.complete("django").unwrap();
        assert_eq!(done.from, StepStatus::Pending);
        assert_eq!(done.to, StepStatus::Completed);
    }

    #[test]
    fn repeated_completion_is_ignored() {
        let mut list = checklist(&["django", "drf"]);
        assert!(list.complete("django").is_some());
        assert!(list.complete("django").is_none());
        assert_eq!(list.completed_count(), 1);
    }

    #[test]
    fn terminal_states_do_not_move() {
        let mut list = checklist(&["django", "drf"]);
        list.complete("django");
        assert!(list.mark_in_progress("django").is_none());
        assert!(list.skip("django").is_none());

        list.skip("drf");
        assert!(list.complete("drf").is_none());
        assert_eq!(list.step("drf").unwrap().status(), StepStatus::Skipped);
    }

    #[test]
    fn unknown_step_is_a_noop() {
        let mut list = checklist(&["django"]);
        assert!(list.complete("docker").is_none());
        assert_eq!(list.completed_count(), 0);
    }

    #[test]
    fn all_completed_fires_on_crossing_only() {
        let mut list = checklist(&["a", "b"]);
        assert!(!list.complete("a").unwrap().all_completed);
        assert!(list.complete("b").unwrap().all_completed);
        assert!(list.is_all_completed());
        assert_eq!(list.percentage(), 100);

        list.reset();
        assert_eq!(list.completed_count(), 0);
        list.complete("a");
        assert!(list.complete("b").unwrap().all_completed);
    }

    #[test]
    fn skipped_step_blocks_all_completed() {
        let mut list = checklist(&["a", "b"]);
        list.skip("a");
        assert!(!list.complete("b").unwrap().all_completed);
        assert!(!list.is_all_completed());
        assert_eq!(list.percentage(), 50);
    }
}
