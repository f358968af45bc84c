use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::{debug, info};
use tutor_core::model::{InstallationChecklist, StepId, StepItem, StepTransition};
use tutor_core::signals::InstallationSignal;

use crate::progress_service::ProgressService;

/// Callback fired when the checklist becomes fully completed.
pub type AllCompletedCallback = Arc<dyn Fn() + Send + Sync>;

/// Imperative interface a page uses to drive the checklist from outside.
///
/// Unknown step ids are ignored.
#[async_trait]
pub trait InstallationHandle: Send + Sync {
    async fn mark_step_in_progress(&self, step_id: &str);
    async fn complete_step(&self, step_id: &str);
}

/// Installation checklist bound to the progress store.
///
/// Every step entering `completed` records `installation_<id>` in the store.
pub struct InstallationTracker {
    checklist: Mutex<InstallationChecklist>,
    progress: Arc<ProgressService>,
    on_all_completed: Option<AllCompletedCallback>,
}

impl InstallationTracker {
    #[must_use]
    pub fn new(checklist: InstallationChecklist, progress: Arc<ProgressService>) -> Self {
        Self {
            checklist: Mutex::new(checklist),
            progress,
            on_all_completed: None,
        }
    }

    #[must_use]
    pub fn with_on_all_completed(mut self, callback: AllCompletedCallback) -> Self {
        self.on_all_completed = Some(callback);
        self
    }

    /// Move a step to `skipped`.
    pub async fn skip_step(&self, step_id: &str) {
        let transition = self.lock_checklist().skip(step_id);
        self.apply(transition).await;
    }

    /// Route a widget event to the step it completes.
    ///
    /// Returns the step id the signal mapped to, if any.
    pub async fn handle_signal(&self, signal: &InstallationSignal) -> Option<StepId> {
        let step = signal.step()?;
        self.complete_step(step.as_str()).await;
        Some(step)
    }

    /// A line entered in the simulated terminal.
    pub async fn handle_command(&self, command: &str) -> Option<StepId> {
        self.handle_signal(&InstallationSignal::Command(command.to_string()))
            .await
    }

    /// The simulated editor saved the settings file.
    pub async fn settings_edited(&self) {
        self.handle_signal(&InstallationSignal::SettingsEdited).await;
    }

    /// The simulated GitHub connector created a repository.
    pub async fn repository_created(&self) {
        self.handle_signal(&InstallationSignal::RepositoryCreated)
            .await;
    }

    /// Return every step to `pending`. Recorded progress is not touched.
    pub fn reset(&self) {
        self.lock_checklist().reset();
    }

    #[must_use]
    pub fn steps(&self) -> Vec<StepItem> {
        self.lock_checklist().steps().to_vec()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lock_checklist().completed_count()
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.lock_checklist().len()
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.lock_checklist().percentage()
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.lock_checklist().is_all_completed()
    }

    fn lock_checklist(&self) -> MutexGuard<'_, InstallationChecklist> {
        self.checklist.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn apply(&self, transition: Option<StepTransition>) {
        let Some(transition) = transition else {
            return;
        };
        debug!(
            step = %transition.step_id,
            from = transition.from.as_str(),
            to = transition.to.as_str(),
            "installation step changed"
        );

        if let Some(key) = &transition.completion_key {
            self.progress.mark_completed(key).await;
        }

        if transition.all_completed {
            info!("installation checklist completed");
            if let Some(callback) = &self.on_all_completed {
                callback();
            }
        }
    }
}

#[async_trait]
impl InstallationHandle for InstallationTracker {
    async fn mark_step_in_progress(&self, step_id: &str) {
        let transition = self.lock_checklist().mark_in_progress(step_id);
        self.apply(transition).await;
    }

    async fn complete_step(&self, step_id: &str) {
        let transition = self.lock_checklist().complete(step_id);
        self.apply(transition).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storage::repository::InMemoryRepository;
    use tutor_core::curriculum::{INSTALLATION_STEP_IDS, installation_checklist};
    use tutor_core::model::{ItemKey, StepStatus};

    async fn tracker() -> (InstallationTracker, Arc<ProgressService>, Arc<AtomicUsize>) {
        let progress =
            Arc::new(ProgressService::initialize(Arc::new(InMemoryRepository::new()), 30).await);
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let tracker = InstallationTracker::new(installation_checklist(), Arc::clone(&progress))
            .with_on_all_completed(Arc::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        (tracker, progress, fired)
    }

    fn status(tracker: &InstallationTracker, id: &str) -> StepStatus {
        tracker
            .steps()
            .into_iter()
            .find(|step| step.id().as_str() == id)
            .map(|step| step.status())
            .unwrap()
    }

    #[tokio::test]
    async fn completing_all_steps_fires_once_and_records_keys() {
        let (tracker, progress, fired) = tracker().await;
        for id in INSTALLATION_STEP_IDS {
            tracker.complete_step(id).await;
        }
        assert!(tracker.all_completed());
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        let keys: Vec<String> = progress
            .completed_keys()
            .into_iter()
            .map(ItemKey::into_string)
            .collect();
        assert_eq!(keys.len(), 8);
        assert!(keys.iter().all(|key| key.starts_with("installation_")));

        tracker.complete_step("github").await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn completing_twice_records_one_key() {
        let (tracker, progress, _) = tracker().await;
        tracker.complete_step("django").await;
        tracker.complete_step("django").await;
        assert_eq!(progress.snapshot().completed_count, 1);
        assert_eq!(tracker.completed_count(), 1);
    }

    #[tokio::test]
    async fn in_progress_does_not_touch_progress_store() {
        let (tracker, progress, _) = tracker().await;
        tracker.mark_step_in_progress("drf").await;
        assert_eq!(status(&tracker, "drf"), StepStatus::InProgress);
        assert_eq!(progress.snapshot().completed_count, 0);

        tracker.complete_step("drf").await;
        assert_eq!(status(&tracker, "drf"), StepStatus::Completed);
        assert!(progress.is_completed(&ItemKey::new("installation_drf").unwrap()));
    }

    #[tokio::test]
    async fn unknown_step_is_ignored() {
        let (tracker, progress, _) = tracker().await;
        tracker.complete_step("docker").await;
        tracker.mark_step_in_progress("docker").await;
        assert_eq!(tracker.completed_count(), 0);
        assert_eq!(progress.snapshot().completed_count, 0);
    }

    #[tokio::test]
    async fn skipped_step_is_not_recorded() {
        let (tracker, progress, _) = tracker().await;
        tracker.skip_step("github").await;
        assert_eq!(status(&tracker, "github"), StepStatus::Skipped);
        assert_eq!(progress.snapshot().completed_count, 0);
    }

    #[tokio::test]
    async fn signals_complete_matching_steps() {
        let (tracker, progress, _) = tracker().await;
        let step = tracker.handle_command("pip install djangorestframework").await;
        assert_eq!(step.map(|s| s.to_string()).as_deref(), Some("drf"));
        assert!(tracker.handle_command("echo hello").await.is_none());

        tracker.settings_edited().await;
        tracker.repository_created().await;
        assert_eq!(status(&tracker, "settings"), StepStatus::Completed);
        assert_eq!(status(&tracker, "github"), StepStatus::Completed);
        assert_eq!(progress.snapshot().completed_count, 3);
    }

    #[tokio::test]
    async fn reset_allows_crossing_again() {
        let (tracker, progress, fired) = tracker().await;
        for id in INSTALLATION_STEP_IDS {
            tracker.complete_step(id).await;
        }
        tracker.reset();
        assert_eq!(tracker.completed_count(), 0);
        assert_eq!(progress.snapshot().completed_count, 8);

        for id in INSTALLATION_STEP_IDS {
            tracker.complete_step(id).await;
        }
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(progress.snapshot().completed_count, 8);
    }

    #[tokio::test]
    async fn reports_checklist_percentage() {
        let (tracker, _, _) = tracker().await;
        tracker.complete_step("virtualenv").await;
        assert_eq!(tracker.total_steps(), 8);
        assert_eq!(tracker.percentage(), 13);
    }
}
