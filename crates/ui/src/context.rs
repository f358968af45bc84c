use std::sync::Arc;

use dioxus::prelude::*;
use services::{InstallationTracker, ProgressService, QuizFlow};
use tokio::sync::watch;
use tutor_core::curriculum;
use tutor_core::model::ProgressSnapshot;

pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressService>;

    /// Fresh checklist for one visit of the installation page.
    fn installation_tracker(&self) -> InstallationTracker;

    /// Fresh quiz session for one visit of the models page.
    fn models_quiz(&self) -> QuizFlow;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let progress = app.progress();
        Self { app, progress }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn installation_tracker(&self) -> InstallationTracker {
        self.app.installation_tracker()
    }

    #[must_use]
    pub fn models_quiz(&self) -> QuizFlow {
        self.app.models_quiz()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Live progress snapshot, re-rendering the caller after every store mutation.
pub fn use_progress_snapshot() -> Signal<ProgressSnapshot> {
    let ctx = use_context::<AppContext>();
    let snapshot = use_signal(|| ctx.progress().snapshot());
    use_future(move || forward_updates(ctx.progress().subscribe(), snapshot));
    snapshot
}

async fn forward_updates(
    mut updates: watch::Receiver<ProgressSnapshot>,
    mut target: Signal<ProgressSnapshot>,
) {
    while updates.changed().await.is_ok() {
        let next = updates.borrow_and_update().clone();
        target.set(next);
    }
}

/// Record a visit of the page `slug` after mount and whenever the slug changes.
pub fn use_section_visit(slug: &str) {
    let progress = use_context::<AppContext>().progress();
    let slug = slug.to_string();
    use_effect(use_reactive((&slug,), move |(slug,)| {
        let Some(section) = curriculum::section(&slug) else {
            return;
        };
        let progress = Arc::clone(&progress);
        spawn(async move {
            progress.visit_section(section).await;
        });
    }));
}
