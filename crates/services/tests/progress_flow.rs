use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use services::{AppServices, InstallationHandle, ProgressService};
use storage::repository::{InMemoryRepository, Storage};
use tutor_core::curriculum::INSTALLATION_STEP_IDS;
use tutor_core::model::ItemKey;

#[tokio::test]
async fn full_installation_walkthrough_records_every_step() {
    let services = AppServices::in_memory(30).await.unwrap();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let tracker = services.installation_tracker(Some(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })));

    for id in INSTALLATION_STEP_IDS {
        tracker.mark_step_in_progress(id).await;
        tracker.complete_step(id).await;
    }

    let progress = services.progress();
    let snapshot = progress.snapshot();
    assert_eq!(snapshot.completed_count, 8);
    assert_eq!(snapshot.progress_percentage, 27);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    for id in INSTALLATION_STEP_IDS {
        let key = ItemKey::new(format!("installation_{id}")).unwrap();
        assert!(progress.is_completed(&key), "missing {key}");
    }
}

#[tokio::test]
async fn terminal_commands_drive_the_checklist() {
    let services = AppServices::in_memory(30).await.unwrap();
    let tracker = services.installation_tracker(None);

    for command in [
        "python -m venv venv",
        "pip install django",
        "pip install djangorestframework",
        "django-admin startproject tutorial .",
        "python manage.py startapp quickstart",
        "python manage.py migrate",
        "git init",
    ] {
        assert!(tracker.handle_command(command).await.is_some(), "{command}");
    }
    assert!(!tracker.all_completed());

    tracker.settings_edited().await;
    assert!(tracker.all_completed());
    assert_eq!(services.progress().snapshot().completed_count, 8);
}

#[tokio::test]
async fn models_quiz_completes_at_fourth_answer() {
    let services = AppServices::in_memory(30).await.unwrap();
    let quiz = services.models_quiz();

    for _ in 0..3 {
        quiz.select_option("a");
        let outcome = quiz.submit().await.unwrap();
        assert!(!outcome.quiz_completed);
        quiz.next_question();
    }
    quiz.select_option("c");
    let outcome = quiz.submit().await.unwrap();
    assert_eq!(outcome.index, 3);
    assert!(outcome.quiz_completed);

    let progress = services.progress();
    assert!(progress.is_completed(&ItemKey::new("models_quiz_3").unwrap()));
    assert!(progress.is_completed(&ItemKey::new("models_quiz_completed").unwrap()));
}

#[tokio::test]
async fn progress_survives_restart() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        ledger: Arc::new(repo.clone()),
    };
    let services = AppServices::from_storage(storage, 30).await.unwrap();
    let tracker = services.installation_tracker(None);
    for id in ["virtualenv", "django", "drf"] {
        tracker.complete_step(id).await;
    }

    let reloaded = ProgressService::initialize(Arc::new(repo), 30).await;
    let snapshot = reloaded.snapshot();
    assert_eq!(snapshot.completed_count, 3);
    assert_eq!(snapshot.total_items, 30);
    assert_eq!(snapshot.progress_percentage, 10);
}

#[tokio::test]
async fn reset_wipes_progress_for_every_consumer() {
    let services = AppServices::in_memory(30).await.unwrap();
    let tracker = services.installation_tracker(None);
    let mut updates = services.progress().subscribe();

    tracker.complete_step("django").await;
    assert_eq!(updates.borrow_and_update().completed_count, 1);

    services.progress().reset_progress().await;
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().completed_count, 0);
}
