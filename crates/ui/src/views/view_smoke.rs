use tutor_core::model::ItemKey;

use super::test_harness::{ViewKind, setup_view_harness};

fn key(raw: &str) -> ItemKey {
    ItemKey::new(raw).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    let html = harness.render();
    for expected in ["Your Progress", "0/30", "0% complete", "In progress", "Reset progress"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("Serializers"), "missing section list in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_stored_progress() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    let progress = harness.services.progress();
    for raw in ["installation_virtualenv", "installation_django", "installation_drf"] {
        progress.mark_completed(&key(raw)).await;
    }

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3/30"), "missing trophy count in {html}");
    assert!(html.contains("10% complete"), "missing percentage in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_follows_store_updates() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.rebuild();
    harness.drive_async().await;

    harness.services.progress().mark_completed(&key("views")).await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("1/30"), "missing updated count in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn installation_view_smoke_renders_checklist_and_records_visit() {
    let mut harness = setup_view_harness(ViewKind::Installation).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    for expected in [
        "0 of 8 completed",
        "Set up Virtual Environment",
        "Connect with GitHub",
        "I edited settings.py",
        "Repository created",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(!html.contains("installation-complete"));

    let progress = harness.services.progress();
    assert!(progress.is_completed(&key("installation")));
}

#[tokio::test(flavor = "current_thread")]
async fn models_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Models).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    for expected in [
        "Question 1 of 5",
        "What is the purpose of a Django model?",
        "Check Answer",
        "0 of 5 answered",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(harness.services.progress().is_completed(&key("models")));
}

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_sets_current_section_without_marking() {
    let mut harness = setup_view_harness(ViewKind::Learn("authentication")).await;
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Authentication"), "missing title in {html}");

    let snapshot = harness.services.progress().snapshot();
    assert_eq!(snapshot.current_section.as_deref(), Some("Authentication"));
    assert_eq!(snapshot.completed_count, 0);
}

#[tokio::test(flavor = "current_thread")]
async fn learn_view_smoke_handles_unknown_slug() {
    let mut harness = setup_view_harness(ViewKind::Learn("graphql")).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Page not found"), "missing fallback in {html}");
}
