use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, InstallationTracker, ProgressService, QuizFlow};

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, InstallationView, ModelsView, SectionView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn installation_tracker(&self) -> InstallationTracker {
        self.services.installation_tracker(None)
    }

    fn models_quiz(&self) -> QuizFlow {
        self.services.models_quiz()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Installation,
    Models,
    Learn(&'static str),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Installation => rsx! { InstallationView {} },
        ViewKind::Models => rsx! { ModelsView {} },
        ViewKind::Learn(slug) => rsx! { SectionView { slug: slug.to_string() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive until mount effects and the tasks they spawn have run.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let services = AppServices::in_memory(30).await.expect("services");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
