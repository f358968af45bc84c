use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use tutor_core::curriculum;
use tutor_core::model::{Section, SectionGroup};

use crate::views::{HomeView, InstallationView, ModelsView, ProgressTracker, SectionView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/installation", InstallationView)] Installation {},
        #[route("/models", ModelsView)] Models {},
        #[route("/learn/:slug", SectionView)] Learn { slug: String },
}

impl Route {
    /// Page that renders `section`.
    #[must_use]
    pub fn for_section(section: &Section) -> Self {
        match section.slug() {
            "installation" => Route::Installation {},
            "models" => Route::Models {},
            slug => Route::Learn {
                slug: slug.to_string(),
            },
        }
    }
}

const GROUPS: [SectionGroup; 4] = [
    SectionGroup::GettingStarted,
    SectionGroup::CoreConcepts,
    SectionGroup::AdvancedTopics,
    SectionGroup::Practice,
];

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { Link { to: Route::Home {}, "DRF Tutor" } }
            ProgressTracker {}
            for group in GROUPS {
                div { class: "sidebar-group",
                    h3 { "{group.label()}" }
                    ul {
                        for section in curriculum::sections().iter().filter(|s| s.group() == group) {
                            li { key: "{section.slug()}",
                                Link { to: Route::for_section(section), "{section.title()}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
