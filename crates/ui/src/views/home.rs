use dioxus::prelude::*;
use dioxus_router::Link;
use tutor_core::curriculum;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ProgressTracker;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut resetting = use_signal(|| false);

    let on_reset = move |_| {
        if resetting() {
            return;
        }
        resetting.set(true);
        let progress = ctx.progress();
        spawn(async move {
            progress.reset_progress().await;
            resetting.set(false);
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Django REST Framework" }
            p { "Work through the learning path from setup to interview prep. Progress is kept on this device." }
            ProgressTracker {}
            button {
                class: "btn btn--secondary",
                id: "reset-progress",
                disabled: resetting(),
                onclick: on_reset,
                "Reset progress"
            }
            h3 { "Learning path" }
            ol { class: "section-list",
                for section in curriculum::sections() {
                    li { key: "{section.slug()}",
                        Link { to: Route::for_section(section), "{section.title()}" }
                        span { class: "section-list__group", " · {section.group().label()}" }
                    }
                }
            }
        }
    }
}
