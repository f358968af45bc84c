use dioxus::prelude::*;

use crate::context::use_progress_snapshot;
use crate::vm::map_progress;

#[component]
pub fn ProgressTracker() -> Element {
    let snapshot = use_progress_snapshot();
    let vm = map_progress(&snapshot.read());

    rsx! {
        div { class: "progress-tracker",
            div { class: "progress-tracker__header",
                h3 { "Your Progress" }
                span { class: "progress-tracker__trophy", "🏆 {vm.trophy_label}" }
            }
            if let Some(current) = vm.current_section_label.as_ref() {
                p { class: "progress-tracker__current", "{current}" }
            }
            div { class: "progress-bar",
                div { class: "progress-bar__fill", style: "{vm.bar_style}" }
            }
            div { class: "progress-tracker__footer",
                span { "{vm.percentage_label}" }
                span { class: "progress-tracker__status", "{vm.status_label}" }
            }
        }
    }
}
