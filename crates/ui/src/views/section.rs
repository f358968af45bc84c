use dioxus::prelude::*;
use tutor_core::curriculum;

use crate::context::use_section_visit;

#[component]
pub fn SectionView(slug: String) -> Element {
    use_section_visit(&slug);

    let Some(section) = curriculum::section(&slug) else {
        return rsx! {
            div { class: "page",
                h2 { "Page not found" }
                p { "There is no lesson called \"{slug}\"." }
            }
        };
    };

    rsx! {
        div { class: "page",
            p { class: "page__eyebrow", "{section.group().label()}" }
            h2 { "{section.title()}" }
            p { "Read through the lesson and try the examples in your own project." }
        }
    }
}
