use std::sync::Arc;

use dioxus::prelude::*;
use services::QuizFlow;

use crate::context::{AppContext, use_section_visit};
use crate::vm::{QuizVm, map_quiz};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuizIntent {
    Submit,
    Retry,
    Previous,
    Next,
}

#[component]
pub fn ModelsView() -> Element {
    use_section_visit("models");

    rsx! {
        div { class: "page",
            h2 { "Models" }
            p { "Models describe your database tables. Serializers and views in the next sections are built on top of them." }
            pre { class: "code",
                "class Book(models.Model):\n    title = models.CharField(max_length=200)\n    author = models.ForeignKey(Author, on_delete=models.CASCADE)\n\n    def __str__(self):\n        return self.title"
            }
            h3 { "Check your understanding" }
            ModelsQuiz {}
        }
    }
}

#[component]
fn ModelsQuiz() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz: Arc<QuizFlow> = use_hook(|| Arc::new(ctx.models_quiz()));
    let vm = use_signal(|| map_quiz(&quiz.snapshot()));

    let on_select = {
        let quiz = Arc::clone(&quiz);
        use_callback(move |option_id: String| {
            let mut vm = vm;
            if quiz.select_option(&option_id) {
                vm.set(map_quiz(&quiz.snapshot()));
            }
        })
    };

    let dispatch = {
        let quiz = Arc::clone(&quiz);
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            match intent {
                QuizIntent::Submit => {
                    let quiz = Arc::clone(&quiz);
                    spawn(async move {
                        if quiz.submit().await.is_some() {
                            vm.set(map_quiz(&quiz.snapshot()));
                        }
                    });
                    return;
                }
                QuizIntent::Retry => quiz.reset_question(),
                QuizIntent::Previous => quiz.previous_question(),
                QuizIntent::Next => quiz.next_question(),
            };
            vm.set(map_quiz(&quiz.snapshot()));
        })
    };

    let vm: QuizVm = vm.read().clone();

    rsx! {
        div { class: "card quiz",
            div { class: "quiz__header",
                span { class: "quiz__position", "{vm.position_label}" }
                span { class: "quiz__answered", "{vm.answered_label}" }
            }
            h4 { class: "quiz__question", "{vm.question}" }
            ul { class: "quiz__options",
                for (option_id, option) in vm.options.iter().map(|option| (option.id.clone(), option)) {
                    li { key: "{option.id}",
                        label { class: "quiz__option {option.verdict_class}",
                            input {
                                r#type: "radio",
                                name: "quiz-option",
                                checked: option.selected,
                                disabled: option.disabled,
                                onchange: move |_| on_select.call(option_id.clone()),
                            }
                            span { class: "quiz__option-label", "{option.label}." }
                            " {option.text}"
                        }
                    }
                }
            }

            if let Some(feedback) = vm.feedback.as_ref() {
                div { class: "quiz__feedback quiz__feedback--{feedback.verdict_class}",
                    strong { "{feedback.title}" }
                    div { dangerous_inner_html: "{feedback.explanation_html}" }
                }
            }

            div { class: "quiz__actions",
                button {
                    class: "btn btn--ghost",
                    disabled: !vm.has_previous,
                    onclick: move |_| dispatch.call(QuizIntent::Previous),
                    "Previous"
                }
                if vm.feedback.is_some() {
                    button {
                        class: "btn btn--secondary",
                        onclick: move |_| dispatch.call(QuizIntent::Retry),
                        "Try Another Question"
                    }
                } else {
                    button {
                        class: "btn",
                        id: "quiz-submit",
                        disabled: !vm.can_submit,
                        onclick: move |_| dispatch.call(QuizIntent::Submit),
                        "Check Answer"
                    }
                }
                button {
                    class: "btn btn--ghost",
                    disabled: !vm.has_next,
                    onclick: move |_| dispatch.call(QuizIntent::Next),
                    "Next"
                }
            }
        }
    }
}
