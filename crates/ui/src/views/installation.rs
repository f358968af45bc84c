use std::sync::Arc;

use dioxus::prelude::*;
use services::{InstallationHandle, InstallationTracker};

use crate::context::{AppContext, use_section_visit};
use crate::vm::{ChecklistVm, StepAction, StepRowVm, TerminalLine, map_checklist, terminal_reply};

#[component]
pub fn InstallationView() -> Element {
    use_section_visit("installation");
    let ctx = use_context::<AppContext>();
    let tracker: Arc<InstallationTracker> = use_hook(|| Arc::new(ctx.installation_tracker()));

    let checklist = use_signal(|| map_checklist(&tracker.steps()));
    let mut command = use_signal(String::new);
    let terminal = use_signal(Vec::<TerminalLine>::new);

    let on_step_action = {
        let tracker = Arc::clone(&tracker);
        use_callback(move |action: StepAction| {
            let tracker = Arc::clone(&tracker);
            let mut checklist = checklist;
            spawn(async move {
                match &action {
                    StepAction::Start(id) => tracker.mark_step_in_progress(id).await,
                    StepAction::Complete(id) => tracker.complete_step(id).await,
                    StepAction::Skip(id) => tracker.skip_step(id).await,
                }
                checklist.set(map_checklist(&tracker.steps()));
            });
        })
    };

    let run_command = {
        let tracker = Arc::clone(&tracker);
        use_callback(move |line: String| {
            let tracker = Arc::clone(&tracker);
            let mut checklist = checklist;
            let mut terminal = terminal;
            if line.trim() == "clear" {
                terminal.write().clear();
                return;
            }
            spawn(async move {
                let step = tracker.handle_command(&line).await;
                let steps = tracker.steps();
                let title = step.as_ref().and_then(|id| {
                    steps
                        .iter()
                        .find(|item| item.id() == id)
                        .map(|item| item.title().to_string())
                });
                terminal.write().push(terminal_reply(&line, title.as_deref()));
                checklist.set(map_checklist(&steps));
            });
        })
    };

    let on_settings_edited = {
        let tracker = Arc::clone(&tracker);
        move |_| {
            let tracker = Arc::clone(&tracker);
            let mut checklist = checklist;
            spawn(async move {
                tracker.settings_edited().await;
                checklist.set(map_checklist(&tracker.steps()));
            });
        }
    };

    let on_repository_created = {
        let tracker = Arc::clone(&tracker);
        move |_| {
            let tracker = Arc::clone(&tracker);
            let mut checklist = checklist;
            spawn(async move {
                tracker.repository_created().await;
                checklist.set(map_checklist(&tracker.steps()));
            });
        }
    };

    let on_restart = {
        let tracker = Arc::clone(&tracker);
        move |_| {
            let mut checklist = checklist;
            tracker.reset();
            checklist.set(map_checklist(&tracker.steps()));
        }
    };

    let vm: ChecklistVm = checklist.read().clone();
    let history: Vec<TerminalLine> = terminal.read().clone();

    rsx! {
        div { class: "page",
            h2 { "Installation & Setup" }
            p { "Set up a Django REST Framework project step by step. Type the commands into the terminal below or mark steps done yourself." }

            if vm.all_completed {
                div { class: "banner banner--success", id: "installation-complete",
                    "All setup steps complete. Your project is ready!"
                }
            }

            section { class: "card checklist",
                div { class: "checklist__header",
                    h3 { "Setup Checklist" }
                    span { class: "checklist__summary", "{vm.summary_label}" }
                }
                div { class: "progress-bar",
                    div { class: "progress-bar__fill", style: "{vm.bar_style}" }
                }
                p { class: "checklist__percentage", "{vm.percentage_label}" }
                ul {
                    for row in vm.steps.iter().cloned() {
                        StepRow { key: "{row.id}", row: row.clone(), on_action: on_step_action }
                    }
                }
                button { class: "btn btn--ghost", onclick: on_restart, "Start over" }
            }

            section { class: "card terminal",
                h3 { "Terminal" }
                div { class: "terminal__history",
                    for (idx, line) in history.iter().enumerate() {
                        div { key: "{idx}", class: "terminal__entry",
                            div { class: "terminal__command",
                                span { class: "terminal__prompt", "{line.prompt} " }
                                "{line.command}"
                            }
                            pre { class: "terminal__output", "{line.output}" }
                        }
                    }
                }
                form {
                    class: "terminal__input",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        let line = command();
                        if line.trim().is_empty() {
                            return;
                        }
                        command.set(String::new());
                        run_command.call(line);
                    },
                    input {
                        r#type: "text",
                        placeholder: "Type a command, or 'help'",
                        value: "{command}",
                        oninput: move |evt| command.set(evt.value()),
                    }
                    button { r#type: "submit", class: "btn", "Run" }
                }
            }

            section { class: "card editor",
                h3 { "settings.py" }
                pre { class: "editor__code",
                    "INSTALLED_APPS = [\n    ...\n    'rest_framework',\n]"
                }
                button { class: "btn", onclick: on_settings_edited, "I edited settings.py" }
            }

            section { class: "card github",
                h3 { "GitHub" }
                p { "Create a repository for the project and push your first commit." }
                button { class: "btn", onclick: on_repository_created, "Repository created" }
            }
        }
    }
}

#[component]
fn StepRow(row: StepRowVm, on_action: Callback<StepAction>) -> Element {
    let start_id = row.id.clone();
    let complete_id = row.id.clone();
    let skip_id = row.id.clone();

    rsx! {
        li { class: "step step--{row.status_class}",
            div { class: "step__body",
                h4 { "{row.title}" }
                p { "{row.description}" }
            }
            span { class: "step__status", "{row.status_label}" }
            div { class: "step__actions",
                if row.can_start {
                    button {
                        class: "btn btn--small",
                        onclick: move |_| on_action.call(StepAction::Start(start_id.clone())),
                        "Start"
                    }
                }
                if row.can_finish {
                    button {
                        class: "btn btn--small",
                        onclick: move |_| on_action.call(StepAction::Complete(complete_id.clone())),
                        "Done"
                    }
                    button {
                        class: "btn btn--small btn--ghost",
                        onclick: move |_| on_action.call(StepAction::Skip(skip_id.clone())),
                        "Skip"
                    }
                }
            }
        }
    }
}
