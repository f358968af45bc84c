use tutor_core::model::{StepItem, StepStatus, percentage};

const PROMPT: &str = "(drf_env) user@machine:~/drf_tutorial$";

const HELP: &str = "Available commands:\n\
- python -m venv drf_env\n\
- pip install django\n\
- pip install djangorestframework\n\
- django-admin startproject drf_tutorial\n\
- python manage.py startapp api\n\
- python manage.py migrate\n\
- git init\n\
- git remote add origin https://github.com/username/drf_tutorial.git\n\
- clear (clears terminal)\n\
- help (shows this help message)";

/// User request against one checklist row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepAction {
    Start(String),
    Complete(String),
    Skip(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRowVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status_class: &'static str,
    pub status_label: &'static str,
    pub can_start: bool,
    pub can_finish: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistVm {
    pub steps: Vec<StepRowVm>,
    pub summary_label: String,
    pub percentage_label: String,
    pub bar_style: String,
    pub all_completed: bool,
}

#[must_use]
pub fn map_checklist(steps: &[StepItem]) -> ChecklistVm {
    let total = steps.len();
    let completed = steps
        .iter()
        .filter(|step| step.status() == StepStatus::Completed)
        .count();
    let pct = percentage(
        u32::try_from(completed).unwrap_or(u32::MAX),
        u32::try_from(total).unwrap_or(u32::MAX),
    );

    ChecklistVm {
        steps: steps.iter().map(map_step).collect(),
        summary_label: format!("{completed} of {total} completed"),
        percentage_label: format!("{pct}%"),
        bar_style: format!("width: {pct}%"),
        all_completed: total > 0 && completed == total,
    }
}

fn map_step(step: &StepItem) -> StepRowVm {
    let status = step.status();
    let status_label = match status {
        StepStatus::Pending => "Pending",
        StepStatus::InProgress => "In progress",
        StepStatus::Completed => "Completed",
        StepStatus::Skipped => "Skipped",
    };
    StepRowVm {
        id: step.id().as_str().to_string(),
        title: step.title().to_string(),
        description: step.description().to_string(),
        status_class: status.as_str(),
        status_label,
        can_start: status == StepStatus::Pending,
        can_finish: !status.is_terminal(),
    }
}

/// One command echoed in the simulated terminal with its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerminalLine {
    pub prompt: &'static str,
    pub command: String,
    pub output: String,
}

/// Output shown for `command`. `completed_step` is the title of the checklist
/// step the command finished, if any.
#[must_use]
pub fn terminal_reply(command: &str, completed_step: Option<&str>) -> TerminalLine {
    let output = match (command.trim(), completed_step) {
        ("help", _) => HELP.to_string(),
        (_, Some(title)) => format!("Done. Step completed: {title}"),
        _ => "Command not recognized. Type 'help' for available commands.".to_string(),
    };
    TerminalLine {
        prompt: PROMPT,
        command: command.trim().to_string(),
        output,
    }
}
