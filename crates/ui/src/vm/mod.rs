mod checklist_vm;
mod markdown_vm;
mod progress_vm;
mod quiz_vm;

pub use checklist_vm::{ChecklistVm, StepAction, StepRowVm, TerminalLine, map_checklist, terminal_reply};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use progress_vm::{ProgressVm, map_progress};
pub use quiz_vm::{FeedbackVm, OptionVm, QuizVm, map_quiz};
