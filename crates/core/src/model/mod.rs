mod checklist;
mod ids;
mod ledger;
mod quiz;
mod quiz_session;
mod section;
mod snapshot;

pub use ids::{ItemKey, ItemKeyError, StepId};

pub use checklist::{ChecklistError, InstallationChecklist, StepItem, StepStatus, StepTransition};
pub use ledger::{CompletionLedger, LedgerError};
pub use quiz::{QuizError, QuizOption, QuizQuestion, parse_bank, validate_bank};
pub use quiz_session::{
    CompletionRule, QuestionState, QuizSession, QuizSnapshot, SubmitOutcome,
};
pub use section::{Section, SectionGroup};
pub use snapshot::{DEFAULT_TOTAL_ITEMS, ProgressSnapshot, percentage};
