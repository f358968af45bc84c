use thiserror::Error;

use crate::model::{ChecklistError, ItemKeyError, LedgerError, QuizError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ItemKey(#[from] ItemKeyError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Checklist(#[from] ChecklistError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
