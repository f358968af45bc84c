use std::sync::Arc;

use storage::repository::Storage;
use tracing::{info, warn};
use tutor_core::curriculum;
use tutor_core::model::{QuizSession, parse_bank};

use crate::error::AppServicesError;
use crate::installation::{AllCompletedCallback, InstallationTracker};
use crate::progress_service::ProgressService;
use crate::quiz_flow::QuizFlow;

/// Assembles app-facing services around one shared progress store.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or
    /// `total_items` is zero.
    pub async fn new_sqlite(db_url: &str, total_items: u32) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, total_items).await
    }

    /// Build services that keep progress in memory only.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::NoItems` if `total_items` is zero.
    pub async fn in_memory(total_items: u32) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), total_items).await
    }

    /// Build services over an already opened storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::NoItems` if `total_items` is zero.
    pub async fn from_storage(storage: Storage, total_items: u32) -> Result<Self, AppServicesError> {
        if total_items == 0 {
            return Err(AppServicesError::NoItems);
        }
        let progress = Arc::new(ProgressService::initialize(storage.ledger, total_items).await);
        info!(total_items, "app services ready");
        Ok(Self { progress })
    }

    /// Flush and close the progress store.
    ///
    /// If other handles to the store are still alive it is only flushed.
    pub async fn shutdown(self) {
        match Arc::try_unwrap(self.progress) {
            Ok(progress) => progress.teardown().await,
            Err(shared) => {
                warn!("progress store still in use at shutdown");
                shared.flush().await;
            }
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Fresh installation checklist bound to the shared progress store.
    #[must_use]
    pub fn installation_tracker(
        &self,
        on_all_completed: Option<AllCompletedCallback>,
    ) -> InstallationTracker {
        let tracker = InstallationTracker::new(curriculum::installation_checklist(), self.progress());
        match on_all_completed {
            Some(callback) => tracker.with_on_all_completed(callback),
            None => tracker,
        }
    }

    /// Fresh models quiz bound to the shared progress store.
    #[must_use]
    pub fn models_quiz(&self) -> QuizFlow {
        QuizFlow::new(curriculum::models_quiz(), self.progress())
    }

    /// Quiz built from a JSON question bank, recording keys under `key_prefix`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Quiz` if the bank is malformed or invalid.
    pub fn quiz_from_bank(&self, key_prefix: &str, bank_json: &str) -> Result<QuizFlow, AppServicesError> {
        let questions = parse_bank(bank_json)?;
        let session = QuizSession::new(key_prefix, questions)?;
        Ok(QuizFlow::new(session, self.progress()))
    }
}
