use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storage::repository::LedgerRepository;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use tutor_core::model::{CompletionLedger, ItemKey, ProgressSnapshot, Section};

struct ProgressState {
    ledger: CompletionLedger,
    current_section: Option<String>,
}

/// Single source of truth for completed learning items.
///
/// Storage failures never reach callers: a ledger that cannot be loaded starts
/// empty, and failed writes are logged and dropped. Mutations go through this
/// service only; readers get snapshots.
pub struct ProgressService {
    repo: Arc<dyn LedgerRepository>,
    total_items: u32,
    state: Mutex<ProgressState>,
    write_lock: tokio::sync::Mutex<()>,
    updates: watch::Sender<ProgressSnapshot>,
}

impl ProgressService {
    /// Load the persisted ledger and fix the size of the item universe.
    pub async fn initialize(repo: Arc<dyn LedgerRepository>, total_items: u32) -> Self {
        let ledger = match repo.load_ledger().await {
            Ok(Some(ledger)) => ledger,
            Ok(None) => CompletionLedger::new(),
            Err(err) => {
                warn!(error = %err, "could not load progress ledger, starting empty");
                CompletionLedger::new()
            }
        };
        debug!(
            completed = ledger.completed_count(),
            total_items, "progress ledger loaded"
        );

        let (updates, _) = watch::channel(ProgressSnapshot::compute(&ledger, total_items, None));
        Self {
            repo,
            total_items,
            state: Mutex::new(ProgressState {
                ledger,
                current_section: None,
            }),
            write_lock: tokio::sync::Mutex::new(()),
            updates,
        }
    }

    /// Write the ledger one last time and drop the service.
    pub async fn teardown(self) {
        self.flush().await;
        debug!("progress store closed");
    }

    /// Write the current ledger to storage.
    pub async fn flush(&self) {
        self.persist().await;
    }

    /// Record `key` as done. Returns `true` if it was not done before.
    ///
    /// Already-done keys are left untouched and nothing is written.
    pub async fn mark_completed(&self, key: &ItemKey) -> bool {
        {
            let mut state = self.lock_state();
            if !state.ledger.insert(key.clone()) {
                return false;
            }
        }
        debug!(key = %key, "item completed");
        self.persist().await;
        self.publish();
        true
    }

    /// Overwrite the current section label.
    pub fn set_current_section(&self, label: impl Into<String>) {
        let label = label.into();
        info!(section = %label, "current section changed");
        self.lock_state().current_section = Some(label);
        self.publish();
    }

    /// Record a page visit: the section becomes current, and its visit key is
    /// marked if the page counts visits.
    pub async fn visit_section(&self, section: &Section) {
        self.set_current_section(section.title());
        if let Some(key) = section.visit_key() {
            self.mark_completed(&key).await;
        }
    }

    /// Forget every completed item, in memory and in storage.
    ///
    /// The item universe and current section are kept.
    pub async fn reset_progress(&self) {
        let write_guard = self.write_lock.lock().await;
        self.lock_state().ledger.clear();
        info!("progress reset");
        if let Err(err) = self.repo.clear_ledger().await {
            warn!(error = %err, "could not clear stored progress ledger");
        }
        drop(write_guard);
        self.publish();
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let state = self.lock_state();
        ProgressSnapshot::compute(
            &state.ledger,
            self.total_items,
            state.current_section.as_deref(),
        )
    }

    #[must_use]
    pub fn is_completed(&self, key: &ItemKey) -> bool {
        self.lock_state().ledger.contains(key)
    }

    #[must_use]
    pub fn completed_keys(&self) -> Vec<ItemKey> {
        self.lock_state().ledger.completed_keys().cloned().collect()
    }

    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Receiver that observes a fresh snapshot after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.updates.subscribe()
    }

    fn lock_state(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }

    async fn persist(&self) {
        let _write = self.write_lock.lock().await;
        let ledger = self.lock_state().ledger.clone();
        if let Err(err) = self.repo.save_ledger(&ledger).await {
            warn!(error = %err, "could not persist progress ledger");
        }
    }
}
