use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tutor_core::model::CompletionLedger;

/// Fixed key under which the completion ledger is stored.
pub const LEDGER_STORAGE_KEY: &str = "drf-completed-items";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable home of the completion ledger.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Load the persisted ledger.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored payload is malformed,
    /// or other storage errors. A missing entry is `Ok(None)`.
    async fn load_ledger(&self) -> Result<Option<CompletionLedger>, StorageError>;

    /// Replace the persisted ledger.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be written.
    async fn save_ledger(&self, ledger: &CompletionLedger) -> Result<(), StorageError>;

    /// Remove the persisted ledger entirely.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be removed.
    async fn clear_ledger(&self) -> Result<(), StorageError>;
}

pub(crate) fn parse_payload(payload: &str) -> Result<CompletionLedger, StorageError> {
    CompletionLedger::from_json(payload).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Keeps the raw JSON text, like the on-disk adapter, so corrupted payloads
/// can be simulated.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    payload: Arc<Mutex<Option<String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored payload.
    #[must_use]
    pub fn with_raw_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Arc::new(Mutex::new(Some(payload.into()))),
        }
    }

    /// Raw stored payload, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw_payload(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl LedgerRepository for InMemoryRepository {
    async fn load_ledger(&self) -> Result<Option<CompletionLedger>, StorageError> {
        let guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.as_deref().map(parse_payload).transpose()
    }

    async fn save_ledger(&self, ledger: &CompletionLedger) -> Result<(), StorageError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(ledger.to_json());
        Ok(())
    }

    async fn clear_ledger(&self) -> Result<(), StorageError> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub ledger: Arc<dyn LedgerRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let ledger: Arc<dyn LedgerRepository> = Arc::new(InMemoryRepository::new());
        Self { ledger }
    }
}
