use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::ids::ItemKey;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("ledger payload is not a JSON object of booleans: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Durable set of completed item keys.
///
/// Stored as a JSON object `{"<key>": true, ...}`. Only keys whose value is
/// `true` count as done; entries are only ever inserted, never removed, except
/// by a full `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLedger {
    entries: BTreeMap<ItemKey, bool>,
}

impl CompletionLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted payload.
    ///
    /// Entries with an empty key are dropped.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Malformed` when the payload is not a JSON object
    /// mapping strings to booleans.
    pub fn from_json(payload: &str) -> Result<Self, LedgerError> {
        let raw: BTreeMap<String, bool> = serde_json::from_str(payload)?;
        let entries = raw
            .into_iter()
            .filter_map(|(key, done)| ItemKey::new(key).ok().map(|key| (key, done)))
            .collect();
        Ok(Self { entries })
    }

    /// Serialize into the persisted JSON object form.
    #[must_use]
    pub fn to_json(&self) -> String {
        let raw: BTreeMap<&str, bool> = self
            .entries
            .iter()
            .map(|(key, done)| (key.as_str(), *done))
            .collect();
        // A map of string keys to booleans always serializes.
        serde_json::to_string(&raw).unwrap_or_else(|_| "{}".to_string())
    }

    /// Record `key` as done. Returns `true` if this changed the ledger.
    pub fn insert(&mut self, key: ItemKey) -> bool {
        match self.entries.insert(key, true) {
            Some(previous) => !previous,
            None => true,
        }
    }

    #[must_use]
    pub fn contains(&self, key: &ItemKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Number of keys marked done.
    #[must_use]
    pub fn completed_count(&self) -> u32 {
        let count = self.entries.values().filter(|done| **done).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Keys marked done, in key order.
    pub fn completed_keys(&self) -> impl Iterator<Item = &ItemKey> {
        self.entries
            .iter()
            .filter(|(_, done)| **done)
            .map(|(key, _)| key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
