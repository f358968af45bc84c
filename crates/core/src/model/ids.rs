use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when building identifiers from raw strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ItemKeyError {
    #[error("item key cannot be empty")]
    Empty,
    #[error("step id cannot be empty")]
    EmptyStepId,
}

/// Opaque key identifying one trackable unit of learning progress.
///
/// Keys are compared verbatim; `installation_django` and `models_quiz_2` are
/// typical examples.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Creates a new `ItemKey`.
    ///
    /// # Errors
    ///
    /// Returns `ItemKeyError::Empty` if the key is empty or only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ItemKeyError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ItemKeyError::Empty);
        }
        Ok(Self(raw))
    }

    /// Key emitted when an installation step reaches `completed`.
    #[must_use]
    pub fn installation_step(step: &StepId) -> Self {
        Self(format!("installation_{}", step.as_str()))
    }

    /// Key emitted for an answered quiz question, e.g. `models_quiz_3`.
    #[must_use]
    pub fn quiz_question(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}_{index}"))
    }

    /// Key emitted once a quiz reaches its completion threshold.
    #[must_use]
    pub fn quiz_completed(prefix: &str) -> Self {
        Self(format!("{prefix}_completed"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Stable identifier of a step in the installation checklist.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(String);

impl StepId {
    /// Creates a new `StepId`.
    ///
    /// # Errors
    ///
    /// Returns `ItemKeyError::EmptyStepId` if the id is empty or only whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ItemKeyError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ItemKeyError::EmptyStepId);
        }
        Ok(Self(raw))
    }

    /// Builds an id from a literal that is known to be non-empty.
    pub(crate) fn known(value: &'static str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemKey({})", self.0)
    }
}

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemKey {
    type Err = ItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for StepId {
    type Err = ItemKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
