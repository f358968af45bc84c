use serde::Serialize;

use crate::model::ledger::CompletionLedger;

/// Default size of the trackable universe across the whole learning path.
pub const DEFAULT_TOTAL_ITEMS: u32 = 30;

/// Point-in-time read of aggregate progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub completed_count: u32,
    pub total_items: u32,
    pub progress_percentage: u32,
    pub current_section: Option<String>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn compute(
        ledger: &CompletionLedger,
        total_items: u32,
        current_section: Option<&str>,
    ) -> Self {
        let completed_count = ledger.completed_count();
        Self {
            completed_count,
            total_items,
            progress_percentage: percentage(completed_count, total_items),
            current_section: current_section.map(str::to_owned),
        }
    }

    /// True once every item in the universe has been completed.
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.progress_percentage >= 100
    }
}

/// `round(completed / total * 100)` with halves rounded up.
///
/// Not clamped: a completed count above `total` yields more than 100.
/// A zero `total` yields 0.
#[must_use]
pub fn percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed);
    let total = u64::from(total);
    let rounded = (completed * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
