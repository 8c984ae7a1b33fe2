//! Compact, order-preserving list of the enabled slots in one bank.

use super::SlotEvent;

/// One enabled slot as seen by the cycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEntry {
    /// The owning slot's fixed index.
    pub index: usize,
    /// The slot's route value as of the last event applied.
    pub route_value: u16,
}

/// Tracks which slots of a bank are enabled, in the order they were enabled.
///
/// Built incrementally from [`SlotEvent`]s. An index is present exactly when
/// its slot is enabled, at most once. New entries append at the end; value
/// updates never move an entry.
#[derive(Debug, Clone, Default)]
pub struct ActiveSetTracker {
    entries: Vec<ActiveEntry>,
}

impl ActiveSetTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one bank event to the list.
    pub fn apply(&mut self, event: &SlotEvent) {
        match *event {
            SlotEvent::EnabledTrue { index, value } => {
                if let Some(entry) = self.find_mut(index) {
                    entry.route_value = value;
                } else {
                    self.entries.push(ActiveEntry {
                        index,
                        route_value: value,
                    });
                }
                tracing::trace!(index, value, count = self.entries.len(), "active entry added");
            }
            SlotEvent::EnabledFalse { index } => {
                self.entries.retain(|entry| entry.index != index);
                tracing::trace!(index, count = self.entries.len(), "active entry removed");
            }
            SlotEvent::ValueChanged { index, value } => {
                // Disabled slots keep their value but stay out of the list
                if let Some(entry) = self.find_mut(index) {
                    entry.route_value = value;
                }
            }
        }
    }

    /// Number of active entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no slot is enabled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the slot at `index` is in the list.
    pub fn contains(&self, index: usize) -> bool {
        self.entries.iter().any(|entry| entry.index == index)
    }

    /// Borrowed view of the list.
    pub fn entries(&self) -> &[ActiveEntry] {
        &self.entries
    }

    /// Owned copy of the list, for use after the bank lock is released.
    pub fn snapshot(&self) -> Vec<ActiveEntry> {
        self.entries.clone()
    }

    fn find_mut(&mut self, index: usize) -> Option<&mut ActiveEntry> {
        self.entries.iter_mut().find(|entry| entry.index == index)
    }
}
