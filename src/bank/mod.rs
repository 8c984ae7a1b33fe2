//! Fixed-capacity slot banks and their compact active lists.
//!
//! Each bank owns [`BANK_SIZE`] slots addressed by fixed index. Writes to a
//! bank return the [`SlotEvent`] they produced; the owner forwards that event
//! to the bank's [`ActiveSetTracker`] and, for enable transitions, to the
//! change debouncer:
//!
//! ```text
//! bridge write → SlotBank → SlotEvent ─┬→ ActiveSetTracker (active list)
//!                                      └→ ChangeDebouncer  (enable transitions only)
//! ```

mod active;
mod slot;

pub use active::{ActiveEntry, ActiveSetTracker};
pub use slot::{Slot, SlotBank};

/// Number of slots in every bank.
pub const BANK_SIZE: usize = 32;

/// Identifies which of the two banks a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankKind {
    /// Route sources (inputs offered to destinations).
    Source,
    /// Route destinations (outputs that receive a source value).
    Destination,
}

impl BankKind {
    /// Returns the bank name in lower case.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Destination => "destination",
        }
    }
}

impl std::fmt::Display for BankKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A meaningful change in a bank, produced by a [`SlotBank`] write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEvent {
    /// A slot flipped to enabled; carries its current route value.
    EnabledTrue {
        /// Slot index.
        index: usize,
        /// Route value at the moment of enabling.
        value: u16,
    },

    /// A slot flipped to disabled.
    EnabledFalse {
        /// Slot index.
        index: usize,
    },

    /// A slot's route value was written (changed or not).
    ValueChanged {
        /// Slot index.
        index: usize,
        /// The value written.
        value: u16,
    },
}

impl SlotEvent {
    /// Returns the slot index the event refers to.
    pub fn index(&self) -> usize {
        match *self {
            Self::EnabledTrue { index, .. }
            | Self::EnabledFalse { index }
            | Self::ValueChanged { index, .. } => index,
        }
    }

    /// Returns `true` for enable/disable transitions.
    ///
    /// These change the shape of an active list and arm the debouncer.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::EnabledTrue { .. } | Self::EnabledFalse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_kind_display() {
        assert_eq!(BankKind::Source.to_string(), "source");
        assert_eq!(format!("{}", BankKind::Destination), "destination");
    }

    #[test]
    fn test_slot_event_index() {
        assert_eq!(SlotEvent::EnabledTrue { index: 3, value: 9 }.index(), 3);
        assert_eq!(SlotEvent::EnabledFalse { index: 31 }.index(), 31);
        assert_eq!(SlotEvent::ValueChanged { index: 0, value: 1 }.index(), 0);
    }

    #[test]
    fn test_slot_event_structural() {
        assert!(SlotEvent::EnabledTrue { index: 0, value: 0 }.is_structural());
        assert!(SlotEvent::EnabledFalse { index: 0 }.is_structural());
        assert!(!SlotEvent::ValueChanged { index: 0, value: 0 }.is_structural());
    }
}
