//! Per-slot state and the fixed-size bank that owns it.

use super::{BankKind, SlotEvent, BANK_SIZE};
use crate::RouteCycleError;

/// State of one fixed-index slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    index: usize,
    enabled: bool,
    route_value: u16,
}

impl Slot {
    fn new(index: usize) -> Self {
        Self {
            index,
            enabled: false,
            route_value: 0,
        }
    }

    /// Fixed index of this slot within its bank.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the slot is currently part of the active list.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Current route value.
    pub fn route_value(&self) -> u16 {
        self.route_value
    }
}

/// A bank of [`BANK_SIZE`] slots.
///
/// Slots are created once and never added or removed; only their enabled
/// flag and route value change.
///
/// # Enable semantics
///
/// The bridge drives enables with momentary presses, so
/// [`set_enabled`](Self::set_enabled) treats a `true` request as a toggle and
/// ignores `false` entirely. Two consecutive `true` writes enable and then
/// disable the same slot.
#[derive(Debug, Clone)]
pub struct SlotBank {
    kind: BankKind,
    slots: [Slot; BANK_SIZE],
}

impl SlotBank {
    /// Creates a bank with every slot disabled and valued 0.
    pub fn new(kind: BankKind) -> Self {
        Self {
            kind,
            slots: std::array::from_fn(Slot::new),
        }
    }

    /// Which bank this is.
    pub fn kind(&self) -> BankKind {
        self.kind
    }

    /// All slots, in index order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns a copy of the slot at `index`.
    pub fn slot(&self, index: usize) -> Result<Slot, RouteCycleError> {
        self.slots
            .get(index)
            .copied()
            .ok_or(RouteCycleError::SlotOutOfRange { index })
    }

    /// Applies an enable request.
    ///
    /// `true` flips the slot's enabled flag and returns the resulting
    /// [`SlotEvent::EnabledTrue`] or [`SlotEvent::EnabledFalse`]. `false`
    /// leaves the slot untouched and returns `None`.
    pub fn set_enabled(
        &mut self,
        index: usize,
        requested: bool,
    ) -> Result<Option<SlotEvent>, RouteCycleError> {
        let kind = self.kind;
        let slot = self.slot_mut(index)?;
        if !requested {
            return Ok(None);
        }

        slot.enabled = !slot.enabled;
        let event = if slot.enabled {
            SlotEvent::EnabledTrue {
                index,
                value: slot.route_value,
            }
        } else {
            SlotEvent::EnabledFalse { index }
        };
        tracing::debug!(bank = %kind, index, enabled = slot.enabled, "slot toggled");
        Ok(Some(event))
    }

    /// Stores `value` and returns [`SlotEvent::ValueChanged`], even when the
    /// value is unchanged.
    pub fn set_route_value(
        &mut self,
        index: usize,
        value: u16,
    ) -> Result<SlotEvent, RouteCycleError> {
        let slot = self.slot_mut(index)?;
        slot.route_value = value;
        Ok(SlotEvent::ValueChanged { index, value })
    }

    /// Disables every enabled slot, last index included.
    ///
    /// Each enabled slot receives a toggle request, so the returned events
    /// are all [`SlotEvent::EnabledFalse`], in index order.
    pub fn clear_all_enabled(&mut self) -> Vec<SlotEvent> {
        let enabled: Vec<usize> = self
            .slots
            .iter()
            .filter(|slot| slot.enabled)
            .map(|slot| slot.index)
            .collect();
        let events: Vec<SlotEvent> = enabled
            .into_iter()
            .filter_map(|index| self.set_enabled(index, true).ok().flatten())
            .collect();
        tracing::debug!(bank = %self.kind, cleared = events.len(), "bank cleared");
        events
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Slot, RouteCycleError> {
        self.slots
            .get_mut(index)
            .ok_or(RouteCycleError::SlotOutOfRange { index })
    }
}
