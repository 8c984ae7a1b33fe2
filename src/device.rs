//! The route-cycle device: two banks, their active lists, and cycling.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::bank::{ActiveEntry, ActiveSetTracker, BankKind, Slot, SlotBank, SlotEvent};
use crate::cycle::{Assignment, ChangeDebouncer, CycleGuard, RouteCycleEngine};
use crate::notify::Notifier;
use crate::{CycleRejection, FeedbackEvent, RouteCycleError};

/// A bank and the active list derived from it, always mutated together.
#[derive(Debug)]
struct BankState {
    slots: SlotBank,
    active: ActiveSetTracker,
}

impl BankState {
    fn new(kind: BankKind) -> Self {
        Self {
            slots: SlotBank::new(kind),
            active: ActiveSetTracker::new(),
        }
    }
}

/// Tracks enabled sources and destinations and cycles routes between them.
///
/// Created by [`RouteCycleBuilder::build()`]. Every method takes `&self` and
/// may be called from any thread; share the device with an `Arc`.
///
/// # Locking
///
/// Each bank sits behind its own mutex, so source and destination writes
/// never block each other. A cycle snapshots both active lists (source lock
/// first, then destination), computes the pass on the snapshot, then applies
/// the results under the destination lock.
///
/// Slot feedback is emitted while the lock of the bank it describes is held,
/// and a cycle's feedback goes out before its permit is released. The bridge
/// therefore sees feedback in the same order the slots were written. The
/// feedback callback must not call back into the device.
///
/// [`RouteCycleBuilder::build()`]: crate::RouteCycleBuilder::build
#[derive(Debug)]
pub struct RouteCycleDevice {
    key: String,
    name: String,
    sources: Mutex<BankState>,
    destinations: Mutex<BankState>,
    in_use: AtomicBool,
    debouncer: ChangeDebouncer,
    guard: CycleGuard,
    engine: Mutex<RouteCycleEngine>,
    notifier: Notifier,
}

impl RouteCycleDevice {
    pub(crate) fn new(
        key: String,
        name: String,
        debouncer: ChangeDebouncer,
        notifier: Notifier,
    ) -> Self {
        tracing::info!(device = %key, %name, "constructing route-cycle device");
        Self {
            key,
            name,
            sources: Mutex::new(BankState::new(BankKind::Source)),
            destinations: Mutex::new(BankState::new(BankKind::Destination)),
            in_use: AtomicBool::new(false),
            debouncer,
            guard: CycleGuard::new(),
            engine: Mutex::new(RouteCycleEngine::new()),
            notifier,
        }
    }

    /// Unique device key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Friendly device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn bank(&self, kind: BankKind) -> &Mutex<BankState> {
        match kind {
            BankKind::Source => &self.sources,
            BankKind::Destination => &self.destinations,
        }
    }

    /// Sets the externally owned "in use" flag.
    pub fn set_in_use(&self, in_use: bool) {
        self.in_use.store(in_use, Ordering::SeqCst);
    }

    /// Returns the "in use" flag.
    pub fn in_use(&self) -> bool {
        self.in_use.load(Ordering::SeqCst)
    }

    /// Applies an enable write to a slot.
    ///
    /// `true` toggles the slot; `false` leaves it as it is. A toggle updates
    /// the bank's active list and blocks cycling for
    /// [`DEBOUNCE_WINDOW`](crate::DEBOUNCE_WINDOW). The slot's enabled
    /// feedback is echoed either way.
    pub fn set_enabled(
        &self,
        bank: BankKind,
        index: usize,
        requested: bool,
    ) -> Result<(), RouteCycleError> {
        let mut state = self.bank(bank).lock();
        if let Some(event) = state.slots.set_enabled(index, requested)? {
            state.active.apply(&event);
            self.debouncer.arm();
            tracing::debug!(
                device = %self.key,
                %bank,
                index,
                active = state.active.count(),
                "active list changed"
            );
        }

        self.notifier.emit(FeedbackEvent::Enabled {
            bank,
            index,
            enabled: state.slots.slot(index)?.enabled(),
        });
        Ok(())
    }

    /// Stores a route value for a slot.
    ///
    /// An enabled slot's active entry picks up the new value in place.
    pub fn set_route_value(
        &self,
        bank: BankKind,
        index: usize,
        value: u16,
    ) -> Result<(), RouteCycleError> {
        let mut state = self.bank(bank).lock();
        let event = state.slots.set_route_value(index, value)?;
        state.active.apply(&event);

        self.notifier.emit(FeedbackEvent::Value { bank, index, value });
        Ok(())
    }

    /// Disables every enabled slot in a bank.
    ///
    /// Raises a "Clearing all Enabled ..." notification first. Any slot that
    /// was enabled arms the debouncer.
    pub fn clear_all_enabled(&self, bank: BankKind) {
        let label = match bank {
            BankKind::Source => "Sources",
            BankKind::Destination => "Destinations",
        };
        self.notifier.notify(format!("Clearing all Enabled {label}..."));

        let mut state = self.bank(bank).lock();
        let events = state.slots.clear_all_enabled();
        for event in &events {
            state.active.apply(event);
        }
        if !events.is_empty() {
            self.debouncer.arm();
        }

        tracing::info!(device = %self.key, %bank, cleared = events.len(), "bank cleared");
        for event in events {
            self.notifier.emit(FeedbackEvent::Enabled {
                bank,
                index: event.index(),
                enabled: false,
            });
        }
    }

    /// Runs one round-robin pass if the guards allow it.
    ///
    /// Returns the assignments made. A refusal is returned as a
    /// [`CycleRejection`] and also pushed to the notification channel; a
    /// refused request changes nothing.
    pub fn request_cycle(&self) -> Result<Vec<Assignment>, CycleRejection> {
        let permit = match self.guard.try_acquire(&self.debouncer) {
            Ok(permit) => permit,
            Err(rejection) => return Err(self.reject(rejection)),
        };

        let (sources, destinations) = self.snapshot_active();
        let planned = self
            .engine
            .lock()
            .run(self.in_use(), &sources, &destinations);
        let assignments = match planned {
            Ok(assignments) => assignments,
            Err(rejection) => {
                drop(permit);
                return Err(self.reject(rejection));
            }
        };

        self.apply_assignments(&assignments);
        drop(permit);

        tracing::info!(
            device = %self.key,
            destinations = assignments.len(),
            sources = sources.len(),
            cursor = self.cursor(),
            "routes cycled"
        );
        Ok(assignments)
    }

    fn snapshot_active(&self) -> (Vec<ActiveEntry>, Vec<ActiveEntry>) {
        let sources = self.sources.lock();
        let destinations = self.destinations.lock();
        (sources.active.snapshot(), destinations.active.snapshot())
    }

    /// Writes a pass into the destination bank and echoes each value.
    ///
    /// Runs with the cycle permit held, so no other pass can write or emit
    /// until this one has finished both.
    fn apply_assignments(&self, assignments: &[Assignment]) {
        let mut state = self.destinations.lock();
        for assignment in assignments {
            match state
                .slots
                .set_route_value(assignment.destination, assignment.route_value)
            {
                Ok(event) => {
                    state.active.apply(&event);
                    if let SlotEvent::ValueChanged { index, value } = event {
                        self.notifier.emit(FeedbackEvent::Value {
                            bank: BankKind::Destination,
                            index,
                            value,
                        });
                    }
                }
                Err(e) => {
                    tracing::error!(
                        device = %self.key,
                        error = %e,
                        "cycle produced invalid destination"
                    );
                }
            }
        }
    }

    fn reject(&self, rejection: CycleRejection) -> CycleRejection {
        tracing::warn!(device = %self.key, reason = %rejection, "cycle rejected");
        self.notifier.notify(rejection.to_string());
        rejection
    }

    /// Returns a copy of one slot.
    pub fn slot(&self, bank: BankKind, index: usize) -> Result<Slot, RouteCycleError> {
        self.bank(bank).lock().slots.slot(index)
    }

    /// Snapshot of a bank's active list, in enable order.
    pub fn active(&self, bank: BankKind) -> Vec<ActiveEntry> {
        self.bank(bank).lock().active.snapshot()
    }

    /// Position of the round-robin cursor in the active source list.
    pub fn cursor(&self) -> usize {
        self.engine.lock().cursor()
    }

    /// Returns `true` while an enable toggle is inside the debounce window.
    pub fn is_changing(&self) -> bool {
        self.debouncer.is_active()
    }

    /// Re-sends enabled and value feedback for every slot of both banks.
    ///
    /// Call when the bridge reconnects so its signals match device state.
    pub fn refresh_feedback(&self) {
        for bank in [BankKind::Destination, BankKind::Source] {
            let state = self.bank(bank).lock();
            let slots = state.slots.slots();
            for slot in slots {
                self.notifier.emit(FeedbackEvent::Enabled {
                    bank,
                    index: slot.index(),
                    enabled: slot.enabled(),
                });
            }
            for slot in slots {
                self.notifier.emit(FeedbackEvent::Value {
                    bank,
                    index: slot.index(),
                    value: slot.route_value(),
                });
            }
        }
    }

    /// Cancels pending timers and clears the debounce flag.
    ///
    /// Dropping the device does the same.
    pub fn shutdown(&self) {
        tracing::info!(device = %self.key, "shutting down");
        self.debouncer.shutdown();
        self.notifier.shutdown();
    }

    /// A source enable press.
    pub fn on_source_enable_toggle(&self, index: usize) -> Result<(), RouteCycleError> {
        self.set_enabled(BankKind::Source, index, true)
    }

    /// A destination enable press.
    pub fn on_destination_enable_toggle(&self, index: usize) -> Result<(), RouteCycleError> {
        self.set_enabled(BankKind::Destination, index, true)
    }

    /// A source value write.
    pub fn on_source_value_write(&self, index: usize, value: u16) -> Result<(), RouteCycleError> {
        self.set_route_value(BankKind::Source, index, value)
    }

    /// A destination value write.
    pub fn on_destination_value_write(
        &self,
        index: usize,
        value: u16,
    ) -> Result<(), RouteCycleError> {
        self.set_route_value(BankKind::Destination, index, value)
    }

    /// A cycle press. The outcome is reported through feedback only.
    pub fn on_cycle_requested(&self) {
        // A refusal has already gone out as a notification.
        if let Err(rejection) = self.request_cycle() {
            tracing::trace!(device = %self.key, reason = %rejection, "cycle press refused");
        }
    }

    /// A "clear sources" press.
    pub fn on_clear_sources_requested(&self) {
        self.clear_all_enabled(BankKind::Source);
    }

    /// A "clear destinations" press.
    pub fn on_clear_destinations_requested(&self) {
        self.clear_all_enabled(BankKind::Destination);
    }
}
