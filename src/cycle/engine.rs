//! Round-robin assignment of active sources to active destinations.

use crate::bank::ActiveEntry;
use crate::CycleRejection;

/// One destination's new route value from a cycle pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Fixed index of the destination slot.
    pub destination: usize,
    /// Fixed index of the source slot the value came from.
    pub source: usize,
    /// The source's route value, now assigned to the destination.
    pub route_value: u16,
}

/// Runs round-robin passes and keeps the cursor between them.
///
/// The cursor is a position in the *active source list*, not a slot index.
/// It persists across passes, so repeated cycles keep advancing through the
/// sources instead of restarting at the first one.
#[derive(Debug, Default)]
pub struct RouteCycleEngine {
    cursor: usize,
}

impl RouteCycleEngine {
    /// Creates an engine with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Computes one pass over snapshots of the active lists.
    ///
    /// Each destination, in list order, takes the value of
    /// `sources[cursor]` and the cursor advances modulo the source count.
    /// More destinations than sources simply wraps.
    ///
    /// Preconditions are checked in order and leave the cursor untouched on
    /// failure: `in_use` must be set, and both lists must be non-empty. A
    /// cursor left out of range by sources removed since the last pass is
    /// reset to 0.
    pub fn run(
        &mut self,
        in_use: bool,
        sources: &[ActiveEntry],
        destinations: &[ActiveEntry],
    ) -> Result<Vec<Assignment>, CycleRejection> {
        if !in_use {
            return Err(CycleRejection::NotInUse);
        }
        if sources.is_empty() || destinations.is_empty() {
            return Err(CycleRejection::InvalidCounts {
                sources: sources.len(),
                destinations: destinations.len(),
            });
        }
        if self.cursor >= sources.len() {
            tracing::warn!(
                cursor = self.cursor,
                sources = sources.len(),
                "cursor beyond active sources, restarting at 0"
            );
            self.cursor = 0;
        }

        let assignments = destinations
            .iter()
            .map(|destination| {
                let source = sources[self.cursor];
                self.cursor = (self.cursor + 1) % sources.len();
                Assignment {
                    destination: destination.index,
                    source: source.index,
                    route_value: source.route_value,
                }
            })
            .collect();
        Ok(assignments)
    }
}
