//! Error types for route-cycle.
//!
//! Errors are split into two categories:
//! - **Fatal errors** ([`RouteCycleError`]): bad input or a device that cannot be built
//! - **Rejected cycles** ([`CycleRejection`]): normal refusals surfaced via the
//!   notification channel, never propagated as failures

use crate::bank::BANK_SIZE;

/// Errors returned by device construction and slot-addressed operations.
#[derive(Debug, thiserror::Error)]
pub enum RouteCycleError {
    /// A slot index outside `0..BANK_SIZE` was supplied.
    #[error("slot index {index} out of range (bank holds {} slots)", BANK_SIZE)]
    SlotOutOfRange {
        /// The index that was rejected.
        index: usize,
    },

    /// The device was built outside a tokio runtime.
    ///
    /// The debounce and notification timers run as tokio tasks.
    #[error("no tokio runtime available - build the device from within a runtime")]
    NoRuntime,

    /// The device key was empty.
    #[error("device key must not be empty")]
    EmptyKey,
}

/// Why a cycle request was refused.
///
/// Rejections are not errors: the device stays unchanged and the
/// [`Display`](std::fmt::Display) text is pushed to the notification channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleRejection {
    /// The external in-use flag is not set.
    #[error("cycle requested while device not in use")]
    NotInUse,

    /// Another cycle is running.
    #[error("cycle already in progress, request ignored")]
    Busy,

    /// An enable toggle happened inside the debounce window.
    #[error("sources/destinations changing, try again shortly")]
    Changing,

    /// One of the active lists is empty.
    #[error(
        "source or destination count invalid while cycle requested \
         (sources = {sources}, destinations = {destinations})"
    )]
    InvalidCounts {
        /// Active source count at the time of the request.
        sources: usize,
        /// Active destination count at the time of the request.
        destinations: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_out_of_range_display() {
        let err = RouteCycleError::SlotOutOfRange { index: 40 };
        assert_eq!(
            err.to_string(),
            "slot index 40 out of range (bank holds 32 slots)"
        );
    }

    #[test]
    fn test_rejection_not_in_use_display() {
        assert_eq!(
            CycleRejection::NotInUse.to_string(),
            "cycle requested while device not in use"
        );
    }

    #[test]
    fn test_rejection_counts_names_both_counts() {
        let msg = CycleRejection::InvalidCounts {
            sources: 0,
            destinations: 3,
        }
        .to_string();
        assert!(msg.starts_with("source or destination count invalid"));
        assert!(msg.contains("sources = 0"));
        assert!(msg.contains("destinations = 3"));
    }
}
