//! Feedback events pushed back to the control bridge.
//!
//! Every change to a slot, and every operator notification, is reported
//! through a [`FeedbackCallback`]. The bridge layer mirrors these onto its
//! own signals; the core never reads them back.
//!
//! Slot feedback is delivered with the slot's bank lock held, so a callback
//! must not call back into the device.

use std::sync::Arc;

use crate::bank::BankKind;

/// Feedback emitted by a [`RouteCycleDevice`](crate::RouteCycleDevice).
///
/// # Example
///
/// ```
/// use route_cycle::{BankKind, FeedbackEvent};
///
/// fn handle_feedback(event: FeedbackEvent) {
///     match event {
///         FeedbackEvent::Enabled { bank, index, enabled } => {
///             println!("{bank} {index} enabled = {enabled}");
///         }
///         FeedbackEvent::Value { bank, index, value } => {
///             println!("{bank} {index} value = {value}");
///         }
///         FeedbackEvent::NotifyPulse(high) => {
///             println!("notify pulse {high}");
///         }
///         FeedbackEvent::NotifyMessage(text) => {
///             println!("notify: {text}");
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// A slot's enabled flag was written.
    Enabled {
        /// Which bank the slot belongs to.
        bank: BankKind,
        /// Fixed slot index.
        index: usize,
        /// Enabled state after the write.
        enabled: bool,
    },

    /// A slot's route value was written.
    ///
    /// Emitted for external writes and for every destination a cycle assigns.
    Value {
        /// Which bank the slot belongs to.
        bank: BankKind,
        /// Fixed slot index.
        index: usize,
        /// Route value after the write.
        value: u16,
    },

    /// The notification pulse changed level.
    ///
    /// Goes `true` with each notification and back to `false` after
    /// [`RouteCycleConfig::notify_pulse`](crate::RouteCycleConfig::notify_pulse).
    NotifyPulse(bool),

    /// Human-readable notification text, sent just before the pulse rises.
    NotifyMessage(String),
}

/// Callback type for receiving feedback.
///
/// Register one via [`RouteCycleBuilder::on_feedback()`].
///
/// [`RouteCycleBuilder::on_feedback()`]: crate::RouteCycleBuilder::on_feedback
pub type FeedbackCallback = Arc<dyn Fn(FeedbackEvent) + Send + Sync>;

/// Creates a [`FeedbackCallback`] from a closure.
///
/// # Example
///
/// ```
/// use route_cycle::feedback_callback;
///
/// let callback = feedback_callback(|event| {
///     println!("Got feedback: {:?}", event);
/// });
/// ```
pub fn feedback_callback<F>(f: F) -> FeedbackCallback
where
    F: Fn(FeedbackEvent) + Send + Sync + 'static,
{
    Arc::new(f)
}
