//! Feedback fan-out and the operator notification pulse.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::{FeedbackCallback, FeedbackEvent};

/// Delivers feedback to the registered callback and drives the notify pulse.
pub(crate) struct Notifier {
    callback: Option<FeedbackCallback>,
    pulse: Duration,
    runtime: Handle,
    pulse_reset: Mutex<Option<JoinHandle<()>>>,
}

impl Notifier {
    pub fn new(callback: Option<FeedbackCallback>, pulse: Duration, runtime: Handle) -> Self {
        Self {
            callback,
            pulse,
            runtime,
            pulse_reset: Mutex::new(None),
        }
    }

    /// Sends an event to the callback if configured.
    pub fn emit(&self, event: FeedbackEvent) {
        if let Some(ref callback) = self.callback {
            callback(event);
        }
    }

    /// Publishes `message` and raises the pulse.
    ///
    /// The pulse falls `pulse` after the most recent notification; a
    /// notification arriving while high pushes the fall back.
    pub fn notify(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notify");
        self.emit(FeedbackEvent::NotifyMessage(message));
        self.emit(FeedbackEvent::NotifyPulse(true));

        let Some(callback) = self.callback.clone() else {
            return;
        };
        let pulse = self.pulse;
        let mut pending = self.pulse_reset.lock();
        if let Some(reset) = pending.take() {
            reset.abort();
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(pulse).await;
            callback(FeedbackEvent::NotifyPulse(false));
        }));
    }

    /// Cancels a pending pulse fall.
    pub fn shutdown(&self) {
        if let Some(reset) = self.pulse_reset.lock().take() {
            reset.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("has_callback", &self.callback.is_some())
            .field("pulse", &self.pulse)
            .finish_non_exhaustive()
    }
}
