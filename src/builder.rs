//! Builder pattern for `RouteCycleDevice`.

use tokio::runtime::Handle;

use crate::cycle::ChangeDebouncer;
use crate::notify::Notifier;
use crate::{
    feedback_callback, FeedbackCallback, FeedbackEvent, RouteCycleConfig, RouteCycleDevice,
    RouteCycleError,
};

/// Entry point for building a route-cycle device.
///
/// # Example
///
/// ```no_run
/// use route_cycle::RouteCycle;
///
/// # async fn run() -> Result<(), route_cycle::RouteCycleError> {
/// let device = RouteCycle::builder("route-cycle-1", "Lobby Cycle")
///     .on_feedback(|event| tracing::debug!(?event, "feedback"))
///     .build()?;
///
/// device.set_in_use(true);
/// device.on_source_value_write(2, 5)?;
/// device.on_source_enable_toggle(2)?;
/// device.on_destination_enable_toggle(0)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RouteCycle;

impl RouteCycle {
    /// Creates a builder for a device identified by `key`.
    pub fn builder(key: impl Into<String>, name: impl Into<String>) -> RouteCycleBuilder {
        RouteCycleBuilder::new(key, name)
    }
}

/// Builder for configuring a [`RouteCycleDevice`].
///
/// Use [`RouteCycle::builder()`] to create one.
#[must_use]
pub struct RouteCycleBuilder {
    key: String,
    name: String,
    feedback: Option<FeedbackCallback>,
    config: RouteCycleConfig,
}

impl RouteCycleBuilder {
    /// Creates a builder with default settings.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            feedback: None,
            config: RouteCycleConfig::default(),
        }
    }

    /// Set a callback to receive slot feedback and notifications.
    pub fn on_feedback<F>(mut self, callback: F) -> Self
    where
        F: Fn(FeedbackEvent) + Send + Sync + 'static,
    {
        self.feedback = Some(feedback_callback(callback));
        self
    }

    /// Set an already-shared feedback callback.
    pub fn with_feedback_callback(mut self, callback: FeedbackCallback) -> Self {
        self.feedback = Some(callback);
        self
    }

    /// Set custom configuration.
    pub fn with_config(mut self, config: RouteCycleConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the device.
    ///
    /// Timers for the debounce window and the notify pulse are spawned on the
    /// tokio runtime current at this call.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is empty
    /// - No tokio runtime is running
    pub fn build(self) -> Result<RouteCycleDevice, RouteCycleError> {
        if self.key.trim().is_empty() {
            return Err(RouteCycleError::EmptyKey);
        }
        let runtime = Handle::try_current().map_err(|_| RouteCycleError::NoRuntime)?;

        let debouncer = ChangeDebouncer::new(runtime.clone());
        let notifier = Notifier::new(self.feedback, self.config.notify_pulse, runtime);
        Ok(RouteCycleDevice::new(
            self.key, self.name, debouncer, notifier,
        ))
    }
}

impl std::fmt::Debug for RouteCycleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteCycleBuilder")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("has_feedback", &self.feedback.is_some())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_outside_runtime_fails() {
        let result = RouteCycle::builder("rc", "Route Cycle").build();
        assert!(matches!(result, Err(RouteCycleError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let result = RouteCycle::builder("  ", "Route Cycle").build();
        assert!(matches!(result, Err(RouteCycleError::EmptyKey)));
    }

    #[tokio::test]
    async fn test_build_sets_identity() {
        let device = RouteCycle::builder("rc-1", "Lobby")
            .with_config(RouteCycleConfig {
                notify_pulse: Duration::from_millis(100),
            })
            .build()
            .unwrap();

        assert_eq!(device.key(), "rc-1");
        assert_eq!(device.name(), "Lobby");
        assert!(!device.in_use());
        assert_eq!(device.cursor(), 0);
    }
}
