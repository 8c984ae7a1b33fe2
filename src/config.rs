//! Configuration types for route cycling.

use std::time::Duration;

/// How long cycling stays blocked after any enable toggle.
///
/// Fixed; not part of [`RouteCycleConfig`].
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(2000);

/// Configuration for device behavior.
///
/// Use [`RouteCycleConfig::default()`] for the standard values.
///
/// # Example
///
/// ```
/// use route_cycle::RouteCycleConfig;
/// use std::time::Duration;
///
/// let config = RouteCycleConfig {
///     notify_pulse: Duration::from_millis(250),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RouteCycleConfig {
    /// How long the notification pulse stays high.
    ///
    /// Default: 500ms
    pub notify_pulse: Duration,
}

impl Default for RouteCycleConfig {
    fn default() -> Self {
        Self {
            notify_pulse: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = RouteCycleConfig::default();
        assert_eq!(config.notify_pulse, Duration::from_millis(500));
    }

    #[test]
    fn test_debounce_window() {
        assert_eq!(DEBOUNCE_WINDOW, Duration::from_secs(2));
    }
}
