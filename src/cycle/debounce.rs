//! Self-clearing "structure just changed" flag.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::DEBOUNCE_WINDOW;

/// Flag, pending clear timer and a generation counter, guarded together.
///
/// The generation stops a timer that already woke up from clearing a flag
/// that was re-armed after it was scheduled.
#[derive(Debug, Default)]
struct DebounceState {
    active: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

/// Marks that an enable toggle just happened and clears itself after
/// [`DEBOUNCE_WINDOW`].
///
/// Re-arming cancels the pending clear and starts a fresh window; timers
/// never stack.
#[derive(Debug)]
pub struct ChangeDebouncer {
    state: Arc<Mutex<DebounceState>>,
    window: Duration,
    runtime: Handle,
}

impl ChangeDebouncer {
    /// Creates a cleared debouncer whose timers run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            state: Arc::new(Mutex::new(DebounceState::default())),
            window: DEBOUNCE_WINDOW,
            runtime,
        }
    }

    /// Sets the flag and (re)starts the auto-clear timer.
    pub fn arm(&self) {
        let mut state = self.state.lock();
        state.active = true;
        state.generation = state.generation.wrapping_add(1);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }

        let generation = state.generation;
        let shared = Arc::clone(&self.state);
        let window = self.window;
        state.timer = Some(self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            let mut state = shared.lock();
            if state.generation == generation {
                state.active = false;
                state.timer = None;
            }
        }));
    }

    /// Returns `true` while inside the window after the last [`arm`](Self::arm).
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Cancels any pending timer and clears the flag.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.active = false;
        state.generation = state.generation.wrapping_add(1);
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for ChangeDebouncer {
    fn drop(&mut self) {
        if let Some(timer) = self.state.lock().timer.take() {
            timer.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> ChangeDebouncer {
        ChangeDebouncer::new(Handle::current())
    }

    #[tokio::test(start_paused = true)]
    async fn test_starts_cleared() {
        assert!(!debouncer().is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_window() {
        let debouncer = debouncer();
        debouncer.arm();
        assert!(debouncer.is_active());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(debouncer.is_active());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!debouncer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_restarts_window() {
        let debouncer = debouncer();
        debouncer.arm();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        debouncer.arm();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(debouncer.is_active(), "first timer must not clear the re-armed flag");

        tokio::time::sleep(Duration::from_millis(501)).await;
        assert!(!debouncer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_clears_immediately() {
        let debouncer = debouncer();
        debouncer.arm();
        debouncer.shutdown();
        assert!(!debouncer.is_active());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!debouncer.is_active());
    }
}
