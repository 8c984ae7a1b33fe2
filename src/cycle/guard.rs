//! Single-flight admission for cycle passes.

use parking_lot::Mutex;

use super::ChangeDebouncer;
use crate::CycleRejection;

/// Admits at most one cycle pass at a time, and none while the debouncer is
/// active.
///
/// The busy check, the debounce check and setting the busy flag happen under
/// one lock, so two concurrent requests can never both be admitted.
#[derive(Debug, Default)]
pub struct CycleGuard {
    busy: Mutex<bool>,
}

/// Proof of admission. The busy flag clears when this is dropped, on every
/// exit path of the pass.
#[derive(Debug)]
#[must_use = "the cycle is only exclusive while the permit is held"]
pub struct CyclePermit<'a> {
    busy: &'a Mutex<bool>,
}

impl CycleGuard {
    /// Creates an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to start a pass.
    ///
    /// Checks, in order: another pass running ([`CycleRejection::Busy`]),
    /// then a recent enable toggle ([`CycleRejection::Changing`]).
    pub fn try_acquire(
        &self,
        debouncer: &ChangeDebouncer,
    ) -> Result<CyclePermit<'_>, CycleRejection> {
        let mut busy = self.busy.lock();
        if *busy {
            return Err(CycleRejection::Busy);
        }
        if debouncer.is_active() {
            return Err(CycleRejection::Changing);
        }
        *busy = true;
        Ok(CyclePermit { busy: &self.busy })
    }

    /// Returns `true` while a pass holds a permit.
    pub fn is_busy(&self) -> bool {
        *self.busy.lock()
    }
}

impl Drop for CyclePermit<'_> {
    fn drop(&mut self) {
        *self.busy.lock() = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::runtime::Handle;

    #[tokio::test(start_paused = true)]
    async fn test_second_acquire_is_busy() {
        let guard = CycleGuard::new();
        let debouncer = ChangeDebouncer::new(Handle::current());

        let permit = guard.try_acquire(&debouncer).unwrap();
        assert!(guard.is_busy());
        assert_eq!(
            guard.try_acquire(&debouncer).unwrap_err(),
            CycleRejection::Busy
        );

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire(&debouncer).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_busy_checked_before_debounce() {
        let guard = CycleGuard::new();
        let debouncer = ChangeDebouncer::new(Handle::current());

        let _permit = guard.try_acquire(&debouncer).unwrap();
        debouncer.arm();
        assert_eq!(
            guard.try_acquire(&debouncer).unwrap_err(),
            CycleRejection::Busy
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_rejects_without_setting_busy() {
        let guard = CycleGuard::new();
        let debouncer = ChangeDebouncer::new(Handle::current());
        debouncer.arm();

        assert_eq!(
            guard.try_acquire(&debouncer).unwrap_err(),
            CycleRejection::Changing
        );
        assert!(!guard.is_busy());

        tokio::time::sleep(Duration::from_millis(2001)).await;
        assert!(guard.try_acquire(&debouncer).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquire_admits_one_at_a_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Barrier;

        let guard = CycleGuard::new();
        let debouncer = ChangeDebouncer::new(Handle::current());
        let in_flight = AtomicUsize::new(0);
        let max_in_flight = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    barrier.wait();
                    for _ in 0..50 {
                        if let Ok(permit) = guard.try_acquire(&debouncer) {
                            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                            max_in_flight.fetch_max(now, Ordering::SeqCst);
                            std::thread::yield_now();
                            in_flight.fetch_sub(1, Ordering::SeqCst);
                            drop(permit);
                        }
                    }
                });
            }
        });

        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
        assert!(!guard.is_busy());
    }
}
