//! Deterministic tick source driven by explicit calls.
//!
//! Time only passes when the owner calls [`ManualScheduler::fire`] or
//! [`ManualScheduler::advance`], so timer behavior can be asserted without
//! wall-clock waits.

use crate::schedule::{ScheduleHandle, TickCallback, TickScheduler};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

struct Registration {
    interval: Duration,
    pending: Duration,
    // Taken out while the callback runs outside the state lock.
    tick: Option<TickCallback>,
}

#[derive(Default)]
struct ManualState {
    next_id: u64,
    registrations: BTreeMap<u64, Registration>,
}

/// Manually advanced scheduler.
///
/// Clones share the same registrations. Callbacks run without the internal
/// lock held, so they may register or cancel on this scheduler.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registrations that have not been cancelled.
    pub fn active_registrations(&self) -> usize {
        lock(&self.inner).registrations.len()
    }

    /// Fires every active registration once, in registration order.
    ///
    /// Returns how many callbacks ran.
    pub fn fire(&self) -> usize {
        let due = {
            let state = lock(&self.inner);
            state
                .registrations
                .keys()
                .map(|id| (*id, 1))
                .collect::<Vec<_>>()
        };
        self.run_due(due)
    }

    /// Lets `elapsed` time pass for every active registration.
    ///
    /// Each registration fires once per whole interval accumulated so far;
    /// remainders carry over to the next call. Zero-interval registrations
    /// never fire here; use [`ManualScheduler::fire`] for them.
    pub fn advance(&self, elapsed: Duration) -> usize {
        let due = {
            let mut state = lock(&self.inner);
            let mut due = Vec::new();
            for (id, registration) in state.registrations.iter_mut() {
                if registration.interval.is_zero() {
                    continue;
                }
                registration.pending += elapsed;
                let mut count = 0;
                while registration.pending >= registration.interval {
                    registration.pending -= registration.interval;
                    count += 1;
                }
                if count > 0 {
                    due.push((*id, count));
                }
            }
            due
        };
        self.run_due(due)
    }

    /// Runs each due registration `count` times with the lock released.
    ///
    /// Registrations cancelled before their turn are skipped.
    fn run_due(&self, due: Vec<(u64, u64)>) -> usize {
        let mut fired = 0;
        for (id, count) in due {
            let taken = lock(&self.inner)
                .registrations
                .get_mut(&id)
                .and_then(|registration| registration.tick.take());
            let Some(mut tick) = taken else {
                continue;
            };

            for _ in 0..count {
                tick();
                fired += 1;
            }

            let orphaned = {
                let mut state = lock(&self.inner);
                match state.registrations.get_mut(&id) {
                    Some(registration) => {
                        registration.tick = Some(tick);
                        None
                    }
                    None => Some(tick),
                }
            };
            // Cancelled from inside its own callback.
            drop(orphaned);
        }
        fired
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, tick: TickCallback) -> ScheduleHandle {
        let id = {
            let mut state = lock(&self.inner);
            let id = state.next_id;
            state.next_id += 1;
            state.registrations.insert(
                id,
                Registration {
                    interval,
                    pending: Duration::ZERO,
                    tick: Some(tick),
                },
            );
            id
        };

        let inner = Arc::clone(&self.inner);
        ScheduleHandle::new(move || {
            let removed = lock(&inner).registrations.remove(&id);
            // Dropped after the guard: the callback may own handles of this
            // scheduler.
            drop(removed);
        })
    }
}

fn lock(inner: &Mutex<ManualState>) -> MutexGuard<'_, ManualState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::ManualScheduler;
    use crate::schedule::{ScheduleHandle, TickScheduler};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn counting_tick(counter: &Arc<AtomicU64>) -> crate::schedule::TickCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn advance_carries_partial_intervals() {
        let scheduler = ManualScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let _handle = scheduler.schedule_repeating(Duration::from_secs(1), counting_tick(&ticks));

        assert_eq!(scheduler.advance(Duration::from_millis(600)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(600)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(2_800)), 3);
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn cancelled_registration_no_longer_fires() {
        let scheduler = ManualScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let handle = scheduler.schedule_repeating(Duration::from_secs(1), counting_tick(&ticks));

        assert_eq!(scheduler.fire(), 1);
        handle.cancel();
        assert_eq!(scheduler.active_registrations(), 0);
        assert_eq!(scheduler.fire(), 0);
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn callback_can_cancel_and_register_on_same_scheduler() {
        let scheduler = ManualScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let victim = scheduler.schedule_repeating(Duration::from_secs(1), counting_tick(&ticks));
        let victim = Arc::new(Mutex::new(Some(victim)));
        let spawned = Arc::new(Mutex::new(Vec::new()));

        let reentrant = scheduler.clone();
        let victim_slot = Arc::clone(&victim);
        let spawned_slot = Arc::clone(&spawned);
        let _driver = scheduler.schedule_repeating(
            Duration::from_secs(1),
            Box::new(move || {
                victim_slot.lock().unwrap().take();
                let handle = reentrant.schedule_repeating(Duration::from_secs(1), Box::new(|| {}));
                spawned_slot.lock().unwrap().push(handle);
            }),
        );

        // The victim fires first (registration order), then the driver
        // cancels it and registers a new one.
        assert_eq!(scheduler.advance(Duration::from_secs(1)), 2);
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.active_registrations(), 2);

        assert_eq!(scheduler.fire(), 2);
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
        assert_eq!(spawned.lock().unwrap().len(), 2);
    }

    #[test]
    fn callback_cancelling_its_own_registration_is_released() {
        let scheduler = ManualScheduler::new();
        let own: Arc<Mutex<Option<ScheduleHandle>>> = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&own);
        let handle = scheduler.schedule_repeating(
            Duration::from_secs(1),
            Box::new(move || {
                slot.lock().unwrap().take();
            }),
        );
        *own.lock().unwrap() = Some(handle);

        assert_eq!(scheduler.fire(), 1);
        assert_eq!(scheduler.active_registrations(), 0);
        assert_eq!(scheduler.fire(), 0);
    }

    #[test]
    fn zero_interval_is_skipped_by_advance() {
        let scheduler = ManualScheduler::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let _handle = scheduler.schedule_repeating(Duration::ZERO, counting_tick(&ticks));

        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
        assert_eq!(scheduler.fire(), 1);
    }
}
