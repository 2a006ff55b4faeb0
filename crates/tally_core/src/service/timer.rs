//! Stopwatch timer service.
//!
//! # Responsibility
//! - Count whole elapsed seconds while running.
//! - Own the single tick registration of the timer.
//!
//! # Invariants
//! - `is_running()` holds iff a tick registration is alive.
//! - At most one registration exists per timer.
//! - After `stop()` or `reset()` returns, no tick can change `seconds`.

use crate::model::timer::{TimerSnapshot, TimerState, TICK_INTERVAL};
use crate::schedule::{ScheduleHandle, TickCallback, TickScheduler};
use log::{debug, trace, warn};
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

/// Counter shared with the tick callback.
///
/// `generation` changes on every start and stop; a callback only counts
/// while its captured generation is current.
#[derive(Debug, Default)]
struct Elapsed {
    seconds: u64,
    generation: u64,
}

/// Stopwatch advanced by an injected tick source.
pub struct Timer<S: TickScheduler> {
    scheduler: S,
    elapsed: Arc<Mutex<Elapsed>>,
    registration: Option<ScheduleHandle>,
}

impl<S: TickScheduler> Timer<S> {
    /// Creates a stopped timer at zero seconds.
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            elapsed: Arc::new(Mutex::new(Elapsed::default())),
            registration: None,
        }
    }

    /// Starts ticking once per [`TICK_INTERVAL`]. No-op while running.
    pub fn start(&mut self) {
        if self.registration.is_some() {
            debug!("event=timer_start module=timer status=skipped reason=already_running");
            return;
        }

        let (generation, seconds) = {
            let mut elapsed = lock_elapsed(&self.elapsed);
            elapsed.generation = elapsed.generation.wrapping_add(1);
            (elapsed.generation, elapsed.seconds)
        };

        let shared = Arc::clone(&self.elapsed);
        let tick: TickCallback = Box::new(move || {
            let mut elapsed = lock_elapsed(&shared);
            if elapsed.generation != generation {
                return;
            }
            elapsed.seconds = elapsed.seconds.saturating_add(1);
            trace!(
                "event=timer_tick module=timer status=ok seconds={}",
                elapsed.seconds
            );
        });

        self.registration = Some(self.scheduler.schedule_repeating(TICK_INTERVAL, tick));
        debug!("event=timer_start module=timer status=ok seconds={seconds}");
    }

    /// Stops ticking and keeps the elapsed seconds. No-op while stopped.
    pub fn stop(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };

        let seconds = {
            let mut elapsed = lock_elapsed(&self.elapsed);
            elapsed.generation = elapsed.generation.wrapping_add(1);
            elapsed.seconds
        };
        registration.cancel();
        debug!("event=timer_stop module=timer status=ok seconds={seconds}");
    }

    /// Stops the timer and clears the elapsed seconds, from either state.
    pub fn reset(&mut self) {
        self.stop();
        lock_elapsed(&self.elapsed).seconds = 0;
        debug!("event=timer_reset module=timer status=ok");
    }

    /// Returns elapsed whole seconds.
    pub fn get_time(&self) -> u64 {
        lock_elapsed(&self.elapsed).seconds
    }

    pub fn is_running(&self) -> bool {
        self.registration.is_some()
    }

    pub fn state(&self) -> TimerState {
        if self.is_running() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Returns a copy of the current time and state for display.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds: self.get_time(),
            state: self.state(),
        }
    }
}

impl<S: TickScheduler> Debug for Timer<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timer")
            .field("seconds", &self.get_time())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

fn lock_elapsed(elapsed: &Mutex<Elapsed>) -> MutexGuard<'_, Elapsed> {
    elapsed.lock().unwrap_or_else(|poisoned| {
        warn!("event=timer_lock module=timer status=recovered reason=poisoned");
        poisoned.into_inner()
    })
}

#[cfg(test)]
mod tests {
    use super::Timer;
    use crate::model::timer::TimerState;
    use crate::schedule::manual::ManualScheduler;
    use crate::schedule::{ScheduleHandle, TickCallback, TickScheduler};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Keeps the callback reachable after cancellation, like a tick that
    /// was already dispatched when `stop()` ran.
    #[derive(Default)]
    struct CapturingScheduler {
        captured: Arc<Mutex<Option<TickCallback>>>,
    }

    impl CapturingScheduler {
        fn fire(&self) {
            if let Some(tick) = self.captured.lock().unwrap().as_mut() {
                tick();
            }
        }
    }

    impl TickScheduler for CapturingScheduler {
        fn schedule_repeating(&self, _interval: Duration, tick: TickCallback) -> ScheduleHandle {
            *self.captured.lock().unwrap() = Some(tick);
            ScheduleHandle::new(|| {})
        }
    }

    #[test]
    fn tick_dispatched_before_stop_does_not_count_after_it() {
        let scheduler = CapturingScheduler::default();
        let mut timer = Timer::new(&scheduler);
        timer.start();
        scheduler.fire();
        timer.stop();
        scheduler.fire();

        assert_eq!(timer.get_time(), 1);
        assert_eq!(timer.state(), TimerState::Stopped);
    }

    #[test]
    fn tick_dispatched_before_reset_keeps_zero() {
        let scheduler = CapturingScheduler::default();
        let mut timer = Timer::new(&scheduler);
        timer.start();
        scheduler.fire();
        timer.reset();
        scheduler.fire();

        assert_eq!(timer.get_time(), 0);
    }

    #[test]
    fn debug_output_reports_state() {
        let timer = Timer::new(ManualScheduler::new());
        let rendered = format!("{timer:?}");
        assert!(rendered.contains("Stopped"));
        assert!(rendered.contains("seconds: 0"));
    }
}
