//! Wall-clock tick source backed by a tokio runtime.

use crate::schedule::{ScheduleHandle, TickCallback, TickScheduler};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Smallest period accepted by `tokio::time::interval_at`.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Scheduler construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// No tokio runtime is active on the calling thread.
    NoRuntime,
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRuntime => write!(f, "no tokio runtime is active on this thread"),
        }
    }
}

impl Error for SchedulerError {}

/// Spawns one interval task per registration on a tokio runtime.
///
/// Cancelling a registration aborts its task. Missed ticks are delayed, not
/// bursted, so a stalled runtime does not replay lost seconds.
#[derive(Debug, Clone)]
pub struct TokioIntervalScheduler {
    runtime: Handle,
}

impl TokioIntervalScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Binds to the runtime of the calling context.
    ///
    /// # Errors
    /// - Returns [`SchedulerError::NoRuntime`] outside a tokio runtime.
    pub fn try_current() -> Result<Self, SchedulerError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| SchedulerError::NoRuntime)
    }
}

impl TickScheduler for TokioIntervalScheduler {
    fn schedule_repeating(&self, interval: Duration, mut tick: TickCallback) -> ScheduleHandle {
        let period = interval.max(MIN_INTERVAL);
        let task = self.runtime.spawn(async move {
            // First tick lands one full period after registration.
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tick();
            }
        });
        ScheduleHandle::new(move || task.abort())
    }
}
