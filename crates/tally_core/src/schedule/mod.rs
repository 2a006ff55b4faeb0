//! Periodic tick scheduling contracts.
//!
//! # Responsibility
//! - Define the injected capability a timer uses to receive periodic ticks.
//! - Provide a deterministic tick source and a tokio wall-clock tick source.
//!
//! # Invariants
//! - A registration stays active until its `ScheduleHandle` is cancelled or
//!   dropped.
//! - Tick callbacks may register or cancel on the scheduler that fires them.

use std::fmt::{Debug, Formatter};
use std::time::Duration;

pub mod manual;
pub mod tokio_interval;

/// Callback invoked once per tick of a repeating registration.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Injected source of repeating ticks.
pub trait TickScheduler {
    /// Registers `tick` to run every `interval` until the handle is released.
    fn schedule_repeating(&self, interval: Duration, tick: TickCallback) -> ScheduleHandle;
}

impl<S: TickScheduler + ?Sized> TickScheduler for &S {
    fn schedule_repeating(&self, interval: Duration, tick: TickCallback) -> ScheduleHandle {
        (**self).schedule_repeating(interval, tick)
    }
}

/// Opaque handle to one active repeating registration.
///
/// Cancelling, explicitly or by drop, stops future ticks of the registration.
pub struct ScheduleHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl ScheduleHandle {
    /// Wraps the scheduler-specific cancellation for one registration.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the registration.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduleHandle {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl Debug for ScheduleHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
