//! Core state for the stopwatch timer and todo list widgets.
//! This crate is the single source of truth for their invariants.

pub mod logging;
pub mod model;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig, LoggingError};
pub use model::timer::{TimerSnapshot, TimerState, TICK_INTERVAL};
pub use model::todo::{Todo, TodoId, TodoValidationError};
pub use schedule::manual::ManualScheduler;
pub use schedule::tokio_interval::{SchedulerError, TokioIntervalScheduler};
pub use schedule::{ScheduleHandle, TickCallback, TickScheduler};
pub use service::timer::Timer;
pub use service::todo_list::TodoList;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
