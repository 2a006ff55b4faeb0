//! Timer state model.
//!
//! # Invariants
//! - `Running` holds exactly when a tick registration is alive.
//! - `seconds` counts whole elapsed seconds and only grows while running.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed period between two timer ticks.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Two-state lifecycle of a stopwatch timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Initial state; no tick registration exists.
    #[default]
    Stopped,
    /// One tick registration is active.
    Running,
}

impl TimerState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
        }
    }
}

/// Read-only copy of a timer for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub seconds: u64,
    pub state: TimerState,
}

impl TimerSnapshot {
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }
}
