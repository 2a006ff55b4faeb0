//! Domain model for the timer and todo widgets.
//!
//! # Responsibility
//! - Define plain data shared between core services and UI callers.
//! - Keep serialization shapes stable for presentation layers.
//!
//! # Invariants
//! - Every todo is identified by a stable `TodoId`.
//! - Timer state is exactly one of `Stopped` or `Running`.

pub mod timer;
pub mod todo;
