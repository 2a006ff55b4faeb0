//! Stateful widget services.
//!
//! # Responsibility
//! - Expose the timer and todo list operations UI callers invoke.
//! - Keep presentation layers decoupled from scheduling details.
//!
//! # Invariants
//! - Services assume one logical owner calling them sequentially.
//! - The timer and the todo list share no state.

pub mod timer;
pub mod todo_list;
