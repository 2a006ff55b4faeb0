//! Todo item domain model.
//!
//! # Responsibility
//! - Define the record rendered by todo list views.
//! - Own identity rules for todo items.
//!
//! # Invariants
//! - `id` is generated once and never reused for another todo.
//! - A nil `id` is never a valid todo identity.
//! - `text` is caller content and is not validated.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one todo item for its whole lifetime.
pub type TodoId = Uuid;

/// Identity errors raised when todos enter a list from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoValidationError {
    /// Nil UUID was supplied as a todo id.
    NilId,
    /// The same id appears more than once in one list.
    DuplicateId(TodoId),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "todo id must not be nil"),
            Self::DuplicateId(id) => write!(f, "duplicate todo id: {id}"),
        }
    }
}

impl Error for TodoValidationError {}

/// One entry of a todo list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable ID used by toggle/delete callers.
    pub id: TodoId,
    /// Caller-supplied text, stored verbatim.
    pub text: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo with a freshly generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }

    /// Creates an open todo with a caller-provided id.
    ///
    /// Used when restoring a list snapshot held by the presentation layer.
    ///
    /// # Errors
    /// - Returns [`TodoValidationError::NilId`] for `Uuid::nil()`.
    pub fn with_id(id: TodoId, text: impl Into<String>) -> Result<Self, TodoValidationError> {
        if id.is_nil() {
            return Err(TodoValidationError::NilId);
        }
        Ok(Self {
            id,
            text: text.into(),
            completed: false,
        })
    }

    /// Flips the completion flag. Flipping twice restores the original value.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
