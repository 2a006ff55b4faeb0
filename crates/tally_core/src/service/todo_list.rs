//! Todo list service.
//!
//! # Responsibility
//! - Keep an ordered, in-memory list of todo items.
//! - Provide add/toggle/delete/list entry points for UI callers.
//!
//! # Invariants
//! - Items keep insertion order; deletion preserves the order of the rest.
//! - Every id in the list is unique and generated by the list itself, or
//!   checked on the `from_todos` import path.
//! - Unknown ids are tolerated: toggle/delete report `false` and change nothing.
//! - Todo text is user content and never reaches the log.

use crate::model::todo::{Todo, TodoId, TodoValidationError};
use log::debug;
use std::collections::HashSet;

/// Ordered in-memory todo list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a list from previously listed items, keeping their order.
    ///
    /// # Errors
    /// - [`TodoValidationError::NilId`] when any item carries a nil id.
    /// - [`TodoValidationError::DuplicateId`] for the first repeated id.
    pub fn from_todos(todos: Vec<Todo>) -> Result<Self, TodoValidationError> {
        let mut seen = HashSet::with_capacity(todos.len());
        for todo in &todos {
            if todo.id.is_nil() {
                return Err(TodoValidationError::NilId);
            }
            if !seen.insert(todo.id) {
                return Err(TodoValidationError::DuplicateId(todo.id));
            }
        }
        Ok(Self { todos })
    }

    /// Appends an open todo and returns its new id.
    ///
    /// Text is stored as given; empty and repeated texts are allowed.
    pub fn add_todo(&mut self, text: impl Into<String>) -> TodoId {
        let mut todo = Todo::new(text);
        // Ids stay unique even on a v4 collision.
        while self.contains(todo.id) {
            todo.id = TodoId::new_v4();
        }
        let id = todo.id;
        self.todos.push(todo);
        debug!(
            "event=todo_add module=todo status=ok id={id} count={}",
            self.todos.len()
        );
        id
    }

    /// Flips the completion flag of the first todo with `id`.
    ///
    /// Returns whether a todo was found.
    pub fn toggle_todo(&mut self, id: TodoId) -> bool {
        match self.todos.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.toggle();
                debug!(
                    "event=todo_toggle module=todo status=ok id={id} completed={}",
                    todo.completed
                );
                true
            }
            None => {
                debug!("event=todo_toggle module=todo status=not_found id={id}");
                false
            }
        }
    }

    /// Removes every todo with `id`, keeping the order of the rest.
    ///
    /// Returns whether anything was removed.
    pub fn delete_todo(&mut self, id: TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| todo.id != id);
        let removed = before - self.todos.len();
        if removed == 0 {
            debug!("event=todo_delete module=todo status=not_found id={id}");
            return false;
        }
        debug!(
            "event=todo_delete module=todo status=ok id={id} count={}",
            self.todos.len()
        );
        true
    }

    /// Read-only view of all todos in list order.
    pub fn get_todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get_todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of completed todos, for "n of m done" counters.
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }

    fn contains(&self, id: TodoId) -> bool {
        self.todos.iter().any(|todo| todo.id == id)
    }
}
