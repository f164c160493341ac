//! Domain types for the todo list.

use case_reducer_core::ActionCreator;
use case_reducer_macros::Draftable;
use std::fmt;
use std::sync::Arc;

/// A single todo
#[derive(Draftable, Clone, Debug, PartialEq, Eq)]
pub struct Todo {
    /// What needs doing
    pub text: String,
    /// Whether it is done
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "x" } else { " " };
        write!(f, "[{status}] {}", self.text)
    }
}

/// The todo list, in insertion order.
///
/// Each todo sits behind an [`Arc`] so a new list shares every todo it did
/// not change with the list it came from.
pub type TodoList = Vec<Arc<Todo>>;

/// Append an open todo with the given text
pub static ADD_TODO: ActionCreator<String> = ActionCreator::new("todos/add");

/// Flip the completion flag of the todo at the given index
pub static TOGGLE_TODO: ActionCreator<usize> = ActionCreator::new("todos/toggle");
