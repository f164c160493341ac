//! Todo list example: one domain, three handler styles.
//!
//! The same two actions (`todos/add` and `todos/toggle`) are handled three ways:
//!
//! - [`mutating_reducer`]: handlers edit the draft in place
//! - [`replacing_reducer`]: handlers build and return the next list
//! - [`manual_reducer`] + [`reduce_manually`]: a plain kind-to-handler map
//!   whose dispatch is wrapped in an explicit `try_produce` by the caller
//!
//! All three agree on every input, and all three keep untouched todos shared
//! with the previous list.
//!
//! # Quick Start
//!
//! ```
//! use todos::{ADD_TODO, TOGGLE_TODO, mutating_reducer};
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let reducer = mutating_reducer()?;
//!
//! let list = reducer.reduce(None, &ADD_TODO.create("Buy milk".to_string())?)?.into_owned();
//! let list = reducer.reduce(Some(&list), &TOGGLE_TODO.create(0)?)?;
//!
//! assert_eq!(list.len(), 1);
//! assert!(list[0].completed);
//! # Ok(())
//! # }
//! ```

pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use reducer::{manual_reducer, mutating_reducer, reduce_manually, replacing_reducer};
pub use types::{ADD_TODO, TOGGLE_TODO, Todo, TodoList};
