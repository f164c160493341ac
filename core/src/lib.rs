//! # Case Reducer Core
//!
//! Handler-table reducers with copy-on-write drafts.
//!
//! A reducer here is a pure function `(state?, action) -> next state`. Instead
//! of one big `match`, it is assembled from a table that maps each action kind
//! to a small handler, and every handler runs against a [`Draft`] of the
//! current state so it can either edit in place or hand back a new value.
//!
//! ## Core Concepts
//!
//! - **Action**: A tagged record: a kind plus a JSON payload ([`Action`])
//! - **Action creator**: A typed factory for one kind ([`ActionCreator`])
//! - **Draft**: A writable copy-on-write view over an immutable value ([`Draft`])
//! - **Case handler**: The update function for one kind, either mutating or replacing ([`CaseHandler`])
//! - **Builder**: Fluent registration with uniqueness checks ([`ReducerBuilder`])
//! - **Reducer**: The assembled dispatch function ([`CaseReducer`], [`Reducer`])
//! - **Store**: A synchronous container that threads state through a reducer ([`Store`])
//!
//! ## Example
//!
//! ```
//! use case_reducer_core::{ActionCreator, CaseReducer};
//!
//! static ADD: ActionCreator<String> = ActionCreator::new("todos/add");
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let reducer = CaseReducer::build(Vec::<String>::new(), |builder| {
//!     builder.add_case_mut(&ADD, |draft, action| {
//!         draft.push(ADD.payload_of(action)?);
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! let state = reducer.reduce(None, &ADD.create("Buy milk".into())?)?;
//! assert_eq!(*state, ["Buy milk"]);
//! # Ok(())
//! # }
//! ```

// Lets `#[derive(Draftable)]` expand to `::case_reducer_core::...` inside this crate's own tests.
extern crate self as case_reducer_core;

pub mod action;
pub mod builder;
pub mod composition;
pub mod draft;
pub mod error;
pub mod handler;
pub mod reducer;
pub mod store;

// Re-export commonly used types
pub use action::{Action, ActionCreator, ActionKind, IntoActionKind};
pub use builder::ReducerBuilder;
pub use draft::{Draft, Draftable, produce, try_produce};
pub use error::ReducerError;
pub use handler::CaseHandler;
pub use reducer::{CaseReducer, Reducer, reducer_fn};
pub use store::Store;
