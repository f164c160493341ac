//! A minimal synchronous state container.
//!
//! [`Store`] owns the current state and a [`Reducer`], threads every
//! dispatched action through the reducer, and tells subscribers when the
//! state changed. It is single-threaded: dispatch takes `&mut self`.
//!
//! # Example
//!
//! ```
//! use case_reducer_core::{Action, CaseHandler, CaseReducer, Store};
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let reducer = CaseReducer::build(0_i64, |builder| {
//!     builder.add_case("increment", CaseHandler::replace(|n, _| Ok(Some(n + 1))))?;
//!     Ok(())
//! })?;
//!
//! let mut store = Store::new(reducer)?;
//! store.dispatch(Action::bare("increment"))?;
//! assert_eq!(*store.state(), 1);
//! # Ok(())
//! # }
//! ```

use crate::action::{Action, ActionKind};
use crate::error::ReducerError;
use crate::reducer::Reducer;
use std::borrow::Cow;
use std::fmt;

/// Kind of the action dispatched once, without state, when a store is created.
pub const INIT: ActionKind = ActionKind::from_static("@@case-reducer/INIT");

/// Identifies a subscription so it can be removed again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<S> = Box<dyn FnMut(&S)>;

/// Holds the current state and routes actions through a reducer.
pub struct Store<R: Reducer> {
    reducer: R,
    state: R::State,
    listeners: Vec<(SubscriptionId, Listener<R::State>)>,
    next_subscription: u64,
}

impl<R: Reducer> Store<R> {
    /// Creates a store whose state is the reducer's answer to [`INIT`].
    ///
    /// # Errors
    ///
    /// Returns the reducer's error if it cannot produce an initial state.
    pub fn new(reducer: R) -> Result<Self, ReducerError> {
        let state = reducer.reduce(None, &Action::bare(INIT))?.into_owned();
        Ok(Self::with_state(reducer, state))
    }

    /// Creates a store with an explicit starting state.
    pub const fn with_state(reducer: R, state: R::State) -> Self {
        Self {
            reducer,
            state,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> &R::State {
        &self.state
    }

    /// The reducer the store dispatches through.
    #[must_use]
    pub const fn reducer(&self) -> &R {
        &self.reducer
    }

    /// Runs `action` through the reducer.
    ///
    /// Subscribers are called only when the reducer produced a new value.
    ///
    /// # Errors
    ///
    /// Returns the reducer's error; the state is left as it was.
    #[tracing::instrument(skip_all, fields(kind = action.kind().as_str()), name = "store_dispatch")]
    pub fn dispatch(&mut self, action: Action) -> Result<(), ReducerError> {
        let next = match self.reducer.reduce(Some(&self.state), &action)? {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };

        let Some(next) = next else {
            tracing::trace!("State unchanged");
            return Ok(());
        };

        self.state = next;
        tracing::trace!(listeners = self.listeners.len(), "State changed, notifying");
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
        Ok(())
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&R::State) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Consumes the store and returns its state.
    pub fn into_state(self) -> R::State {
        self.state
    }
}

impl<R> fmt::Debug for Store<R>
where
    R: Reducer,
    R::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
