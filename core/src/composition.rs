//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run several reducers over the same state, one after another
//! - **`scope_reducer`**: Focus a reducer on one field of a larger state
//!
//! Both keep the "unchanged means borrowed" contract of [`Reducer::reduce`]:
//! when no inner reducer produced a new value, the composite hands back the
//! incoming state itself.
//!
//! # Examples
//!
//! ```
//! use case_reducer_core::composition::scope_reducer;
//! use case_reducer_core::{Action, CaseHandler, CaseReducer, Reducer};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct AppState {
//!     count: i64,
//!     title: String,
//! }
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let counter = CaseReducer::build(0_i64, |builder| {
//!     builder.add_case("increment", CaseHandler::replace(|n, _| Ok(Some(n + 1))))?;
//!     Ok(())
//! })?;
//!
//! let app = scope_reducer(
//!     counter,
//!     AppState::default(),
//!     |app: &AppState| &app.count,
//!     |app: &mut AppState, count| app.count = count,
//! );
//!
//! let next = app.reduce(None, &Action::bare("increment"))?;
//! assert_eq!(next.count, 1);
//! # Ok(())
//! # }
//! ```

use crate::action::Action;
use crate::error::ReducerError;
use crate::reducer::Reducer;
use std::borrow::Cow;

/// A type-erased reducer over `S`, as accepted by [`combine_reducers`].
pub type BoxedReducer<S> = Box<dyn Reducer<State = S> + Send + Sync>;

/// Combines reducers that operate on the same state type.
///
/// Each reducer sees the output of the one before it. The first reducer
/// supplies the initial state when none is given.
///
/// # Examples
///
/// ```
/// use case_reducer_core::composition::{BoxedReducer, combine_reducers};
/// use case_reducer_core::{reducer_fn, Action, Reducer};
///
/// let double = reducer_fn(1_i64, |n: &i64, _: &Action| Ok(Some(n * 2)));
/// let add_one = reducer_fn(0_i64, |n: &i64, _: &Action| Ok(Some(n + 1)));
///
/// let reducers: Vec<BoxedReducer<i64>> = vec![Box::new(double), Box::new(add_one)];
/// let combined = combine_reducers(reducers);
/// let next = combined.reduce(None, &Action::bare("any")).map(|n| *n);
/// assert_eq!(next.ok(), Some(3));
/// ```
#[must_use]
pub fn combine_reducers<S>(reducers: Vec<BoxedReducer<S>>) -> CombinedReducer<S>
where
    S: Clone + 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S>
where
    S: Clone + 'static,
{
    reducers: Vec<BoxedReducer<S>>,
}

impl<S> Reducer for CombinedReducer<S>
where
    S: Clone + 'static,
{
    type State = S;

    fn reduce<'a>(
        &'a self,
        state: Option<&'a S>,
        action: &Action,
    ) -> Result<Cow<'a, S>, ReducerError> {
        let Some((first, rest)) = self.reducers.split_first() else {
            return state.map(Cow::Borrowed).ok_or(ReducerError::MissingInitialState);
        };

        let mut current = first.reduce(state, action)?;
        for reducer in rest {
            current = match current {
                Cow::Borrowed(borrowed) => reducer.reduce(Some(borrowed), action)?,
                Cow::Owned(owned) => {
                    let changed = match reducer.reduce(Some(&owned), action)? {
                        Cow::Owned(next) => Some(next),
                        Cow::Borrowed(_) => None,
                    };
                    Cow::Owned(changed.unwrap_or(owned))
                },
            };
        }

        Ok(current)
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// `initial` is the parent state used when none is given; the child reducer
/// receives the field `get_state` points at, and a changed child is written
/// back into a copy of the parent with `set_state`.
pub fn scope_reducer<S, SubS, R>(
    reducer: R,
    initial: S,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
) -> ScopedReducer<S, SubS, R>
where
    S: Clone,
    SubS: Clone,
    R: Reducer<State = SubS>,
{
    ScopedReducer {
        reducer,
        initial,
        get_state,
        set_state,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R>
where
    S: Clone,
    SubS: Clone,
    R: Reducer<State = SubS>,
{
    reducer: R,
    initial: S,
    get_state: fn(&S) -> &SubS,
    set_state: fn(&mut S, SubS),
}

impl<S, SubS, R> Reducer for ScopedReducer<S, SubS, R>
where
    S: Clone,
    SubS: Clone,
    R: Reducer<State = SubS>,
{
    type State = S;

    fn reduce<'a>(
        &'a self,
        state: Option<&'a S>,
        action: &Action,
    ) -> Result<Cow<'a, S>, ReducerError> {
        let parent = state.unwrap_or(&self.initial);

        match self.reducer.reduce(Some((self.get_state)(parent)), action)? {
            Cow::Borrowed(_) => Ok(Cow::Borrowed(parent)),
            Cow::Owned(child) => {
                let mut next = parent.clone();
                (self.set_state)(&mut next, child);
                Ok(Cow::Owned(next))
            },
        }
    }
}
