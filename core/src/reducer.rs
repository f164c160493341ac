//! Reducers: pure functions from `(state, action)` to the next state.
//!
//! [`CaseReducer`] is the handler-table reducer. It is assembled either from a
//! plain mapping of kind to handler ([`CaseReducer::from_map`]) or through a
//! [`ReducerBuilder`] callback ([`CaseReducer::build`]), and dispatches each
//! action to the handler registered for its kind.
//!
//! Every dispatch runs inside a [`Draft`] of the incoming state, so mutating
//! and replacing handlers can sit in the same table. A dispatch that writes
//! nothing returns `Cow::Borrowed` of the incoming state.

use crate::action::{Action, ActionKind, IntoActionKind};
use crate::builder::{HandlerTable, ReducerBuilder};
use crate::draft::{Draft, Draftable, try_produce};
use crate::error::ReducerError;
use crate::handler::CaseHandler;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A pure function from `(state, action)` to the next state.
///
/// A missing state (`None`) stands for "not initialized yet": the reducer
/// substitutes its initial state before handling the action.
pub trait Reducer {
    /// The state this reducer produces.
    type State: Clone;

    /// Computes the next state.
    ///
    /// Returns `Cow::Borrowed` when nothing changed, pointing either at the
    /// incoming state or at the reducer's own initial state.
    ///
    /// # Errors
    ///
    /// Returns the error of the first handler that fails. A failed dispatch
    /// has no effect on the incoming state.
    fn reduce<'a>(
        &'a self,
        state: Option<&'a Self::State>,
        action: &Action,
    ) -> Result<Cow<'a, Self::State>, ReducerError>;
}

impl<R: Reducer + ?Sized> Reducer for Box<R> {
    type State = R::State;

    fn reduce<'a>(
        &'a self,
        state: Option<&'a Self::State>,
        action: &Action,
    ) -> Result<Cow<'a, Self::State>, ReducerError> {
        (**self).reduce(state, action)
    }
}

/// A reducer backed by a table of per-kind handlers.
pub struct CaseReducer<S: Clone> {
    initial: S,
    table: HandlerTable<S>,
}

impl<S: Clone + Draftable> CaseReducer<S> {
    /// Creates a reducer from a direct mapping of kind to handler.
    ///
    /// The keys may be raw strings, kinds, or references to typed creators
    /// (creators compare and hash by kind).
    pub fn from_map<K: IntoActionKind>(initial: S, cases: HashMap<K, CaseHandler<S>>) -> Self {
        let cases = cases
            .into_iter()
            .map(|(kind, handler)| (kind.into_action_kind(), handler));

        Self {
            initial,
            table: HandlerTable::from_cases(cases),
        }
    }

    /// Creates a reducer by letting `register` fill in a builder.
    ///
    /// # Errors
    ///
    /// Returns the first registration error, for example a duplicate kind.
    /// No reducer is produced in that case, so a misassembled table can never
    /// be dispatched through.
    pub fn build<F>(initial: S, register: F) -> Result<Self, ReducerError>
    where
        F: FnOnce(&mut ReducerBuilder<S>) -> Result<(), ReducerError>,
    {
        let mut builder = ReducerBuilder::new();
        register(&mut builder).inspect_err(|error| {
            tracing::warn!(%error, "Reducer assembly failed");
        })?;

        tracing::debug!(
            cases = builder.kinds().count(),
            "Assembled case reducer"
        );

        Ok(Self {
            initial,
            table: builder.into_table(),
        })
    }

    /// The state substituted for a missing one.
    #[must_use]
    pub const fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Registered kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &ActionKind> {
        self.table.cases.keys()
    }

    /// Whether an exact case is registered for `kind`.
    pub fn handles(&self, kind: impl IntoActionKind) -> bool {
        self.table.cases.contains_key(&kind.into_action_kind())
    }

    /// Computes the next state, substituting the initial state for `None`.
    ///
    /// # Errors
    ///
    /// See [`Reducer::reduce`].
    pub fn reduce<'a>(
        &'a self,
        state: Option<&'a S>,
        action: &Action,
    ) -> Result<Cow<'a, S>, ReducerError> {
        let base = state.unwrap_or(&self.initial);
        let next = try_produce(base, |draft| self.reduce_draft(draft, action))?;

        tracing::trace!(
            kind = action.kind().as_str(),
            changed = matches!(next, Cow::Owned(_)),
            "Reduced action"
        );
        Ok(next)
    }

    /// Applies the handler table to a draft the caller already holds.
    ///
    /// This is the building block for wrapping the reducer in an explicit
    /// [`produce`](crate::draft::produce) call:
    ///
    /// ```
    /// use case_reducer_core::{draft::try_produce, Action, CaseReducer};
    ///
    /// # fn main() -> Result<(), case_reducer_core::ReducerError> {
    /// let reducer = CaseReducer::build(Vec::<i64>::new(), |builder| {
    ///     builder.add_case_mut("push", |draft, action| {
    ///         draft.push(action.payload_as()?);
    ///         Ok(())
    ///     })?;
    ///     Ok(())
    /// })?;
    ///
    /// let state = vec![1];
    /// let action = Action::new("push", serde_json::json!(2));
    /// let next = try_produce(&state, |draft| reducer.reduce_draft(draft, &action))?;
    /// assert_eq!(*next, vec![1, 2]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the error of the first handler that fails; writes made by
    /// earlier handlers stay in the draft.
    pub fn reduce_draft(&self, draft: &mut Draft<'_, S>, action: &Action) -> Result<(), ReducerError> {
        let kind = action.kind();
        let mut handled = false;

        if let Some(handler) = self.table.cases.get(kind) {
            handler
                .apply(kind, draft, action)
                .inspect_err(|error| log_failure(kind, error))?;
            handled = true;
        }

        for matcher in self.table.matchers.iter().filter(|m| m.accepts(action)) {
            matcher
                .handler()
                .apply(kind, draft, action)
                .inspect_err(|error| log_failure(kind, error))?;
            handled = true;
        }

        if handled {
            return Ok(());
        }

        match &self.table.default_case {
            Some(handler) => handler
                .apply(kind, draft, action)
                .inspect_err(|error| log_failure(kind, error)),
            None => {
                tracing::debug!(kind = kind.as_str(), "No handler registered, state unchanged");
                Ok(())
            },
        }
    }
}

fn log_failure(kind: &ActionKind, error: &ReducerError) {
    tracing::warn!(kind = kind.as_str(), %error, "Case handler failed");
}

impl<S: Clone + Draftable> Reducer for CaseReducer<S> {
    type State = S;

    fn reduce<'a>(
        &'a self,
        state: Option<&'a S>,
        action: &Action,
    ) -> Result<Cow<'a, S>, ReducerError> {
        Self::reduce(self, state, action)
    }
}

impl<S: Clone + fmt::Debug> fmt::Debug for CaseReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseReducer")
            .field("initial", &self.initial)
            .field("cases", &self.table.cases)
            .field("matchers", &self.table.matchers)
            .field("default_case", &self.table.default_case)
            .finish()
    }
}

/// Wraps a plain function as a [`Reducer`]. Created by [`reducer_fn`].
pub struct FnReducer<S, F> {
    initial: S,
    reduce: F,
}

/// Creates a reducer from a function returning `Ok(None)` for "unchanged".
///
/// ```
/// use case_reducer_core::{reducer_fn, Action, Reducer};
///
/// let toggle = reducer_fn(false, |on: &bool, action: &Action| {
///     Ok((action.kind().as_str() == "toggle").then_some(!on))
/// });
///
/// let next = toggle.reduce(None, &Action::bare("toggle")).map(|s| *s);
/// assert_eq!(next.ok(), Some(true));
/// ```
pub const fn reducer_fn<S, F>(initial: S, reduce: F) -> FnReducer<S, F>
where
    S: Clone,
    F: Fn(&S, &Action) -> Result<Option<S>, ReducerError>,
{
    FnReducer { initial, reduce }
}

impl<S, F> Reducer for FnReducer<S, F>
where
    S: Clone,
    F: Fn(&S, &Action) -> Result<Option<S>, ReducerError>,
{
    type State = S;

    fn reduce<'a>(
        &'a self,
        state: Option<&'a S>,
        action: &Action,
    ) -> Result<Cow<'a, S>, ReducerError> {
        let base = state.unwrap_or(&self.initial);
        Ok((self.reduce)(base, action)?.map_or(Cow::Borrowed(base), Cow::Owned))
    }
}

impl<S: fmt::Debug, F> fmt::Debug for FnReducer<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnReducer")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}
