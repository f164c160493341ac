//! Case handlers: the per-kind update functions of a handler table.
//!
//! A handler either edits a draft in place ([`CaseHandler::Mutate`]) or
//! computes a replacement value ([`CaseHandler::Replace`]). The variant is
//! chosen when the handler is written, so the reducer never has to guess from
//! a return value which discipline a handler follows.

use crate::action::{Action, ActionKind};
use crate::draft::{Draft, Draftable};
use crate::error::ReducerError;
use std::fmt;

/// Boxed in-place handler.
pub type MutateFn<S> =
    Box<dyn Fn(&mut Draft<'_, S>, &Action) -> Result<(), ReducerError> + Send + Sync>;

/// Boxed replacing handler. `Ok(None)` means "no new value".
pub type ReplaceFn<S> = Box<dyn Fn(&S, &Action) -> Result<Option<S>, ReducerError> + Send + Sync>;

/// A handler for one action kind.
pub enum CaseHandler<S: Clone> {
    /// Writes into a draft of the current state.
    Mutate(MutateFn<S>),
    /// Reads the current state and returns the next one.
    ///
    /// Returning `Ok(None)` keeps the current value when it is draftable or
    /// `null`, and is an error for any other value.
    Replace(ReplaceFn<S>),
}

impl<S: Clone> CaseHandler<S> {
    /// Wraps an in-place handler.
    ///
    /// An inline closure that calls methods on the draft needs the state type
    /// named, as in `CaseHandler::<Vec<String>>::mutate(..)`. Registering it
    /// through [`ReducerBuilder::add_case_mut`](crate::ReducerBuilder::add_case_mut)
    /// avoids that.
    pub fn mutate<F>(handler: F) -> Self
    where
        F: Fn(&mut Draft<'_, S>, &Action) -> Result<(), ReducerError> + Send + Sync + 'static,
    {
        Self::Mutate(Box::new(handler))
    }

    /// Wraps a replacing handler.
    pub fn replace<F>(handler: F) -> Self
    where
        F: Fn(&S, &Action) -> Result<Option<S>, ReducerError> + Send + Sync + 'static,
    {
        Self::Replace(Box::new(handler))
    }

    /// Whether this handler edits a draft in place.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::Mutate(_))
    }
}

impl<S: Clone + Draftable> CaseHandler<S> {
    /// Runs the handler against `draft`.
    ///
    /// `kind` is the key the handler was registered under, used for error
    /// messages.
    ///
    /// # Errors
    ///
    /// Propagates the handler's own error, and returns
    /// [`ReducerError::UndefinedReturn`] when a replacing handler returns
    /// nothing for a value that is neither draftable nor `null`.
    pub fn apply(
        &self,
        kind: &ActionKind,
        draft: &mut Draft<'_, S>,
        action: &Action,
    ) -> Result<(), ReducerError> {
        match self {
            Self::Mutate(handler) => handler(draft, action),
            Self::Replace(handler) => match handler(&**draft, action)? {
                Some(next) => {
                    draft.replace(next);
                    Ok(())
                },
                None if draft.is_draftable() || draft.is_null() => Ok(()),
                None => Err(ReducerError::UndefinedReturn { kind: kind.clone() }),
            },
        }
    }
}

impl<S: Clone> fmt::Debug for CaseHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutate(_) => write!(f, "CaseHandler::Mutate(<fn>)"),
            Self::Replace(_) => write!(f, "CaseHandler::Replace(<fn>)"),
        }
    }
}
