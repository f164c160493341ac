//! Fluent registration of case handlers.
//!
//! [`ReducerBuilder`] collects three kinds of entries, in this order:
//!
//! 1. **Cases** ([`add_case`](ReducerBuilder::add_case)): one handler per
//!    action kind. A kind can be registered once, whether it is named by a
//!    typed creator or by its raw string.
//! 2. **Matchers** ([`add_matcher`](ReducerBuilder::add_matcher)): a predicate
//!    plus a handler. Every matcher whose predicate accepts the action runs,
//!    in registration order, after the exact case.
//! 3. **Default case** ([`add_default_case`](ReducerBuilder::add_default_case)):
//!    runs only when no case and no matcher applied.
//!
//! Registering out of order, registering a kind twice, or adding a second
//! default case fails right away, so a misassembled reducer never reaches
//! dispatch.

use crate::action::{Action, ActionKind, IntoActionKind};
use crate::draft::Draft;
use crate::error::ReducerError;
use crate::handler::CaseHandler;
use indexmap::IndexMap;
use std::fmt;

/// Boxed matcher predicate.
pub type PredicateFn = Box<dyn Fn(&Action) -> bool + Send + Sync>;

/// A predicate-guarded handler.
pub struct Matcher<S: Clone> {
    predicate: PredicateFn,
    handler: CaseHandler<S>,
}

impl<S: Clone> Matcher<S> {
    /// Whether this matcher applies to `action`.
    #[must_use]
    pub fn accepts(&self, action: &Action) -> bool {
        (self.predicate)(action)
    }

    /// The handler run for accepted actions.
    #[must_use]
    pub const fn handler(&self) -> &CaseHandler<S> {
        &self.handler
    }
}

impl<S: Clone> fmt::Debug for Matcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher")
            .field("handler", &self.handler)
            .finish_non_exhaustive()
    }
}

/// The assembled handler table a reducer dispatches through.
pub struct HandlerTable<S: Clone> {
    pub(crate) cases: IndexMap<ActionKind, CaseHandler<S>>,
    pub(crate) matchers: Vec<Matcher<S>>,
    pub(crate) default_case: Option<CaseHandler<S>>,
}

impl<S: Clone> HandlerTable<S> {
    pub(crate) fn from_cases(cases: impl IntoIterator<Item = (ActionKind, CaseHandler<S>)>) -> Self {
        Self {
            cases: cases.into_iter().collect(),
            matchers: Vec::new(),
            default_case: None,
        }
    }
}

/// Fluent accumulator of case handlers.
///
/// # Example
///
/// ```
/// use case_reducer_core::{ActionCreator, CaseHandler, CaseReducer};
///
/// static INCREMENT: ActionCreator<i64> = ActionCreator::new("counter/increment");
///
/// # fn main() -> Result<(), case_reducer_core::ReducerError> {
/// let reducer = CaseReducer::build(0_i64, |builder| {
///     builder
///         .add_case(&INCREMENT, CaseHandler::replace(|state, action| {
///             Ok(Some(state + INCREMENT.payload_of(action)?))
///         }))?
///         .add_case("counter/decrement", CaseHandler::replace(|state, action| {
///             Ok(Some(state - action.payload_as::<i64>()?))
///         }))?;
///     Ok(())
/// })?;
///
/// let next = reducer.reduce(None, &INCREMENT.create(5)?)?;
/// assert_eq!(*next, 5);
/// # Ok(())
/// # }
/// ```
pub struct ReducerBuilder<S: Clone> {
    table: HandlerTable<S>,
}

impl<S: Clone> ReducerBuilder<S> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HandlerTable::from_cases(std::iter::empty()),
        }
    }

    /// Registers `handler` for `kind`.
    ///
    /// # Errors
    ///
    /// - [`ReducerError::EmptyKind`] if `kind` is the empty string.
    /// - [`ReducerError::DuplicateCase`] if `kind` already has a handler.
    /// - [`ReducerError::CaseAfterMatcher`] if a matcher was already added.
    /// - [`ReducerError::CaseAfterDefault`] if the default case was already added.
    pub fn add_case(
        &mut self,
        kind: impl IntoActionKind,
        handler: CaseHandler<S>,
    ) -> Result<&mut Self, ReducerError> {
        let kind = kind.into_action_kind();

        if kind.as_str().is_empty() {
            return Err(ReducerError::EmptyKind);
        }
        if self.table.default_case.is_some() {
            return Err(ReducerError::CaseAfterDefault { kind });
        }
        if !self.table.matchers.is_empty() {
            return Err(ReducerError::CaseAfterMatcher { kind });
        }
        if self.table.cases.contains_key(&kind) {
            return Err(ReducerError::DuplicateCase { kind });
        }

        tracing::trace!(
            kind = kind.as_str(),
            mutating = handler.is_mutating(),
            "Registered case handler"
        );
        self.table.cases.insert(kind, handler);
        Ok(self)
    }

    /// Registers an in-place handler for `kind`.
    ///
    /// Same as `add_case(kind, CaseHandler::mutate(handler))`, except that the
    /// closure's draft type comes from the builder, so inline closures need no
    /// annotations.
    ///
    /// # Errors
    ///
    /// See [`add_case`](Self::add_case).
    pub fn add_case_mut<F>(
        &mut self,
        kind: impl IntoActionKind,
        handler: F,
    ) -> Result<&mut Self, ReducerError>
    where
        F: Fn(&mut Draft<'_, S>, &Action) -> Result<(), ReducerError> + Send + Sync + 'static,
    {
        self.add_case(kind, CaseHandler::mutate(handler))
    }

    /// Registers a replacing handler for `kind`.
    ///
    /// Same as `add_case(kind, CaseHandler::replace(handler))`.
    ///
    /// # Errors
    ///
    /// See [`add_case`](Self::add_case).
    pub fn add_case_replace<F>(
        &mut self,
        kind: impl IntoActionKind,
        handler: F,
    ) -> Result<&mut Self, ReducerError>
    where
        F: Fn(&S, &Action) -> Result<Option<S>, ReducerError> + Send + Sync + 'static,
    {
        self.add_case(kind, CaseHandler::replace(handler))
    }

    /// Registers `handler` for every action `predicate` accepts.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::MatcherAfterDefault`] if the default case was
    /// already added.
    pub fn add_matcher<P>(
        &mut self,
        predicate: P,
        handler: CaseHandler<S>,
    ) -> Result<&mut Self, ReducerError>
    where
        P: Fn(&Action) -> bool + Send + Sync + 'static,
    {
        if self.table.default_case.is_some() {
            return Err(ReducerError::MatcherAfterDefault);
        }

        self.table.matchers.push(Matcher {
            predicate: Box::new(predicate),
            handler,
        });
        Ok(self)
    }

    /// Registers the fallback handler for actions nothing else handled.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::DuplicateDefault`] on a second call.
    pub fn add_default_case(&mut self, handler: CaseHandler<S>) -> Result<&mut Self, ReducerError> {
        if self.table.default_case.is_some() {
            return Err(ReducerError::DuplicateDefault);
        }

        self.table.default_case = Some(handler);
        Ok(self)
    }

    /// Kinds registered so far, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &ActionKind> {
        self.table.cases.keys()
    }

    pub(crate) fn into_table(self) -> HandlerTable<S> {
        self.table
    }
}

impl<S: Clone> Default for ReducerBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> fmt::Debug for ReducerBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducerBuilder")
            .field("cases", &self.table.cases.keys().collect::<Vec<_>>())
            .field("matchers", &self.table.matchers.len())
            .field("default_case", &self.table.default_case.is_some())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::action::ActionCreator;

    static INCREMENT: ActionCreator<i64> = ActionCreator::new("counter/increment");

    fn noop() -> CaseHandler<i64> {
        CaseHandler::replace(|state, _| Ok(Some(*state)))
    }

    #[test]
    fn cases_chain_and_keep_registration_order() {
        let mut builder = ReducerBuilder::new();
        builder
            .add_case("b", noop())
            .unwrap()
            .add_case("a", noop())
            .unwrap()
            .add_case(&INCREMENT, noop())
            .unwrap();

        let kinds: Vec<_> = builder.kinds().map(ActionKind::as_str).collect();
        assert_eq!(kinds, ["b", "a", "counter/increment"]);
    }

    #[test]
    fn duplicate_typed_registration_fails() {
        let mut builder = ReducerBuilder::new();
        builder.add_case(&INCREMENT, noop()).unwrap();
        let err = builder.add_case(&INCREMENT, noop()).unwrap_err();
        assert!(matches!(err, ReducerError::DuplicateCase { kind } if kind == *INCREMENT.kind()));
    }

    #[test]
    fn typed_then_string_registration_fails() {
        let mut builder = ReducerBuilder::new();
        builder.add_case(&INCREMENT, noop()).unwrap();
        let err = builder.add_case("counter/increment", noop()).unwrap_err();
        assert!(matches!(err, ReducerError::DuplicateCase { .. }));
    }

    #[test]
    fn case_after_matcher_fails() {
        let mut builder = ReducerBuilder::new();
        builder.add_matcher(|_| true, noop()).unwrap();
        let err = builder.add_case("late", noop()).unwrap_err();
        assert!(matches!(err, ReducerError::CaseAfterMatcher { .. }));
    }

    #[test]
    fn entries_after_default_fail() {
        let mut builder = ReducerBuilder::new();
        builder.add_default_case(noop()).unwrap();

        assert!(matches!(
            builder.add_case("late", noop()).unwrap_err(),
            ReducerError::CaseAfterDefault { .. }
        ));
        assert!(matches!(
            builder.add_matcher(|_| true, noop()).unwrap_err(),
            ReducerError::MatcherAfterDefault
        ));
        assert!(matches!(
            builder.add_default_case(noop()).unwrap_err(),
            ReducerError::DuplicateDefault
        ));
    }

    #[test]
    fn empty_kind_is_rejected() {
        let mut builder = ReducerBuilder::new();
        let err = builder.add_case("", noop()).unwrap_err();
        assert!(matches!(err, ReducerError::EmptyKind));
        assert_eq!(builder.kinds().count(), 0);

        let err = builder.add_case(String::new(), noop()).unwrap_err();
        assert!(matches!(err, ReducerError::EmptyKind));
    }

    #[test]
    fn inline_closures_take_the_state_type_from_the_builder() {
        let mut builder = ReducerBuilder::<Vec<String>>::new();
        builder
            .add_case_mut("push", |draft, action| {
                draft.push(action.payload_as()?);
                Ok(())
            })
            .unwrap()
            .add_case_replace("clear", |list, _| Ok((!list.is_empty()).then(Vec::new)))
            .unwrap();

        let kinds: Vec<_> = builder.kinds().map(ActionKind::as_str).collect();
        assert_eq!(kinds, ["push", "clear"]);

        let err = builder.add_case_mut("push", |_, _| Ok(())).unwrap_err();
        assert!(matches!(err, ReducerError::DuplicateCase { .. }));
    }

    #[test]
    fn debug_lists_kinds() {
        let mut builder = ReducerBuilder::new();
        builder.add_case("a", noop()).unwrap();
        let debug = format!("{builder:?}");
        assert!(debug.contains("\"a\""));
    }
}
