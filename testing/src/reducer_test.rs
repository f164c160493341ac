//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use case_reducer_core::{Action, Reducer, ReducerError};
use std::borrow::Cow;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for error assertion functions
type ErrorAssertion = Box<dyn FnOnce(&ReducerError)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Actions are applied in order, each one to the state the previous one
/// produced. Without `given_state`, the first action sees no state at all
/// and the reducer falls back to its initial state.
///
/// # Example
///
/// ```ignore
/// use case_reducer_testing::ReducerTest;
///
/// ReducerTest::new(counter_reducer())
///     .given_state(0)
///     .when_action(INCREMENT.create(5)?)
///     .then_state(|state| {
///         assert_eq!(*state, 5);
///     })
///     .run();
/// ```
pub struct ReducerTest<R>
where
    R: Reducer,
{
    reducer: R,
    initial_state: Option<R::State>,
    actions: Vec<Action>,
    expect_unchanged: Option<bool>,
    state_assertions: Vec<StateAssertion<R::State>>,
    error_assertions: Vec<ErrorAssertion>,
}

impl<R> ReducerTest<R>
where
    R: Reducer,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            initial_state: None,
            actions: Vec::new(),
            expect_unchanged: None,
            state_assertions: Vec::new(),
            error_assertions: Vec::new(),
        }
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: R::State) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Start from no state at all, so the reducer substitutes its initial state (Given)
    #[must_use]
    pub fn given_no_state(mut self) -> Self {
        self.initial_state = None;
        self
    }

    /// Add an action to apply (When)
    #[must_use]
    pub fn when_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add several actions to apply in order (When)
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&R::State) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Assert that the last action left the state untouched (Then)
    #[must_use]
    pub const fn then_unchanged(mut self) -> Self {
        self.expect_unchanged = Some(true);
        self
    }

    /// Assert that the last action produced a new state (Then)
    #[must_use]
    pub const fn then_changed(mut self) -> Self {
        self.expect_unchanged = Some(false);
        self
    }

    /// Expect one of the actions to fail, and check the error (Then)
    #[must_use]
    pub fn then_error<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&ReducerError) + 'static,
    {
        self.error_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no action was set, if an action fails without `then_error`,
    /// if no action fails despite `then_error`, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    pub fn run(self) {
        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let mut state = self.initial_state;
        let mut unchanged = false;

        for action in &self.actions {
            match self.reducer.reduce(state.as_ref(), action) {
                Ok(next) => {
                    unchanged = matches!(next, Cow::Borrowed(_));
                    let next = next.into_owned();
                    state = Some(next);
                },
                Err(error) => {
                    if self.error_assertions.is_empty() {
                        panic!("Action {} failed unexpectedly: {error}", action.kind());
                    }
                    for assertion in self.error_assertions {
                        assertion(&error);
                    }
                    return;
                },
            }
        }

        assert!(
            self.error_assertions.is_empty(),
            "Expected an action to fail, but all {} succeeded",
            self.actions.len()
        );

        if let Some(expected) = self.expect_unchanged {
            assert_eq!(
                unchanged, expected,
                "Expected the last action to {} the state",
                if expected { "leave" } else { "change" }
            );
        }

        let Some(state) = state else {
            panic!("Reducer produced no state");
        };
        for assertion in self.state_assertions {
            assertion(&state);
        }
    }
}

/// Helper assertions for reducer results
pub mod assertions {
    use case_reducer_core::ReducerError;
    use std::borrow::Cow;
    use std::fmt::Debug;

    /// Assert that a reducer result borrows its input (nothing changed)
    ///
    /// # Panics
    ///
    /// Panics if `next` is owned.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_unchanged<S: Clone + Debug>(next: &Cow<'_, S>) {
        assert!(
            matches!(next, Cow::Borrowed(_)),
            "Expected the state to be unchanged, but got a new value: {next:?}"
        );
    }

    /// Assert that a reducer result is a new value
    ///
    /// # Panics
    ///
    /// Panics if `next` is borrowed.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_changed<S: Clone + Debug>(next: &Cow<'_, S>) {
        assert!(
            matches!(next, Cow::Owned(_)),
            "Expected a new state, but the input was returned: {next:?}"
        );
    }

    /// Assert that a result is a reducer-assembly error
    ///
    /// # Panics
    ///
    /// Panics if `result` is `Ok` or holds a dispatch-time error.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_assembly_error<T>(result: &Result<T, ReducerError>) {
        match result {
            Ok(_) => panic!("Expected an assembly error, but assembly succeeded"),
            Err(error) => assert!(
                error.is_assembly_error(),
                "Expected an assembly error, but got: {error}"
            ),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use case_reducer_core::{ActionCreator, CaseHandler, CaseReducer};

    static INCREMENT: ActionCreator<i64> = ActionCreator::new("counter/increment");

    fn counter() -> CaseReducer<i64> {
        CaseReducer::build(0, |builder| {
            builder.add_case(
                &INCREMENT,
                CaseHandler::replace(|n, action| Ok(Some(n + INCREMENT.payload_of(action)?))),
            )?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_reducer_test_increment() {
        ReducerTest::new(counter())
            .given_state(0)
            .when_action(INCREMENT.create(1).unwrap())
            .then_state(|state| {
                assert_eq!(*state, 1);
            })
            .then_changed()
            .run();
    }

    #[test]
    fn test_reducer_test_sequence_from_no_state() {
        ReducerTest::new(counter())
            .given_no_state()
            .when_actions([INCREMENT.create(2).unwrap(), INCREMENT.create(3).unwrap()])
            .then_state(|state| {
                assert_eq!(*state, 5);
            })
            .run();
    }

    #[test]
    fn test_reducer_test_unchanged() {
        ReducerTest::new(counter())
            .given_state(4)
            .when_action(Action::bare("unknown"))
            .then_unchanged()
            .then_state(|state| assert_eq!(*state, 4))
            .run();
    }

    #[test]
    fn test_reducer_test_error() {
        ReducerTest::new(counter())
            .when_action(Action::new("counter/increment", serde_json::json!("x")))
            .then_error(|error| {
                assert!(matches!(error, ReducerError::Payload { .. }));
            })
            .run();
    }

    #[test]
    fn test_assertions_changed_unchanged() {
        let state = 1_i64;
        assertions::assert_unchanged(&Cow::Borrowed(&state));
        assertions::assert_changed::<i64>(&Cow::Owned(2));
    }

    #[test]
    fn test_assertions_assembly_error() {
        let result = CaseReducer::<i64>::build(0, |builder| {
            builder
                .add_case("a", CaseHandler::replace(|n, _| Ok(Some(*n))))?
                .add_case("a", CaseHandler::replace(|n, _| Ok(Some(*n))))?;
            Ok(())
        });
        assertions::assert_assembly_error(&result);
    }
}
