//! # Case Reducer Testing
//!
//! Testing utilities and helpers for case-reducer.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Assertion helpers for reducer results
//! - [`properties`]: proptest strategies for actions and payloads
//! - [`init_tracing`]: Log capture for tests
//!
//! ## Example
//!
//! ```ignore
//! use case_reducer_testing::ReducerTest;
//!
//! #[test]
//! fn adds_a_todo() {
//!     ReducerTest::new(todos_reducer())
//!         .given_no_state()
//!         .when_action(ADD_TODO.create("Buy milk".into()).unwrap())
//!         .then_state(|todos| assert_eq!(todos.len(), 1))
//!         .run();
//! }
//! ```

pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Property-based testing utilities
///
/// Strategies for generating actions and payloads with proptest.
pub mod properties {
    use case_reducer_core::{Action, ActionCreator};
    use proptest::prelude::*;
    use serde_json::Value;

    /// Short human-readable text, suitable for todo titles and names.
    pub fn text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ]{1,24}"
    }

    /// A list of between `min` and `max` texts.
    pub fn texts(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(text(), min..=max)
    }

    /// Action kinds that no reducer registers.
    pub fn unknown_kind() -> impl Strategy<Value = String> {
        "unknown/[a-z]{1,12}"
    }

    /// Actions of unregistered kinds with arbitrary scalar payloads.
    pub fn unknown_action() -> impl Strategy<Value = Action> {
        (unknown_kind(), any::<i64>())
            .prop_map(|(kind, payload)| Action::new(kind, Value::from(payload)))
    }

    /// Actions built by `creator` from generated payloads.
    ///
    /// Payloads that fail to encode are filtered out.
    pub fn created_by<P, S>(
        creator: &'static ActionCreator<P>,
        payloads: S,
    ) -> impl Strategy<Value = Action>
    where
        P: serde::Serialize + std::fmt::Debug + Clone + 'static,
        S: Strategy<Value = P>,
    {
        payloads.prop_filter_map("payload must encode", move |payload| creator.create(payload).ok())
    }
}

/// Installs a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`, writes through the test harness so output is captured
/// per test, and is safe to call from every test (later calls are no-ops).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "case_reducer_core=trace".into()),
        )
        .with_test_writer()
        .try_init();
}
