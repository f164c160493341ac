//! Counter example binary
//!
//! Drives the typed counter reducer through a [`Store`] and prints each state.

use case_reducer_core::{Action, ReducerError, Store};
use counter::{DECREMENT, INCREMENT, RESET, RETURN_NOTHING, RETURN_NULL, nullable_reducer, typed_reducer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), ReducerError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counter=debug,case_reducer_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counter Example: Case Reducers ===\n");

    let mut store = Store::new(typed_reducer()?)?;
    store.subscribe(|count| tracing::debug!(count, "Counter changed"));
    println!("Initial count: {}", store.state());

    let steps: [(&str, Action); 5] = [
        ("Increment(5)", INCREMENT.create(5)?),
        ("Increment(3)", INCREMENT.create(3)?),
        ("Decrement(2)", DECREMENT.create(2)?),
        ("Unknown", Action::bare("counter/unknown")),
        ("Reset", RESET.create_bare()),
    ];
    for (label, action) in steps {
        println!("\n>>> Dispatching: {label}");
        store.dispatch(action)?;
        println!("Count after {label}: {}", store.state());
    }

    println!("\n=== Nullable counter ===\n");

    let mut nullable = Store::new(nullable_reducer()?)?;
    nullable.dispatch(RETURN_NOTHING.create_bare())?;
    println!("After return-nothing on null: {:?}", nullable.state());

    nullable.dispatch(INCREMENT.create(1)?)?;
    println!("After increment: {:?}", nullable.state());

    match nullable.dispatch(RETURN_NOTHING.create_bare()) {
        Ok(()) => println!("After return-nothing: {:?}", nullable.state()),
        Err(error) => println!("Return-nothing rejected: {error}"),
    }

    nullable.dispatch(RETURN_NULL.create_bare())?;
    println!("After return-null: {:?}", nullable.state());

    Ok(())
}
