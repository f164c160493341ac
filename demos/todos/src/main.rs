//! Todo list demo
//!
//! Runs the same actions through all three handler styles and prints the list
//! each one ends with.

use case_reducer_core::{Action, ReducerError, Store};
use std::borrow::Cow;
use todos::{
    ADD_TODO, TOGGLE_TODO, TodoList, manual_reducer, mutating_reducer, reduce_manually,
    replacing_reducer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn script() -> Result<Vec<Action>, ReducerError> {
    Ok(vec![
        ADD_TODO.create("Buy milk".to_string())?,
        ADD_TODO.create("Write documentation".to_string())?,
        ADD_TODO.create("Deploy to production".to_string())?,
        TOGGLE_TODO.create(0)?,
        TOGGLE_TODO.create(2)?,
        TOGGLE_TODO.create(7)?,
    ])
}

fn print_list(style: &str, todos: &TodoList) {
    println!("{style}:");
    for todo in todos {
        println!("  {todo}");
    }
    let done = todos.iter().filter(|todo| todo.completed).count();
    println!("  Completed: {done}/{}\n", todos.len());
}

/// Threads `actions` through [`reduce_manually`], starting from no state.
fn run_manually(actions: &[Action]) -> Result<TodoList, ReducerError> {
    let reducer = manual_reducer();
    let mut state = reduce_manually(&reducer, None, &Action::bare("todos/init"))?.into_owned();
    for action in actions {
        let next = match reduce_manually(&reducer, Some(&state), action)? {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            state = next;
        }
    }
    Ok(state)
}

fn main() -> Result<(), ReducerError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todos=debug,case_reducer_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo Example ===\n");

    let actions = script()?;

    let mut mutating = Store::new(mutating_reducer()?)?;
    mutating.subscribe(|todos: &TodoList| tracing::debug!(len = todos.len(), "List changed"));
    for action in &actions {
        mutating.dispatch(action.clone())?;
    }
    print_list("Mutating handlers", mutating.state());

    let mut replacing = Store::new(replacing_reducer()?)?;
    for action in &actions {
        replacing.dispatch(action.clone())?;
    }
    print_list("Replacing handlers", replacing.state());

    print_list("Manually wrapped", &run_manually(&actions)?);

    println!("=== Demo Complete ===");
    Ok(())
}
