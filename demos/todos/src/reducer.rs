//! The todo list reducer in three handler styles.
//!
//! Each style starts from an empty list and handles `todos/add` by appending an
//! open todo and `todos/toggle` by flipping one todo's completion flag. A
//! toggle with an index past the end of the list leaves the list unchanged.

use crate::types::{ADD_TODO, TOGGLE_TODO, Todo, TodoList};
use case_reducer_core::{
    Action, ActionKind, CaseHandler, CaseReducer, Draft, ReducerError, try_produce,
};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

fn add_in_place(draft: &mut Draft<'_, TodoList>, action: &Action) -> Result<(), ReducerError> {
    let text = ADD_TODO.payload_of(action)?;
    draft.push(Arc::new(Todo::new(text)));
    Ok(())
}

fn toggle_in_place(draft: &mut Draft<'_, TodoList>, action: &Action) -> Result<(), ReducerError> {
    let index = TOGGLE_TODO.payload_of(action)?;
    if index >= draft.len() {
        tracing::warn!(index, len = draft.len(), "Toggle index out of range");
        return Ok(());
    }

    let todos: &mut TodoList = draft;
    Arc::make_mut(&mut todos[index]).toggle();
    Ok(())
}

fn add_replacing(todos: &TodoList, action: &Action) -> Result<Option<TodoList>, ReducerError> {
    let text = ADD_TODO.payload_of(action)?;
    let mut next = Vec::with_capacity(todos.len() + 1);
    next.extend(todos.iter().cloned());
    next.push(Arc::new(Todo::new(text)));
    Ok(Some(next))
}

fn toggle_replacing(todos: &TodoList, action: &Action) -> Result<Option<TodoList>, ReducerError> {
    let index = TOGGLE_TODO.payload_of(action)?;
    let Some(target) = todos.get(index) else {
        tracing::warn!(index, len = todos.len(), "Toggle index out of range");
        // A list is draftable, so "no new value" keeps it as it is.
        return Ok(None);
    };

    let mut toggled = Todo::clone(target);
    toggled.toggle();
    let toggled = Arc::new(toggled);

    let next = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| if i == index { Arc::clone(&toggled) } else { Arc::clone(todo) })
        .collect();
    Ok(Some(next))
}

/// Todo reducer whose handlers edit the draft in place
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn mutating_reducer() -> Result<CaseReducer<TodoList>, ReducerError> {
    CaseReducer::build(TodoList::new(), |builder| {
        builder
            .add_case(&ADD_TODO, CaseHandler::mutate(add_in_place))?
            .add_case(&TOGGLE_TODO, CaseHandler::mutate(toggle_in_place))?;
        Ok(())
    })
}

/// Todo reducer whose handlers return the next list
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn replacing_reducer() -> Result<CaseReducer<TodoList>, ReducerError> {
    CaseReducer::build(TodoList::new(), |builder| {
        builder
            .add_case(&ADD_TODO, CaseHandler::replace(add_replacing))?
            .add_case(&TOGGLE_TODO, CaseHandler::replace(toggle_replacing))?;
        Ok(())
    })
}

/// Todo reducer assembled from a plain kind-to-handler map
///
/// Meant to be driven through [`reduce_manually`], which owns the draft.
#[must_use]
pub fn manual_reducer() -> CaseReducer<TodoList> {
    let cases: HashMap<ActionKind, CaseHandler<TodoList>> = HashMap::from([
        (ADD_TODO.kind().clone(), CaseHandler::mutate(add_in_place)),
        (TOGGLE_TODO.kind().clone(), CaseHandler::mutate(toggle_in_place)),
    ]);
    CaseReducer::from_map(TodoList::new(), cases)
}

/// Runs `reducer` inside an explicit `try_produce` over `state`.
///
/// A missing state is replaced by the reducer's initial state, the same as
/// [`CaseReducer::reduce`] does.
///
/// # Errors
///
/// Returns the error of the first handler that fails.
pub fn reduce_manually<'a>(
    reducer: &'a CaseReducer<TodoList>,
    state: Option<&'a TodoList>,
    action: &Action,
) -> Result<Cow<'a, TodoList>, ReducerError> {
    let base = state.unwrap_or(reducer.initial_state());
    try_produce(base, |draft| reducer.reduce_draft(draft, action))
}
