//! # Counter Example
//!
//! A numeric counter assembled with the reducer builder.
//!
//! This example showcases:
//! - Typed action creators (`increment`, `decrement`)
//! - Registering handlers by creator, by raw kind string, or a mix of both
//! - Replacing handlers over a non-draftable (primitive) state
//! - The `null`/`0` versus "returned nothing" distinction on nullable state
//!
//! ## Architecture
//!
//! The counter state is a bare `i64`. Primitives cannot be drafted, so every
//! handler here is a [`CaseHandler::replace`] that hands back the next value.
//!
//! ## Example
//!
//! ```
//! use counter::{DECREMENT, INCREMENT, typed_reducer};
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let reducer = typed_reducer()?;
//! let five = reducer.reduce(Some(&0), &INCREMENT.create(5)?)?.into_owned();
//! assert_eq!(five, 5);
//! let zero = reducer.reduce(Some(&five), &DECREMENT.create(5)?)?;
//! assert_eq!(*zero, 0);
//! # Ok(())
//! # }
//! ```

use case_reducer_core::{Action, ActionCreator, CaseHandler, CaseReducer, ReducerError};

/// Counter state
pub type CounterState = i64;

/// Nullable counter state: `None` is `null`.
pub type NullableCounterState = Option<i64>;

/// Add the payload to the counter
pub static INCREMENT: ActionCreator<i64> = ActionCreator::new("counter/increment");

/// Subtract the payload from the counter
pub static DECREMENT: ActionCreator<i64> = ActionCreator::new("counter/decrement");

/// Reset the counter to its initial value
pub static RESET: ActionCreator<()> = ActionCreator::new("counter/reset");

/// Handler that returns nothing on purpose
pub static RETURN_NOTHING: ActionCreator<()> = ActionCreator::new("nullable/return-nothing");

/// Handler that returns `null`
pub static RETURN_NULL: ActionCreator<()> = ActionCreator::new("nullable/return-null");

/// Handler that returns `0`
pub static RETURN_ZERO: ActionCreator<()> = ActionCreator::new("nullable/return-zero");

fn add(state: CounterState, amount: i64) -> Result<Option<CounterState>, ReducerError> {
    state
        .checked_add(amount)
        .map(Some)
        .ok_or_else(|| ReducerError::Handler(format!("counter overflow: {state} + {amount}")))
}

fn subtract(state: CounterState, amount: i64) -> Result<Option<CounterState>, ReducerError> {
    state
        .checked_sub(amount)
        .map(Some)
        .ok_or_else(|| ReducerError::Handler(format!("counter overflow: {state} - {amount}")))
}

fn increment() -> CaseHandler<CounterState> {
    CaseHandler::replace(|state, action| add(*state, action.payload_as()?))
}

fn decrement() -> CaseHandler<CounterState> {
    CaseHandler::replace(|state, action| subtract(*state, action.payload_as()?))
}

fn reset() -> CaseHandler<CounterState> {
    CaseHandler::replace(|_, _| Ok(Some(0)))
}

/// Counter reducer with handlers registered through typed creators
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn typed_reducer() -> Result<CaseReducer<CounterState>, ReducerError> {
    CaseReducer::build(0, |builder| {
        builder
            .add_case(&INCREMENT, increment())?
            .add_case(&DECREMENT, decrement())?
            .add_case(&RESET, reset())?;
        Ok(())
    })
}

/// Counter reducer with handlers registered through raw kind strings
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn string_reducer() -> Result<CaseReducer<CounterState>, ReducerError> {
    CaseReducer::build(0, |builder| {
        builder
            .add_case("counter/increment", increment())?
            .add_case("counter/decrement", decrement())?
            .add_case("counter/reset", reset())?;
        Ok(())
    })
}

/// Counter reducer mixing typed creators and raw strings
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn mixed_reducer() -> Result<CaseReducer<CounterState>, ReducerError> {
    CaseReducer::build(0, |builder| {
        builder
            .add_case(&INCREMENT, increment())?
            .add_case("counter/decrement", decrement())?
            .add_case(RESET.kind(), reset())?;
        Ok(())
    })
}

/// Nullable counter whose handlers return nothing, `null`, or `0`
///
/// Starts at `null`. Returning nothing keeps a `null` counter `null`, but
/// fails at dispatch time once the counter holds a number, because a number
/// is not draftable. The `null` and `0` handlers always succeed.
///
/// # Errors
///
/// Returns an assembly error if two handlers share a kind.
pub fn nullable_reducer() -> Result<CaseReducer<NullableCounterState>, ReducerError> {
    CaseReducer::build(None, |builder| {
        builder
            .add_case(&RETURN_NOTHING, CaseHandler::replace(|_, _| Ok(None)))?
            .add_case(&RETURN_NULL, CaseHandler::replace(|_, _| Ok(Some(None))))?
            .add_case(&RETURN_ZERO, CaseHandler::replace(|_, _| Ok(Some(Some(0)))))?
            .add_case(
                &INCREMENT,
                CaseHandler::replace(|state: &NullableCounterState, action: &Action| {
                    let amount = INCREMENT.payload_of(action)?;
                    Ok(Some(add(state.unwrap_or(0), amount)?))
                }),
            )?;
        Ok(())
    })
}
