//! Errors raised while assembling or running a reducer.
//!
//! Every variant describes a programmer error: nothing here is retried or
//! recovered from. Assembly errors (duplicate kinds, misordered builder
//! calls) surface from [`CaseReducer::build`](crate::reducer::CaseReducer::build)
//! before any action is dispatched. Dispatch errors surface from
//! [`Reducer::reduce`](crate::reducer::Reducer::reduce).

use crate::action::ActionKind;
use thiserror::Error;

/// Errors that can occur while building or running a reducer.
#[derive(Error, Debug)]
pub enum ReducerError {
    /// A second handler was registered for an action kind.
    ///
    /// Typed creators and raw strings share the same key space, so registering
    /// `"counter/increment"` after the creator with that kind also lands here.
    #[error("builder cannot be called with two handlers for the same action kind: {kind}")]
    DuplicateCase {
        /// The kind that was already registered.
        kind: ActionKind,
    },

    /// `add_case` was called with an empty action kind.
    #[error("builder.add_case cannot be called with an empty action kind")]
    EmptyKind,

    /// `add_case` was called after `add_matcher`.
    #[error("builder.add_case must be called before builder.add_matcher (kind: {kind})")]
    CaseAfterMatcher {
        /// The kind of the rejected case.
        kind: ActionKind,
    },

    /// `add_case` was called after `add_default_case`.
    #[error("builder.add_case must be called before builder.add_default_case (kind: {kind})")]
    CaseAfterDefault {
        /// The kind of the rejected case.
        kind: ActionKind,
    },

    /// `add_matcher` was called after `add_default_case`.
    #[error("builder.add_matcher must be called before builder.add_default_case")]
    MatcherAfterDefault,

    /// `add_default_case` was called twice.
    #[error("builder.add_default_case can only be called once")]
    DuplicateDefault,

    /// A replacing handler returned nothing for a value that is neither draftable nor `null`.
    #[error(
        "a case handler on a non-draftable value must not return undefined \
         (kind: {kind}); return the next value explicitly, or `None`/`0` if that is the next state"
    )]
    UndefinedReturn {
        /// The kind whose handler returned nothing.
        kind: ActionKind,
    },

    /// The action payload could not be decoded into the requested type.
    #[error("invalid payload for action {kind}: {source}")]
    Payload {
        /// The kind of the offending action.
        kind: ActionKind,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A typed payload could not be encoded into an action.
    #[error("failed to encode payload for action {kind}: {source}")]
    Encode {
        /// The kind being created.
        kind: ActionKind,
        /// The underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// A typed creator was asked to read an action of a different kind.
    #[error("expected action {expected}, found {found}")]
    KindMismatch {
        /// The creator's kind.
        expected: ActionKind,
        /// The action's kind.
        found: ActionKind,
    },

    /// A reducer was called without state and has no initial state to fall back on.
    #[error("no state was supplied and the reducer has no initial state")]
    MissingInitialState,

    /// A handler rejected the action.
    #[error("handler failed: {0}")]
    Handler(String),
}

impl ReducerError {
    /// Returns true for errors raised while the reducer was being assembled.
    #[must_use]
    pub const fn is_assembly_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCase { .. }
                | Self::EmptyKind
                | Self::CaseAfterMatcher { .. }
                | Self::CaseAfterDefault { .. }
                | Self::MatcherAfterDefault
                | Self::DuplicateDefault
        )
    }
}
