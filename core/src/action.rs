//! Actions, action kinds, and typed action creators.
//!
//! An [`Action`] is a tagged record: a [`ActionKind`] discriminant plus a JSON
//! payload. Reducers look handlers up by kind only, so a single reducer can
//! handle actions whose payloads have unrelated shapes.
//!
//! [`ActionCreator`] pairs a kind with a payload type. Registering a handler
//! through a creator or through the raw kind string is the same thing: both
//! are normalized to an [`ActionKind`] by [`IntoActionKind`] before they reach
//! the builder.
//!
//! # Example
//!
//! ```
//! use case_reducer_core::action::{Action, ActionCreator, ActionKind};
//!
//! static ADD_TODO: ActionCreator<String> = ActionCreator::new("todos/add");
//!
//! # fn main() -> Result<(), case_reducer_core::ReducerError> {
//! let action = ADD_TODO.create("Buy milk".to_string())?;
//! assert_eq!(action.kind(), &ActionKind::from("todos/add"));
//! assert!(ADD_TODO.matches(&action));
//! assert_eq!(ADD_TODO.payload_of(&action)?, "Buy milk");
//! # Ok(())
//! # }
//! ```

use crate::error::ReducerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// The discriminant that identifies what an action means.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionKind(Cow<'static, str>);

impl ActionKind {
    /// Creates a kind from a static string without allocating.
    #[must_use]
    pub const fn from_static(kind: &'static str) -> Self {
        Self(Cow::Borrowed(kind))
    }

    /// Returns the kind as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ActionKind {
    fn from(kind: &'static str) -> Self {
        Self::from_static(kind)
    }
}

impl From<String> for ActionKind {
    fn from(kind: String) -> Self {
        Self(Cow::Owned(kind))
    }
}

impl AsRef<str> for ActionKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Anything that names an action kind: a raw string, a kind, or a typed creator.
pub trait IntoActionKind {
    /// Converts `self` into the kind used as the handler-table key.
    fn into_action_kind(self) -> ActionKind;
}

impl IntoActionKind for ActionKind {
    fn into_action_kind(self) -> ActionKind {
        self
    }
}

impl IntoActionKind for &ActionKind {
    fn into_action_kind(self) -> ActionKind {
        self.clone()
    }
}

impl IntoActionKind for &'static str {
    fn into_action_kind(self) -> ActionKind {
        ActionKind::from_static(self)
    }
}

impl IntoActionKind for String {
    fn into_action_kind(self) -> ActionKind {
        ActionKind::from(self)
    }
}

impl<P> IntoActionKind for &ActionCreator<P> {
    fn into_action_kind(self) -> ActionKind {
        self.kind.clone()
    }
}

/// A tagged record describing an intended state transition.
///
/// Serializes in the flux-standard shape: `{"type": ..., "payload": ...}` with
/// optional `meta` and `error` fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: ActionKind,
    #[serde(default)]
    payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<Value>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    error: bool,
}

impl Action {
    /// Creates an action with the given payload.
    pub fn new(kind: impl IntoActionKind, payload: Value) -> Self {
        Self {
            kind: kind.into_action_kind(),
            payload,
            meta: None,
            error: false,
        }
    }

    /// Creates an action with a `null` payload.
    pub fn bare(kind: impl IntoActionKind) -> Self {
        Self::new(kind, Value::Null)
    }

    /// Attaches metadata to the action.
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Marks the action as describing a failure.
    #[must_use]
    pub const fn as_error(mut self) -> Self {
        self.error = true;
        self
    }

    /// The action's kind.
    #[must_use]
    pub const fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// The raw payload.
    #[must_use]
    pub const fn payload(&self) -> &Value {
        &self.payload
    }

    /// Metadata, if any was attached.
    #[must_use]
    pub const fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    /// Whether the action describes a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error
    }

    /// Decodes the payload into `P`.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::Payload`] if the payload does not have the shape of `P`.
    pub fn payload_as<P: DeserializeOwned>(&self) -> Result<P, ReducerError> {
        P::deserialize(&self.payload).map_err(|source| ReducerError::Payload {
            kind: self.kind.clone(),
            source,
        })
    }
}

/// A typed factory for actions of one kind.
///
/// Creators are usually declared as statics so handlers and dispatch sites
/// share one definition of the kind string and the payload type.
pub struct ActionCreator<P> {
    kind: ActionKind,
    _payload: PhantomData<fn(P) -> P>,
}

impl<P> ActionCreator<P> {
    /// Creates a creator for `kind`.
    #[must_use]
    pub const fn new(kind: &'static str) -> Self {
        Self {
            kind: ActionKind::from_static(kind),
            _payload: PhantomData,
        }
    }

    /// The kind this creator produces.
    #[must_use]
    pub const fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Returns true if `action` was produced for this creator's kind.
    #[must_use]
    pub fn matches(&self, action: &Action) -> bool {
        action.kind == self.kind
    }
}

impl<P: Serialize> ActionCreator<P> {
    /// Builds an action carrying `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::Encode`] if `payload` cannot be represented as JSON
    /// (for example a map with non-string keys).
    pub fn create(&self, payload: P) -> Result<Action, ReducerError> {
        let payload = serde_json::to_value(payload).map_err(|source| ReducerError::Encode {
            kind: self.kind.clone(),
            source,
        })?;
        Ok(Action::new(&self.kind, payload))
    }
}

impl<P: DeserializeOwned> ActionCreator<P> {
    /// Reads the typed payload out of an action of this creator's kind.
    ///
    /// # Errors
    ///
    /// Returns [`ReducerError::KindMismatch`] for an action of another kind, or
    /// [`ReducerError::Payload`] if the payload does not decode into `P`.
    pub fn payload_of(&self, action: &Action) -> Result<P, ReducerError> {
        if !self.matches(action) {
            return Err(ReducerError::KindMismatch {
                expected: self.kind.clone(),
                found: action.kind.clone(),
            });
        }
        action.payload_as()
    }
}

impl ActionCreator<()> {
    /// Builds a payload-less action.
    #[must_use]
    pub fn create_bare(&self) -> Action {
        Action::bare(&self.kind)
    }
}

impl<P> Clone for ActionCreator<P> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            _payload: PhantomData,
        }
    }
}

impl<P> PartialEq for ActionCreator<P> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl<P> Eq for ActionCreator<P> {}

impl<P> std::hash::Hash for ActionCreator<P> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
    }
}

impl<P> fmt::Debug for ActionCreator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionCreator").field(&self.kind).finish()
    }
}

impl<P> fmt::Display for ActionCreator<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    static INCREMENT: ActionCreator<i64> = ActionCreator::new("counter/increment");
    static RESET: ActionCreator<()> = ActionCreator::new("counter/reset");

    #[test]
    fn creator_and_string_normalize_to_the_same_kind() {
        assert_eq!(
            (&INCREMENT).into_action_kind(),
            "counter/increment".into_action_kind()
        );
        assert_eq!(
            "counter/increment".to_string().into_action_kind(),
            ActionKind::from_static("counter/increment")
        );
    }

    #[test]
    fn creators_compare_by_kind() {
        use std::collections::HashSet;

        let twin: ActionCreator<i64> = ActionCreator::new("counter/increment");
        assert_eq!(INCREMENT, twin);
        assert_ne!(INCREMENT, ActionCreator::new("counter/decrement"));

        let set: HashSet<&ActionCreator<i64>> = [&INCREMENT, &twin].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn creator_builds_typed_payload() {
        let action = INCREMENT.create(5).unwrap();
        assert_eq!(action.kind().as_str(), "counter/increment");
        assert_eq!(action.payload(), &json!(5));
        assert_eq!(INCREMENT.payload_of(&action).unwrap(), 5);
    }

    #[test]
    fn payload_of_rejects_other_kinds() {
        let action = RESET.create_bare();
        let err = INCREMENT.payload_of(&action).unwrap_err();
        assert!(matches!(err, ReducerError::KindMismatch { .. }));
    }

    #[test]
    fn payload_as_reports_shape_errors() {
        let action = Action::new("counter/increment", json!("five"));
        let err = action.payload_as::<i64>().unwrap_err();
        assert!(matches!(err, ReducerError::Payload { .. }));
    }

    #[test]
    fn action_serializes_in_flux_standard_shape() {
        let action = INCREMENT.create(2).unwrap().with_meta(json!({"source": "test"}));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "counter/increment", "payload": 2, "meta": {"source": "test"}})
        );

        let decoded: Action = serde_json::from_value(json!({"type": "counter/reset"})).unwrap();
        assert_eq!(decoded, RESET.create_bare());
        assert!(!decoded.is_error());
    }

    #[test]
    fn error_flag_round_trips() {
        let action = Action::bare("fetch/failed").as_error();
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["error"], json!(true));
    }
}
