//! Copy-on-write drafts and the `produce` family.
//!
//! A [`Draft`] is a writable scratch view over a borrowed value. Reads go to
//! the original until the first write, at which point the original is cloned
//! and every later read and write goes to the copy. The original is never
//! modified.
//!
//! [`produce`] runs a recipe against a draft and hands back a
//! [`Cow`]: `Cow::Borrowed` when the recipe wrote nothing, so callers can
//! detect "no change" by variant instead of by comparison.
//!
//! Sharing below the top level is up to the state's shape. A state that keeps
//! its elements behind [`Arc`] and writes through [`Arc::make_mut`] only
//! copies the elements it touches; the rest keep their pointer identity.
//!
//! ```
//! use case_reducer_core::draft::produce;
//! use std::borrow::Cow;
//!
//! let base = vec![1, 2, 3];
//!
//! let untouched = produce(&base, |draft| {
//!     let _ = draft.len();
//! });
//! assert!(matches!(untouched, Cow::Borrowed(_)));
//!
//! let next = produce(&base, |draft| draft.push(4));
//! assert_eq!(*next, vec![1, 2, 3, 4]);
//! assert_eq!(base, vec![1, 2, 3]);
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;
use std::sync::Arc;

/// Values that can stand behind a writable draft.
///
/// Containers and records are draftable: a handler may edit them in place and
/// leave the result in the draft. Primitives are not: a handler working on a
/// primitive has to hand back the next value explicitly, and returning nothing
/// is an error.
///
/// Records implement this with `#[derive(Draftable)]` from `case-reducer-macros`.
pub trait Draftable {
    /// Whether this particular value is draftable.
    ///
    /// Decided per value rather than per type so `Option::None` (`null`) can
    /// be non-draftable while `Some(vec![])` is draftable.
    fn is_draftable(&self) -> bool;

    /// Whether this value is `null`.
    ///
    /// A replacing handler may return nothing for a `null` value, which keeps
    /// it `null`, even though `null` is not draftable.
    fn is_null(&self) -> bool {
        false
    }
}

macro_rules! not_draftable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Draftable for $ty {
                fn is_draftable(&self) -> bool {
                    false
                }
            }
        )*
    };
}

not_draftable!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
);

impl<T: Draftable> Draftable for Option<T> {
    fn is_draftable(&self) -> bool {
        self.as_ref().is_some_and(Draftable::is_draftable)
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_none_or(Draftable::is_null)
    }
}

impl<T: Draftable + ?Sized> Draftable for Box<T> {
    fn is_draftable(&self) -> bool {
        (**self).is_draftable()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Draftable + ?Sized> Draftable for Arc<T> {
    fn is_draftable(&self) -> bool {
        (**self).is_draftable()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T: Draftable + ?Sized> Draftable for Rc<T> {
    fn is_draftable(&self) -> bool {
        (**self).is_draftable()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }
}

impl<T> Draftable for Vec<T> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<T> Draftable for VecDeque<T> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<K, V, H> Draftable for HashMap<K, V, H> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<K, V> Draftable for BTreeMap<K, V> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<T, H> Draftable for HashSet<T, H> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<T> Draftable for BTreeSet<T> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl<K, V, H> Draftable for indexmap::IndexMap<K, V, H> {
    fn is_draftable(&self) -> bool {
        true
    }
}

impl Draftable for serde_json::Value {
    fn is_draftable(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// A writable copy-on-write view over a borrowed value.
pub struct Draft<'a, S: Clone> {
    base: &'a S,
    copy: Option<S>,
}

impl<'a, S: Clone> Draft<'a, S> {
    /// Opens a draft over `base`.
    #[must_use]
    pub const fn new(base: &'a S) -> Self {
        Self { base, copy: None }
    }

    /// The value the draft was opened over, unaffected by writes.
    #[must_use]
    pub const fn original(&self) -> &'a S {
        self.base
    }

    /// Whether anything has been written through the draft.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.copy.is_some()
    }

    /// Replaces the draft's value wholesale.
    pub fn replace(&mut self, value: S) {
        self.copy = Some(value);
    }

    /// Closes the draft, borrowing the original if nothing was written.
    #[must_use]
    pub fn finish(self) -> Cow<'a, S> {
        match self.copy {
            Some(copy) => Cow::Owned(copy),
            None => Cow::Borrowed(self.base),
        }
    }
}

impl<S: Clone> Deref for Draft<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.copy.as_ref().unwrap_or(self.base)
    }
}

impl<S: Clone> DerefMut for Draft<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        let base = self.base;
        self.copy.get_or_insert_with(|| base.clone())
    }
}

impl<S: Clone + fmt::Debug> fmt::Debug for Draft<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("value", &**self)
            .field("modified", &self.is_modified())
            .finish()
    }
}

/// Runs `recipe` against a draft of `base` and returns the result.
///
/// Returns `Cow::Borrowed(base)` if the recipe never wrote to the draft.
pub fn produce<S, F>(base: &S, recipe: F) -> Cow<'_, S>
where
    S: Clone,
    F: FnOnce(&mut Draft<'_, S>),
{
    let mut draft = Draft::new(base);
    recipe(&mut draft);
    draft.finish()
}

/// Fallible form of [`produce`].
///
/// # Errors
///
/// Returns whatever error `recipe` returns; the partially written draft is
/// discarded and `base` is untouched.
pub fn try_produce<S, E, F>(base: &S, recipe: F) -> Result<Cow<'_, S>, E>
where
    S: Clone,
    F: FnOnce(&mut Draft<'_, S>) -> Result<(), E>,
{
    let mut draft = Draft::new(base);
    recipe(&mut draft)?;
    Ok(draft.finish())
}
