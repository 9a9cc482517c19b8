//! Ordered handler lists over a [`Sum`].
//!
//! Handlers are tried in the order they are added and the first one that
//! accepts the active alternative runs, exactly once. Acceptance is decided by
//! the handler's parameter type. A wildcard added with `otherwise` accepts
//! every alternative, so any handler added after it can never run:
//!
//! ```rust
//! use recsum::Sum;
//!
//! let s: Sum![u8, char] = Sum::new('x');
//! let hit = s
//!     .matching()
//!     .otherwise(|_| "wildcard")
//!     .case(|_: &char| "char")
//!     .finish();
//! assert_eq!(hit, Ok("wildcard"));
//! ```
//!
//! When no handler accepts the active alternative, `finish` reports
//! [`InvalidVariantAccess::Unhandled`].

use crate::{
    error::InvalidVariantAccess,
    index::Index,
    repr::{Split, SumList},
    Rem, Sum,
};

enum State<P, R> {
    Pending(P),
    Done(R),
}

/// A handler list over a shared borrow, built by [`Sum::matching`].
#[must_use = "handlers only produce a result through `finish`"]
pub struct Match<'a, S: SumList, R> {
    state: State<&'a Sum<S>, R>,
}

impl<'a, S: SumList, R> Match<'a, S, R> {
    pub(crate) fn new(sum: &'a Sum<S>) -> Self {
        Match {
            state: State::Pending(sum),
        }
    }

    /// Adds a handler for the alternative of type `T`.
    pub fn case<T: 'a, U, F>(self, handler: F) -> Self
    where
        S: Split<T, U>,
        U: Index,
        F: FnOnce(&'a T) -> R,
    {
        let state = match self.state {
            State::Pending(sum) => match sum.get::<T, U>() {
                Some(value) => State::Done(handler(value)),
                None => State::Pending(sum),
            },
            done => done,
        };
        Match { state }
    }

    /// Adds a handler accepting whatever alternative is active.
    pub fn otherwise<F>(self, handler: F) -> Self
    where
        F: FnOnce(&'a Sum<S>) -> R,
    {
        let state = match self.state {
            State::Pending(sum) => State::Done(handler(sum)),
            done => done,
        };
        Match { state }
    }

    /// # Errors
    ///
    /// [`InvalidVariantAccess::Unhandled`] if no handler accepted the active
    /// alternative.
    pub fn finish(self) -> Result<R, InvalidVariantAccess> {
        match self.state {
            State::Pending(sum) => Err(sum.unmatched()),
            State::Done(ret) => Ok(ret),
        }
    }
}

/// A handler list over a mutable borrow, built by [`Sum::matching_mut`].
///
/// Handlers may modify the active alternative in place but cannot switch to
/// another one; use [`Sum::set`] for that.
#[must_use = "handlers only produce a result through `finish`"]
pub struct MatchMut<'a, S: SumList, R> {
    state: State<&'a mut Sum<S>, R>,
}

impl<'a, S: SumList, R> MatchMut<'a, S, R> {
    pub(crate) fn new(sum: &'a mut Sum<S>) -> Self {
        MatchMut {
            state: State::Pending(sum),
        }
    }

    /// Adds a handler for the alternative of type `T`.
    pub fn case<T: 'a, U, F>(self, handler: F) -> Self
    where
        S: Split<T, U>,
        U: Index,
        F: FnOnce(&'a mut T) -> R,
    {
        let state = match self.state {
            State::Pending(sum) if sum.is::<T, U>() => {
                State::Done(handler(unsafe { sum.get_unchecked_mut::<T, U>() }))
            }
            other => other,
        };
        MatchMut { state }
    }

    /// Adds a handler accepting whatever alternative is active.
    pub fn otherwise<F>(self, handler: F) -> Self
    where
        F: FnOnce(&'a mut Sum<S>) -> R,
    {
        let state = match self.state {
            State::Pending(sum) => State::Done(handler(sum)),
            done => done,
        };
        MatchMut { state }
    }

    /// # Errors
    ///
    /// [`InvalidVariantAccess::Unhandled`] if no handler accepted the active
    /// alternative.
    pub fn finish(self) -> Result<R, InvalidVariantAccess> {
        match self.state {
            State::Pending(sum) => Err(sum.unmatched()),
            State::Done(ret) => Ok(ret),
        }
    }
}

/// A handler list consuming the sum, built by [`Sum::into_match`].
///
/// Every `case` removes its alternative from the list still waiting for a
/// handler, so a second handler for the same type is a compile error. Once
/// the list is empty, [`IntoMatch::finish`] returns the result directly.
///
/// ```rust
/// use recsum::Sum;
///
/// let s: Sum![u8, String] = Sum::new(String::from("owned"));
/// let len = s
///     .into_match()
///     .case(|n: u8| usize::from(n))
///     .case(|s: String| s.len())
///     .finish();
/// assert_eq!(len, 5);
/// ```
#[must_use = "handlers only produce a result through `finish`"]
pub struct IntoMatch<S: SumList, R> {
    state: State<Sum<S>, R>,
}

impl<S: SumList, R> IntoMatch<S, R> {
    pub(crate) fn new(sum: Sum<S>) -> Self {
        IntoMatch {
            state: State::Pending(sum),
        }
    }

    /// Adds a handler for the alternative of type `T`.
    pub fn case<T, U, F>(self, handler: F) -> IntoMatch<Rem<S, T, U>, R>
    where
        S: Split<T, U>,
        U: Index,
        F: FnOnce(T) -> R,
    {
        let state = match self.state {
            State::Pending(sum) => match sum.try_unwrap::<T, U>() {
                Ok(value) => State::Done(handler(value)),
                Err(rest) => State::Pending(rest),
            },
            State::Done(ret) => State::Done(ret),
        };
        IntoMatch { state }
    }

    /// Adds a handler accepting whatever alternative is left.
    pub fn otherwise<F>(self, handler: F) -> IntoMatch<(), R>
    where
        F: FnOnce(Sum<S>) -> R,
    {
        let ret = match self.state {
            State::Pending(sum) => handler(sum),
            State::Done(ret) => ret,
        };
        IntoMatch {
            state: State::Done(ret),
        }
    }

    /// # Errors
    ///
    /// [`InvalidVariantAccess::Unhandled`] if no handler accepted the active
    /// alternative.
    pub fn try_finish(self) -> Result<R, InvalidVariantAccess> {
        match self.state {
            State::Pending(sum) => Err(sum.unmatched()),
            State::Done(ret) => Ok(ret),
        }
    }
}

impl<R> IntoMatch<(), R> {
    /// Returns the handler's result; every alternative has been handled.
    pub fn finish(self) -> R {
        match self.state {
            State::Pending(sum) => sum.unreachable(),
            State::Done(ret) => ret,
        }
    }
}
