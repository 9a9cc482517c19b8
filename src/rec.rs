//! The owning box backing recursive alternatives.
//!
//! A sum type cannot hold itself by value, so alternatives that refer back
//! to the sum are declared as `box T` in [`Sum!`] and stored as a [`Rec<T>`].
//! A `Rec` is a value, not a handle: cloning allocates a fresh copy of the
//! pointee and comparisons look through the pointer.
//!
//! [`Sum!`]: crate::Sum!

use std::{
    borrow::{Borrow, BorrowMut},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::{Deref, DerefMut},
};

/// A single, exclusively owned heap allocation of a `T` with value
/// semantics.
///
/// `T` may be a type that is still being defined in terms of the sum holding
/// this box, so the struct itself puts no `Sized` bound on it.
#[repr(transparent)]
pub struct Rec<T: ?Sized> {
    ptr: Box<T>,
}

impl<T> Rec<T> {
    /// Moves `value` into a new heap allocation.
    pub fn new(value: T) -> Self {
        Rec {
            ptr: Box::new(value),
        }
    }

    /// Overwrites the pointee in place, reusing the allocation.
    pub fn assign(&mut self, value: T) {
        *self.ptr = value;
    }

    pub fn into_inner(self) -> T {
        *self.ptr
    }
}

impl<T: ?Sized> Rec<T> {
    pub fn get(&self) -> &T {
        &self.ptr
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.ptr
    }

    /// Exchanges the allocations of two boxes without touching the pointees.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
    }
}

impl<T> From<T> for Rec<T> {
    fn from(value: T) -> Self {
        Rec::new(value)
    }
}

impl<T: ?Sized> Deref for Rec<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: ?Sized> DerefMut for Rec<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: ?Sized> Borrow<T> for Rec<T> {
    fn borrow(&self) -> &T {
        self.get()
    }
}

impl<T: ?Sized> BorrowMut<T> for Rec<T> {
    fn borrow_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: ?Sized> AsRef<T> for Rec<T> {
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T: ?Sized> AsMut<T> for Rec<T> {
    fn as_mut(&mut self) -> &mut T {
        self.get_mut()
    }
}

impl<T: Clone> Clone for Rec<T> {
    /// Allocates a new box holding a clone of the pointee.
    fn clone(&self) -> Self {
        Rec::new(T::clone(self))
    }

    fn clone_from(&mut self, source: &Self) {
        self.get_mut().clone_from(source.get());
    }
}

impl<T: Default> Default for Rec<T> {
    fn default() -> Self {
        Rec::new(T::default())
    }
}

impl<T: PartialEq + ?Sized> PartialEq for Rec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Eq + ?Sized> Eq for Rec<T> {}

impl<T: PartialOrd + ?Sized> PartialOrd for Rec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.get().partial_cmp(other.get())
    }
}

impl<T: Ord + ?Sized> Ord for Rec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(other.get())
    }
}

impl<T: Hash + ?Sized> Hash for Rec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state)
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for Rec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.get(), f)
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Rec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.get(), f)
    }
}
