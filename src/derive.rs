//! Per-alternative dispatch of the standard traits.
//!
//! Each trait here mirrors one std trait, operating on the raw union and an
//! explicit tag. They are implemented for every type list whose alternatives
//! implement the std trait, and [`Sum`] implements the std trait on top.
//!
//! [`Sum`]: crate::Sum

use core::{cmp::Ordering, fmt, hash::Hasher, mem::ManuallyDrop};

use crate::repr::{Boxed, Cons, Plain, SumList};

pub trait SumClone: SumList {
    #[doc(hidden)]
    unsafe fn clone(this: &ManuallyDrop<Self::Repr>, tag: u8) -> ManuallyDrop<Self::Repr>;
}

pub trait SumPartialEq: SumList {
    #[doc(hidden)]
    unsafe fn eq(a: &ManuallyDrop<Self::Repr>, b: &ManuallyDrop<Self::Repr>, tag: u8) -> bool;
}

/// Marks lists whose alternatives are all [`Eq`].
pub trait SumEq: SumPartialEq {}

pub trait SumPartialOrd: SumPartialEq {
    #[doc(hidden)]
    unsafe fn partial_cmp(
        a: &ManuallyDrop<Self::Repr>,
        b: &ManuallyDrop<Self::Repr>,
        tag: u8,
    ) -> Option<Ordering>;
}

pub trait SumOrd: SumPartialOrd + SumEq {
    #[doc(hidden)]
    unsafe fn cmp(a: &ManuallyDrop<Self::Repr>, b: &ManuallyDrop<Self::Repr>, tag: u8) -> Ordering;
}

pub trait SumHash: SumList {
    #[doc(hidden)]
    unsafe fn hash<H: Hasher>(this: &ManuallyDrop<Self::Repr>, tag: u8, state: &mut H);
}

pub trait SumDebug: SumList {
    #[doc(hidden)]
    unsafe fn debug(
        this: &ManuallyDrop<Self::Repr>,
        tag: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result;
}

pub trait SumDisplay: SumList {
    #[doc(hidden)]
    unsafe fn display(
        this: &ManuallyDrop<Self::Repr>,
        tag: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result;
}

// The empty list has no alternative to dispatch to. A `Sum![]` cannot be
// constructed, so none of these is ever called.

impl SumClone for () {
    unsafe fn clone(_: &ManuallyDrop<Self::Repr>, tag: u8) -> ManuallyDrop<Self::Repr> {
        unreachable!("cloning tag {tag} of an empty sum")
    }
}

impl SumPartialEq for () {
    unsafe fn eq(_: &ManuallyDrop<Self::Repr>, _: &ManuallyDrop<Self::Repr>, _: u8) -> bool {
        false
    }
}

impl SumEq for () {}

impl SumPartialOrd for () {
    unsafe fn partial_cmp(
        _: &ManuallyDrop<Self::Repr>,
        _: &ManuallyDrop<Self::Repr>,
        _: u8,
    ) -> Option<Ordering> {
        None
    }
}

impl SumOrd for () {
    unsafe fn cmp(_: &ManuallyDrop<Self::Repr>, _: &ManuallyDrop<Self::Repr>, tag: u8) -> Ordering {
        unreachable!("comparing tag {tag} of an empty sum")
    }
}

impl SumHash for () {
    unsafe fn hash<H: Hasher>(_: &ManuallyDrop<Self::Repr>, _: u8, _: &mut H) {}
}

impl SumDebug for () {
    unsafe fn debug(_: &ManuallyDrop<Self::Repr>, _: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("!")
    }
}

impl SumDisplay for () {
    unsafe fn display(
        _: &ManuallyDrop<Self::Repr>,
        _: u8,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("!")
    }
}

macro_rules! derive_cells {
    ($($cell:ident),* $(,)?) => {$(
        impl<Head: Clone, Tail: SumClone> SumClone for $cell<Head, Tail> {
            unsafe fn clone(
                this: &ManuallyDrop<Self::Repr>,
                tag: u8,
            ) -> ManuallyDrop<Self::Repr> {
                ManuallyDrop::new(if tag == 0 {
                    Cons {
                        data: unsafe { this.data.clone() },
                    }
                } else {
                    Cons {
                        next: unsafe { Tail::clone(&this.next, tag - 1) },
                    }
                })
            }
        }

        impl<Head: PartialEq, Tail: SumPartialEq> SumPartialEq for $cell<Head, Tail> {
            unsafe fn eq(
                a: &ManuallyDrop<Self::Repr>,
                b: &ManuallyDrop<Self::Repr>,
                tag: u8,
            ) -> bool {
                if tag == 0 {
                    unsafe { *a.data == *b.data }
                } else {
                    unsafe { Tail::eq(&a.next, &b.next, tag - 1) }
                }
            }
        }

        impl<Head: Eq, Tail: SumEq> SumEq for $cell<Head, Tail> {}

        impl<Head: PartialOrd, Tail: SumPartialOrd> SumPartialOrd for $cell<Head, Tail> {
            unsafe fn partial_cmp(
                a: &ManuallyDrop<Self::Repr>,
                b: &ManuallyDrop<Self::Repr>,
                tag: u8,
            ) -> Option<Ordering> {
                if tag == 0 {
                    unsafe { (*a.data).partial_cmp(&*b.data) }
                } else {
                    unsafe { Tail::partial_cmp(&a.next, &b.next, tag - 1) }
                }
            }
        }

        impl<Head: Ord, Tail: SumOrd> SumOrd for $cell<Head, Tail> {
            unsafe fn cmp(
                a: &ManuallyDrop<Self::Repr>,
                b: &ManuallyDrop<Self::Repr>,
                tag: u8,
            ) -> Ordering {
                if tag == 0 {
                    unsafe { (*a.data).cmp(&*b.data) }
                } else {
                    unsafe { Tail::cmp(&a.next, &b.next, tag - 1) }
                }
            }
        }

        impl<Head: core::hash::Hash, Tail: SumHash> SumHash for $cell<Head, Tail> {
            unsafe fn hash<H: Hasher>(this: &ManuallyDrop<Self::Repr>, tag: u8, state: &mut H) {
                if tag == 0 {
                    unsafe { core::hash::Hash::hash(&*this.data, state) }
                } else {
                    unsafe { Tail::hash(&this.next, tag - 1, state) }
                }
            }
        }

        impl<Head: fmt::Debug, Tail: SumDebug> SumDebug for $cell<Head, Tail> {
            unsafe fn debug(
                this: &ManuallyDrop<Self::Repr>,
                tag: u8,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                if tag == 0 {
                    fmt::Debug::fmt(unsafe { &*this.data }, f)
                } else {
                    unsafe { Tail::debug(&this.next, tag - 1, f) }
                }
            }
        }

        impl<Head: fmt::Display, Tail: SumDisplay> SumDisplay for $cell<Head, Tail> {
            unsafe fn display(
                this: &ManuallyDrop<Self::Repr>,
                tag: u8,
                f: &mut fmt::Formatter<'_>,
            ) -> fmt::Result {
                if tag == 0 {
                    fmt::Display::fmt(unsafe { &*this.data }, f)
                } else {
                    unsafe { Tail::display(&this.next, tag - 1, f) }
                }
            }
        }
    )*};
}

derive_cells!(Plain, Boxed);
