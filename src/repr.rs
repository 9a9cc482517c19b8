//! The module dealing with the underlying representation of the [`Sum`] type.
//!
//! # Implementation details
//!
//! A sum type is a hand-written tagged union. Its memory layout resembles:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//! # struct Rec<T>(Box<T>);
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawSum3<T1, T2, T3> {
//!     tag: u8,
//!     data: Cons<T1, Cons<Rec<T2>, Cons<T3, Nil>>>,
//! }
//! ```
//!
//! Every operation walks the chain one link per step: tag `0` addresses the
//! `data` field of the current link, any other tag is decremented and handed
//! to `next`. All fields of a `#[repr(C)]` union live at offset zero, so the
//! active payload always starts at the address of the whole union.
//!
//! The type-level list describing a sum is built from two kinds of cells:
//! `(T, Tail)` stores `T` in place, and [`Boxed<T, Tail>`] stores it behind a
//! [`Rec<T>`] while still presenting `T` to every accessor. The latter is what
//! lets an alternative mention the sum type it is part of.
//!
//! [`Sum`]: crate::Sum

use core::{convert::Infallible, marker::PhantomData, mem::ManuallyDrop};

use crate::{
    index::{Index, UInt, UTerm},
    rec::Rec,
};

/// The terminator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// A list cell holding its alternative in place.
pub type Plain<T, Tail> = (T, Tail);

/// A list cell holding its alternative behind a [`Rec`].
///
/// Written `box T` inside [`Sum!`](crate::Sum!). Never instantiated.
///
/// `T` is usually a payload that holds the sum itself, so laying the sum out
/// must not ask whether `T` is `Sized`.
pub struct Boxed<T: ?Sized, Tail>(Infallible, PhantomData<(Rec<T>, Tail)>);

/// How one cell of a type list keeps its alternative.
pub trait Link {
    /// The alternative as seen by users of the sum.
    type Head;
    /// The alternative as laid out in the union.
    type Stored;
    /// The rest of the list.
    type Tail: SumList;

    #[doc(hidden)]
    fn wrap(head: Self::Head) -> Self::Stored;

    #[doc(hidden)]
    fn unwrap(stored: Self::Stored) -> Self::Head;

    #[doc(hidden)]
    fn project(stored: &Self::Stored) -> &Self::Head;

    #[doc(hidden)]
    fn project_mut(stored: &mut Self::Stored) -> &mut Self::Head;
}

impl<T, Tail: SumList> Link for Plain<T, Tail> {
    type Head = T;
    type Stored = T;
    type Tail = Tail;

    fn wrap(head: T) -> T {
        head
    }

    fn unwrap(stored: T) -> T {
        stored
    }

    fn project(stored: &T) -> &T {
        stored
    }

    fn project_mut(stored: &mut T) -> &mut T {
        stored
    }
}

impl<T, Tail: SumList> Link for Boxed<T, Tail> {
    type Head = T;
    type Stored = Rec<T>;
    type Tail = Tail;

    fn wrap(head: T) -> Rec<T> {
        Rec::new(head)
    }

    fn unwrap(stored: Rec<T>) -> T {
        stored.into_inner()
    }

    fn project(stored: &Rec<T>) -> &T {
        stored.get()
    }

    fn project_mut(stored: &mut Rec<T>) -> &mut T {
        stored.get_mut()
    }
}

/// The trait that type lists implement to support its corresponding tagged
/// union representation for the [`Sum`] type.
///
/// [`Sum`]: crate::Sum
pub trait SumList {
    /// The underlying representation of the `Sum` type.
    type Repr;

    /// The number of alternatives.
    const LEN: usize;

    #[doc(hidden)]
    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8);

    #[doc(hidden)]
    fn type_name(tag: u8) -> &'static str;
}

impl SumList for () {
    type Repr = Nil;
    const LEN: usize = 0;

    unsafe fn drop(_: &mut ManuallyDrop<Nil>, _: u8) {}

    fn type_name(tag: u8) -> &'static str {
        unreachable!("tag {tag} names no alternative of an empty sum")
    }
}

/// The trait that type lists implement to support manipulating a specified
/// variant value marked by a specified tag in the [`Sum`] type.
///
/// `T` is the alternative as users see it, so for a boxed cell it is the
/// payload, not the [`Rec`].
///
/// [`Sum`]: crate::Sum
pub trait Split<T, U: Index>: SumList {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_data_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    unsafe fn get_unchecked(this: &Self::Repr) -> &T;

    #[doc(hidden)]
    unsafe fn get_unchecked_mut(this: &mut Self::Repr) -> &mut T;

    /// The remainder type list from splitting type list `Self` with type `T`
    /// and its index tag `U`.
    type Remainder: SumList;

    #[doc(hidden)]
    fn from_remainder(tag: u8) -> u8;

    #[doc(hidden)]
    fn try_unwrap(tag: u8) -> Result<(), u8>;
}

/// Positional access: the alternative at ordinal `I`, unwrapped if boxed.
pub trait At<I: Index>: SumList {
    /// The alternative at ordinal `I`.
    type Output;

    #[doc(hidden)]
    unsafe fn at_unchecked(this: &Self::Repr) -> &Self::Output;

    #[doc(hidden)]
    unsafe fn at_unchecked_mut(this: &mut Self::Repr) -> &mut Self::Output;
}

macro_rules! impl_lists {
    ($($cell:ident<Head $(: ?$unsized:ident)?> => $stored:ty),* $(,)?) => {$(
        impl<Head $(: ?$unsized)?, Tail: SumList> SumList for $cell<Head, Tail> {
            type Repr = Cons<$stored, Tail::Repr>;
            const LEN: usize = 1 + Tail::LEN;

            unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8) {
                if tag == 0 {
                    unsafe { ManuallyDrop::drop(&mut this.data) };
                } else {
                    unsafe { Tail::drop(&mut this.next, tag - 1) }
                }
            }

            fn type_name(tag: u8) -> &'static str {
                match tag.checked_sub(1) {
                    None => core::any::type_name::<Head>(),
                    Some(tag) => Tail::type_name(tag),
                }
            }
        }
    )*};
}

// The stored type is spelled out rather than projected through `Link`, whose
// impls need a sized head.
impl_lists!(Plain<Head> => Head, Boxed<Head: ?Sized> => Rec<Head>);

macro_rules! impl_cells {
    ($($cell:ident),* $(,)?) => {$(
        impl<Head, Tail: SumList> Split<Head, UTerm> for $cell<Head, Tail> {
            fn from_data(data: Head) -> Self::Repr {
                Cons {
                    data: ManuallyDrop::new(<Self as Link>::wrap(data)),
                }
            }

            unsafe fn into_data_unchecked(this: Self::Repr) -> Head {
                let stored = unsafe { ManuallyDrop::into_inner(this.data) };
                <Self as Link>::unwrap(stored)
            }

            unsafe fn get_unchecked(this: &Self::Repr) -> &Head {
                <Self as Link>::project(unsafe { &this.data })
            }

            unsafe fn get_unchecked_mut(this: &mut Self::Repr) -> &mut Head {
                <Self as Link>::project_mut(unsafe { &mut this.data })
            }

            type Remainder = Tail;

            fn from_remainder(tag: u8) -> u8 {
                tag + 1
            }

            fn try_unwrap(tag: u8) -> Result<(), u8> {
                match tag.checked_sub(1) {
                    None => Ok(()),
                    Some(tag) => Err(tag),
                }
            }
        }

        impl<Head, Tail, T, U: Index> Split<T, UInt<U>> for $cell<Head, Tail>
        where
            Tail: Split<T, U>,
        {
            fn from_data(data: T) -> Self::Repr {
                Cons {
                    next: ManuallyDrop::new(Tail::from_data(data)),
                }
            }

            unsafe fn into_data_unchecked(this: Self::Repr) -> T {
                unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
            }

            unsafe fn get_unchecked(this: &Self::Repr) -> &T {
                unsafe { Tail::get_unchecked(&this.next) }
            }

            unsafe fn get_unchecked_mut(this: &mut Self::Repr) -> &mut T {
                unsafe { Tail::get_unchecked_mut(&mut this.next) }
            }

            type Remainder = $cell<Head, <Tail as Split<T, U>>::Remainder>;

            fn from_remainder(tag: u8) -> u8 {
                if tag < UInt::<U>::TAG { tag } else { tag + 1 }
            }

            fn try_unwrap(tag: u8) -> Result<(), u8> {
                let cur = UInt::<U>::TAG;
                match tag.cmp(&cur) {
                    core::cmp::Ordering::Equal => Ok(()),
                    core::cmp::Ordering::Less => Err(tag),
                    core::cmp::Ordering::Greater => Err(tag - 1),
                }
            }
        }

        impl<Head, Tail: SumList> At<UTerm> for $cell<Head, Tail> {
            type Output = Head;

            unsafe fn at_unchecked(this: &Self::Repr) -> &Head {
                unsafe { <Self as Split<Head, UTerm>>::get_unchecked(this) }
            }

            unsafe fn at_unchecked_mut(this: &mut Self::Repr) -> &mut Head {
                unsafe { <Self as Split<Head, UTerm>>::get_unchecked_mut(this) }
            }
        }

        impl<Head, Tail, I: Index> At<UInt<I>> for $cell<Head, Tail>
        where
            Tail: At<I>,
        {
            type Output = Tail::Output;

            unsafe fn at_unchecked(this: &Self::Repr) -> &Tail::Output {
                unsafe { Tail::at_unchecked(&this.next) }
            }

            unsafe fn at_unchecked_mut(this: &mut Self::Repr) -> &mut Tail::Output {
                unsafe { Tail::at_unchecked_mut(&mut this.next) }
            }
        }
    )*};
}

impl_cells!(Plain, Boxed);

#[cfg(test)]
mod tests {
    use core::mem::size_of;

    use super::*;
    use crate::index::{U1, U2};

    type Mixed = (u8, Boxed<[u64; 8], (u32, ())>);

    #[test]
    fn union_is_as_large_as_its_largest_cell() {
        assert_eq!(size_of::<<(u8, (u64, ())) as SumList>::Repr>(), 8);
        assert_eq!(size_of::<<(u8, (u16, ())) as SumList>::Repr>(), 2);
        // The boxed payload is 64 bytes; only the pointer is stored inline.
        assert_eq!(size_of::<<Mixed as SumList>::Repr>(), size_of::<usize>());
    }

    #[test]
    fn length_and_names() {
        assert_eq!(<Mixed as SumList>::LEN, 3);
        assert_eq!(<() as SumList>::LEN, 0);
        assert_eq!(<Mixed as SumList>::type_name(0), "u8");
        assert_eq!(<Mixed as SumList>::type_name(1), "[u64; 8]");
        assert_eq!(<Mixed as SumList>::type_name(2), "u32");
    }

    #[test]
    fn remainder_tags_skip_the_split_alternative() {
        // Splitting off ordinal 1 of three alternatives.
        assert_eq!(<Mixed as Split<[u64; 8], U1>>::try_unwrap(0), Err(0));
        assert_eq!(<Mixed as Split<[u64; 8], U1>>::try_unwrap(1), Ok(()));
        assert_eq!(<Mixed as Split<[u64; 8], U1>>::try_unwrap(2), Err(1));

        assert_eq!(<Mixed as Split<[u64; 8], U1>>::from_remainder(0), 0);
        assert_eq!(<Mixed as Split<[u64; 8], U1>>::from_remainder(1), 2);

        assert_eq!(<Mixed as Split<u32, U2>>::from_remainder(1), 1);
        assert_eq!(<Mixed as Split<u8, UTerm>>::from_remainder(1), 2);
    }

    #[test]
    fn boxed_cells_are_unwrapped_on_access() {
        let mut repr = <Mixed as Split<[u64; 8], U1>>::from_data([7; 8]);
        unsafe {
            assert_eq!(<Mixed as At<U1>>::at_unchecked(&repr), &[7; 8]);
            <Mixed as At<U1>>::at_unchecked_mut(&mut repr)[0] = 1;
            assert_eq!(<Mixed as Split<[u64; 8], U1>>::get_unchecked(&repr)[0], 1);

            let mut repr = ManuallyDrop::new(repr);
            <Mixed as SumList>::drop(&mut repr, 1);
        }
    }
}
