#![doc = include_str!("../README.md")]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![warn(rust_2024_compatibility)]

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop, MaybeUninit},
    ops::{Deref, DerefMut},
    ptr,
};

#[macro_use]
mod macros;

pub mod derive;
mod error;
pub mod index;
mod matcher;
mod rec;
pub mod repr;

#[cfg(feature = "macros")]
pub use recsum_macros::match_sum;

pub use self::{
    error::InvalidVariantAccess,
    matcher::{IntoMatch, Match, MatchMut},
    rec::Rec,
};
use self::{
    index::{Index, UTerm},
    repr::{At, Split, SumList},
};

pub type Repr<S> = <S as SumList>::Repr;
pub type Rem<S, T, U> = <S as Split<T, U>>::Remainder;
pub type Output<S, I> = <S as At<I>>::Output;

/// A value holding exactly one alternative out of the type list `S`.
///
/// Spelled with the [`Sum!`] macro: `Sum![Const, box Add]`. The tag records
/// which alternative is live; only that alternative is ever dropped, cloned
/// or compared.
pub struct Sum<S: SumList> {
    tag: u8,
    data: ManuallyDrop<Repr<S>>,
}

impl<T> From<T> for Sum![T] {
    /// Construct a `Sum` of one type from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recsum::Sum;
    ///
    /// let s: Sum![i32] = 42.into();
    /// assert_eq!(*s, 42);
    /// ```
    fn from(value: T) -> Self {
        Sum::new(value)
    }
}

impl<T> Deref for Sum![T] {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { <(T, ()) as Split<T, UTerm>>::get_unchecked(&self.data) }
    }
}

impl<T> DerefMut for Sum![T] {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { <(T, ()) as Split<T, UTerm>>::get_unchecked_mut(&mut self.data) }
    }
}

impl<T> Sum![T] {
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        unsafe { <(T, ()) as Split<T, UTerm>>::into_data_unchecked(ManuallyDrop::take(&mut this.data)) }
    }
}

impl Sum![] {
    pub fn unreachable(self) -> ! {
        let this = ManuallyDrop::new(self);
        match unsafe { ptr::read(&*this.data) }.0 {}
    }
}

impl<S: SumList> Sum<S> {
    /// Constructs the alternative of type `T`.
    ///
    /// For a boxed alternative `box T`, `T` is moved into a fresh [`Rec`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recsum::Sum;
    ///
    /// type Number = Sum![i64, f64];
    /// let n = Number::new(1.5f64);
    /// assert_eq!(n.index(), 1);
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        S: Split<T, U>,
        U: Index,
    {
        Sum {
            tag: U::TAG,
            data: ManuallyDrop::new(<S as Split<T, U>>::from_data(value)),
        }
    }

    /// The ordinal of the active alternative.
    pub fn index(&self) -> usize {
        self.tag.into()
    }

    /// Whether the active alternative is the one at ordinal `I`.
    pub fn is_type_at<I: Index>(&self) -> bool {
        self.tag == I::TAG
    }

    /// Whether the active alternative is the one of type `T`.
    pub fn is<T, U>(&self) -> bool
    where
        S: Split<T, U>,
        U: Index,
    {
        self.tag == U::TAG
    }

    /// The type name of the active alternative, unwrapped if boxed.
    pub fn type_name(&self) -> &'static str {
        S::type_name(self.tag)
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        S: Split<T, U>,
        U: Index,
    {
        self.is::<T, U>()
            .then(|| unsafe { <S as Split<T, U>>::get_unchecked(&self.data) })
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        S: Split<T, U>,
        U: Index,
    {
        if self.is::<T, U>() {
            Some(unsafe { self.get_unchecked_mut::<T, U>() })
        } else {
            None
        }
    }

    /// # Safety
    ///
    /// The active alternative must be the one of type `T`.
    pub(crate) unsafe fn get_unchecked_mut<T, U>(&mut self) -> &mut T
    where
        S: Split<T, U>,
        U: Index,
    {
        debug_assert_eq!(self.tag, U::TAG);
        unsafe { <S as Split<T, U>>::get_unchecked_mut(&mut self.data) }
    }

    /// The alternative at ordinal `I`.
    ///
    /// # Errors
    ///
    /// [`InvalidVariantAccess::WrongIndex`] if another alternative is active.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recsum::{index::{U0, U1}, Sum};
    ///
    /// let s: Sum![u8, String] = Sum::new(String::from("hi"));
    /// assert_eq!(s.at::<U1>().unwrap(), "hi");
    /// assert_eq!(
    ///     s.at::<U0>().unwrap_err().to_string(),
    ///     "indexing with 0, but the active index is 1",
    /// );
    /// ```
    pub fn at<I>(&self) -> Result<&Output<S, I>, InvalidVariantAccess>
    where
        S: At<I>,
        I: Index,
    {
        if self.tag != I::TAG {
            return Err(InvalidVariantAccess::wrong_index(I::TAG, self.tag));
        }
        Ok(unsafe { <S as At<I>>::at_unchecked(&self.data) })
    }

    /// The alternative at ordinal `I`, mutably.
    ///
    /// # Errors
    ///
    /// [`InvalidVariantAccess::WrongIndex`] if another alternative is active.
    pub fn at_mut<I>(&mut self) -> Result<&mut Output<S, I>, InvalidVariantAccess>
    where
        S: At<I>,
        I: Index,
    {
        if self.tag != I::TAG {
            return Err(InvalidVariantAccess::wrong_index(I::TAG, self.tag));
        }
        Ok(unsafe { <S as At<I>>::at_unchecked_mut(&mut self.data) })
    }

    /// Replaces the active alternative, dropping the previous one.
    pub fn set<T, U>(&mut self, value: T)
    where
        S: Split<T, U>,
        U: Index,
    {
        *self = Sum::new(value);
    }

    /// Takes out the alternative of type `T`, or returns the sum narrowed to
    /// the remaining alternatives.
    pub fn try_unwrap<T, U>(self) -> Result<T, Sum<Rem<S, T, U>>>
    where
        S: Split<T, U>,
        U: Index,
    {
        let mut this = ManuallyDrop::new(self);
        match <S as Split<T, U>>::try_unwrap(this.tag) {
            Ok(()) => Ok(unsafe {
                <S as Split<T, U>>::into_data_unchecked(ManuallyDrop::take(&mut this.data))
            }),
            Err(tag) => unsafe {
                let data = mem::transmute_copy(&this.data);
                Err(Sum { tag, data })
            },
        }
    }

    /// Widens a remainder produced by [`Sum::try_unwrap`] back into a sum
    /// over the full list.
    pub fn restore<T, U>(rem: Sum<Rem<S, T, U>>) -> Self
    where
        S: Split<T, U>,
        U: Index,
    {
        let rem = ManuallyDrop::new(rem);
        let tag = <S as Split<T, U>>::from_remainder(rem.tag);
        unsafe {
            let mut data = MaybeUninit::<Repr<S>>::uninit();
            data.as_mut_ptr()
                .cast::<Repr<Rem<S, T, U>>>()
                .write(ptr::read(&*rem.data));

            Sum {
                tag,
                data: ManuallyDrop::new(data.assume_init()),
            }
        }
    }

    /// The error reported when no handler accepts the active alternative.
    pub fn unmatched(&self) -> InvalidVariantAccess {
        InvalidVariantAccess::unhandled(self.tag, self.type_name())
    }

    /// Starts an ordered handler list over a shared borrow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recsum::Sum;
    ///
    /// let s: Sum![i32, String] = Sum::new(7);
    /// let doubled = s
    ///     .matching()
    ///     .case(|n: &i32| n * 2)
    ///     .case(|s: &String| s.len() as i32)
    ///     .finish();
    /// assert_eq!(doubled, Ok(14));
    /// ```
    pub fn matching<R>(&self) -> Match<'_, S, R> {
        Match::new(self)
    }

    /// Starts an ordered handler list over a mutable borrow.
    pub fn matching_mut<R>(&mut self) -> MatchMut<'_, S, R> {
        MatchMut::new(self)
    }

    /// Starts an ordered handler list consuming the sum.
    pub fn into_match<R>(self) -> IntoMatch<S, R> {
        IntoMatch::new(self)
    }
}

/// The alternative at ordinal `I` of `sum`.
///
/// # Errors
///
/// [`InvalidVariantAccess::WrongIndex`] if another alternative is active.
pub fn get<I, S>(sum: &Sum<S>) -> Result<&Output<S, I>, InvalidVariantAccess>
where
    S: At<I>,
    I: Index,
{
    sum.at::<I>()
}

/// The alternative at ordinal `I` of `sum`, mutably.
///
/// # Errors
///
/// [`InvalidVariantAccess::WrongIndex`] if another alternative is active.
pub fn get_mut<I, S>(sum: &mut Sum<S>) -> Result<&mut Output<S, I>, InvalidVariantAccess>
where
    S: At<I>,
    I: Index,
{
    sum.at_mut::<I>()
}

impl<S: derive::SumDebug> fmt::Debug for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { S::debug(&self.data, self.tag, f) }
    }
}

impl<S: derive::SumDisplay> fmt::Display for Sum<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        unsafe { S::display(&self.data, self.tag, f) }
    }
}

impl<S: SumList> Drop for Sum<S> {
    fn drop(&mut self) {
        unsafe { S::drop(&mut self.data, self.tag) }
    }
}

impl<S: derive::SumClone> Clone for Sum<S> {
    fn clone(&self) -> Self {
        Sum {
            tag: self.tag,
            data: unsafe { S::clone(&self.data, self.tag) },
        }
    }
}

impl<S: derive::SumPartialEq> PartialEq for Sum<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && unsafe { S::eq(&self.data, &other.data, self.tag) }
    }
}

impl<S: derive::SumEq> Eq for Sum<S> {}

impl<S: derive::SumPartialOrd> PartialOrd for Sum<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.tag.cmp(&other.tag) {
            Ordering::Equal => unsafe { S::partial_cmp(&self.data, &other.data, self.tag) },
            other => Some(other),
        }
    }
}

impl<S: derive::SumOrd + derive::SumEq> Ord for Sum<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag
            .cmp(&other.tag)
            .then_with(|| unsafe { S::cmp(&self.data, &other.data, self.tag) })
    }
}

impl<S: derive::SumHash> Hash for Sum<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        unsafe { S::hash(&self.data, self.tag, state) }
    }
}
