//! Type-level ordinals addressing the alternatives of a [`Sum`].
//!
//! `UTerm` is the first alternative and `UInt<U>` the one right after `U`.
//! They only ever appear as type arguments, e.g. `sum.at::<U2>()`, and are
//! inferred whenever an alternative is looked up by its type instead.
//!
//! [`Sum`]: crate::Sum
#![allow(missing_docs)]

use core::marker::PhantomData;

pub struct UTerm;

pub struct UInt<U>(PhantomData<U>);

pub trait Index {
    /// The ordinal as stored in a sum's discriminant.
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = 1 + U::TAG;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;

pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;
pub type U13 = UInt<U12>;
pub type U14 = UInt<U13>;
pub type U15 = UInt<U14>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_count_from_zero() {
        assert_eq!(U0::TAG, 0);
        assert_eq!(U1::TAG, 1);
        assert_eq!(U9::TAG, 9);
        assert_eq!(U15::TAG, 15);
        assert_eq!(<UInt<U15> as Index>::TAG, 16);
    }
}
