/// Constructs a [`struct@Sum`] type from a list of alternative types.
///
/// Prefix an alternative with `box` to store it behind a [`Rec`]; this is
/// required for alternatives that contain the sum type itself.
///
/// # Examples
///
/// ```rust
/// use recsum::Sum;
///
/// struct Leaf(u32);
/// struct Node(Tree, Tree);
///
/// type Tree = Sum![Leaf, box Node];
/// let t: Tree = Sum::new(Node(Sum::new(Leaf(1)), Sum::new(Leaf(2))));
/// assert_eq!(t.index(), 1);
/// ```
///
/// [`Rec`]: crate::Rec
#[macro_export]
macro_rules! Sum {
    [$($t:tt)*] => [$crate::Sum::<$crate::T![$($t)*]>];
}

/// Constructs a type list from a list of alternative types.
///
/// # Examples
///
/// ```rust
/// use recsum::{repr::Boxed, T};
///
/// type MyList = T![i32, box u32, f64];
/// let _: Option<MyList> = None::<(i32, Boxed<u32, (f64, ())>)>;
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [box $head:ty $(, $($t:tt)*)?] => [$crate::repr::Boxed<$head, $crate::T![$($($t)*)?]>];
    [$head:ty $(, $($t:tt)*)?] => [($head, $crate::T![$($($t)*)?])];
}
