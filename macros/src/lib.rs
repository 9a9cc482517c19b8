//! Procedural macros for the `recsum` crate.

use proc_macro::TokenStream;

mod pat;

/// Matches a sum by value, naming alternatives by their type in patterns.
///
/// ```rust,ignore
/// let value = match_sum!(expr {
///     Const(c) => c,
///     Add { l, r } => eval(l) + eval(r),
///     whole @ Sub { .. } => eval_sub(whole),
///     Mul(m) | Div(m) if m.is_trivial() => 0,
///     rest => fallback(rest),
/// })?;
/// ```
///
/// Arms are tried top to bottom. An arm whose pattern root is a struct,
/// tuple-struct or unit pattern handles the alternative of that type; `_` or
/// a lowercase binding handles everything left and ends the list, so arms
/// after it are never reached.
///
/// The pattern path doubles as the alternative's type, so generic
/// alternatives need their arguments spelled out: `Just::<T>(v)`.
///
/// The whole expression evaluates to `Result<R, recsum::InvalidVariantAccess>`,
/// `Err` when no arm accepted the active alternative.
#[proc_macro]
pub fn match_sum(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as pat::SumMatch);
    pat::expand_match(input).into()
}
