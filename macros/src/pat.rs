use std::iter;

use const_random::const_random;
use convert_case::{Case, Casing};
use either::Either::{Left, Right};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{parse::Parse, spanned::Spanned, visit::Visit, *};

enum Wildcard {
    Ignore,
    Bind(Ident),
}

#[derive(Default)]
struct SumPat {
    root_ident: Option<syn::PatIdent>,
    wildcard: Option<Wildcard>,
    variants: Vec<Type>,
    variant_pats: Vec<Pat>,
    is_non_exhaustive: bool,

    is_in_subpat: bool,
    err: Option<syn::Error>,
}

impl SumPat {
    fn check_ty(&mut self, ty: &Type) -> bool {
        if self.variants.iter().any(|d| d == ty) {
            self.err = Some(syn::Error::new_spanned(
                ty,
                "splitting the same variant type into multiple patterns is not supported",
            ));
            return false;
        }
        true
    }

    fn check_ty_with_other(&self, other: &Self) -> Option<syn::Error> {
        self.variants.iter().find_map(|d| {
            let any = other.variants.iter().any(|e| d == e);
            if any && !self.is_non_exhaustive && !other.is_non_exhaustive {
                return Some(syn::Error::new_spanned(
                    d,
                    "multiple exhaustive patterns on the same variant type are not supported",
                ));
            }
            None
        })
    }

    fn push_ty(&mut self, ty: Type, root_ident: Option<syn::PatIdent>, i: &syn::Pat) {
        self.variants.push(ty);
        self.variant_pats.push(match root_ident {
            Some(mut pi) => {
                pi.subpat = Some((<Token![@]>::default(), Box::new(i.clone())));
                Pat::Ident(pi)
            }
            None => i.clone(),
        });
    }

    fn push_path(&mut self, qself: &Option<QSelf>, path: &Path, i: &syn::Pat) {
        let ty = Type::Path(syn::TypePath {
            qself: qself.clone(),
            path: path.clone(),
        });

        if self.check_ty(&ty) {
            let root_ident = self.root_ident.take();

            self.is_in_subpat = true;
            visit::visit_pat(self, i);
            self.is_in_subpat = false;

            self.push_ty(ty, root_ident, i);
        }
    }

    fn unsupported(&mut self, i: &syn::Pat) {
        self.err = Some(syn::Error::new_spanned(
            i,
            format_args!("pattern {} is not supported", i.to_token_stream()),
        ));
    }
}

impl Visit<'_> for SumPat {
    fn visit_pat(&mut self, i: &'_ syn::Pat) {
        match i {
            Pat::Ident(pi) if !self.is_in_subpat => {
                let is_pascal = pi.ident.to_string().is_case(Case::Pascal);
                match (&pi.subpat, is_pascal) {
                    (None, true) => {
                        let ty = Type::Path(syn::TypePath {
                            qself: None,
                            path: syn::Path::from(pi.ident.clone()),
                        });

                        if self.check_ty(&ty) {
                            let root_ident = self.root_ident.take();
                            self.push_ty(ty, root_ident, i);
                        }
                    }
                    (None, false) => {
                        if pi.by_ref.is_some() || pi.mutability.is_some() {
                            self.unsupported(i);
                        } else {
                            self.wildcard = Some(Wildcard::Bind(pi.ident.clone()));
                        }
                    }
                    (Some(_), _) => {
                        let mut pat_ident = pi.clone();
                        pat_ident.subpat = None;
                        self.root_ident = Some(pat_ident);
                        visit::visit_pat(self, i);
                    }
                }
            }
            Pat::Ident(pi) => {
                // `None`, `Ordering::Less` and friends inside a payload.
                if pi.subpat.is_none() && pi.ident.to_string().is_case(Case::Pascal) {
                    self.is_non_exhaustive = true;
                }
                visit::visit_pat(self, i);
            }

            Pat::Struct(syn::PatStruct { qself, path, .. })
            | Pat::TupleStruct(syn::PatTupleStruct { qself, path, .. })
            | Pat::Path(syn::PatPath { qself, path, .. })
                if !self.is_in_subpat =>
            {
                self.push_path(qself, path, i);
            }
            Pat::Struct(_) | Pat::TupleStruct(_) | Pat::Path(_) => {
                self.is_non_exhaustive = true;
                visit::visit_pat(self, i)
            }

            Pat::Paren(_) => visit::visit_pat(self, i),
            Pat::Or(_) => {
                if !self.is_in_subpat {
                    if let Some(pi) = self.root_ident.take() {
                        self.err = Some(syn::Error::new_spanned(
                            pi,
                            "root ident bindings on different variant types are not supported",
                        ));
                        return;
                    }
                }
                visit::visit_pat(self, i)
            }

            Pat::Wild(_) | Pat::Rest(_) if !self.is_in_subpat => {
                self.wildcard = Some(Wildcard::Ignore);
            }

            Pat::Const(_)
            | Pat::Lit(_)
            | Pat::Range(_)
            | Pat::Macro(_)
            | Pat::Reference(_)
            | Pat::Slice(_)
            | Pat::Type(_)
            | Pat::Verbatim(_)
            | Pat::Tuple(_)
                if !self.is_in_subpat =>
            {
                self.unsupported(i)
            }

            Pat::Const(_) | Pat::Lit(_) | Pat::Range(_) | Pat::Slice(_) => {
                self.is_non_exhaustive = true;
                visit::visit_pat(self, i)
            }

            _ => visit::visit_pat(self, i),
        }
    }
}

pub struct SumArm {
    pat: SumPat,
    guard: Option<Box<Expr>>,
    expr: Box<Expr>,
}

impl Parse for SumArm {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let syn::Arm {
            attrs,
            pat,
            guard,
            body,
            ..
        } = input.parse()?;

        if let (Some(first), Some(last)) = (attrs.first(), attrs.last()) {
            let span = first.span().join(last.span()).unwrap_or_else(|| first.span());
            return Err(syn::Error::new(
                span,
                "custom attributes are not supported on match arms",
            ));
        }

        let mut branches = SumPat::default();
        branches.visit_pat(&pat);

        if let Some(err) = branches.err.take() {
            return Err(err);
        }

        if branches.wildcard.is_some() {
            if !branches.variants.is_empty() {
                return Err(syn::Error::new_spanned(
                    &pat,
                    "a wildcard cannot be combined with variant patterns",
                ));
            }
            if let Some((if_token, _)) = &guard {
                return Err(syn::Error::new_spanned(
                    if_token,
                    "guards on wildcard arms are not supported",
                ));
            }
        } else if branches.variants.is_empty() {
            return Err(syn::Error::new(
                Span::call_site(),
                "cannot infer variant types; please specify at least one variant type in the pattern",
            ));
        }

        if guard.is_some() {
            branches.is_non_exhaustive = true;
        }

        Ok(SumArm {
            pat: branches,
            guard: guard.map(|g| g.1),
            expr: body,
        })
    }
}

pub struct SumMatch {
    expr: Box<Expr>,
    arms: Vec<SumArm>,
}

impl Parse for SumMatch {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let expr = Box::new(Expr::parse_without_eager_brace(input)?);

        let content;
        syn::braced!(content in input);

        let mut arms = Vec::new();
        while !content.is_empty() {
            arms.push(content.parse()?);
        }

        Ok(SumMatch { expr, arms })
    }
}

pub fn expand_body(arms: &[SumArm], base_ident: &Ident) -> TokenStream {
    let body = Lifetime::new(
        &format!("'__sum_match_body{}", const_random!(u32)),
        Span::mixed_site(),
    );
    let ok = quote!(::core::result::Result::Ok);
    let err = quote!(::core::result::Result::Err);
    let prefix = quote!(::recsum::Sum);
    let ret = Ident::new("ret", Span::mixed_site());
    let res = Ident::new("res", Span::mixed_site());
    let rem = Ident::new("rem", Span::mixed_site());

    // Arms after the first wildcard can never run.
    let reachable = arms
        .iter()
        .position(|arm| arm.pat.wildcard.is_some())
        .map_or(arms.len(), |index| index + 1);

    let branches = arms[..reachable].iter().flat_map(|arm| {
        let SumArm { pat, guard, expr } = arm;
        let SumPat {
            wildcard,
            variants,
            variant_pats,
            is_non_exhaustive,
            ..
        } = pat;

        if let Some(wildcard) = wildcard {
            let binding = match wildcard {
                Wildcard::Ignore => quote!(_),
                Wildcard::Bind(ident) => ident.to_token_stream(),
            };
            Left(iter::once(quote! {
                let #binding = #base_ident;
                #[warn(unreachable_code)]
                let #ret = #expr;
                break #body #ok(#ret);
            }))
        } else {
            let iter = (variants.iter().zip(variant_pats)).zip(iter::repeat((guard, expr)));
            Right(iter.map(|((variant, pat), (guard, expr))| {
                let success = quote! {{
                    #[warn(unreachable_code)]
                    let #ret = #expr;
                    break #body #ok(#ret);
                }};
                match guard {
                    Some(guard) => quote! {
                        let mut #base_ident = #base_ident;
                        #base_ident = match #base_ident.try_unwrap::<#variant, _>() {
                            #ok(#pat) if #guard => #success,
                            #ok(#res) => #prefix::new(#res),
                            #err(#rem) => #prefix::restore::<#variant, _>(#rem),
                        };
                    },
                    None if *is_non_exhaustive => quote! {
                        let mut #base_ident = #base_ident;
                        #base_ident = match #base_ident.try_unwrap::<#variant, _>() {
                            #ok(#pat) => #success,
                            #[allow(unreachable_patterns)]
                            #ok(#res) => #prefix::new(#res),
                            #err(#rem) => #prefix::restore::<#variant, _>(#rem),
                        };
                    },
                    None => quote! {
                        let #base_ident = match #base_ident.try_unwrap::<#variant, _>() {
                            #ok(#pat) => #success,
                            #err(#rem) => #rem,
                        };
                    },
                }
            }))
        }
    });

    let rest = (arms[..reachable].iter().all(|a| a.pat.wildcard.is_none()))
        .then(|| quote!(#err(#base_ident.unmatched())));

    quote! {#body: {
        #(#branches)*
        #rest
    }}
}

pub fn expand_match(data: SumMatch) -> TokenStream {
    let SumMatch { expr, arms } = data;
    let base_ident = Ident::new(
        &format!("__sum_match_base{}", const_random!(u32)),
        Span::mixed_site(),
    );
    let ret_ident = format_ident!("__sum_match_ret{}", const_random!(u32), span = Span::mixed_site());

    if let Some(err) = (arms.iter().enumerate())
        .flat_map(|(index, a)| arms.iter().take(index).map(move |b| (a, b)))
        .find_map(|(a, b)| a.pat.check_ty_with_other(&b.pat))
    {
        return err.to_compile_error();
    }

    let body = expand_body(&arms, &base_ident);
    quote! {{
        let #base_ident = #expr;
        #[allow(unreachable_code)]
        let #ret_ident: ::core::result::Result<_, ::recsum::InvalidVariantAccess> = #body;
        #ret_ident
    }}
}
