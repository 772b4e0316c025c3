//! Declaration macro for the tinyunit test framework.
//!
//! `#[unit_test]` turns a plain function into a self-registering test:
//! - the function body is rewritten to return `CheckResult`, so `check!` and `?` work inside it
//! - a hidden `TestDecl` static is placed into the `DECLARED_TESTS` distributed slice, carrying the function name,
//!   the source file and the declaration line
//!
//! # Example
//! ```ignore
//! use tinyunit::{check, unit_test};
//!
//! #[unit_test]
//! fn integer_addition() {
//!     let x = 9;
//!     let y = 4;
//!     check!(x + y == 13);
//! }
//! ```
//!
//! The generated code refers to `::tinyunit`, so the attribute is meant to be used through the `tinyunit` facade crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::spanned::Spanned;
use syn::visit::{self, Visit};
use syn::{Error, ExprClosure, ExprReturn, FnArg, ItemFn, ReturnType, Type, parse_macro_input};

/// Declare a self-registering unit test.
///
/// The function must take no parameters and be neither `async` nor generic. It may return `()` (the default) or
/// `tinyunit::CheckResult`; in the latter case its body is left untouched. A `()` body cannot use a bare `return;`,
/// since the generated function returns `CheckResult`.
#[proc_macro_attribute]
pub fn unit_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return Error::new(attr.span(), "#[unit_test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as ItemFn);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    validate_signature(&input)?;

    let ItemFn { attrs, vis, sig, block } = input;
    let ident = &sig.ident;
    let name = ident.to_string();
    let decl_ident = format_ident!("__tinyunit_test_{}", name, span = Span::call_site());

    // Unit-returning bodies get an implicit `Ok(())` so `check!` can return early from them.
    let (lint_allow, body) = if returns_unit(&sig.output) {
        (
            quote! { #[allow(unreachable_code)] },
            quote! {
                {
                    #block;
                    ::core::result::Result::Ok(())
                }
            },
        )
    } else {
        (quote! {}, quote! { #block })
    };

    Ok(quote! {
        #(#attrs)*
        #lint_allow
        #vis fn #ident() -> ::tinyunit::CheckResult #body

        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        #[::tinyunit::__private::linkme::distributed_slice(::tinyunit::DECLARED_TESTS)]
        #[linkme(crate = ::tinyunit::__private::linkme)]
        static #decl_ident: ::tinyunit::TestDecl =
            ::tinyunit::TestDecl::new(#name, ::core::file!(), ::core::line!(), #ident);
    })
}

fn validate_signature(input: &ItemFn) -> syn::Result<()> {
    let sig = &input.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(Error::new(asyncness.span(), "#[unit_test] functions cannot be async"));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new(sig.generics.span(), "#[unit_test] functions cannot be generic"));
    }
    if let Some(arg) = sig.inputs.first() {
        let message = match arg {
            FnArg::Receiver(_) => "#[unit_test] cannot be used on methods",
            FnArg::Typed(_) => "#[unit_test] functions cannot take parameters",
        };
        return Err(Error::new(arg.span(), message));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(Error::new(variadic.span(), "#[unit_test] functions cannot be variadic"));
    }

    if returns_unit(&sig.output) {
        let mut finder = BareReturnFinder::default();
        finder.visit_block(&input.block);
        if let Some(span) = finder.found {
            return Err(Error::new(
                span,
                "#[unit_test] functions returning `()` cannot use a bare `return;`; return `CheckResult` and use `return Ok(());`",
            ));
        }
    } else if let ReturnType::Type(_, ty) = &sig.output {
        if !is_check_result(ty) {
            return Err(Error::new(
                ty.span(),
                "#[unit_test] functions must return `()` or `CheckResult`",
            ));
        }
    }

    Ok(())
}

fn returns_unit(output: &ReturnType) -> bool {
    match output {
        ReturnType::Default => true,
        ReturnType::Type(_, ty) => matches!(&**ty, Type::Tuple(tuple) if tuple.elems.is_empty()),
    }
}

fn is_check_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "CheckResult" && segment.arguments.is_empty()),
        Type::Paren(paren) => is_check_result(&paren.elem),
        Type::Group(group) => is_check_result(&group.elem),
        _ => false,
    }
}

/// Finds the first `return;` that returns from the test function itself.
#[derive(Default)]
struct BareReturnFinder {
    found: Option<Span>,
}

impl<'ast> Visit<'ast> for BareReturnFinder {
    fn visit_expr_return(&mut self, node: &'ast ExprReturn) {
        if node.expr.is_none() && self.found.is_none() {
            self.found = Some(node.span());
        }
        visit::visit_expr_return(self, node);
    }

    // Returns inside closures, async blocks and nested items belong to them.
    fn visit_expr_closure(&mut self, _: &'ast ExprClosure) {}

    fn visit_expr_async(&mut self, _: &'ast syn::ExprAsync) {}

    fn visit_item(&mut self, _: &'ast syn::Item) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn error_of(input: ItemFn) -> String {
        match expand(input) {
            Ok(tokens) => panic!("expected a compile error, got: {tokens}"),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn test_unit_body_gets_implicit_ok() {
        let tokens = expand(parse_quote! {
            fn integer_addition() {
                check!(9 + 4 == 13);
            }
        })
        .unwrap()
        .to_string()
        .replace(' ', "");
        assert!(tokens.contains("fninteger_addition()->::tinyunit::CheckResult"));
        assert!(tokens.contains("Result::Ok(())"));
        assert!(tokens.contains("__tinyunit_test_integer_addition"));
    }

    #[test]
    fn test_check_result_body_is_left_untouched() {
        let tokens = expand(parse_quote! {
            fn complicated() -> tinyunit::CheckResult {
                Ok(())
            }
        })
        .unwrap()
        .to_string()
        .replace(' ', "");
        assert!(!tokens.contains("allow(unreachable_code)"));
        assert!(!tokens.contains("Result::Ok(())"));
    }

    #[test]
    fn test_rejects_bare_return_in_unit_body() {
        let message = error_of(parse_quote! {
            fn early_exit() {
                if true {
                    return;
                }
            }
        });
        assert!(message.contains("cannot use a bare `return;`"));
    }

    #[test]
    fn test_bare_return_inside_closure_is_allowed() {
        let result = expand(parse_quote! {
            fn closure_returns() {
                let f = || {
                    return;
                };
                f();
            }
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_other_return_types() {
        let message = error_of(parse_quote! {
            fn answer() -> i32 {
                42
            }
        });
        assert_eq!(message, "#[unit_test] functions must return `()` or `CheckResult`");
    }

    #[test]
    fn test_rejects_parameters_async_and_generics() {
        assert!(error_of(parse_quote! { fn takes(x: i32) {} }).contains("cannot take parameters"));
        assert!(error_of(parse_quote! { async fn later() {} }).contains("cannot be async"));
        assert!(error_of(parse_quote! { fn generic<T>() {} }).contains("cannot be generic"));
    }
}
