//! Derive macros for case-reducer state types
//!
//! # Available Macros
//!
//! - `#[derive(Draftable)]` - Marks a record as draftable so case handlers may
//!   edit it in place
//!
//! # Example
//!
//! ```ignore
//! use case_reducer_macros::Draftable;
//!
//! #[derive(Draftable, Clone, Debug)]
//! struct Todo {
//!     text: String,
//!     completed: bool,
//! }
//!
//! // Newtypes over primitives can opt out and behave like the primitive:
//! #[derive(Draftable, Clone, Copy, Debug)]
//! #[draftable(primitive)]
//! struct Count(i64);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, parse_macro_input};

/// Derive macro for `case_reducer_core::draft::Draftable`
///
/// Structs and enums are draftable by default: a mutating handler may edit
/// them through a draft and a replacing handler may return `Ok(None)` to keep
/// them as they are.
///
/// # Attributes
///
/// - `#[draftable(primitive)]` - Treat the type like a primitive instead:
///   handlers must always return the next value explicitly
///
/// # Errors
///
/// Produces a compile error (not a runtime panic) if:
/// - Applied to a union
/// - The `draftable` attribute carries anything other than `primitive`
#[proc_macro_derive(Draftable, attributes(draftable))]
pub fn derive_draftable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    if let Data::Union(_) = &input.data {
        return syn::Error::new_spanned(&input, "#[derive(Draftable)] cannot be used on unions")
            .to_compile_error()
            .into();
    }

    let primitive = match is_primitive(&input.attrs) {
        Ok(primitive) => primitive,
        Err(error) => return error.to_compile_error().into(),
    };
    let draftable = !primitive;

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::case_reducer_core::draft::Draftable for #name #ty_generics #where_clause {
            fn is_draftable(&self) -> bool {
                #draftable
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[draftable(primitive)]` off the container attributes
fn is_primitive(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut primitive = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("draftable")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primitive") {
                primitive = true;
                Ok(())
            } else {
                Err(meta.error("expected `primitive`"))
            }
        })?;
    }

    Ok(primitive)
}
