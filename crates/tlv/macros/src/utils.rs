//! Utility functions for macro expansion

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{GenericArgument, Lit, LitInt, PathArguments, Type};

/// Create a byte literal
pub(crate) fn byte_lit(value: u8) -> Lit {
    Lit::Int(LitInt::new(&format!("0x{value:02X}u8"), Span::call_site()))
}

/// `&[0x9F, 0x12]` for a tag
pub(crate) fn tag_tokens(tag: &[u8]) -> TokenStream {
    let bytes = tag.iter().copied().map(byte_lit);
    quote! { &[#(#bytes),*] }
}

/// Inner type of `Option<T>`, if `ty` is an option
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    generic_inner(ty, "Option")
}

/// Inner type of `Vec<T>`, if `ty` is a vector
pub(crate) fn vec_inner(ty: &Type) -> Option<&Type> {
    generic_inner(ty, "Vec")
}

fn generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
