//! Field attribute parsing and expansion for `#[derive(TlvSchema)]`

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, LitStr, Type, spanned::Spanned};

use crate::utils::{option_inner, tag_tokens, vec_inner};

/// How a field is filled from the data objects of its level
enum FieldKind {
    /// Data objects with one tag
    Tagged {
        tag: Vec<u8>,
        hex: bool,
        repeated: bool,
        required: bool,
    },
    /// Encoding of every data object at this level
    Raw,
    /// Left at `Default`
    Skip,
}

/// One field of the schema
struct SchemaField {
    ident: Ident,
    ty: Type,
    kind: FieldKind,
}

impl SchemaField {
    fn parse(field: &Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "TlvSchema requires named fields"))?;

        let attr = field
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("tlv"))
            .ok_or_else(|| {
                syn::Error::new(
                    field.span(),
                    "missing #[tlv(...)] attribute, use #[tlv(skip)] for untagged fields",
                )
            })?;

        Ok(Self {
            ident,
            ty: field.ty.clone(),
            kind: parse_kind(attr)?,
        })
    }

    fn expand(&self) -> syn::Result<TokenStream> {
        let ident = &self.ident;
        let name = ident.to_string();
        let ty = &self.ty;

        let (tag, hex, repeated, required) = match &self.kind {
            FieldKind::Skip => return Ok(quote! { ::core::default::Default::default() }),
            FieldKind::Raw => {
                return Ok(quote! { ::paycard_tlv::RawTlv::from_children(children) });
            }
            FieldKind::Tagged {
                tag,
                hex,
                repeated,
                required,
            } => (tag, *hex, *repeated, *required),
        };

        let tag_bytes = tag_tokens(tag);
        let tag_name = ::hex::encode_upper(tag);

        let decode_one = |target: &Type| {
            if hex {
                quote! { ::paycard_tlv::hex_value(tlv) }
            } else {
                quote! { <#target as ::paycard_tlv::TlvValue>::decode_tlv(tlv) }
            }
        };

        let tokens = if repeated {
            let inner = vec_inner(ty).ok_or_else(|| {
                syn::Error::new(ty.span(), "`repeated` fields must be of type Vec<T>")
            })?;
            let decode = decode_one(inner);
            quote! {
                ::paycard_tlv::find_all(children, #tag_bytes)
                    .map(|tlv| #decode)
                    .collect::<::paycard_tlv::Result<#ty>>()
                    .map_err(|e| e.in_field(#name))?
            }
        } else if let Some(inner) = option_inner(ty) {
            let decode = decode_one(inner);
            quote! {
                ::paycard_tlv::find(children, #tag_bytes)
                    .map(|tlv| #decode)
                    .transpose()
                    .map_err(|e| e.in_field(#name))?
            }
        } else {
            let decode = decode_one(ty);
            let missing = if required {
                quote! {
                    return ::core::result::Result::Err(
                        ::paycard_tlv::Error::MissingTag(#tag_name.to_string()).in_field(#name),
                    )
                }
            } else {
                quote! { ::core::default::Default::default() }
            };
            quote! {
                match ::paycard_tlv::find(children, #tag_bytes) {
                    ::core::option::Option::Some(tlv) => #decode.map_err(|e| e.in_field(#name))?,
                    ::core::option::Option::None => #missing,
                }
            }
        };

        Ok(tokens)
    }
}

fn parse_kind(attr: &Attribute) -> syn::Result<FieldKind> {
    let mut tag = None;
    let mut hex = false;
    let mut repeated = false;
    let mut required = false;
    let mut raw = false;
    let mut skip = false;

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("tag") {
            let lit: LitStr = meta.value()?.parse()?;
            let bytes = ::hex::decode(lit.value())
                .map_err(|e| syn::Error::new(lit.span(), format!("invalid hex tag: {e}")))?;
            if bytes.is_empty() || bytes.len() > 3 {
                return Err(syn::Error::new(lit.span(), "tags are one to three bytes long"));
            }
            tag = Some(bytes);
        } else if meta.path.is_ident("hex") {
            hex = true;
        } else if meta.path.is_ident("repeated") {
            repeated = true;
        } else if meta.path.is_ident("required") {
            required = true;
        } else if meta.path.is_ident("raw") {
            raw = true;
        } else if meta.path.is_ident("skip") {
            skip = true;
        } else {
            return Err(meta.error("unknown tlv attribute"));
        }
        Ok(())
    })?;

    match (tag, raw, skip) {
        (Some(tag), false, false) => Ok(FieldKind::Tagged {
            tag,
            hex,
            repeated,
            required,
        }),
        (None, true, false) => Ok(FieldKind::Raw),
        (None, false, true) => Ok(FieldKind::Skip),
        _ => Err(syn::Error::new(
            attr.span(),
            "expected exactly one of `tag = \"..\"`, `raw` or `skip`",
        )),
    }
}

/// Expand `#[derive(TlvSchema)]`
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(input.span(), "TlvSchema can only be derived for structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(input.span(), "TlvSchema requires named fields"));
    };

    let fields = named
        .named
        .iter()
        .map(SchemaField::parse)
        .collect::<syn::Result<Vec<_>>>()?;

    let idents = fields.iter().map(|field| &field.ident);
    let values = fields
        .iter()
        .map(SchemaField::expand)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(quote! {
        impl #impl_generics ::paycard_tlv::TlvSchema for #name #ty_generics #where_clause {
            fn decode_fields(
                children: &[::paycard_tlv::Tlv],
            ) -> ::paycard_tlv::Result<Self> {
                ::core::result::Result::Ok(Self {
                    #(#idents: #values,)*
                })
            }
        }

        impl #impl_generics ::paycard_tlv::TlvValue for #name #ty_generics #where_clause {
            fn decode_tlv(tlv: &::paycard_tlv::Tlv) -> ::paycard_tlv::Result<Self> {
                <Self as ::paycard_tlv::TlvSchema>::decode_fields(::paycard_tlv::constructed(tlv)?)
            }
        }
    })
}
