//! Procedural macros for tag annotated BER-TLV schemas
//!
//! Use through the `paycard-tlv` crate, which re-exports the derive and
//! provides the runtime the generated code calls into.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod schema;
mod utils;

/// Derive `TlvSchema` and `TlvValue` for a struct with named fields
///
/// Every field carries a `#[tlv(...)]` attribute:
///
/// - `tag = "9F12"` selects the data object, combined with `hex`,
///   `repeated` and `required` as needed
/// - `raw` captures the encoding of all data objects at this level
/// - `skip` leaves the field at its default
///
/// ```ignore
/// #[derive(Debug, Default, TlvSchema)]
/// pub struct ApplicationTemplate {
///     #[tlv(tag = "4F")]
///     pub id: Vec<u8>,
///     #[tlv(tag = "50")]
///     pub label: Option<String>,
/// }
/// ```
#[proc_macro_derive(TlvSchema, attributes(tlv))]
pub fn derive_tlv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match schema::expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
