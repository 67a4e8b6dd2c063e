extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `Record`, `Param` and `Load` for a struct with named fields.
///
/// Field attributes:
///
/// * `#[rename("Name")]` sets the logical name (result column and
///   translation key); defaults to the field identifier.
/// * `#[param]` or `#[param("Wire")]` marks the field as a procedure
///   parameter for runtime registration. A bare `#[param]` uses the logical
///   name.
#[proc_macro_derive(Record, attributes(rename, param))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match procmap_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
