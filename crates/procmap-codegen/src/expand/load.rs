use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_load_impl(&self) -> TokenStream {
        let procmap = &self.procmap;
        let record_ident = &self.record.ident;
        let scalar_error = format!("record `{record_ident}` cannot be loaded from a scalar");

        quote! {
            impl #procmap::Load for #record_ident {
                fn load_row(
                    row: #procmap::Row,
                    materializer: &#procmap::Materializer,
                ) -> #procmap::Result<Self> {
                    materializer.materialize::<Self>(row)
                }

                fn load_scalar(_value: #procmap::Value) -> #procmap::Result<Self> {
                    ::core::result::Result::Err(#procmap::Error::invalid_result(#scalar_error))
                }
            }
        }
    }
}
