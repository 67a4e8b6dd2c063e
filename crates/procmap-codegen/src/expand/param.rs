use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_param_impl(&self) -> TokenStream {
        let procmap = &self.procmap;
        let record_ident = &self.record.ident;

        quote! {
            impl #procmap::Param for #record_ident {
                fn shape() -> #procmap::ParamShape<Self> {
                    #procmap::ParamShape::Record(<Self as #procmap::Record>::fields())
                }
            }
        }
    }
}
