mod fields;
mod load;
mod param;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for procmap types
    procmap: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let record_impl = self.expand_record_impl();
        let param_impl = self.expand_param_impl();
        let load_impl = self.expand_load_impl();

        wrap_in_const(quote! {
            #record_impl
            #param_impl
            #load_impl
        })
    }
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        procmap: quote!(_procmap::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use procmap as _procmap;
            #code
        };
    }
}
