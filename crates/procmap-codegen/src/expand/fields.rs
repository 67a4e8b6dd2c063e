use super::Expand;
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let procmap = &self.procmap;
        let record_ident = &self.record.ident;
        let fields = self
            .record
            .fields
            .iter()
            .map(|field| self.expand_field(field));

        quote! {
            impl #procmap::Record for #record_ident {
                fn fields() -> &'static [#procmap::Field<Self>] {
                    static FIELDS: #procmap::OnceLock<#procmap::Vec<#procmap::Field<#record_ident>>> =
                        #procmap::OnceLock::new();

                    FIELDS.get_or_init(|| {
                        let mut fields = #procmap::Vec::new();
                        #( fields.push(#fields); )*
                        fields
                    })
                }
            }
        }
    }

    fn expand_field(&self, field: &Field) -> TokenStream {
        let procmap = &self.procmap;
        let record_ident = &self.record.ident;
        let field_ident = &field.ident;
        let ty = &field.ty;
        let name = &field.name;
        let param = match &field.param {
            Some(wire) => quote!(#procmap::Option::Some(#wire)),
            None => quote!(#procmap::Option::None),
        };

        quote! {
            #procmap::Field {
                name: #name,
                param: #param,
                ty: <#ty as #procmap::Primitive>::TYPE,
                nullable: <#ty as #procmap::Primitive>::NULLABLE,
                get: |record: &#record_ident| {
                    #procmap::Primitive::to_value(&record.#field_ident)
                },
                set: |record: &mut #record_ident, value: #procmap::Value| {
                    record.#field_ident = <#ty as #procmap::Primitive>::load(value)?;
                    #procmap::Ok(())
                },
            }
        }
    }
}
