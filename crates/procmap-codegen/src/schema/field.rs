use super::ErrorSet;

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Rust identifier of the field
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Logical name: result column and translation key
    pub(crate) name: syn::LitStr,

    /// Wire parameter name from `#[param]`
    pub(crate) param: Option<syn::LitStr>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut rename: Option<syn::LitStr> = None;
        let mut param: Option<Option<syn::LitStr>> = None;

        for attr in &field.attrs {
            if attr.path().is_ident("rename") {
                if rename.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[rename] attribute"));
                } else if let Some(name) = errs.capture(parse_name(attr)) {
                    rename = Some(name);
                }
            } else if attr.path().is_ident("param") {
                if param.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[param] attribute"));
                } else if let syn::Meta::Path(_) = &attr.meta {
                    param = Some(None);
                } else if let Some(name) = errs.capture(parse_name(attr)) {
                    param = Some(Some(name));
                }
            }
        }

        errs.finish()?;

        let name = rename
            .unwrap_or_else(|| syn::LitStr::new(&ident.unraw().to_string(), ident.span()));

        // A bare `#[param]` sends the field under its logical name
        let param = param.map(|wire| wire.unwrap_or_else(|| name.clone()));

        Ok(Self {
            ident: ident.clone(),
            ty: field.ty.clone(),
            name,
            param,
        })
    }
}

fn parse_name(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let name: syn::LitStr = attr.parse_args()?;

    if name.value().is_empty() {
        return Err(syn::Error::new_spanned(&name, "name cannot be empty"));
    }

    Ok(name)
}
