use super::{ErrorSet, Field};

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Fields in declaration order
    pub(crate) fields: Vec<Field>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // The field list lives in a static, which cannot name generic
        // parameters
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic records are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut fields = vec![];

        for node in &node.named {
            if let Some(field) = errs.capture(Field::from_ast(node)) {
                fields.push(field);
            }
        }

        for (i, field) in fields.iter().enumerate() {
            let name = field.name.value();
            if fields[..i].iter().any(|prev| prev.name.value() == name) {
                errs.push(syn::Error::new_spanned(
                    &field.name,
                    format!("duplicate field name `{name}`"),
                ));
            }
        }

        errs.finish()?;

        Ok(Self {
            ident: ast.ident.clone(),
            fields,
        })
    }
}
