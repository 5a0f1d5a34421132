/// A fieldless enum stored as the text of its variant names.
#[derive(Debug)]
pub(crate) struct TextEnum {
    pub(crate) ident: syn::Ident,
    pub(crate) variants: Vec<syn::Ident>,
}

impl TextEnum {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic enums are not supported",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(ast, "enum has no variants"));
        }

        let mut variants = vec![];

        for variant in &ast.variants {
            if !matches!(variant.fields, syn::Fields::Unit) {
                return Err(syn::Error::new_spanned(
                    variant,
                    "only fieldless variants can be stored as text",
                ));
            }

            variants.push(variant.ident.clone());
        }

        Ok(TextEnum {
            ident: ast.ident.clone(),
            variants,
        })
    }
}
