use super::{Column, ErrorSet};

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    /// Field attributes
    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    /// Set if the field is annotated with `#[key]`
    pub(crate) key: Option<syn::Attribute>,

    /// Set if the field is annotated with `#[auto]`
    pub(crate) auto: Option<syn::Attribute>,

    /// Optional database column name
    pub(crate) column: Option<Column>,

    /// Set if the field is annotated with `#[skip]`
    pub(crate) skip: Option<syn::Attribute>,

    /// Set if the field embeds a base record: `#[inherit]`
    pub(crate) inherit: Option<syn::Attribute>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();

        for attr in &field.attrs {
            let slot = if attr.path().is_ident("key") {
                &mut attrs.key
            } else if attr.path().is_ident("auto") {
                &mut attrs.auto
            } else if attr.path().is_ident("skip") {
                &mut attrs.skip
            } else if attr.path().is_ident("inherit") {
                &mut attrs.inherit
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[column] attribute"));
                } else {
                    attrs.column = Some(Column::from_ast(attr)?);
                }
                continue;
            } else {
                continue;
            };

            if slot.is_some() {
                let name = attr.path().get_ident().map(ToString::to_string).unwrap_or_default();
                errs.push(syn::Error::new_spanned(
                    attr,
                    format!("duplicate #[{name}] attribute"),
                ));
            } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                errs.push(syn::Error::new_spanned(attr, "attribute takes no arguments"));
            } else {
                *slot = Some(attr.clone());
            }
        }

        if let Some(skip) = &attrs.skip {
            if attrs.key.is_some()
                || attrs.auto.is_some()
                || attrs.column.is_some()
                || attrs.inherit.is_some()
            {
                errs.push(syn::Error::new_spanned(
                    skip,
                    "#[skip] cannot be combined with other field attributes",
                ));
            }
        }

        if let Some(inherit) = &attrs.inherit {
            if attrs.key.is_some() || attrs.auto.is_some() || attrs.column.is_some() {
                errs.push(syn::Error::new_spanned(
                    inherit,
                    "#[inherit] fields take their columns from the base record",
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ident.clone(),
            ty: field.ty.clone(),
            attrs,
        })
    }

    /// The column name the field binds to, if it binds one directly.
    pub(crate) fn column_name(&self) -> Option<String> {
        if self.attrs.skip.is_some() || self.attrs.inherit.is_some() {
            return None;
        }

        Some(match &self.attrs.column {
            Some(column) => column.name.value(),
            None => self.ident.to_string(),
        })
    }
}
