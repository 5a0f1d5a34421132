use super::{Accessor, ErrorSet, Field};

use std::collections::HashMap;

#[derive(Debug)]
pub(crate) struct Record {
    /// The struct identifier
    pub(crate) ident: syn::Ident,

    /// Record fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Method-based column bindings
    pub(crate) accessors: Vec<Accessor>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "Record fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "generic records are not supported",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut fields = vec![];
        let mut accessors = vec![];

        for node in &node.named {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        for attr in &ast.attrs {
            if attr.path().is_ident("accessor") {
                match Accessor::from_ast(attr) {
                    Ok(accessor) => accessors.push(accessor),
                    Err(err) => errs.push(err),
                }
            }
        }

        let accessors = merge_accessors(accessors, &mut errs);

        // Column keys are case-insensitive
        let mut seen = HashMap::new();

        let columns = fields
            .iter()
            .filter_map(|field| {
                let name = field.column_name()?;
                let span = match &field.attrs.column {
                    Some(column) => column.name.span(),
                    None => field.ident.span(),
                };
                Some((name, span))
            })
            .chain(
                accessors
                    .iter()
                    .map(|accessor| (accessor.column.value(), accessor.column.span())),
            );

        for (name, span) in columns {
            if let Some(first) = seen.insert(name.to_lowercase(), name.clone()) {
                errs.push(syn::Error::new(
                    span,
                    format!("duplicate column `{name}`; `{first}` is already bound"),
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Record {
            ident: ast.ident.clone(),
            fields,
            accessors,
        })
    }
}

/// Folds `#[accessor]` attributes naming the same column into one binding, so
/// the getter and the setter of a column may be declared separately. Two
/// getters or two setters for one column are a duplicate.
fn merge_accessors(accessors: Vec<Accessor>, errs: &mut ErrorSet) -> Vec<Accessor> {
    let mut merged: Vec<Accessor> = vec![];

    for accessor in accessors {
        let column = accessor.column.value();

        let Some(existing) = merged
            .iter_mut()
            .find(|existing| existing.column.value().eq_ignore_ascii_case(&column))
        else {
            merged.push(accessor);
            continue;
        };

        let overlaps = (existing.get.is_some() && accessor.get.is_some())
            || (existing.set.is_some() && accessor.set.is_some());

        if overlaps {
            errs.push(syn::Error::new(
                accessor.column.span(),
                format!(
                    "duplicate column `{column}`; `{}` is already bound",
                    existing.column.value()
                ),
            ));
            continue;
        }

        existing.get = existing.get.take().or(accessor.get);
        existing.set = existing.set.take().or(accessor.set);
        existing.key |= accessor.key;
        existing.auto |= accessor.auto;
    }

    merged
}
