use crate::schema::{Accessor, Field, Record};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) struct Expand<'a> {
    /// The record being expanded
    pub(super) record: &'a Record,

    /// Path prefix for rowbind types
    pub(super) rowbind: TokenStream,
}

impl Expand<'_> {
    pub(super) fn expand(&self) -> TokenStream {
        let rowbind = &self.rowbind;
        let ident = &self.record.ident;
        let name = ident.to_string();

        // Base records bind first
        let inherits = self
            .record
            .fields
            .iter()
            .filter(|field| field.attrs.inherit.is_some())
            .map(|field| self.expand_inherit(field));

        let fields = self
            .record
            .fields
            .iter()
            .filter_map(|field| self.expand_field(field));

        let accessors = self
            .record
            .accessors
            .iter()
            .map(|accessor| self.expand_accessor(accessor));

        quote! {
            impl #rowbind::Record for #ident {
                fn bind(bindings: &mut #rowbind::Bindings<Self>) {
                    #( #inherits )*
                    #( #fields )*
                    #( #accessors )*
                }

                fn name() -> &'static str {
                    #name
                }
            }
        }
    }

    fn expand_inherit(&self, field: &Field) -> TokenStream {
        let ident = &field.ident;

        quote! {
            bindings.inherit(|record| &record.#ident, |record| &mut record.#ident);
        }
    }

    fn expand_field(&self, field: &Field) -> Option<TokenStream> {
        let column = field.column_name()?;
        let ident = &field.ident;
        let name = ident.to_string();
        let ty = &field.ty;
        let flags = flags(field.attrs.key.is_some(), field.attrs.auto.is_some());

        Some(quote! {
            bindings
                .field::<#ty>(
                    #column,
                    #name,
                    |record| &record.#ident,
                    |record| &mut record.#ident,
                )
                #flags;
        })
    }

    fn expand_accessor(&self, accessor: &Accessor) -> TokenStream {
        let column = &accessor.column;
        let flags = flags(accessor.key, accessor.auto);

        let get = accessor.get.as_ref().map(|get| {
            let name = get.to_string();
            quote!(bindings.getter(#column, #name, Self::#get) #flags;)
        });

        let set = accessor.set.as_ref().map(|set| {
            let name = set.to_string();
            quote!(bindings.setter(#column, #name, Self::#set) #flags;)
        });

        quote! {
            #get
            #set
        }
    }
}

fn flags(key: bool, auto: bool) -> TokenStream {
    let key = key.then(|| quote!(.primary_key()));
    let auto = auto.then(|| quote!(.defaultable()));

    quote!(#key #auto)
}
