use crate::schema::TextEnum;

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(item: &TextEnum, rowbind: &TokenStream) -> TokenStream {
    let ident = &item.ident;
    let name = ident.to_string();
    let variants = &item.variants;
    let labels: Vec<_> = variants.iter().map(|variant| variant.to_string()).collect();

    quote! {
        impl #rowbind::Primitive for #ident {
            fn ty() -> #rowbind::Type {
                #rowbind::Type::String
            }

            fn load(value: #rowbind::Value) -> #rowbind::Result<Self> {
                let text = match value {
                    #rowbind::Value::String(text) => text,
                    value => {
                        return #rowbind::Result::Err(#rowbind::Error::coercion(
                            value.ty(),
                            #rowbind::Type::String,
                        ))
                    }
                };

                match text.as_str() {
                    #( #labels => #rowbind::Result::Ok(#ident::#variants), )*
                    _ => #rowbind::Result::Err(#rowbind::Error::coercion_failed(
                        #rowbind::Type::String,
                        #rowbind::Type::String,
                        format!("`{}` is not a variant of `{}`", text, #name),
                    )),
                }
            }

            fn into_value(self) -> #rowbind::Value {
                let text = match self {
                    #( #ident::#variants => #labels, )*
                };

                #rowbind::Value::String(text.to_string())
            }
        }
    }
}
