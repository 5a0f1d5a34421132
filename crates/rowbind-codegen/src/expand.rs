mod record;
mod text_enum;

use crate::schema::{Record, TextEnum};

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn record(record: &Record) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);

    wrap_in_const(record::Expand { record, rowbind }.expand())
}

pub(super) fn text_enum(item: &TextEnum) -> TokenStream {
    let rowbind = quote!(_rowbind::codegen_support);

    wrap_in_const(text_enum::expand(item, &rowbind))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use rowbind as _rowbind;
            #code
        };
    }
}
