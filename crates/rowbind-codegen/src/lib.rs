mod expand;
mod schema;

use proc_macro2::TokenStream;

/// Expands `#[derive(Record)]`.
pub fn generate(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemStruct = syn::parse2(input)?;
    let record = schema::Record::from_ast(&item)?;

    Ok(expand::record(&record))
}

/// Expands `#[derive(Primitive)]` for a fieldless enum stored as text.
pub fn generate_primitive(input: TokenStream) -> syn::Result<TokenStream> {
    let item: syn::ItemEnum = syn::parse2(input)?;
    let primitive = schema::TextEnum::from_ast(&item)?;

    Ok(expand::text_enum(&primitive))
}
