extern crate proc_macro;

use proc_macro::TokenStream;

/// Implements `rowbind::Record` for a struct with named fields.
///
/// Field attributes:
///
/// - `#[key]`: the column is part of the primary key
/// - `#[auto]`: a null value is left out of inserts and filled in by the database
/// - `#[column("name")]`: bind to `name` instead of the field name
/// - `#[skip]`: the field is not mapped
/// - `#[inherit]`: embed the bindings of a base record
///
/// Method bindings are declared on the struct with
/// `#[accessor(column = "name", get = method, set = method)]`.
#[proc_macro_derive(Record, attributes(key, auto, column, skip, inherit, accessor))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Implements `rowbind::Primitive` for a fieldless enum, stored as the text
/// of its variant names.
#[proc_macro_derive(Primitive)]
pub fn derive_primitive(input: TokenStream) -> TokenStream {
    match rowbind_codegen::generate_primitive(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
