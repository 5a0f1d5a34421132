mod column;
pub use column::ColumnInfo;

mod sql_type;
pub use sql_type::SqlType;

mod table;
pub use table::TableCatalog;

/// Qualifies `name` with `schema`, returning the bare name when there is no schema.
pub fn qualify(schema: Option<&str>, name: &str) -> String {
    match schema {
        Some(schema) if !schema.is_empty() => format!("{schema}.{name}"),
        _ => name.to_string(),
    }
}
