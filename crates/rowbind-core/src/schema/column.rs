use super::SqlType;

/// A physical column as reported by the database catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// The column name with the database's casing.
    pub real_name: String,

    /// The column's storage type.
    pub sql_type: SqlType,
}

impl ColumnInfo {
    pub fn new(real_name: impl Into<String>, sql_type: SqlType) -> ColumnInfo {
        ColumnInfo {
            real_name: real_name.into(),
            sql_type,
        }
    }

    /// The lowercase key records use to refer to this column.
    pub fn key(&self) -> String {
        self.real_name.to_lowercase()
    }
}
