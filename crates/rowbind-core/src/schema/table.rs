use super::ColumnInfo;

use indexmap::IndexMap;

/// The resolved catalog of one table: its physical name and columns.
///
/// Columns are keyed by lowercase name and kept in the database's ordinal
/// order, which is the order statements list them in.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCatalog {
    /// Schema the table was resolved in, if any.
    pub schema: Option<String>,

    /// The table name with the database's casing.
    pub real_name: String,

    columns: IndexMap<String, ColumnInfo>,
}

impl TableCatalog {
    pub fn new(
        schema: Option<String>,
        real_name: impl Into<String>,
        columns: impl IntoIterator<Item = ColumnInfo>,
    ) -> TableCatalog {
        TableCatalog {
            schema,
            real_name: real_name.into(),
            columns: columns
                .into_iter()
                .map(|column| (column.key(), column))
                .collect(),
        }
    }

    /// An empty catalog, used when missing tables are tolerated.
    pub fn empty(schema: Option<String>, name: impl Into<String>) -> TableCatalog {
        TableCatalog::new(schema, name, [])
    }

    pub fn column(&self, key: &str) -> Option<&ColumnInfo> {
        self.columns.get(key)
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&str, &ColumnInfo)> + '_ {
        self.columns.iter().map(|(key, column)| (&key[..], column))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The schema-qualified physical name.
    pub fn qualified_name(&self) -> String {
        super::qualify(self.schema.as_deref(), &self.real_name)
    }
}
