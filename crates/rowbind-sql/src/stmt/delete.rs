use super::{Statement, TableName};

/// A `DELETE` of one row identified by its primary key columns.
#[derive(Debug, Clone)]
pub struct Delete {
    /// Target table
    pub from: TableName,

    /// Columns compared for equality in the `WHERE` clause
    pub filter: Vec<String>,
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}
