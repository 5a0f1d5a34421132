use super::{Statement, TableName};

/// An `UPDATE` of one row identified by its primary key columns.
#[derive(Debug, Clone)]
pub struct Update {
    /// Target table
    pub table: TableName,

    /// Columns assigned in the `SET` clause
    pub assignments: Vec<String>,

    /// Columns compared for equality in the `WHERE` clause
    pub filter: Vec<String>,
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
