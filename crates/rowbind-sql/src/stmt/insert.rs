use super::{Statement, TableName};

/// A single-row `INSERT` with one placeholder per column.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Target table
    pub table: TableName,

    /// Columns to insert, in bind order. Empty inserts `DEFAULT VALUES`.
    pub columns: Vec<String>,

    /// Columns to return after the insert
    pub returning: Vec<String>,
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
