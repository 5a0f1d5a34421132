use super::{Statement, TableName};

/// `SELECT * FROM table` followed by a caller supplied clause.
///
/// The clause is emitted verbatim. Callers compose their own `WHERE`,
/// `ORDER BY` and `LIMIT` text.
#[derive(Debug, Clone)]
pub struct Select {
    pub from: TableName,
    pub clause: String,
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
