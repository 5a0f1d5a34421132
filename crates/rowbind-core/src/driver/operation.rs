mod execute;
pub use execute::Execute;

mod insert;
pub use insert::Insert;

mod query;
pub use query::Query;

use super::*;

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a statement and report the number of rows it affected
    Execute(Execute),

    /// Insert one row, optionally returning the generated columns
    Insert(Insert),

    /// Run a query and return its rows
    Query(Query),
}

impl Operation {
    pub fn sql(&self) -> &str {
        match self {
            Operation::Execute(op) => &op.sql,
            Operation::Insert(op) => &op.sql,
            Operation::Query(op) => &op.sql,
        }
    }

    pub fn params(&self) -> &[crate::stmt::DataValue] {
        match self {
            Operation::Execute(op) => &op.params,
            Operation::Insert(op) => &op.params,
            Operation::Query(op) => &op.params,
        }
    }
}
