use super::Operation;

use crate::stmt::DataValue;

#[derive(Debug, Clone)]
pub struct Query {
    /// The SQL query to execute
    pub sql: String,

    /// Positional parameters
    pub params: Vec<DataValue>,
}

impl From<Query> for Operation {
    fn from(value: Query) -> Self {
        Self::Query(value)
    }
}
