use super::Operation;

use crate::stmt::DataValue;

#[derive(Debug, Clone)]
pub struct Execute {
    /// The SQL statement to execute
    pub sql: String,

    /// Positional parameters
    pub params: Vec<DataValue>,
}

impl From<Execute> for Operation {
    fn from(value: Execute) -> Self {
        Self::Execute(value)
    }
}
