use super::Operation;

use crate::stmt::DataValue;

#[derive(Debug, Clone)]
pub struct Insert {
    /// The INSERT statement. When `returning` is set it ends with a `RETURNING` clause.
    pub sql: String,

    /// Positional parameters
    pub params: Vec<DataValue>,

    /// When `true`, the driver responds with the returned rows instead of a count.
    pub returning: bool,
}

impl From<Insert> for Operation {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}
