use super::{Statement, TableName};

/// Advances a sequence and returns its new value.
#[derive(Debug, Clone)]
pub struct NextVal {
    pub sequence: TableName,
}

impl From<NextVal> for Statement {
    fn from(value: NextVal) -> Self {
        Self::NextVal(value)
    }
}
